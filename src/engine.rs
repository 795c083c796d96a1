//! Navigation state machine for the help screen.
//!
//! The engine tracks which command is shown, keeps the viewport sized to the
//! current document and turns events into transitions. Content height is
//! only recomputed when the command changes; scroll and filter keys never
//! trigger it.

use crossterm::event::{KeyEvent, MouseEvent};
use tracing::debug;

use crate::chain::command_chain;
use crate::children;
use crate::list::SubCommandList;
use crate::options::Options;
use crate::sizer;
use crate::tree::{CommandTree, NodeId};
use crate::usage_doc::UsageComposer;
use crate::viewport::Viewport;

/// Input accepted by [`NavigationEngine::handle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Resize { width: u16, height: u16 },
    /// Enter the selected subcommand.
    Select,
    /// Go up to the parent command.
    Back,
    /// Finish with the command chain of the current command.
    Print,
    Quit,
    /// Any other key, forwarded to the list and the viewport.
    Key(KeyEvent),
    Mouse(MouseEvent),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Browsing,
    /// Terminal; holds the printed command chain.
    Printed(String),
    /// Terminal.
    Quit,
}

/// What the event loop should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    Print,
}

pub struct NavigationEngine<'t> {
    tree: &'t CommandTree,
    composer: UsageComposer,
    current: NodeId,
    list: SubCommandList,
    viewport: Viewport,
    window_width: u16,
    window_height: u16,
    mode: Mode,
}

impl<'t> NavigationEngine<'t> {
    pub fn new(tree: &'t CommandTree, entry: NodeId, options: &Options) -> Self {
        let list = SubCommandList::new(tree, &children::project(tree, entry));
        let mut engine = Self {
            tree,
            composer: UsageComposer::new(options),
            current: entry,
            list,
            viewport: Viewport::new(options.mouse_scroll),
            window_width: 0,
            window_height: 0,
            mode: Mode::Browsing,
        };
        let content_height = engine.measure();
        engine.viewport.set_content_height(content_height);
        engine
    }

    pub fn tree(&self) -> &'t CommandTree {
        self.tree
    }

    pub fn composer(&self) -> &UsageComposer {
        &self.composer
    }

    pub fn current(&self) -> NodeId {
        self.current
    }

    pub fn list(&self) -> &SubCommandList {
        &self.list
    }

    /// Navigable children of the current command, ignoring the filter.
    pub fn visible_children(&self) -> Vec<NodeId> {
        self.list.items()
    }

    /// Position of the selected child in
    /// [`visible_children`](Self::visible_children), also while a filter
    /// hides some of them. 0 when nothing is selected.
    pub fn selection_index(&self) -> usize {
        self.list
            .selected_item()
            .and_then(|id| self.list.items().iter().position(|&c| c == id))
            .unwrap_or(0)
    }

    pub fn window_size(&self) -> (u16, u16) {
        (self.window_width, self.window_height)
    }

    pub fn scroll_offset(&self) -> usize {
        self.viewport.y_offset()
    }

    pub fn content_height(&self) -> usize {
        self.viewport.content_height()
    }

    pub fn viewport_height(&self) -> usize {
        self.viewport.height()
    }

    pub fn footer_height(&self) -> usize {
        sizer::footer_height(self.content_height(), self.window_height as usize)
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn is_browsing(&self) -> bool {
        self.mode == Mode::Browsing
    }

    /// The printed chain, once the session ended with Print.
    pub fn command_chain(&self) -> Option<&str> {
        match &self.mode {
            Mode::Printed(chain) => Some(chain),
            _ => None,
        }
    }

    /// Whether keys should go to the list's filter input.
    pub fn filtering(&self) -> bool {
        self.list.filtering
    }

    /// Apply one event. Events after a terminal mode are ignored.
    pub fn handle(&mut self, event: Event) -> Action {
        if !self.is_browsing() {
            return Action::None;
        }

        match event {
            Event::Resize { width, height } => {
                self.window_width = width;
                self.window_height = height;
                self.resize_viewport();
                debug!(
                    width,
                    height,
                    viewport_height = self.viewport.height(),
                    "window resized"
                );
                Action::None
            }
            Event::Select => {
                if let Some(child) = self.list.selected_item() {
                    self.switch_to(child);
                }
                Action::None
            }
            Event::Back => {
                if let Some(parent) = self.tree.parent(self.current) {
                    self.switch_to(parent);
                }
                Action::None
            }
            Event::Print => {
                let chain = command_chain(self.tree, self.current);
                debug!(%chain, "printing command chain");
                self.mode = Mode::Printed(chain);
                Action::Print
            }
            Event::Quit => {
                debug!("quit");
                self.mode = Mode::Quit;
                Action::Quit
            }
            Event::Key(key) => {
                let filtering = self.list.filtering;
                self.list.handle_key(key);
                if !filtering {
                    self.viewport.handle_key(key);
                }
                self.clamp_viewport();
                Action::None
            }
            Event::Mouse(mouse) => {
                self.viewport.handle_mouse(mouse);
                self.clamp_viewport();
                Action::None
            }
        }
    }

    /// Show `id`: new children, selection back to the top, fresh content
    /// height and the viewport scrolled to the top.
    fn switch_to(&mut self, id: NodeId) {
        self.current = id;
        let items = children::project(self.tree, id);
        self.list.set_items(self.tree, &items);
        let content_height = self.measure();
        self.viewport.set_content_height(content_height);
        self.resize_viewport();
        debug!(
            command = %self.tree.command_path(id),
            content_height,
            children = items.len(),
            "switched command"
        );
    }

    fn measure(&self) -> usize {
        sizer::measure(&self.composer, self.tree, self.current, &self.list)
    }

    fn resize_viewport(&mut self) {
        let available = (self.window_height as usize).saturating_sub(self.footer_height());
        self.viewport.set_height(available);
        self.clamp_viewport();
        self.viewport.set_y_offset(0);
    }

    fn clamp_viewport(&mut self) {
        if self.viewport.height() > self.viewport.content_height() {
            self.viewport.set_height(self.viewport.content_height());
        }
    }
}
