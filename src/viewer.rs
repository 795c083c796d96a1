//! Terminal host for the help screen.
//!
//! [`HelpViewer`] owns the terminal session: it sets up raw mode (inline or
//! on the alternate screen), feeds terminal events to a
//! [`NavigationEngine`] and draws each frame until the user quits or prints
//! a command chain.

use std::io::stdout;

use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture};
use ratatui::{DefaultTerminal, TerminalOptions};

use crate::engine::{Action, Event, NavigationEngine};
use crate::error::{Error, Result};
use crate::keys;
use crate::options::Options;
use crate::tree::{CommandTree, NodeId};
use crate::ui;

#[derive(Debug, Clone, Default)]
pub struct HelpViewer {
    options: Options,
}

impl HelpViewer {
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Show the help screen for `entry` and print the command chain to
    /// stdout if the user asked for it.
    pub fn help(&self, tree: &CommandTree, entry: NodeId) -> Result<()> {
        if let Some(chain) = self.run(tree, entry)? {
            println!("{chain}");
        }
        Ok(())
    }

    /// Like [`HelpViewer::help`], starting from the command named by `path`
    /// below the root.
    pub fn help_path<S: AsRef<str>>(&self, tree: &CommandTree, path: &[S]) -> Result<()> {
        let entry = resolve(tree, path)?;
        self.help(tree, entry)
    }

    /// Show the help screen for `entry`. Returns the command chain when the
    /// session ended with a print, `None` when the user quit.
    pub fn run(&self, tree: &CommandTree, entry: NodeId) -> Result<Option<String>> {
        let mut engine = NavigationEngine::new(tree, entry, &self.options);
        tracing::info!(
            command = %tree.command_path(entry),
            alt_screen = self.options.alt_screen,
            "help screen started"
        );

        if self.options.mouse_scroll {
            crossterm::execute!(stdout(), EnableMouseCapture)?;
        }

        let result = self
            .init_terminal()
            .and_then(|mut terminal| run_event_loop(&mut terminal, &mut engine));

        let restored = ratatui::try_restore().map_err(Error::from);
        let released = if self.options.mouse_scroll {
            crossterm::execute!(stdout(), DisableMouseCapture).map_err(Error::from)
        } else {
            Ok(())
        };
        first_error([result, restored, released])?;

        let chain = engine.command_chain().map(str::to_string);
        tracing::info!(printed = chain.is_some(), "help screen closed");
        Ok(chain)
    }

    fn init_terminal(&self) -> Result<DefaultTerminal> {
        if self.options.alt_screen {
            return Ok(ratatui::try_init()?);
        }
        let (_, rows) = crossterm::terminal::size()?;
        let terminal = ratatui::try_init_with_options(TerminalOptions {
            viewport: ratatui::Viewport::Inline(rows),
        })?;
        Ok(terminal)
    }
}

/// Find the command named by `path` below the root.
pub fn resolve<S: AsRef<str>>(tree: &CommandTree, path: &[S]) -> Result<NodeId> {
    tree.find(path).ok_or_else(|| {
        let words: Vec<&str> = path.iter().map(AsRef::as_ref).collect();
        Error::UnknownCommand(words.join(" "))
    })
}

/// The first failure in order: the event loop before the cleanup steps.
fn first_error(results: [Result<()>; 3]) -> Result<()> {
    results.into_iter().collect()
}

fn run_event_loop(terminal: &mut DefaultTerminal, engine: &mut NavigationEngine) -> Result<()> {
    let size = terminal.size()?;
    engine.handle(Event::Resize {
        width: size.width,
        height: size.height,
    });

    loop {
        terminal.draw(|frame| ui::render(frame, engine))?;

        let Some(event) = keys::translate_event(event::read()?, engine.filtering()) else {
            continue;
        };
        match engine.handle(event) {
            Action::None => {}
            Action::Quit | Action::Print => return Ok(()),
        }
    }
}
