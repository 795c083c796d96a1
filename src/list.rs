//! Selectable, filterable list of subcommands.
//!
//! Selection and scrolling are kept in a `ListPickerState` over the
//! *filtered* view; the filter text lives in an `InputState` and is matched
//! with nucleo against each command's name and aliases.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use nucleo_matcher::pattern::{CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};
use ratatui_interact::components::{InputState, ListPickerState};

use crate::tree::{CommandTree, NodeId};

/// Number of rows the list occupies in the usage document.
pub const LIST_HEIGHT: usize = 10;

#[derive(Debug, Clone)]
struct Entry {
    id: NodeId,
    name: String,
    aliases: Vec<String>,
}

pub struct SubCommandList {
    entries: Vec<Entry>,
    /// Indices into `entries` that pass the filter, in source order.
    filtered: Vec<usize>,
    state: ListPickerState,
    filter_input: InputState,
    /// Whether the filter input is receiving keystrokes.
    pub filtering: bool,
}

impl SubCommandList {
    pub fn new(tree: &CommandTree, items: &[NodeId]) -> Self {
        let mut list = Self {
            entries: Vec::new(),
            filtered: Vec::new(),
            state: ListPickerState::new(0),
            filter_input: InputState::empty(),
            filtering: false,
        };
        list.set_items(tree, items);
        list
    }

    /// Replace the items, clearing the filter and selecting the first item.
    pub fn set_items(&mut self, tree: &CommandTree, items: &[NodeId]) {
        self.entries = items
            .iter()
            .map(|&id| {
                let node = tree.node(id);
                Entry {
                    id,
                    name: node.name.clone(),
                    aliases: node.aliases.clone(),
                }
            })
            .collect();
        self.filtering = false;
        self.filter_input.clear();
        self.refilter();
    }

    /// All items, ignoring the filter.
    pub fn items(&self) -> Vec<NodeId> {
        self.entries.iter().map(|e| e.id).collect()
    }

    /// Items that pass the current filter.
    pub fn visible_items(&self) -> Vec<NodeId> {
        self.filtered.iter().map(|&i| self.entries[i].id).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn selected_index(&self) -> usize {
        self.state.selected_index
    }

    pub fn selected_item(&self) -> Option<NodeId> {
        self.filtered
            .get(self.state.selected_index)
            .map(|&i| self.entries[i].id)
    }

    pub fn filter(&self) -> &str {
        self.filter_input.text()
    }

    /// Whether a filter is applied, typed or not.
    pub fn filter_active(&self) -> bool {
        !self.filter().is_empty()
    }

    /// First filtered position shown in the list window.
    pub fn scroll(&self) -> usize {
        self.state.scroll as usize
    }

    /// `(item, is_selected)` for each row currently inside the list window.
    pub fn window(&self) -> Vec<(NodeId, bool)> {
        let selected = self.state.selected_index;
        self.filtered
            .iter()
            .enumerate()
            .skip(self.scroll())
            .take(LIST_HEIGHT)
            .map(|(pos, &i)| (self.entries[i].id, pos == selected))
            .collect()
    }

    /// Rows reserved for the list. Does not shrink while filtering, so the
    /// document height only depends on the items.
    pub fn height(&self) -> usize {
        self.entries.len().min(LIST_HEIGHT)
    }

    /// Handle a key. Returns whether the list used it.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if self.filtering {
            return self.handle_filter_key(key);
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return false;
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_up();
                true
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_down();
                true
            }
            KeyCode::Char('/') if !self.entries.is_empty() => {
                self.filtering = true;
                self.filter_input.clear();
                self.refilter();
                true
            }
            KeyCode::Esc if self.filter_active() => {
                self.filter_input.clear();
                self.refilter();
                true
            }
            _ => false,
        }
    }

    fn handle_filter_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc => {
                self.filtering = false;
                self.filter_input.clear();
                self.refilter();
            }
            KeyCode::Enter => {
                // Keep the filter applied
                self.filtering = false;
            }
            KeyCode::Backspace => {
                self.filter_input.delete_char_backward();
                self.refilter();
            }
            KeyCode::Char(c) => {
                self.filter_input.insert_char(c);
                self.refilter();
            }
            KeyCode::Up => self.move_up(),
            KeyCode::Down => self.move_down(),
            _ => {}
        }
        true
    }

    fn move_up(&mut self) {
        self.state.select_prev();
        self.state.ensure_visible(LIST_HEIGHT);
    }

    fn move_down(&mut self) {
        self.state.select_next();
        self.state.ensure_visible(LIST_HEIGHT);
    }

    /// Recompute the filtered view and go back to its first item.
    fn refilter(&mut self) {
        let pattern = self.filter_input.text().to_string();
        self.filtered = if pattern.is_empty() {
            (0..self.entries.len()).collect()
        } else {
            let mut matcher = Matcher::new(Config::DEFAULT);
            self.entries
                .iter()
                .enumerate()
                .filter(|(_, e)| {
                    std::iter::once(&e.name)
                        .chain(e.aliases.iter())
                        .any(|text| fuzzy_match_score(text, &pattern, &mut matcher) > 0)
                })
                .map(|(i, _)| i)
                .collect()
        };
        self.state = ListPickerState::new(self.filtered.len());
        self.state.select(0);
    }
}

/// Fuzzy match using a nucleo `Pattern`; 0 means no match.
pub fn fuzzy_match_score(text: &str, pattern: &str, matcher: &mut Matcher) -> u32 {
    let pattern = Pattern::parse(pattern, CaseMatching::Smart, Normalization::Smart);

    let mut haystack_buf = Vec::new();
    let haystack = Utf32Str::new(text, &mut haystack_buf);

    pattern.score(haystack, matcher).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::CommandNode;
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn sample() -> (CommandTree, Vec<NodeId>) {
        let mut tree = CommandTree::new(CommandNode::new("root"));
        let root = tree.root();
        let ids = vec![
            tree.add_child(root, CommandNode::new("init")),
            tree.add_child(root, CommandNode::new("build")),
            tree.add_child(root, CommandNode::new("plugin").aliases(["pl"])),
            tree.add_child(root, CommandNode::new("deploy")),
        ];
        (tree, ids)
    }

    #[test]
    fn test_new_selects_first_item() {
        let (tree, ids) = sample();
        let list = SubCommandList::new(&tree, &ids);
        assert_eq!(list.selected_index(), 0);
        assert_eq!(list.selected_item(), Some(ids[0]));
        assert_eq!(list.height(), 4);
    }

    #[test]
    fn test_empty_list_has_no_selection() {
        let (tree, _) = sample();
        let list = SubCommandList::new(&tree, &[]);
        assert!(list.is_empty());
        assert_eq!(list.selected_item(), None);
        assert_eq!(list.height(), 0);
    }

    #[test]
    fn test_down_and_up_move_selection() {
        let (tree, ids) = sample();
        let mut list = SubCommandList::new(&tree, &ids);
        assert!(list.handle_key(key(KeyCode::Down)));
        assert!(list.handle_key(key(KeyCode::Char('j'))));
        assert_eq!(list.selected_item(), Some(ids[2]));
        assert!(list.handle_key(key(KeyCode::Char('k'))));
        assert_eq!(list.selected_item(), Some(ids[1]));
    }

    #[test]
    fn test_filter_narrows_and_reselects() {
        let (tree, ids) = sample();
        let mut list = SubCommandList::new(&tree, &ids);
        list.handle_key(key(KeyCode::Down));

        list.handle_key(key(KeyCode::Char('/')));
        assert!(list.filtering);
        for c in "dep".chars() {
            list.handle_key(key(KeyCode::Char(c)));
        }
        assert_eq!(list.filter(), "dep");
        assert_eq!(list.visible_items(), vec![ids[3]]);
        assert_eq!(list.selected_item(), Some(ids[3]));

        // Typing keys like 'j' goes into the filter, not the selection
        list.handle_key(key(KeyCode::Backspace));
        assert_eq!(list.filter(), "de");

        list.handle_key(key(KeyCode::Enter));
        assert!(!list.filtering);
        assert!(list.filter_active());
    }

    #[test]
    fn test_filter_matches_aliases() {
        let (tree, ids) = sample();
        let mut list = SubCommandList::new(&tree, &ids);
        list.handle_key(key(KeyCode::Char('/')));
        list.handle_key(key(KeyCode::Char('p')));
        list.handle_key(key(KeyCode::Char('l')));
        assert!(list.visible_items().contains(&ids[2]));
        assert!(!list.visible_items().contains(&ids[0]));
    }

    #[test]
    fn test_esc_clears_filter() {
        let (tree, ids) = sample();
        let mut list = SubCommandList::new(&tree, &ids);
        list.handle_key(key(KeyCode::Char('/')));
        list.handle_key(key(KeyCode::Char('b')));
        list.handle_key(key(KeyCode::Enter));
        assert_eq!(list.visible_items(), vec![ids[1]]);

        assert!(list.handle_key(key(KeyCode::Esc)));
        assert!(!list.filter_active());
        assert_eq!(list.visible_items(), ids);
        assert!(!list.handle_key(key(KeyCode::Esc)));
    }

    #[test]
    fn test_height_fixed_while_filtering() {
        let (tree, ids) = sample();
        let mut list = SubCommandList::new(&tree, &ids);
        list.handle_key(key(KeyCode::Char('/')));
        list.handle_key(key(KeyCode::Char('z')));
        assert!(list.visible_items().is_empty());
        assert_eq!(list.height(), 4);
        assert_eq!(list.selected_item(), None);
    }

    #[test]
    fn test_set_items_resets_filter_and_selection() {
        let (tree, ids) = sample();
        let mut list = SubCommandList::new(&tree, &ids);
        list.handle_key(key(KeyCode::Down));
        list.handle_key(key(KeyCode::Char('/')));
        list.handle_key(key(KeyCode::Char('i')));

        list.set_items(&tree, &ids[1..]);
        assert!(!list.filtering);
        assert_eq!(list.filter(), "");
        assert_eq!(list.selected_index(), 0);
        assert_eq!(list.selected_item(), Some(ids[1]));
    }

    #[test]
    fn test_window_marks_selection() {
        let (tree, ids) = sample();
        let mut list = SubCommandList::new(&tree, &ids);
        list.handle_key(key(KeyCode::Down));
        let window = list.window();
        assert_eq!(window.len(), 4);
        assert_eq!(window[1], (ids[1], true));
        assert!(!window[0].1);
    }

    #[test]
    fn test_window_scrolls_past_list_height() {
        let mut tree = CommandTree::new(CommandNode::new("root"));
        let root = tree.root();
        let ids: Vec<NodeId> = (0..15)
            .map(|i| tree.add_child(root, CommandNode::new(format!("cmd{i}"))))
            .collect();
        let mut list = SubCommandList::new(&tree, &ids);
        assert_eq!(list.height(), LIST_HEIGHT);
        for _ in 0..12 {
            list.handle_key(key(KeyCode::Down));
        }
        assert_eq!(list.selected_item(), Some(ids[12]));
        let window = list.window();
        assert_eq!(window.len(), LIST_HEIGHT);
        assert!(window.iter().any(|&(id, selected)| id == ids[12] && selected));
    }

    #[test]
    fn test_fuzzy_match_score() {
        let mut matcher = Matcher::new(Config::DEFAULT);
        assert!(fuzzy_match_score("deploy", "dpl", &mut matcher) > 0);
        assert_eq!(fuzzy_match_score("init", "xyz", &mut matcher), 0);
    }
}
