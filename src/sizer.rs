//! Heights used to size the viewport.

use crate::list::SubCommandList;
use crate::tree::{CommandTree, NodeId};
use crate::usage_doc::UsageComposer;

/// Key help shown on every frame.
pub const HELP_TEXT: &str =
    "↑/k up • ↓/j down • / to filter • p to print • b to go back • enter to select • q, ctrl+c to quit";

/// Extra hint shown when the document does not fit the window.
pub const SCROLL_HINT: &str = "ctrl+k up • ctrl+j down • mouse to scroll";

/// Rows taken by the border around the document, when shown.
const BORDER_ROWS: usize = 2;

/// Rendered height of the full usage document for `id`.
pub fn measure(
    composer: &UsageComposer,
    tree: &CommandTree,
    id: NodeId,
    list: &SubCommandList,
) -> usize {
    let lines = composer.compose(tree, id, list).lines.len();
    if composer.show_border() {
        lines + BORDER_ROWS
    } else {
        lines
    }
}

/// Whether the document is taller than the window can show next to the
/// footer.
pub fn needs_scroll_hint(content_height: usize, window_height: usize) -> bool {
    content_height > window_height.saturating_sub(2)
}

pub fn footer_lines(content_height: usize, window_height: usize) -> Vec<&'static str> {
    let mut lines = vec![HELP_TEXT];
    if needs_scroll_hint(content_height, window_height) {
        lines.push(SCROLL_HINT);
    }
    lines
}

/// One line of key help, plus one when the scroll hint is shown.
pub fn footer_height(content_height: usize, window_height: usize) -> usize {
    footer_lines(content_height, window_height).len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::children;
    use crate::options::Options;
    use crate::tree::CommandNode;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_footer_height() {
        assert_eq!(footer_height(10, 40), 1);
        assert_eq!(footer_height(38, 40), 1);
        assert_eq!(footer_height(39, 40), 2);
        assert_eq!(footer_height(5, 0), 2);
    }

    #[test]
    fn test_measure_counts_border() {
        let mut tree = CommandTree::new(CommandNode::new("root").short("Root command"));
        tree.add_child(tree.root(), CommandNode::new("init"));
        tree.add_child(tree.root(), CommandNode::new("build"));
        let list = SubCommandList::new(&tree, &children::project(&tree, tree.root()));

        let bordered = UsageComposer::new(&Options::default());
        let plain = UsageComposer::new(&Options::default().with_border(false));
        let lines = plain.compose(&tree, tree.root(), &list).lines.len();

        assert_eq!(measure(&plain, &tree, tree.root(), &list), lines);
        assert_eq!(measure(&bordered, &tree, tree.root(), &list), lines + 2);
    }

    #[test]
    fn test_measure_grows_with_children() {
        let mut tree = CommandTree::new(CommandNode::new("root"));
        let composer = UsageComposer::new(&Options::default());
        let empty = SubCommandList::new(&tree, &[]);
        let leaf_height = measure(&composer, &tree, tree.root(), &empty);

        tree.add_child(tree.root(), CommandNode::new("a"));
        tree.add_child(tree.root(), CommandNode::new("b"));
        let list = SubCommandList::new(&tree, &children::project(&tree, tree.root()));
        // Sub command header, two rows, a blank line and the `[command]` usage line
        assert_eq!(measure(&composer, &tree, tree.root(), &list), leaf_height + 5);
    }
}
