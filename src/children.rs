use crate::tree::{CommandTree, NodeId};

/// Name of the pseudo-command that is listed even when it is not available.
pub const HELP_COMMAND: &str = "help";

/// The navigable children of `id`, in source order: every available child
/// plus any child named `help`. This does not look past a depth of 1.
pub fn project(tree: &CommandTree, id: NodeId) -> Vec<NodeId> {
    tree.children(id)
        .iter()
        .copied()
        .filter(|&c| {
            let node = tree.node(c);
            node.name == HELP_COMMAND || node.available
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::CommandNode;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_project_skips_unavailable_keeps_help() {
        let mut tree = CommandTree::new(CommandNode::new("root"));
        let root = tree.root();
        let init = tree.add_child(root, CommandNode::new("init"));
        tree.add_child(root, CommandNode::new("hidden").available(false));
        let help = tree.add_child(root, CommandNode::new("help").available(false));
        let build = tree.add_child(root, CommandNode::new("build"));

        assert_eq!(project(&tree, root), vec![init, help, build]);
    }

    #[test]
    fn test_project_preserves_insertion_order() {
        let mut tree = CommandTree::new(CommandNode::new("root"));
        let root = tree.root();
        let z = tree.add_child(root, CommandNode::new("zeta"));
        let a = tree.add_child(root, CommandNode::new("alpha"));
        assert_eq!(project(&tree, root), vec![z, a]);
    }

    #[test]
    fn test_project_leaf_is_empty() {
        let tree = CommandTree::new(CommandNode::new("root"));
        assert!(project(&tree, tree.root()).is_empty());
    }
}
