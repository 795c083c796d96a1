use std::collections::VecDeque;

use crate::tree::{CommandTree, NodeId};

pub const CHAIN_LABEL: &str = "Command:";

/// The printable command chain for `id`, e.g. `Command: root a b`.
pub fn command_chain(tree: &CommandTree, id: NodeId) -> String {
    // Ascending visits the leaf first, so each name goes in front.
    let mut names = VecDeque::new();
    for node in tree.ancestors(id) {
        names.push_front(tree.node(node).name.as_str());
    }
    format!(
        "{CHAIN_LABEL} {}",
        names.into_iter().collect::<Vec<_>>().join(" ")
    )
}
