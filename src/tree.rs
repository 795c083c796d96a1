//! Arena-backed command tree.
//!
//! The navigator never owns commands: it holds [`NodeId`]s into a
//! [`CommandTree`] that outlives it. Trees are built programmatically with
//! [`CommandTree::add_child`], or converted from a usage-lib [`usage::Spec`]
//! or a [`clap::Command`].

use usage::{Spec, SpecCommand, SpecFlag};

/// Index of a node inside a [`CommandTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Descriptive data for one command. Everything except `parent` and
/// `children` is supplied by whoever builds the tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandNode {
    pub name: String,
    pub short: String,
    pub long: String,
    pub version: String,
    pub aliases: Vec<String>,
    pub runnable: bool,
    pub use_line: String,
    pub example: String,
    /// Pre-formatted local flag usages. Empty means the command has none.
    pub local_flags: String,
    /// Pre-formatted usages of flags inherited from ancestors.
    pub inherited_flags: String,
    /// Not hidden and not deprecated.
    pub available: bool,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl CommandNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            runnable: true,
            available: true,
            ..Default::default()
        }
    }

    pub fn short(mut self, short: impl Into<String>) -> Self {
        self.short = short.into();
        self
    }

    pub fn long(mut self, long: impl Into<String>) -> Self {
        self.long = long.into();
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    pub fn runnable(mut self, runnable: bool) -> Self {
        self.runnable = runnable;
        self
    }

    pub fn use_line(mut self, use_line: impl Into<String>) -> Self {
        self.use_line = use_line.into();
        self
    }

    pub fn example(mut self, example: impl Into<String>) -> Self {
        self.example = example.into();
        self
    }

    pub fn local_flags(mut self, flags: impl Into<String>) -> Self {
        self.local_flags = flags.into();
        self
    }

    pub fn inherited_flags(mut self, flags: impl Into<String>) -> Self {
        self.inherited_flags = flags.into();
        self
    }

    pub fn available(mut self, available: bool) -> Self {
        self.available = available;
        self
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn has_example(&self) -> bool {
        !self.example.is_empty()
    }

    /// `"name, alias1, alias2"`, as shown in the Aliases section.
    pub fn name_and_aliases(&self) -> String {
        std::iter::once(self.name.as_str())
            .chain(self.aliases.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Owns every [`CommandNode`]. Children can only be appended under existing
/// nodes, so parent chains always terminate at the root.
#[derive(Debug, Clone)]
pub struct CommandTree {
    nodes: Vec<CommandNode>,
}

impl CommandTree {
    pub fn new(root: CommandNode) -> Self {
        let mut root = root;
        root.parent = None;
        root.children.clear();
        Self { nodes: vec![root] }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Append `node` as the last child of `parent`.
    pub fn add_child(&mut self, parent: NodeId, node: CommandNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        let mut node = node;
        node.parent = Some(parent);
        node.children.clear();
        self.nodes.push(node);
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn node(&self, id: NodeId) -> &CommandNode {
        &self.nodes[id.0]
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// The node itself followed by each ancestor up to the root.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: Some(id),
        }
    }

    /// Names from the root down to `id`, joined with single spaces.
    pub fn command_path(&self, id: NodeId) -> String {
        let mut names: Vec<&str> = self
            .ancestors(id)
            .map(|a| self.node(a).name.as_str())
            .collect();
        names.reverse();
        names.join(" ")
    }

    pub fn has_available_sub_commands(&self, id: NodeId) -> bool {
        self.children(id)
            .iter()
            .any(|&c| self.node(c).available)
    }

    /// Resolve a path of command names (aliases accepted) below the root.
    /// An empty path resolves to the root.
    pub fn find<S: AsRef<str>>(&self, path: &[S]) -> Option<NodeId> {
        let mut current = self.root();
        for name in path {
            let name = name.as_ref();
            current = *self.children(current).iter().find(|&&c| {
                let node = self.node(c);
                node.name == name || node.aliases.iter().any(|a| a == name)
            })?;
        }
        Some(current)
    }

    /// Build a tree from a usage-lib spec. The root is named after the
    /// spec's `bin` (falling back to its `name`).
    pub fn from_spec(spec: &Spec) -> Self {
        let root_name = if spec.bin.is_empty() {
            spec.name.clone()
        } else {
            spec.bin.clone()
        };
        let long = spec
            .about_long
            .clone()
            .or_else(|| spec.about.clone())
            .unwrap_or_default();
        let mut root = spec_node(&root_name, &spec.cmd, &root_name, &[])
            .version(spec.version.clone().unwrap_or_default());
        if root.long.is_empty() {
            root.long = long.clone();
        }
        if root.short.is_empty() {
            root.short = spec.about.clone().unwrap_or_default();
        }
        let mut tree = Self::new(root);
        let globals: Vec<&SpecFlag> = spec.cmd.flags.iter().filter(|f| f.global).collect();
        let root_id = tree.root();
        tree.add_spec_children(root_id, &spec.cmd, &root_name, &globals);
        tree
    }

    fn add_spec_children(
        &mut self,
        parent: NodeId,
        cmd: &SpecCommand,
        parent_path: &str,
        inherited: &[&SpecFlag],
    ) {
        for (name, sub) in &cmd.subcommands {
            let path = format!("{parent_path} {name}");
            let id = self.add_child(parent, spec_node(name, sub, &path, inherited));

            let mut globals = inherited.to_vec();
            globals.extend(sub.flags.iter().filter(|f| f.global));
            self.add_spec_children(id, sub, &path, &globals);
        }
    }

    /// Build a tree from a clap command. Global args of a command are listed
    /// as inherited flags on its descendants.
    pub fn from_clap(cmd: &clap::Command) -> Self {
        let name = cmd.get_name().to_string();
        let root = clap_node(cmd, &name, &[]);
        let mut tree = Self::new(root);
        let globals: Vec<&clap::Arg> = cmd.get_arguments().filter(|a| a.is_global_set()).collect();
        let root_id = tree.root();
        tree.add_clap_children(root_id, cmd, &name, &globals);
        tree
    }

    fn add_clap_children(
        &mut self,
        parent: NodeId,
        cmd: &clap::Command,
        parent_path: &str,
        inherited: &[&clap::Arg],
    ) {
        for sub in cmd.get_subcommands() {
            let path = format!("{parent_path} {}", sub.get_name());
            let id = self.add_child(parent, clap_node(sub, &path, inherited));

            let mut globals = inherited.to_vec();
            globals.extend(sub.get_arguments().filter(|a| a.is_global_set()));
            self.add_clap_children(id, sub, &path, &globals);
        }
    }
}

/// Iterator returned by [`CommandTree::ancestors`].
pub struct Ancestors<'a> {
    tree: &'a CommandTree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.next?;
        self.next = self.tree.parent(id);
        Some(id)
    }
}

// --- usage-lib conversion ---

fn spec_node(name: &str, cmd: &SpecCommand, path: &str, inherited: &[&SpecFlag]) -> CommandNode {
    let local: Vec<&SpecFlag> = cmd.flags.iter().filter(|f| !f.hide).collect();
    let inherited: Vec<&SpecFlag> = inherited
        .iter()
        .copied()
        .filter(|f| !f.hide && !local.iter().any(|l| l.name == f.name))
        .collect();

    let mut use_line = path.to_string();
    if !local.is_empty() || !inherited.is_empty() {
        use_line.push_str(" [flags]");
    }
    for arg in cmd.args.iter().filter(|a| !a.hide) {
        if arg.required {
            use_line.push_str(&format!(" <{}>", arg.name));
        } else {
            use_line.push_str(&format!(" [{}]", arg.name));
        }
    }

    let example = cmd
        .examples
        .iter()
        .map(|e| e.code.trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n");

    CommandNode::new(name)
        .short(cmd.help.clone().unwrap_or_default())
        .long(cmd.help_long.clone().unwrap_or_default())
        .aliases(cmd.aliases.iter().cloned())
        .runnable(!cmd.subcommand_required || cmd.subcommands.is_empty())
        .use_line(use_line)
        .example(example)
        .local_flags(format_flag_usages(local.iter().map(|f| spec_flag_usage(f))))
        .inherited_flags(format_flag_usages(inherited.iter().map(|f| spec_flag_usage(f))))
        .available(!cmd.hide && cmd.deprecated.is_none())
}

fn spec_flag_usage(flag: &SpecFlag) -> (String, String) {
    let mut parts = Vec::new();
    for s in &flag.short {
        parts.push(format!("-{s}"));
    }
    for l in &flag.long {
        parts.push(format!("--{l}"));
    }
    let mut display = if parts.is_empty() {
        flag.name.clone()
    } else {
        parts.join(", ")
    };
    if let Some(arg) = &flag.arg {
        display.push_str(&format!(" <{}>", arg.name));
    }
    (display, flag.help.clone().unwrap_or_default())
}

// --- clap conversion ---

fn clap_node(cmd: &clap::Command, path: &str, inherited: &[&clap::Arg]) -> CommandNode {
    let local: Vec<&clap::Arg> = cmd
        .get_arguments()
        .filter(|a| !a.is_positional() && !a.is_hide_set())
        .collect();
    let inherited: Vec<&clap::Arg> = inherited
        .iter()
        .copied()
        .filter(|a| !a.is_hide_set() && !local.iter().any(|l| l.get_id() == a.get_id()))
        .collect();

    let mut use_line = path.to_string();
    if !local.is_empty() || !inherited.is_empty() {
        use_line.push_str(" [flags]");
    }
    for arg in cmd.get_positionals().filter(|a| !a.is_hide_set()) {
        if arg.is_required_set() {
            use_line.push_str(&format!(" <{}>", arg.get_id()));
        } else {
            use_line.push_str(&format!(" [{}]", arg.get_id()));
        }
    }

    CommandNode::new(cmd.get_name())
        .short(cmd.get_about().map(ToString::to_string).unwrap_or_default())
        .long(cmd.get_long_about().map(ToString::to_string).unwrap_or_default())
        .version(cmd.get_version().unwrap_or_default())
        .aliases(cmd.get_visible_aliases())
        .runnable(!cmd.is_subcommand_required_set())
        .use_line(use_line)
        .example(cmd.get_after_help().map(ToString::to_string).unwrap_or_default())
        .local_flags(format_flag_usages(local.iter().map(|a| clap_flag_usage(a))))
        .inherited_flags(format_flag_usages(inherited.iter().map(|a| clap_flag_usage(a))))
        .available(!cmd.is_hide_set())
}

fn clap_flag_usage(arg: &clap::Arg) -> (String, String) {
    let mut parts = Vec::new();
    if let Some(s) = arg.get_short() {
        parts.push(format!("-{s}"));
    }
    if let Some(l) = arg.get_long() {
        parts.push(format!("--{l}"));
    }
    let mut display = if parts.is_empty() {
        arg.get_id().to_string()
    } else {
        parts.join(", ")
    };
    if arg.get_action().takes_values() {
        let value = arg
            .get_value_names()
            .and_then(|names| names.first())
            .map(ToString::to_string)
            .unwrap_or_else(|| arg.get_id().to_string());
        display.push_str(&format!(" <{value}>"));
    }
    let help = arg.get_help().map(ToString::to_string).unwrap_or_default();
    (display, help)
}

/// Align `(display, help)` pairs into a two-column block, one flag per line.
fn format_flag_usages(flags: impl Iterator<Item = (String, String)>) -> String {
    let flags: Vec<(String, String)> = flags.collect();
    let width = flags
        .iter()
        .map(|(d, _)| d.chars().count())
        .max()
        .unwrap_or(0);
    flags
        .iter()
        .map(|(display, help)| {
            if help.is_empty() {
                display.clone()
            } else {
                let pad = width - display.chars().count();
                format!("{display}{}   {help}", " ".repeat(pad))
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
