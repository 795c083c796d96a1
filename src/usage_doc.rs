//! Assembly of the usage document for one command.
//!
//! Sections always come in the order of [`Section`]; which ones appear
//! depends only on the command, never on the window size.

use ratatui::text::{Line, Span, Text};

use crate::list::SubCommandList;
use crate::options::Options;
use crate::styles::Styles;
use crate::tree::{CommandTree, NodeId};

/// Indentation of section bodies.
const TEXT_INDENT: &str = "     ";
/// Indentation of sub command rows.
const ITEM_INDENT: &str = "  ";
/// Minimum column width for sub command names.
const MIN_NAME_PADDING: usize = 11;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Error,
    Title,
    Description,
    Usage,
    Aliases,
    Flags,
    GlobalFlags,
    Examples,
    SubCommands,
}

pub struct UsageComposer {
    styles: Styles,
    error_message: Option<String>,
    show_border: bool,
    width: u16,
}

impl UsageComposer {
    pub fn new(options: &Options) -> Self {
        Self {
            styles: options.styles(),
            error_message: options.error_message.clone(),
            show_border: options.show_border,
            width: options.width,
        }
    }

    pub fn styles(&self) -> &Styles {
        &self.styles
    }

    pub fn show_border(&self) -> bool {
        self.show_border
    }

    /// Columns the document is rendered into.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// The sections the document for `id` is made of, in display order.
    pub fn sections(&self, tree: &CommandTree, id: NodeId, list: &SubCommandList) -> Vec<Section> {
        let node = tree.node(id);
        let mut sections = Vec::new();
        if self.error_message.is_some() {
            sections.push(Section::Error);
        }
        if tree.parent(id).is_none() {
            sections.push(Section::Title);
        }
        sections.push(Section::Description);
        if node.runnable {
            sections.push(Section::Usage);
        }
        if !node.aliases.is_empty() {
            sections.push(Section::Aliases);
        }
        if !node.local_flags.is_empty() {
            sections.push(Section::Flags);
        }
        if !node.inherited_flags.is_empty() {
            sections.push(Section::GlobalFlags);
        }
        if node.has_example() {
            sections.push(Section::Examples);
        }
        if !list.is_empty() {
            sections.push(Section::SubCommands);
        }
        sections
    }

    pub fn compose(&self, tree: &CommandTree, id: NodeId, list: &SubCommandList) -> Text<'static> {
        let node = tree.node(id);
        let mut lines: Vec<Line<'static>> = Vec::new();

        for section in self.sections(tree, id, list) {
            match section {
                Section::Error => {
                    let message = self.error_message.as_deref().unwrap_or_default();
                    for line in message.trim_end().lines() {
                        lines.push(Line::styled(line.to_string(), self.styles.error_text));
                    }
                }
                Section::Title => {
                    let mut title = node.name.clone();
                    if !node.version.is_empty() {
                        title.push(' ');
                        title.push_str(&node.version);
                    }
                    lines.push(Line::styled(title, self.styles.title).centered());
                    for line in node.long.lines() {
                        lines.push(Line::styled(line.to_string(), self.styles.sub_title).centered());
                    }
                }
                Section::Description => {
                    self.push_section(&mut lines, "Cmd Description:", &node.short);
                }
                Section::Usage => {
                    let mut body = Vec::new();
                    if !node.use_line.is_empty() {
                        body.push(node.use_line.clone());
                    }
                    if tree.has_available_sub_commands(id) {
                        body.push(format!("{} [command]", tree.command_path(id)));
                    }
                    self.push_section(&mut lines, "Usage:", &body.join("\n"));
                }
                Section::Aliases => {
                    self.push_section(&mut lines, "Aliases:", &node.name_and_aliases());
                }
                Section::Flags => {
                    self.push_section(&mut lines, "Flags:", node.local_flags.trim_end());
                }
                Section::GlobalFlags => {
                    self.push_section(&mut lines, "Global Flags:", node.inherited_flags.trim_end());
                }
                Section::Examples => {
                    self.push_section(&mut lines, "Examples:", &node.example);
                }
                Section::SubCommands => {
                    self.push_sub_commands(&mut lines, tree, list);
                }
            }
            lines.push(Line::default());
        }

        Text::from(lines)
    }

    fn push_section(&self, lines: &mut Vec<Line<'static>>, header: &str, body: &str) {
        lines.push(Line::styled(header.to_string(), self.styles.section));
        for line in body.lines() {
            lines.push(Line::styled(
                format!("{TEXT_INDENT}{}", line.trim_end()),
                self.styles.text,
            ));
        }
    }

    fn push_sub_commands(
        &self,
        lines: &mut Vec<Line<'static>>,
        tree: &CommandTree,
        list: &SubCommandList,
    ) {
        let mut header = vec![Span::styled("Available Sub Commands:", self.styles.section)];
        if list.filtering || list.filter_active() {
            let cursor = if list.filtering { "▏" } else { "" };
            header.push(Span::styled(
                format!(" /{}{cursor}", list.filter()),
                self.styles.info,
            ));
        }
        lines.push(Line::from(header));

        let padding = list
            .items()
            .iter()
            .map(|&c| tree.node(c).name.chars().count())
            .max()
            .unwrap_or(0)
            .max(MIN_NAME_PADDING);

        let window = list.window();
        for &(child, selected) in &window {
            let node = tree.node(child);
            let marker = if selected { "> " } else { "  " };
            let row = format!("{marker}{:<padding$} {}", node.name, node.short);
            let style = if selected {
                self.styles.selected_item
            } else {
                self.styles.item
            };
            lines.push(Line::from(vec![
                Span::raw(ITEM_INDENT),
                Span::styled(row.trim_end().to_string(), style),
            ]));
        }
        // Keep the list height fixed while a filter hides rows
        for _ in window.len()..list.height() {
            lines.push(Line::default());
        }
    }
}

/// Plain text of a composed document, one line per row, with trailing
/// whitespace removed.
pub fn plain_text(text: &Text) -> String {
    text.lines
        .iter()
        .map(|line| {
            line.spans
                .iter()
                .map(|s| s.content.as_ref())
                .collect::<String>()
                .trim_end()
                .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
        .trim_end()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::children;
    use crate::tree::CommandNode;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use pretty_assertions::assert_eq;

    fn sample_tree() -> CommandTree {
        let mut tree = CommandTree::new(
            CommandNode::new("tool")
                .version("1.2.0")
                .short("A tool")
                .long("Tool does things.")
                .use_line("tool [flags]")
                .local_flags("-v, --verbose   Verbose output")
                .example("tool init"),
        );
        let root = tree.root();
        let init = tree.add_child(
            root,
            CommandNode::new("init")
                .short("Init things")
                .aliases(["i"])
                .use_line("tool init [flags] <name>")
                .inherited_flags("-v, --verbose   Verbose output"),
        );
        tree.add_child(root, CommandNode::new("build").short("Build things"));
        tree.add_child(init, CommandNode::new("template").short("Init from a template"));
        tree
    }

    fn list_for(tree: &CommandTree, id: NodeId) -> SubCommandList {
        SubCommandList::new(tree, &children::project(tree, id))
    }

    #[test]
    fn test_root_document() {
        let tree = sample_tree();
        let composer = UsageComposer::new(&Options::default());
        let list = list_for(&tree, tree.root());
        let text = composer.compose(&tree, tree.root(), &list);
        insta::assert_snapshot!(plain_text(&text), @r"
        tool 1.2.0
        Tool does things.

        Cmd Description:
             A tool

        Usage:
             tool [flags]
             tool [command]

        Flags:
             -v, --verbose   Verbose output

        Examples:
             tool init

        Available Sub Commands:
          > init        Init things
            build       Build things
        ");
    }

    #[test]
    fn test_section_order_for_child() {
        let tree = sample_tree();
        let composer = UsageComposer::new(&Options::default());
        let init = tree.find(&["init"]).unwrap();
        let list = list_for(&tree, init);
        assert_eq!(
            composer.sections(&tree, init, &list),
            vec![
                Section::Description,
                Section::Usage,
                Section::Aliases,
                Section::GlobalFlags,
                Section::SubCommands,
            ]
        );

        let text = plain_text(&composer.compose(&tree, init, &list));
        assert!(!text.contains("Tool does things."));
        assert!(text.contains("     init, i"));
        assert!(text.contains("     tool init [command]"));
    }

    #[test]
    fn test_leaf_has_no_sub_command_section() {
        let tree = sample_tree();
        let composer = UsageComposer::new(&Options::default());
        let build = tree.find(&["build"]).unwrap();
        let list = list_for(&tree, build);
        let sections = composer.sections(&tree, build, &list);
        assert!(!sections.contains(&Section::SubCommands));
        assert!(!sections.contains(&Section::Title));
    }

    #[test]
    fn test_not_runnable_skips_usage() {
        let mut tree = CommandTree::new(CommandNode::new("root").runnable(false));
        tree.add_child(tree.root(), CommandNode::new("a"));
        let composer = UsageComposer::new(&Options::default());
        let list = list_for(&tree, tree.root());
        assert_eq!(
            composer.sections(&tree, tree.root(), &list),
            vec![Section::Title, Section::Description, Section::SubCommands]
        );
    }

    #[test]
    fn test_error_message_comes_first() {
        let tree = sample_tree();
        let composer =
            UsageComposer::new(&Options::default().with_error_message("Error: unknown flag --x"));
        let list = list_for(&tree, tree.root());
        assert_eq!(composer.sections(&tree, tree.root(), &list)[0], Section::Error);
        let text = plain_text(&composer.compose(&tree, tree.root(), &list));
        assert!(text.starts_with("Error: unknown flag --x\n"));
    }

    #[test]
    fn test_line_count_ignores_selection_and_filter() {
        let tree = sample_tree();
        let composer = UsageComposer::new(&Options::default());
        let mut list = list_for(&tree, tree.root());
        let before = composer.compose(&tree, tree.root(), &list).lines.len();

        list.handle_key(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE));
        assert_eq!(composer.compose(&tree, tree.root(), &list).lines.len(), before);

        list.handle_key(KeyEvent::new(KeyCode::Char('/'), KeyModifiers::NONE));
        list.handle_key(KeyEvent::new(KeyCode::Char('b'), KeyModifiers::NONE));
        let filtered = composer.compose(&tree, tree.root(), &list);
        assert_eq!(filtered.lines.len(), before);
        assert!(plain_text(&filtered).contains("Available Sub Commands: /b"));
    }

    #[test]
    fn test_selected_row_is_marked() {
        let tree = sample_tree();
        let composer = UsageComposer::new(&Options::default());
        let mut list = list_for(&tree, tree.root());
        list.handle_key(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE));
        let text = plain_text(&composer.compose(&tree, tree.root(), &list));
        assert!(text.contains("  > build"));
        assert!(text.contains("    init"));
    }
}
