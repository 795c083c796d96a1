//! Interactive, navigable help screens for command trees.
//!
//! Instead of printing a static usage text, a [`HelpViewer`] opens a
//! terminal screen showing the usage of one command together with a
//! selectable list of its sub commands. Users can descend into a sub
//! command, go back to the parent, scroll long documents and print the
//! full command chain of what they are looking at.
//!
//! ```no_run
//! use tuihelp::{CommandNode, CommandTree, HelpViewer, Options};
//!
//! let mut tree = CommandTree::new(CommandNode::new("mycli").short("A sample CLI"));
//! let root = tree.root();
//! tree.add_child(root, CommandNode::new("init").short("Initialize a project"));
//!
//! HelpViewer::new(Options::default()).help(&tree, root)?;
//! # Ok::<(), tuihelp::Error>(())
//! ```

pub mod chain;
pub mod children;
pub mod engine;
pub mod error;
pub mod keys;
pub mod list;
pub mod options;
pub mod sizer;
pub mod styles;
pub mod tree;
pub mod ui;
pub mod usage_doc;
pub mod viewer;
pub mod viewport;

pub use engine::{Action, Event, Mode, NavigationEngine};
pub use error::{Error, Result};
pub use options::Options;
pub use styles::Styles;
pub use tree::{CommandNode, CommandTree, NodeId};
pub use usage_doc::UsageComposer;
pub use viewer::HelpViewer;
