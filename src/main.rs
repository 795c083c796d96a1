use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::Command as ProcessCommand;
use std::sync::Mutex;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;
use tuihelp::{viewer, CommandTree, HelpViewer, Options};

/// Interactive help screen for CLI commands defined by usage specs
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Sub command to open, as words below the root (e.g., "config set")
    #[arg(value_name = "COMMAND")]
    command: Vec<String>,

    /// Name shown for the root command (e.g., "mise run")
    #[arg(long)]
    cmd: Option<String>,

    /// Command to run to get the usage spec (e.g., "mise tasks ls --usage")
    #[arg(long)]
    spec_cmd: Option<String>,

    /// Path to a usage spec file
    #[arg(long)]
    spec_file: Option<PathBuf>,

    /// Generate usage spec for this tool
    #[arg(long)]
    usage: bool,

    /// Do not draw a border around the usage document
    #[arg(long)]
    no_border: bool,

    /// Width of the usage document in columns
    #[arg(long, default_value_t = tuihelp::options::DEFAULT_WIDTH)]
    width: u16,

    /// Use the alternate screen instead of drawing inline
    #[arg(long)]
    alt_screen: bool,

    /// Do not capture the mouse for wheel scrolling
    #[arg(long)]
    no_mouse: bool,

    /// Error message to show above the usage document
    #[arg(long, value_name = "MESSAGE")]
    error: Option<String>,

    /// Write logs to this file (filtered by RUST_LOG, default "info")
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    // Handle --usage flag to output usage spec
    if args.usage {
        let mut cmd = Args::command();
        let bin_name = std::env::args()
            .next()
            .unwrap_or_else(|| "tuihelp".to_string());
        let mut buf = Vec::new();
        clap_usage::generate(&mut cmd, bin_name, &mut buf);
        print!("{}", String::from_utf8_lossy(&buf));
        return Ok(());
    }

    if let Some(ref path) = args.log_file {
        init_logging(path)?;
    }

    let mut spec = match (&args.spec_cmd, &args.spec_file) {
        (Some(_), Some(_)) => {
            return Err(color_eyre::eyre::eyre!(
                "Cannot specify both --spec-cmd and --spec-file. Use --help for usage information."
            ));
        }
        (None, None) => {
            return Err(color_eyre::eyre::eyre!(
                "Must specify either --spec-cmd or --spec-file. Use --help for usage information."
            ));
        }
        (Some(spec_cmd), None) => {
            let output = run_spec_command(spec_cmd)?;
            output.parse::<usage::Spec>().map_err(|e| {
                color_eyre::eyre::eyre!(
                    "Failed to parse usage spec from command '{}': {}",
                    spec_cmd,
                    e
                )
            })?
        }
        (None, Some(spec_file)) => usage::Spec::parse_file(spec_file).map_err(|e| {
            color_eyre::eyre::eyre!(
                "Failed to parse usage spec '{}': {}",
                spec_file.display(),
                e
            )
        })?,
    };

    if let Some(ref cmd) = args.cmd {
        spec.bin = cmd.clone();
    }

    let tree = CommandTree::from_spec(&spec);
    let entry = viewer::resolve(&tree, args.command.as_slice())?;
    tracing::debug!(nodes = tree.len(), "loaded command tree");

    let mut options = Options::default()
        .with_border(!args.no_border)
        .with_width(args.width)
        .with_alt_screen(args.alt_screen)
        .with_mouse_scroll(!args.no_mouse);
    if let Some(message) = args.error {
        options = options.with_error_message(message);
    }

    HelpViewer::new(options).help(&tree, entry)?;
    Ok(())
}

/// Send tracing output to `path`. The terminal belongs to the help screen,
/// so nothing is logged to stderr.
fn init_logging(path: &Path) -> color_eyre::Result<()> {
    let file = File::create(path).map_err(|e| {
        color_eyre::eyre::eyre!("Failed to create log file '{}': {}", path.display(), e)
    })?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Run a shell command and return its stdout as a string.
fn run_spec_command(cmd: &str) -> color_eyre::Result<String> {
    let output = if cfg!(target_os = "windows") {
        ProcessCommand::new("cmd").args(["/C", cmd]).output()
    } else {
        ProcessCommand::new("sh").args(["-c", cmd]).output()
    }
    .map_err(|e| color_eyre::eyre::eyre!("Failed to run spec command '{}': {}", cmd, e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(color_eyre::eyre::eyre!(
            "Spec command '{}' failed with status {}{}",
            cmd,
            output.status,
            if stderr.is_empty() {
                String::new()
            } else {
                format!(": {}", stderr.trim())
            }
        ));
    }

    String::from_utf8(output.stdout).map_err(|e| {
        color_eyre::eyre::eyre!(
            "Spec command '{}' produced invalid UTF-8 output: {}",
            cmd,
            e
        )
    })
}
