use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for the remod binary.
#[derive(Parser, Debug)]
#[command(
    name = "remod",
    version,
    about = "Migrate call-based (CommonJS) modules to static import/export declarations"
)]
pub struct CliArgs {
    /// Files or directories to transform.
    #[arg(required_unless_present = "list_rules")]
    pub paths: Vec<PathBuf>,

    /// Report what would change without writing any file.
    #[arg(long = "dry-run", alias = "dry")]
    pub dry_run: bool,

    /// Comma-separated rule names to run, in this order (default: all rules).
    #[arg(long, value_delimiter = ',')]
    pub rules: Option<Vec<String>>,

    /// Stop transforming a file at the first rule that refuses it.
    #[arg(long = "halt-on-abort")]
    pub halt_on_abort: bool,

    /// Print the available rule names in default order and exit.
    #[arg(long = "list-rules")]
    pub list_rules: bool,

    /// Glob patterns excluded from discovery, in addition to node_modules.
    #[arg(long, value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Increase log verbosity (-v shows rule activity, -vv everything).
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
