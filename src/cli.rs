//! CLI argument parsing via clap.

use clap::Parser;

use muxseq::build_info;

/// Run tmux automation sequences declared in a YAML or JSON script.
#[derive(Debug, Parser)]
#[command(
    name = "muxseq",
    version = build_info::VERSION,
    long_version = build_info::LONG_VERSION,
    after_help = build_info::HELP_BUILD_METADATA
)]
pub struct Args {
    /// Script file (.yaml, .yml or .json). Defaults to `run.script` from settings.
    #[arg(short = 'f', long = "file")]
    pub file: Option<String>,

    /// Default tmux session for sequences that do not name one.
    #[arg(short = 's', long = "session")]
    pub session: Option<String>,

    /// Sequence(s) to run: `--run <sequence|"sequence1 sequence2 ...">`.
    #[arg(short = 'r', long = "run", value_name = "SEQUENCES")]
    pub run: Option<String>,

    /// Kill every window declared by a NEW_WINDOW layout.
    #[arg(short = 'k', long = "kill")]
    pub kill: bool,

    /// List sequences, or print the one named by `--run`.
    #[arg(short = 'l', long = "list")]
    pub list: bool,

    /// Suppress banners and progress output.
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,

    /// Dry run: echo shell commands in their panes instead of executing them.
    #[arg(short = 'd', long = "dry-run")]
    pub dry_run: bool,

    /// Confirm each step before it runs.
    #[arg(short = 'i', long = "interactive")]
    pub interactive: bool,

    /// Path to settings file (default: ./muxseq.toml or ~/.config/muxseq/muxseq.toml).
    #[arg(long = "settings")]
    pub settings: Option<String>,

    /// Disable color output.
    #[arg(long = "no-color")]
    pub no_color: bool,
}

impl Args {
    /// Sequence names given to `--run`, split on whitespace.
    pub fn sequences(&self) -> Vec<String> {
        self.run
            .as_deref()
            .map(|run| run.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// True when no action flag was given.
    pub fn nothing_to_do(&self) -> bool {
        self.run.is_none() && !self.list && !self.kill
    }
}
