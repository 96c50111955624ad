//! Version text for the CLI, stamped by `build.rs`.

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Short commit hash, with a `-dirty` suffix for uncommitted changes.
pub const GIT_COMMIT: &str = env!("MUXSEQ_GIT_COMMIT");

/// Committer date of that commit (`YYYY-MM-DD`).
pub const COMMIT_DATE: &str = env!("MUXSEQ_COMMIT_DATE");

/// `muxseq --version` text.
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("MUXSEQ_GIT_COMMIT"),
    " ",
    env!("MUXSEQ_COMMIT_DATE"),
    ")"
);

/// Trailer of `muxseq --help`.
pub const HELP_BUILD_METADATA: &str = concat!(
    "Built from commit ",
    env!("MUXSEQ_GIT_COMMIT"),
    " (",
    env!("MUXSEQ_COMMIT_DATE"),
    ")"
);
