//! Stamps `muxseq --version` with the commit it was built from.
//!
//! Both values come from git, so rebuilding the same commit yields the same
//! binary. Outside a checkout they read "unknown".

use std::process::Command;

fn main() {
    for path in [".git/HEAD", ".git/index"] {
        println!("cargo:rerun-if-changed={path}");
    }
    if let Some(head_ref) = git(&["symbolic-ref", "-q", "HEAD"]) {
        println!("cargo:rerun-if-changed=.git/{head_ref}");
    }

    let mut commit = git(&["rev-parse", "--short=10", "HEAD"]).unwrap_or_else(unknown);
    if git(&["status", "--porcelain", "--untracked-files=no"]).is_some() {
        commit.push_str("-dirty");
    }
    let commit_date = git(&["log", "-1", "--format=%cs"]).unwrap_or_else(unknown);

    println!("cargo:rustc-env=MUXSEQ_GIT_COMMIT={commit}");
    println!("cargo:rustc-env=MUXSEQ_COMMIT_DATE={commit_date}");
}

fn unknown() -> String {
    "unknown".into()
}

/// Trimmed stdout of a successful, non-empty git invocation.
fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    Some(text.trim().to_string()).filter(|text| !text.is_empty())
}
