use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn main() {
    let mut hash = git_output(&["rev-parse", "--short", "HEAD"]).unwrap_or_else(|| "unknown".into());
    if git_output(&["status", "--porcelain", "-uno"]).is_some() {
        hash.push('*');
    }

    let epoch = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs());

    println!("cargo:rustc-env=BUILD_HASH={hash}");
    println!("cargo:rustc-env=BUILD_EPOCH={epoch}");

    // The crate sits one level below the workspace root.
    for prefix in ["", "../"] {
        for path in [".git/HEAD", ".git/index", ".git/refs/heads"] {
            println!("cargo:rerun-if-changed={prefix}{path}");
        }
    }
}

/// Trimmed stdout of a successful git command, `None` when git fails or prints nothing.
fn git_output(args: &[&str]) -> Option<String> {
    Command::new("git")
        .args(args)
        .output()
        .ok()
        .filter(|out| out.status.success())
        .map(|out| String::from_utf8_lossy(&out.stdout).trim().to_string())
        .filter(|text| !text.is_empty())
}
