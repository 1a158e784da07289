extern crate clap;

use clap::crate_version;
use std::process::Command;

fn main() {
    // Get the current git commit hash, if there is one.
    // Taken from https://stackoverflow.com/questions/43753491/include-git-commit-hash-as-string-into-rust-program
    let git_hash = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|hash| hash.trim().to_string())
        .unwrap_or_default();
    let version_string = if git_hash.is_empty() {
        crate_version!().to_string()
    } else {
        format!("{}-{}", crate_version!(), git_hash)
    };
    println!("cargo:rustc-env=VERSION_STR={}", version_string);
    println!("cargo:rerun-if-changed=.git/HEAD");
}
