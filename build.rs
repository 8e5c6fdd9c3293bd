//! Embeds the commit, build date and profile for `--version`.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::Command;

/// Short hash of HEAD, or `None` outside a git checkout.
fn git_short_hash() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short=7", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let hash = String::from_utf8(output.stdout).ok()?.trim().to_string();
    (!hash.is_empty()).then_some(hash)
}

fn main() {
    let commit = env::var("BUILD_COMMIT")
        .ok()
        .or_else(git_short_hash)
        .unwrap_or_else(|| "unknown".to_string());
    let date = env::var("BUILD_DATE")
        .unwrap_or_else(|_| chrono::Utc::now().format("%Y-%m-%d").to_string());
    let profile = env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());

    let contents = format!(
        "pub const BUILD_COMMIT: &str = {commit:?};\n\
         pub const BUILD_DATE: &str = {date:?};\n\
         pub const BUILD_PROFILE: &str = {profile:?};\n"
    );
    let out_dir = PathBuf::from(env::var_os("OUT_DIR").expect("cargo sets OUT_DIR"));
    fs::write(out_dir.join("build_info.rs"), contents).expect("write build_info.rs");

    println!("cargo:rerun-if-changed=.git/HEAD");
    for var in ["BUILD_COMMIT", "BUILD_DATE"] {
        println!("cargo:rerun-if-env-changed={var}");
    }
}
