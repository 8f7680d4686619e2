//! Build-script metadata injection for the `--version` surface.
//!
//! Falls back to "unknown" markers when git or date tooling is unavailable.

use std::env;
use std::fs;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    watch_head_ref();
    println!("cargo:rerun-if-env-changed=COLORTOOL_BUILD_GIT_HASH");
    println!("cargo:rerun-if-env-changed=COLORTOOL_BUILD_TIMESTAMP");

    let commit = env::var("COLORTOOL_BUILD_GIT_HASH").unwrap_or_else(|_| short_commit());
    let built = env::var("COLORTOOL_BUILD_TIMESTAMP").unwrap_or_else(|_| utc_timestamp());

    println!("cargo:rustc-env=COLORTOOL_BUILD_GIT_HASH={commit}");
    println!("cargo:rustc-env=COLORTOOL_BUILD_TIMESTAMP={built}");
}

fn watch_head_ref() {
    let Ok(head) = fs::read_to_string(".git/HEAD") else {
        return;
    };
    if let Some(reference) = head.trim().strip_prefix("ref: ") {
        println!("cargo:rerun-if-changed=.git/{reference}");
    }
}

fn short_commit() -> String {
    capture("git", &["rev-parse", "--short=10", "HEAD"]).unwrap_or_else(|| "unknown".to_string())
}

fn utc_timestamp() -> String {
    if let Some(stamp) = capture("date", &["-u", "+%Y-%m-%dT%H:%M:%SZ"]) {
        return stamp;
    }
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0);
    format!("unix:{secs}")
}

fn capture(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
