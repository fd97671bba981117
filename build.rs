use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;

fn main() {
    // NCGEN_VERSION wins, then a VERSION file next to Cargo.toml, then the crate version
    let version = if let Ok(v) = env::var("NCGEN_VERSION") {
        v
    } else {
        let version_file = Path::new("VERSION");
        if version_file.exists() {
            fs::read_to_string(version_file)
                .unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_string())
                .trim()
                .to_string()
        } else {
            env!("CARGO_PKG_VERSION").to_string()
        }
    };

    println!("cargo:rustc-env=NCGEN_VERSION={}", version);
    println!("cargo:rerun-if-changed=VERSION");
    println!("cargo:rerun-if-env-changed=NCGEN_VERSION");

    // Commit of the checkout, when built from one
    let commit = env::var("GIT_COMMIT").ok().or_else(|| {
        Command::new("git")
            .args(["rev-parse", "HEAD"])
            .output()
            .ok()
            .filter(|out| out.status.success())
            .and_then(|out| String::from_utf8(out.stdout).ok())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    });
    if let Some(commit) = commit {
        println!("cargo:rustc-env=GIT_COMMIT={}", commit);
    }
    println!("cargo:rerun-if-env-changed=GIT_COMMIT");

    // Reproducible builds pass SOURCE_DATE_EPOCH; BUILD_TIME overrides it
    if let Some(time) = env::var("BUILD_TIME").ok().or_else(|| env::var("SOURCE_DATE_EPOCH").ok()) {
        println!("cargo:rustc-env=BUILD_TIME={}", time);
    }
    println!("cargo:rerun-if-env-changed=BUILD_TIME");
    println!("cargo:rerun-if-env-changed=SOURCE_DATE_EPOCH");
}
