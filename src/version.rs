//! Version information for the ncgen binary

/// Current version of the generator
pub const VERSION: &str = env!("NCGEN_VERSION");

/// Build timestamp (set at compile time)
pub const BUILD_TIME: Option<&str> = option_env!("BUILD_TIME");

/// Git commit hash (set at compile time)
pub const GIT_COMMIT: Option<&str> = option_env!("GIT_COMMIT");

/// Get full version string with optional build information
pub fn full_version() -> String {
    format_version(VERSION, GIT_COMMIT, BUILD_TIME)
}

fn format_version(version: &str, commit: Option<&str>, time: Option<&str>) -> String {
    let mut version = version.to_string();

    if let Some(commit) = commit {
        version.push_str(&format!(" ({})", &commit[..8.min(commit.len())]));
    }

    if let Some(time) = time {
        version.push_str(&format!(" built {}", time));
    }

    version
}
