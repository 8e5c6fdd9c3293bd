//! Compile-time build information.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// Line printed by `--version`. Debug builds say so.
pub fn version_string() -> String {
    let mut version = format!(
        "gacha {} ({} {})",
        env!("CARGO_PKG_VERSION"),
        BUILD_DATE,
        BUILD_COMMIT
    );
    if BUILD_PROFILE == "debug" {
        version.push_str(" [debug]");
    }
    version
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_info_not_empty() {
        assert!(!BUILD_COMMIT.is_empty());
        assert!(!BUILD_DATE.is_empty());
        assert!(!BUILD_PROFILE.is_empty());
    }

    #[test]
    fn test_version_string_mentions_commit() {
        let version = version_string();
        assert!(version.starts_with("gacha "));
        assert!(version.contains(BUILD_COMMIT));
    }
}
