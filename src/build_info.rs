//! Compile-time build information.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// `name date (commit)` as printed by `--version`.
pub fn version_line(name: &str) -> String {
    format!("{} {} ({})", name, BUILD_DATE, BUILD_COMMIT)
}
