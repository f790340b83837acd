//! Compile-time build metadata for the `--version` surface.

/// Package version from `Cargo.toml`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Short git revision captured by `build.rs`.
pub const GIT_COMMIT: &str = env!("MUXCTL_BUILD_GIT_HASH");

/// UTC build timestamp captured by `build.rs`.
pub const BUILD_TIMESTAMP: &str = env!("MUXCTL_BUILD_TIMESTAMP");

/// Version block printed by `muxctl --version` (clap prefixes the binary name).
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\ncommit: ",
    env!("MUXCTL_BUILD_GIT_HASH"),
    "\nbuilt: ",
    env!("MUXCTL_BUILD_TIMESTAMP")
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_version_lists_version_commit_and_build_time() {
        assert!(LONG_VERSION.starts_with(VERSION));
        assert!(LONG_VERSION.contains(&format!("commit: {GIT_COMMIT}")));
        assert!(LONG_VERSION.contains(&format!("built: {BUILD_TIMESTAMP}")));
    }
}
