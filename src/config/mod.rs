mod loader;

pub use loader::{Config, OverlayableConfig};

use crate::error::{ResourceError, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable naming the root of the platform checkout
pub const BUILD_TOP_VAR: &str = "ANDROID_BUILD_TOP";

/// Resolve the library root: an explicit path wins, otherwise
/// `$ANDROID_BUILD_TOP/<library_path>`.
pub fn resolve_library_root(explicit: Option<&Path>, config: &Config) -> Result<PathBuf> {
    resolve_library_root_with(explicit, config, std::env::var_os(BUILD_TOP_VAR).map(PathBuf::from))
}

fn resolve_library_root_with(
    explicit: Option<&Path>,
    config: &Config,
    build_top: Option<PathBuf>,
) -> Result<PathBuf> {
    if let Some(root) = explicit {
        return Ok(root.to_path_buf());
    }

    match build_top {
        Some(top) if !top.as_os_str().is_empty() => {
            let root = top.join(&config.library_path);
            debug!("Library root from {}: {}", BUILD_TOP_VAR, root.display());
            Ok(root)
        }
        _ => Err(ResourceError::MissingEnvironment {
            variable: BUILD_TOP_VAR,
        }),
    }
}
