//! The committed manifest of public resources
//!
//! A manifest is a `<resources>` document of `<public type=".." name=".."/>`
//! entries. It has the same shape as a values file, so loading one goes
//! through [`ValuesParser`].

mod writer;

pub use writer::{ManifestWriter, AUTO_GENERATED_NOTICE};

use crate::error::{ResourceError, Result};
use crate::parser::ValuesParser;
use crate::resource::ResourceCatalog;
use std::path::Path;
use tracing::debug;

/// Load a manifest file into a catalog
pub fn load_manifest(path: &Path) -> Result<ResourceCatalog> {
    if !path.is_file() {
        return Err(ResourceError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let catalog: ResourceCatalog = ValuesParser::new().parse_file(path)?.into_iter().collect();
    debug!("Loaded {} resources from {}", catalog.len(), path.display());
    Ok(catalog)
}
