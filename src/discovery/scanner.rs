use crate::error::{ResourceError, Result};
use crate::parser::ValuesParser;
use crate::resource::{Resource, ResourceCatalog, ResourceLocation};
use std::path::Path;
use tracing::{debug, trace};
use walkdir::{DirEntry, WalkDir};

/// Prefix of subdirectories holding multi-resource XML files
const VALUES_PREFIX: &str = "values";

/// Kind of an immediate subdirectory of a `res/` directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResDirKind {
    /// `values`, `values-port`, ...: XML files declaring many resources
    Values,
    /// `drawable-hdpi`, `layout`, ...: one resource per file, of the given type
    FilePerResource(String),
}

impl ResDirKind {
    /// Classify a subdirectory by its name
    pub fn from_dir_name(name: &str) -> Self {
        if name.starts_with(VALUES_PREFIX) {
            ResDirKind::Values
        } else {
            let base = name.split('-').next().unwrap_or(name);
            ResDirKind::FilePerResource(base.to_string())
        }
    }
}

/// Builds a [`ResourceCatalog`] from Android resource directories
pub struct ResourceScanner {
    parser: ValuesParser,
}

impl ResourceScanner {
    pub fn new() -> Self {
        Self {
            parser: ValuesParser::new(),
        }
    }

    /// Scan several resource directories into one merged catalog
    pub fn scan_all<P: AsRef<Path>>(&self, res_dirs: &[P]) -> Result<ResourceCatalog> {
        let mut catalog = ResourceCatalog::new();
        for res_dir in res_dirs {
            catalog.union_with(self.scan(res_dir.as_ref())?);
        }
        Ok(catalog)
    }

    /// Scan one resource directory
    pub fn scan(&self, res_dir: &Path) -> Result<ResourceCatalog> {
        if !res_dir.is_dir() {
            return Err(ResourceError::DirectoryNotFound {
                path: res_dir.to_path_buf(),
            });
        }

        debug!("Scanning resources in {}", res_dir.display());
        let mut catalog = ResourceCatalog::new();

        for subdir in list_entries(res_dir)? {
            if !subdir.path().is_dir() || is_hidden(&subdir) {
                continue;
            }

            let dir_name = subdir.file_name().to_string_lossy();
            match ResDirKind::from_dir_name(&dir_name) {
                ResDirKind::Values => self.scan_values_dir(subdir.path(), &mut catalog)?,
                ResDirKind::FilePerResource(resource_type) => {
                    self.scan_file_dir(subdir.path(), &resource_type, &mut catalog)?
                }
            }
        }

        debug!(
            "Found {} resources in {}",
            catalog.len(),
            res_dir.display()
        );
        Ok(catalog)
    }

    fn scan_values_dir(&self, dir: &Path, catalog: &mut ResourceCatalog) -> Result<()> {
        for entry in self.resource_files(dir)? {
            let path = entry.path();
            if path.extension().map(|e| e == "xml").unwrap_or(false) {
                catalog.extend(self.parser.parse_file(path)?);
            }
        }
        Ok(())
    }

    fn scan_file_dir(
        &self,
        dir: &Path,
        resource_type: &str,
        catalog: &mut ResourceCatalog,
    ) -> Result<()> {
        for entry in self.resource_files(dir)? {
            let file_name = entry.file_name().to_string_lossy();
            let Some(name) = resource_name(&file_name) else {
                continue;
            };

            trace!("{} resource {} from {}", resource_type, name, entry.path().display());
            catalog.insert(
                Resource::new(name, resource_type)
                    .with_location(ResourceLocation::file(entry.path())),
            );
        }
        Ok(())
    }

    /// Regular, visible files directly inside `dir`
    fn resource_files(&self, dir: &Path) -> Result<Vec<DirEntry>> {
        Ok(list_entries(dir)?
            .into_iter()
            .filter(|e| e.path().is_file() && !is_hidden(e))
            .collect())
    }
}

impl Default for ResourceScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Resource name of a file: everything before the first `.`
pub fn resource_name(file_name: &str) -> Option<&str> {
    let name = file_name.split('.').next().unwrap_or(file_name);
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// Immediate children of `dir`, sorted by file name
fn list_entries(dir: &Path) -> Result<Vec<DirEntry>> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .map(|entry| {
            entry.map_err(|e| {
                let path = e.path().unwrap_or(dir).to_path_buf();
                ResourceError::io(path, e.into())
            })
        })
        .collect()
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}
