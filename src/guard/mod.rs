//! Generate, compare and overlay-verify operations over a library checkout

use crate::config::Config;
use crate::diff::{CompareOptions, OverlayCheck, SurfaceDiff};
use crate::discovery::ResourceScanner;
use crate::error::Result;
use crate::manifest::{load_manifest, ManifestWriter};
use crate::resource::{Resource, ResourceCatalog, ResourceLocation};
use std::path::{Path, PathBuf};
use tracing::info;

/// Resource type of the `<overlayable>` element in the generated overlayable file
const OVERLAYABLE_TYPE: &str = "overlayable";

/// Files written by [`ResourceGuard::generate`]
#[derive(Debug)]
pub struct GenerateSummary {
    pub manifest: PathBuf,
    pub overlayable: Option<PathBuf>,
    pub resources: usize,
}

/// Guards the public resource surface of one library
pub struct ResourceGuard {
    root: PathBuf,
    config: Config,
}

impl ResourceGuard {
    pub fn new(root: impl Into<PathBuf>, config: Config) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn manifest_path(&self, file_name: Option<&str>) -> PathBuf {
        self.config.manifest_path(&self.root, file_name)
    }

    /// Scan the library's resource directory
    ///
    /// The overlayable file is scanned like any other values file, so its
    /// `<overlayable>` element is part of the surface.
    pub fn scan(&self) -> Result<ResourceCatalog> {
        ResourceScanner::new().scan(&self.config.res_dir(&self.root))
    }

    /// Write the manifest and, when enabled, the overlayable file
    ///
    /// When the overlayable file is written, its `<overlayable>` element is
    /// added to the catalog up front so the manifest already matches what the
    /// next scan finds.
    pub fn generate(
        &self,
        manifest_file: Option<&str>,
        with_overlayable: bool,
    ) -> Result<GenerateSummary> {
        let mut catalog = self.scan()?;
        let writer = ManifestWriter::new();
        let write_overlayable = with_overlayable && self.config.overlayable.enabled;

        if write_overlayable {
            let path = self.config.overlayable_path(&self.root);
            catalog.insert(
                Resource::new(self.config.overlayable.name.as_str(), OVERLAYABLE_TYPE)
                    .with_location(ResourceLocation::file(path)),
            );
        }

        let manifest = self.manifest_path(manifest_file);
        writer.write(&manifest, &writer.render_manifest(&catalog)?)?;

        let overlayable = if write_overlayable {
            let path = self.config.overlayable_path(&self.root);
            let overlayable_catalog = self.with_extra_attrs(catalog.clone());
            writer.write(
                &path,
                &writer.render_overlayable(&overlayable_catalog, &self.config.overlayable.name)?,
            )?;
            Some(path)
        } else {
            None
        };

        info!("Generated manifest with {} resources", catalog.len());
        Ok(GenerateSummary {
            manifest,
            overlayable,
            resources: catalog.len(),
        })
    }

    /// Diff the committed manifest against a fresh scan
    pub fn compare(
        &self,
        manifest_file: Option<&str>,
        options: &CompareOptions,
    ) -> Result<SurfaceDiff> {
        let mut options = options.clone();
        for excluded in &self.config.exclude_types {
            options.exclude_type(excluded);
        }

        let old = load_manifest(&self.manifest_path(manifest_file))?;
        let new = self.scan()?;
        Ok(options.compare(old, new))
    }

    fn with_extra_attrs(&self, mut catalog: ResourceCatalog) -> ResourceCatalog {
        let overlayable = self.config.overlayable_path(&self.root);
        catalog.extend(self.config.overlayable.extra_attrs.iter().map(|name| {
            Resource::new(name.as_str(), "attr")
                .with_location(ResourceLocation::file(&overlayable))
        }));
        catalog
    }
}

/// Check that overlay resource directories only overlay resources the base directories declare
pub fn verify_overlay<P: AsRef<Path>>(
    overlay_dirs: &[P],
    base_dirs: &[P],
) -> Result<OverlayCheck> {
    let scanner = ResourceScanner::new();
    let overlay = scanner.scan_all(overlay_dirs)?;
    let base = scanner.scan_all(base_dirs)?;
    Ok(OverlayCheck::run(&overlay, &base))
}
