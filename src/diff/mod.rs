//! Surface diffs between resource catalogs

use crate::resource::{Resource, ResourceCatalog, LAYOUT_TYPE};
use tracing::debug;

/// Resources removed from and added to the public surface
#[derive(Debug, Default)]
pub struct SurfaceDiff {
    /// Present in the old catalog, absent from the new one
    pub removed: Vec<Resource>,
    /// Present in the new catalog, absent from the old one
    pub added: Vec<Resource>,
}

impl SurfaceDiff {
    /// Compare a committed catalog against a freshly scanned one
    pub fn between(old: &ResourceCatalog, new: &ResourceCatalog) -> Self {
        let removed: Vec<Resource> = old.difference(new).into_iter().cloned().collect();
        let added: Vec<Resource> = new.difference(old).into_iter().cloned().collect();

        debug!("Surface diff: {} removed, {} added", removed.len(), added.len());
        Self { removed, added }
    }

    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.added.is_empty()
    }
}

/// Options controlling which resources take part in a comparison
#[derive(Debug, Clone, Default)]
pub struct CompareOptions {
    /// Resource types dropped from both sides before diffing
    pub excluded_types: Vec<String>,
}

impl CompareOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Leave layouts out of the comparison; they are not a stable surface
    pub fn excluding_layouts(mut self) -> Self {
        self.exclude_type(LAYOUT_TYPE);
        self
    }

    pub fn exclude_type(&mut self, resource_type: &str) {
        if !self.excluded_types.iter().any(|t| t == resource_type) {
            self.excluded_types.push(resource_type.to_string());
        }
    }

    /// Apply the exclusions to a catalog
    pub fn filter(&self, catalog: ResourceCatalog) -> ResourceCatalog {
        self.excluded_types
            .iter()
            .fold(catalog, |catalog, excluded| catalog.without_type(excluded))
    }

    /// Diff two catalogs after applying the exclusions to both
    pub fn compare(&self, old: ResourceCatalog, new: ResourceCatalog) -> SurfaceDiff {
        SurfaceDiff::between(&self.filter(old), &self.filter(new))
    }
}

/// Containment check of an overlay against the base packages it overlays
#[derive(Debug, Default)]
pub struct OverlayCheck {
    /// Overlay resources no base package declares
    pub extras: Vec<Resource>,
}

impl OverlayCheck {
    /// `overlay - base`, with layouts excluded from both sides
    pub fn run(overlay: &ResourceCatalog, base: &ResourceCatalog) -> Self {
        let overlay = overlay.without_type(LAYOUT_TYPE);
        let base = base.without_type(LAYOUT_TYPE);
        let extras: Vec<Resource> = overlay.difference(&base).into_iter().cloned().collect();

        debug!(
            "Overlay check: {} overlay resources, {} base resources, {} extras",
            overlay.len(),
            base.len(),
            extras.len()
        );
        Self { extras }
    }

    pub fn passed(&self) -> bool {
        self.extras.is_empty()
    }
}
