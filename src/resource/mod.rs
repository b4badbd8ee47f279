mod model;

pub use model::{Resource, ResourceKey, ResourceLocation};

use std::collections::HashMap;

/// Resource type that is never part of the stable overlay surface
pub const LAYOUT_TYPE: &str = "layout";

/// A set of resources keyed on `(type, name)`
///
/// Inserting a resource that is already present merges its locations into
/// the existing entry instead of adding a duplicate.
#[derive(Debug, Clone, Default)]
pub struct ResourceCatalog {
    entries: HashMap<ResourceKey, Resource>,
}

impl ResourceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resource, merging with an existing entry of the same identity
    pub fn insert(&mut self, resource: Resource) {
        let key = resource.key();
        let merged = match self.entries.remove(&key) {
            Some(existing) => existing.merge(resource),
            None => resource,
        };
        self.entries.insert(key, merged);
    }

    /// Union with another catalog, accumulating locations
    pub fn union_with(&mut self, other: ResourceCatalog) {
        for resource in other.entries.into_values() {
            self.insert(resource);
        }
    }

    /// Copy of this catalog without resources of the given type
    pub fn without_type(&self, resource_type: &str) -> ResourceCatalog {
        self.entries
            .values()
            .filter(|r| !r.is_type(resource_type))
            .cloned()
            .collect()
    }

    /// Resources in `self` whose identity is absent from `other`, in manifest order
    pub fn difference<'a>(&'a self, other: &ResourceCatalog) -> Vec<&'a Resource> {
        let mut missing: Vec<&Resource> = self
            .entries
            .iter()
            .filter(|(key, _)| !other.entries.contains_key(*key))
            .map(|(_, resource)| resource)
            .collect();
        sort_for_manifest(&mut missing);
        missing
    }

    /// All resources in manifest order
    pub fn sorted(&self) -> Vec<&Resource> {
        let mut all: Vec<&Resource> = self.entries.values().collect();
        sort_for_manifest(&mut all);
        all
    }

    pub fn contains(&self, resource_type: &str, name: &str) -> bool {
        let key = ResourceKey::new(resource_type, name);
        self.entries.contains_key(&key)
    }

    pub fn get(&self, resource_type: &str, name: &str) -> Option<&Resource> {
        self.entries.get(&ResourceKey::new(resource_type, name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Resource> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<Resource> for ResourceCatalog {
    fn from_iter<I: IntoIterator<Item = Resource>>(iter: I) -> Self {
        let mut catalog = ResourceCatalog::new();
        for resource in iter {
            catalog.insert(resource);
        }
        catalog
    }
}

impl Extend<Resource> for ResourceCatalog {
    fn extend<I: IntoIterator<Item = Resource>>(&mut self, iter: I) {
        for resource in iter {
            self.insert(resource);
        }
    }
}

fn sort_for_manifest(resources: &mut [&Resource]) {
    resources.sort_by(|a, b| {
        let (a, b) = (a.key(), b.key());
        a.manifest_cmp(&b)
    });
}
