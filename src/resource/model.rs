use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::PathBuf;

/// Where a resource was declared
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceLocation {
    pub file: PathBuf,
    /// 1-based line of the declaring element, unknown for file-per-resource entries
    pub line: Option<usize>,
}

impl ResourceLocation {
    pub fn new(file: impl Into<PathBuf>, line: Option<usize>) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }

    pub fn file(file: impl Into<PathBuf>) -> Self {
        Self::new(file, None)
    }
}

impl fmt::Display for ResourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{}", self.file.display(), line),
            None => write!(f, "{}", self.file.display()),
        }
    }
}

/// Identity of a resource: its type and name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ResourceKey {
    pub resource_type: String,
    pub name: String,
}

impl ResourceKey {
    pub fn new(resource_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            name: name.into(),
        }
    }

    /// Manifest ordering: the `type ++ name` concatenation, not the tuple.
    /// Equal concatenations fall back to the tuple so the order is total.
    pub fn manifest_cmp(&self, other: &Self) -> Ordering {
        let lhs = self.resource_type.bytes().chain(self.name.bytes());
        let rhs = other.resource_type.bytes().chain(other.name.bytes());
        lhs.cmp(rhs)
            .then_with(|| self.resource_type.cmp(&other.resource_type))
            .then_with(|| self.name.cmp(&other.name))
    }
}

/// A named, typed resource declaration
///
/// Equality and hashing only look at `name` and `resource_type`; the
/// locations are provenance for diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct Resource {
    pub name: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    pub locations: Vec<ResourceLocation>,
}

impl Resource {
    pub fn new(name: impl Into<String>, resource_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            resource_type: resource_type.into(),
            locations: Vec::new(),
        }
    }

    pub fn with_location(mut self, location: ResourceLocation) -> Self {
        self.locations.push(location);
        self
    }

    pub fn key(&self) -> ResourceKey {
        ResourceKey::new(self.resource_type.clone(), self.name.clone())
    }

    pub fn is_type(&self, resource_type: &str) -> bool {
        self.resource_type == resource_type
    }

    /// First place this resource was declared
    pub fn first_location(&self) -> Option<&ResourceLocation> {
        self.locations.first()
    }

    /// Fold a second declaration of the same resource into this one.
    ///
    /// Locations of `incoming` are appended after the existing ones.
    pub fn merge(mut self, incoming: Resource) -> Resource {
        debug_assert_eq!(self, incoming);
        self.locations.extend(incoming.locations);
        self
    }
}

impl PartialEq for Resource {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.resource_type == other.resource_type
    }
}

impl Eq for Resource {}

impl Hash for Resource {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.resource_type.hash(state);
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(location) = self.first_location() {
            write!(f, "{}: ", location)?;
        }
        write!(f, "<{} name=\"{}\">", self.resource_type, self.name)
    }
}
