//! resguard - Public resource surface guard for Android UI libraries
//!
//! This library enumerates the resources an Android library declares,
//! snapshots them into a committed `current.xml` manifest, and detects
//! changes to that surface in presubmit.
//!
//! # Architecture
//!
//! The pipeline consists of:
//! 1. **Discovery** - Walk a `res/` directory into a [`ResourceCatalog`]
//! 2. **Parsing** - Read `values*` files and manifests with quick-xml
//! 3. **Manifest** - Render `current.xml` and `overlayable.xml`
//! 4. **Diff** - Compare catalogs and check overlays against their base
//! 5. **Reporting** - Print diffs for humans or as JSON

pub mod config;
pub mod diff;
pub mod discovery;
pub mod error;
pub mod git;
pub mod guard;
pub mod manifest;
pub mod parser;
pub mod report;
pub mod resource;

pub use config::Config;
pub use diff::{CompareOptions, OverlayCheck, SurfaceDiff};
pub use discovery::ResourceScanner;
pub use error::ResourceError;
pub use git::ChangeGate;
pub use guard::{verify_overlay, GenerateSummary, ResourceGuard};
pub use manifest::{load_manifest, ManifestWriter};
pub use parser::ValuesParser;
pub use report::{ReportFormat, Reporter};
pub use resource::{Resource, ResourceCatalog, ResourceKey, ResourceLocation};
