use crate::diff::{OverlayCheck, SurfaceDiff};
use crate::resource::Resource;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

/// JSON reporter for presubmit bots
pub struct JsonReporter;

impl JsonReporter {
    pub fn new() -> Self {
        Self
    }

    pub fn report_diff(&self, diff: &SurfaceDiff) -> Result<()> {
        println!("{}", self.render_diff(diff)?);
        Ok(())
    }

    pub fn report_overlay(&self, check: &OverlayCheck) -> Result<()> {
        println!("{}", self.render_overlay(check)?);
        Ok(())
    }

    pub fn render_diff(&self, diff: &SurfaceDiff) -> Result<String> {
        let report = JsonDiff {
            changed: !diff.is_empty(),
            removed: diff.removed.iter().map(JsonResource::from).collect(),
            added: diff.added.iter().map(JsonResource::from).collect(),
        };
        serde_json::to_string_pretty(&report).into_diagnostic()
    }

    pub fn render_overlay(&self, check: &OverlayCheck) -> Result<String> {
        let report = JsonOverlay {
            passed: check.passed(),
            extras: check.extras.iter().map(JsonResource::from).collect(),
        };
        serde_json::to_string_pretty(&report).into_diagnostic()
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct JsonDiff<'a> {
    changed: bool,
    removed: Vec<JsonResource<'a>>,
    added: Vec<JsonResource<'a>>,
}

#[derive(Serialize)]
struct JsonOverlay<'a> {
    passed: bool,
    extras: Vec<JsonResource<'a>>,
}

#[derive(Serialize)]
struct JsonResource<'a> {
    #[serde(rename = "type")]
    resource_type: &'a str,
    name: &'a str,
    locations: Vec<String>,
}

impl<'a> From<&'a Resource> for JsonResource<'a> {
    fn from(resource: &'a Resource) -> Self {
        Self {
            resource_type: &resource.resource_type,
            name: &resource.name,
            locations: resource.locations.iter().map(|l| l.to_string()).collect(),
        }
    }
}
