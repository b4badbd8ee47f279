use crate::diff::{OverlayCheck, SurfaceDiff};
use crate::resource::Resource;
use colored::Colorize;
use std::fmt::Write as _;

/// Plain-text reporter; colors are dropped automatically when stdout is not a terminal
pub struct TerminalReporter;

impl TerminalReporter {
    pub fn new() -> Self {
        Self
    }

    pub fn report_diff(&self, diff: &SurfaceDiff, manifest_name: &str) {
        print!("{}", self.render_diff(diff, manifest_name));
    }

    pub fn report_overlay(&self, check: &OverlayCheck) {
        print!("{}", self.render_overlay(check));
    }

    /// Text printed for a surface diff; empty when nothing changed
    pub fn render_diff(&self, diff: &SurfaceDiff, manifest_name: &str) -> String {
        let mut out = String::new();
        if diff.is_empty() {
            return out;
        }

        if !diff.removed.is_empty() {
            section(&mut out, &"Resources removed:".red().bold().to_string(), &diff.removed);
        }
        if !diff.added.is_empty() {
            section(&mut out, &"Resources added:".green().bold().to_string(), &diff.added);
        }

        let _ = writeln!(
            out,
            "{}",
            format!(
                "Some resources have been modified. If this is intentional please run \
                 'resguard generate' again and submit the new {}",
                manifest_name
            )
            .yellow()
        );
        out
    }

    /// Text printed for an overlay check; empty when the overlay is contained in its base
    pub fn render_overlay(&self, check: &OverlayCheck) -> String {
        let mut out = String::new();
        if !check.passed() {
            section(
                &mut out,
                &"RRO attempting to override resources that don't exist:"
                    .red()
                    .bold()
                    .to_string(),
                &check.extras,
            );
        }
        out
    }
}

impl Default for TerminalReporter {
    fn default() -> Self {
        Self::new()
    }
}

fn section(out: &mut String, header: &str, resources: &[Resource]) {
    let _ = writeln!(out, "{}", header);
    for resource in resources {
        let _ = writeln!(out, "{}", resource);
    }
}
