//! Human-friendly terminal output.

use std::path::Path;

use console::Style;
use tracing::{debug, instrument};

use crate::error::SnapError;
use crate::ring::{RotationPlan, RotationReport, SlotRing, SlotStatus};

use super::{Output, VersionInfo};

/// Styled terminal output implementation for human users.
pub struct HumanOutput {
    color: bool,
    quiet: bool,
}

impl HumanOutput {
    #[instrument]
    pub fn new(color: bool, quiet: bool) -> Self {
        debug!("Creating HumanOutput");
        Self { color, quiet }
    }

    fn style(&self, style: Style) -> Style {
        style.force_styling(self.color)
    }
}

fn file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map_or_else(|| path.to_string(), |n| n.to_string_lossy().into_owned())
}

fn short_digest(digest: &str) -> &str {
    digest.get(..12).unwrap_or(digest)
}

impl Output for HumanOutput {
    fn error(&self, error: &SnapError) {
        eprintln!(
            "{}: {error}",
            self.style(Style::new().red().bold()).apply_to("Error")
        );
        if let Some(suggestion) = error.suggestion() {
            eprintln!("{}: {suggestion}", self.style(Style::new().yellow()).apply_to("Hint"));
        }
    }

    fn rotated(&self, _ring: &SlotRing, _report: &RotationReport) {
        if !self.quiet {
            println!("done");
        }
    }

    fn planned(&self, ring: &SlotRing, plan: &RotationPlan) {
        println!(
            "{} Would rotate {} ({} steps)",
            self.style(Style::new().cyan().bold()).apply_to("DRY RUN:"),
            ring.dir().display(),
            plan.steps.len()
        );
        for (i, line) in plan.describe(ring).iter().enumerate() {
            println!("  {}. {line}", i + 1);
        }
    }

    fn slot_status(&self, ring: &SlotRing, slots: &[SlotStatus]) {
        let occupied = slots.iter().filter(|s| s.present).count();
        if !self.quiet {
            println!(
                "{} {} ({occupied}/{} slots)",
                self.style(Style::new().bold()).apply_to("Ring"),
                ring.dir().display(),
                ring.queue_len()
            );
        }
        for slot in slots {
            let name = file_name(&slot.path);
            if slot.present {
                println!(
                    "  {:<12} {:>10} bytes  {}  {}",
                    self.style(Style::new().green()).apply_to(name),
                    slot.size_bytes.unwrap_or_default(),
                    slot.modified.as_deref().unwrap_or("-"),
                    short_digest(slot.sha256.as_deref().unwrap_or("-")),
                );
            } else {
                println!(
                    "  {:<12} {}",
                    self.style(Style::new().dim()).apply_to(name),
                    self.style(Style::new().dim()).apply_to("(empty)")
                );
            }
        }
    }

    fn version_info(&self, info: &VersionInfo) {
        println!("snapring {}", info.version);
        println!(
            "git: {}{}",
            info.git_sha,
            if info.git_dirty { " (dirty)" } else { "" }
        );
        println!("built: {}", info.build_timestamp);
        println!("rustc: {}", info.rustc_version);
        println!("target: {}", info.target);
    }
}
