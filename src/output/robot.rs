//! Robot mode JSON output implementation.

use serde::Serialize;
use tracing::{debug, instrument, trace};

use crate::error::SnapError;
use crate::ring::{RotationPlan, RotationReport, SlotRing, SlotStatus};

use super::{Output, RobotFormat, VersionInfo};

/// JSON output implementation for scripts and agents.
pub struct RobotOutput {
    format: RobotFormat,
}

impl RobotOutput {
    #[instrument]
    pub fn new(format: RobotFormat) -> Self {
        debug!(?format, "Creating RobotOutput");
        Self { format }
    }

    fn render<T: Serialize + ?Sized>(&self, data: &T) -> String {
        let json = match self.format {
            RobotFormat::Json => serde_json::to_string_pretty(data),
            RobotFormat::JsonCompact => serde_json::to_string(data),
        };
        json.unwrap_or_else(|e| format!(r#"{{"error":true,"message":"serialization failed: {e}"}}"#))
    }

    fn output_json<T: Serialize + ?Sized>(&self, data: &T) {
        let json = self.render(data);
        trace!(json_len = json.len(), "JSON serialized");
        println!("{json}");
    }
}

impl Output for RobotOutput {
    fn error(&self, error: &SnapError) {
        debug!(error = %error, "Robot: error");
        eprintln!(
            "{}",
            self.render(&serde_json::json!({
                "error": true,
                "kind": error.kind(),
                "message": error.to_string(),
                "suggestion": error.suggestion(),
                "recoverable": error.is_user_recoverable(),
            }))
        );
    }

    fn rotated(&self, ring: &SlotRing, report: &RotationReport) {
        self.output_json(&serde_json::json!({
            "ok": true,
            "dir": ring.dir().display().to_string(),
            "evicted": report.evicted,
            "shifted": report.shifted,
            "inserted_bytes": report.inserted_bytes,
            "occupied": report.occupied,
        }));
    }

    fn planned(&self, ring: &SlotRing, plan: &RotationPlan) {
        self.output_json(&serde_json::json!({
            "dry_run": true,
            "dir": ring.dir().display().to_string(),
            "steps": plan.steps,
        }));
    }

    fn slot_status(&self, ring: &SlotRing, slots: &[SlotStatus]) {
        self.output_json(&serde_json::json!({
            "dir": ring.dir().display().to_string(),
            "queue_len": ring.queue_len(),
            "occupied": slots.iter().filter(|s| s.present).count(),
            "slots": slots,
        }));
    }

    fn version_info(&self, info: &VersionInfo) {
        self.output_json(info);
    }
}
