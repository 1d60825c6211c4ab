//! Rotation plans and their application to disk.

use std::fs;
use std::io;

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use super::SlotRing;
use crate::error::{Result, SnapError};

/// A single filesystem step of a rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum RotationStep {
    /// Delete the oldest slot to make room.
    Evict { slot: usize },
    /// Rename a slot one position older.
    Shift { from: usize, to: usize },
    /// Copy the camera image into a slot.
    Insert { slot: usize },
}

/// One slot renamed during a rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SlotMove {
    pub from: usize,
    pub to: usize,
}

/// Ordered steps for one rotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RotationPlan {
    pub steps: Vec<RotationStep>,
}

/// What a completed rotation did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RotationReport {
    /// Slot deleted to make room, if the ring was full.
    pub evicted: Option<usize>,
    pub shifted: Vec<SlotMove>,
    /// Bytes copied from the camera image into slot 1.
    pub inserted_bytes: u64,
    /// Slots present after the rotation.
    pub occupied: usize,
}

impl RotationPlan {
    /// Execute the steps in order against `ring`.
    ///
    /// A slot that disappeared between planning and applying is skipped.
    /// Steps already applied are not rolled back on failure.
    #[instrument(skip(self, ring), fields(dir = %ring.dir().display(), steps = self.steps.len()))]
    pub fn apply(&self, ring: &SlotRing) -> Result<RotationReport> {
        let mut report = RotationReport {
            evicted: None,
            shifted: Vec::new(),
            inserted_bytes: 0,
            occupied: 0,
        };

        for step in &self.steps {
            match *step {
                RotationStep::Evict { slot } => {
                    let path = ring.slot_path(slot);
                    match fs::remove_file(&path) {
                        Ok(()) => {
                            debug!(slot, path = %path.display(), "Evicted oldest slot");
                            report.evicted = Some(slot);
                        }
                        Err(e) if e.kind() == io::ErrorKind::NotFound => {
                            warn!(slot, "Slot vanished before eviction, skipping");
                        }
                        Err(e) => return Err(SnapError::from_io("delete", &path, e)),
                    }
                }
                RotationStep::Shift { from, to } => {
                    let src = ring.slot_path(from);
                    let dst = ring.slot_path(to);
                    match fs::rename(&src, &dst) {
                        Ok(()) => {
                            debug!(from, to, "Shifted slot");
                            report.shifted.push(SlotMove { from, to });
                        }
                        Err(e) if e.kind() == io::ErrorKind::NotFound => {
                            warn!(from, to, "Slot vanished before shift, skipping");
                        }
                        Err(e) => return Err(SnapError::from_io("rename", &src, e)),
                    }
                }
                RotationStep::Insert { slot } => {
                    let source = ring.source_path();
                    let dst = ring.slot_path(slot);
                    report.inserted_bytes = fs::copy(&source, &dst).map_err(|e| {
                        if e.kind() == io::ErrorKind::NotFound && !source.exists() {
                            SnapError::MissingSource {
                                path: source.clone(),
                            }
                        } else {
                            SnapError::from_io("copy", &source, e)
                        }
                    })?;
                    debug!(slot, bytes = report.inserted_bytes, "Inserted newest image");
                }
            }
        }

        report.occupied = ring.occupied();
        info!(
            evicted = ?report.evicted,
            shifted = report.shifted.len(),
            occupied = report.occupied,
            "Rotation complete"
        );
        Ok(report)
    }

    /// Human-readable description of each step, relative to `ring`.
    pub fn describe(&self, ring: &SlotRing) -> Vec<String> {
        self.steps
            .iter()
            .map(|step| match *step {
                RotationStep::Evict { slot } => {
                    format!("delete {}", ring.slot_path(slot).display())
                }
                RotationStep::Shift { from, to } => format!(
                    "rename {} -> {}",
                    ring.slot_path(from).display(),
                    ring.slot_path(to).display()
                ),
                RotationStep::Insert { slot } => format!(
                    "copy {} -> {}",
                    ring.source_path().display(),
                    ring.slot_path(slot).display()
                ),
            })
            .collect()
    }
}
