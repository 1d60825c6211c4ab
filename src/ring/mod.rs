//! On-disk snapshot ring.
//!
//! A ring is a fixed number of numbered slot files in one directory,
//! `snap1.jpg` (newest) through `snap4.jpg` (oldest). A rotation evicts the
//! oldest slot, shifts every remaining slot one position older, then copies
//! the camera image `cam.jpg` into slot 1.
//!
//! Slots may be missing anywhere in the ring; missing slots are skipped and
//! never treated as errors.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::{debug, instrument, trace};

use crate::error::{Result, SnapError};

pub mod plan;

pub use plan::{RotationPlan, RotationReport, RotationStep, SlotMove};

/// Number of slots in the ring.
pub const DEFAULT_QUEUE_LEN: usize = 4;
/// Filename stem shared by every slot.
pub const SLOT_PREFIX: &str = "snap";
/// Filename extension of every slot.
pub const SLOT_EXTENSION: &str = "jpg";
/// Image inserted into slot 1 on each rotation.
pub const SOURCE_NAME: &str = "cam.jpg";

/// Layout of a snapshot ring in a directory.
#[derive(Debug, Clone, Serialize)]
pub struct SlotRing {
    dir: PathBuf,
    prefix: String,
    extension: String,
    queue_len: usize,
    source: String,
}

impl SlotRing {
    /// Standard four-slot ring fed from `cam.jpg` in `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            prefix: SLOT_PREFIX.to_string(),
            extension: SLOT_EXTENSION.to_string(),
            queue_len: DEFAULT_QUEUE_LEN,
            source: SOURCE_NAME.to_string(),
        }
    }

    /// Ring with a custom number of slots.
    pub fn with_queue_len(dir: impl Into<PathBuf>, queue_len: usize) -> Result<Self> {
        if queue_len == 0 {
            return Err(SnapError::InvalidQueueLength { len: queue_len });
        }
        Ok(Self {
            queue_len,
            ..Self::new(dir)
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub const fn queue_len(&self) -> usize {
        self.queue_len
    }

    /// Path of slot `index` (1-based, 1 is newest).
    pub fn slot_path(&self, index: usize) -> PathBuf {
        debug_assert!(
            (1..=self.queue_len).contains(&index),
            "slot {index} outside ring of {}",
            self.queue_len
        );
        self.dir
            .join(format!("{}{index}.{}", self.prefix, self.extension))
    }

    /// Path of the camera image copied into slot 1.
    pub fn source_path(&self) -> PathBuf {
        self.dir.join(&self.source)
    }

    /// Whether slot `index` currently exists on disk.
    pub fn slot_exists(&self, index: usize) -> bool {
        self.slot_path(index).exists()
    }

    /// Number of slots currently present.
    pub fn occupied(&self) -> usize {
        (1..=self.queue_len)
            .filter(|&index| self.slot_exists(index))
            .count()
    }

    /// Work out the steps a rotation would perform, without touching disk.
    ///
    /// Fails with [`SnapError::MissingSource`] when the camera image is absent,
    /// so a failed capture never shifts the ring.
    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    pub fn plan(&self) -> Result<RotationPlan> {
        let source = self.source_path();
        if !source.is_file() {
            debug!(path = %source.display(), "Source image missing");
            return Err(SnapError::MissingSource { path: source });
        }

        let mut steps = Vec::with_capacity(self.queue_len + 1);

        if self.slot_exists(self.queue_len) {
            steps.push(RotationStep::Evict {
                slot: self.queue_len,
            });
        }

        for index in (1..self.queue_len).rev() {
            if self.slot_exists(index) {
                steps.push(RotationStep::Shift {
                    from: index,
                    to: index + 1,
                });
            } else {
                trace!(slot = index, "Slot empty, nothing to shift");
            }
        }

        steps.push(RotationStep::Insert { slot: 1 });

        debug!(steps = steps.len(), "Planned rotation");
        Ok(RotationPlan { steps })
    }

    /// Evict the oldest slot, shift the rest, and insert the camera image.
    pub fn rotate(&self) -> Result<RotationReport> {
        self.plan()?.apply(self)
    }

    /// State of every slot, newest first.
    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    pub fn status(&self) -> Result<Vec<SlotStatus>> {
        (1..=self.queue_len)
            .map(|index| SlotStatus::read(index, &self.slot_path(index)))
            .collect()
    }
}

/// Observed state of a single slot.
#[derive(Debug, Clone, Serialize)]
pub struct SlotStatus {
    pub index: usize,
    pub path: String,
    pub present: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
    /// Last modification time, RFC 3339 in local time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
    /// Hex SHA-256 of the slot content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
}

impl SlotStatus {
    fn read(index: usize, path: &Path) -> Result<Self> {
        let metadata = match fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                trace!(slot = index, "Slot absent");
                return Ok(Self {
                    index,
                    path: path.display().to_string(),
                    present: false,
                    size_bytes: None,
                    modified: None,
                    sha256: None,
                });
            }
            Err(e) => return Err(SnapError::from_io("inspect", path, e)),
        };

        let modified = metadata
            .modified()
            .ok()
            .map(|t| chrono::DateTime::<chrono::Local>::from(t).to_rfc3339());

        // Only regular files are hashed; anything else still occupies the slot.
        let sha256 = if metadata.is_file() {
            let data = fs::read(path).map_err(|e| SnapError::from_io("read", path, e))?;
            Some(hex::encode(Sha256::digest(&data)))
        } else {
            debug!(slot = index, "Slot is not a regular file, skipping digest");
            None
        };

        Ok(Self {
            index,
            path: path.display().to_string(),
            present: true,
            size_bytes: Some(metadata.len()),
            modified,
            sha256,
        })
    }
}
