//! snapring library - a fixed ring of numbered camera snapshots on disk.
//!
//! This library exposes the core functionality of the `snapring` CLI for use
//! in tests and other applications.
//!
//! # Modules
//!
//! - `ring`: Slot layout, rotation planning and application
//! - `error`: Error types with user-recoverable hints
//! - `output`: Output mode abstraction (robot/human)
//! - `cli`: Command line definitions
//! - `logging`: Tracing subscriber setup
#![forbid(unsafe_code)]

pub mod cli;
pub mod error;
pub mod logging;
pub mod output;
pub mod ring;

pub use error::{Result, SnapError};
pub use ring::SlotRing;
