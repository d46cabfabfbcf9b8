//! Output module for leaf visitors and record rendering
//!
//! This module handles:
//! - The visitor interface traversal hands leaf pages to
//! - Collecting extracted book records
//! - Writing main content snapshots to disk
//! - Serializing records as JSON or plain text

mod collector;
mod render;
mod snapshot;
mod traits;

pub use collector::RecordCollector;
pub use render::{write_books, OutputFormat};
pub use snapshot::{snapshot_path, SnapshotWriter};
pub use traits::Visitor;
