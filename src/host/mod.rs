//! Host collaborator boundary.
//!
//! The editor owning the live document is an external collaborator; this
//! module pins down the only surface the reload pipeline needs from it:
//! enumerate open documents, snapshot live cells, stat/read the on-disk
//! representation, and apply one atomic replace-range edit.
//!
//! # Modules
//!
//! - `mirror` - file-backed reference host used by the `watch` command

pub mod mirror;

pub use mirror::MirrorHost;

use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::notebook::{Cell, CellKind};
use crate::reload::diff::CellRange;

/// Positional snapshot of one live cell, as exposed by the host.
///
/// Carries exactly the fields reconciliation equality looks at; output
/// content stays host-side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveCell {
    pub kind: CellKind,
    pub source: String,
    pub execution_order: Option<u32>,
    pub output_count: usize,
}

impl From<&Cell> for LiveCell {
    fn from(cell: &Cell) -> Self {
        Self {
            kind: cell.kind,
            source: cell.source.clone(),
            execution_order: cell.execution_order,
            output_count: cell.outputs.len(),
        }
    }
}

/// Document-mutation and I/O surface the host editor provides.
///
/// `stat`, `read`, and `apply_replace_range` may suspend; the caller
/// guarantees they are never invoked concurrently for the same document
/// (single-flight, see the poller).
#[allow(async_fn_in_trait)]
pub trait NotebookHost {
    /// Currently open documents of the watched kind, by location handle.
    fn open_documents(&self) -> Vec<PathBuf>;

    /// Snapshot of the live cell sequence, or `None` if the document
    /// closed since enumeration.
    fn live_cells(&self, doc: &Path) -> Option<Vec<LiveCell>>;

    /// Modification signal for the on-disk representation.
    async fn stat(&self, doc: &Path) -> io::Result<SystemTime>;

    /// Raw bytes of the on-disk representation.
    async fn read(&self, doc: &Path) -> io::Result<Vec<u8>>;

    /// Replace live cells in `[range.start, range.old_end)` with `cells`,
    /// atomically from the perspective of anything reading the live
    /// sequence. Returns whether the host accepted the edit.
    async fn apply_replace_range(&mut self, doc: &Path, range: CellRange, cells: Vec<Cell>)
    -> bool;
}
