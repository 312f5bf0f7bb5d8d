//! File-backed mirror host.
//!
//! Reference implementation of [`NotebookHost`] used by the `watch` command:
//! each opened notebook gets an in-memory cell mirror, seeded once from disk
//! and thereafter mutated only through replace-range edits. Stat and read go
//! straight to the filesystem.

use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use rustc_hash::FxHashMap;

use super::{LiveCell, NotebookHost};
use crate::notebook::{Cell, parse_notebook};
use crate::reload::diff::CellRange;

/// In-memory notebook mirrors keyed by file path
pub struct MirrorHost {
    /// Open documents in discovery order.
    order: Vec<PathBuf>,
    documents: FxHashMap<PathBuf, Vec<Cell>>,
}

impl MirrorHost {
    pub fn new() -> Self {
        Self {
            order: Vec::new(),
            documents: FxHashMap::default(),
        }
    }

    /// Open a document: read it once and seed the in-memory mirror.
    ///
    /// A seed parse failure leaves an empty mirror (logged); the first
    /// reload after an on-disk change fills it in. A read failure is
    /// propagated - a file that cannot be opened cannot be watched.
    pub async fn open(&mut self, path: PathBuf) -> io::Result<()> {
        let bytes = tokio::fs::read(&path).await?;
        let cells = match parse_notebook(&bytes) {
            Ok(cells) => cells,
            Err(err) => {
                crate::log!("watch"; "{}: seeded empty ({})", path.display(), err);
                Vec::new()
            }
        };

        if !self.documents.contains_key(&path) {
            self.order.push(path.clone());
        }
        self.documents.insert(path, cells);
        Ok(())
    }

    /// Stop watching a document and drop its mirror.
    #[allow(dead_code)] // Host lifecycle surface; the CLI watches until exit
    pub fn close(&mut self, path: &Path) {
        self.order.retain(|p| p != path);
        self.documents.remove(path);
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl Default for MirrorHost {
    fn default() -> Self {
        Self::new()
    }
}

impl NotebookHost for MirrorHost {
    fn open_documents(&self) -> Vec<PathBuf> {
        self.order.clone()
    }

    fn live_cells(&self, doc: &Path) -> Option<Vec<LiveCell>> {
        self.documents
            .get(doc)
            .map(|cells| cells.iter().map(LiveCell::from).collect())
    }

    async fn stat(&self, doc: &Path) -> io::Result<SystemTime> {
        tokio::fs::metadata(doc).await?.modified()
    }

    async fn read(&self, doc: &Path) -> io::Result<Vec<u8>> {
        tokio::fs::read(doc).await
    }

    async fn apply_replace_range(
        &mut self,
        doc: &Path,
        range: CellRange,
        cells: Vec<Cell>,
    ) -> bool {
        let Some(live) = self.documents.get_mut(doc) else {
            return false;
        };
        if range.start > range.old_end || range.old_end > live.len() {
            return false;
        }
        live.splice(range.start..range.old_end, cells);
        true
    }
}

// =============================================================================
// Tests
// =============================================================================
