//! One reload cycle: read -> parse -> diff -> apply.
//!
//! A cycle runs only after the poller observed a signal advance for the
//! document. Every failure is scoped to the document and the cycle; the
//! outcome tells the poller whether to commit the observed signal as the new
//! baseline and whether to arm the self-trigger suppression window.

use std::path::Path;

use thiserror::Error;

use crate::host::NotebookHost;
use crate::notebook::{Cell, ParseError, parse_notebook};
use crate::reload::compare::cells_match;
use crate::reload::diff::{CellRange, DiffOutcome, minimal_range};

/// Why a reload cycle produced no edit
#[derive(Debug, Error)]
pub enum ReloadError {
    #[error("read failed: {0}")]
    Read(#[from] std::io::Error),

    #[error("{0}")]
    Parse(#[from] ParseError),

    #[error("document closed during reload")]
    Closed,

    #[error("host rejected edit of cells [{}..{})", .range.start, .range.old_end)]
    Apply { range: CellRange },
}

/// Outcome of one reload cycle
#[derive(Debug)]
pub enum ReloadOutcome {
    /// One replace-range edit was applied; the live sequence now matches
    /// the canonical one.
    Applied { range: CellRange, replaced: usize },
    /// Live and canonical sequences already agree.
    Clean,
    Failed(ReloadError),
}

impl ReloadOutcome {
    /// Whether the observed signal becomes the document's new baseline.
    ///
    /// Everything commits except a read failure: transient I/O must retry
    /// on the next tick without waiting for a further external change,
    /// while parse and apply failures wait until the file changes again.
    pub fn commits_signal(&self) -> bool {
        !matches!(self, Self::Failed(ReloadError::Read(_)))
    }

    pub fn applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// Run one reload cycle for `doc`: read and parse the on-disk
/// representation, diff it against the live sequence, and issue at most one
/// replace-range edit.
pub async fn reload_cycle<H: NotebookHost>(host: &mut H, doc: &Path) -> ReloadOutcome {
    let bytes = match host.read(doc).await {
        Ok(bytes) => bytes,
        Err(err) => return ReloadOutcome::Failed(err.into()),
    };

    let canonical = match parse_notebook(&bytes) {
        Ok(cells) => cells,
        Err(err) => return ReloadOutcome::Failed(err.into()),
    };

    let Some(live) = host.live_cells(doc) else {
        return ReloadOutcome::Failed(ReloadError::Closed);
    };

    match minimal_range(&live, &canonical, cells_match) {
        DiffOutcome::Unchanged => ReloadOutcome::Clean,
        DiffOutcome::Replace(range) => {
            let replacement: Vec<Cell> = canonical[range.start..range.new_end].to_vec();
            let replaced = replacement.len();
            if host.apply_replace_range(doc, range, replacement).await {
                ReloadOutcome::Applied { range, replaced }
            } else {
                ReloadOutcome::Failed(ReloadError::Apply { range })
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
