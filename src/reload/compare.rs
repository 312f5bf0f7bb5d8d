//! Cell equality for reconciliation.
//!
//! Two cells are equal iff kind, exact source text, and normalized execution
//! order agree, and they carry the same *count* of outputs. Output content is
//! deliberately not compared: a cell whose output count is unchanged counts
//! as unchanged even if the content differs. This trades perfect fidelity for
//! comparison cheapness and stability under noisy output streams; a re-run
//! producing the same number of outputs is only detected once source or
//! execution order moves too.

use crate::host::LiveCell;
use crate::notebook::Cell;

/// Reconciliation equality between a live cell and a canonical record.
pub fn cells_match(live: &LiveCell, canonical: &Cell) -> bool {
    live.kind == canonical.kind
        && live.source == canonical.source
        && live.execution_order.unwrap_or(0) == canonical.execution_order.unwrap_or(0)
        && live.output_count == canonical.outputs.len()
}
