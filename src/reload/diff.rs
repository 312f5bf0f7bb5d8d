//! Minimal replace-range computation between the live and canonical cell
//! sequences.
//!
//! Pure function, no side effects: given the two sequences and an equality
//! predicate, finds the unique maximal common prefix and maximal common
//! suffix that do not overlap, and reports the contiguous middle as the one
//! range to replace. Linear in sequence length, never reorders cells.

/// Half-open replace range over the live sequence, with the replacement
/// span over the canonical sequence implied by `new_end`.
///
/// Replace live cells in `[start, old_end)` with canonical cells in
/// `[start, new_end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    pub start: usize,
    pub old_end: usize,
    pub new_end: usize,
}

impl CellRange {
    /// Number of canonical cells inserted by the edit.
    pub fn inserted(&self) -> usize {
        self.new_end - self.start
    }
}

/// Outcome of diff computation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffOutcome {
    /// No changes detected; the caller must not issue an edit.
    Unchanged,
    /// The minimal contiguous edit that reconciles the sequences.
    Replace(CellRange),
}

/// Compute the minimal replace range (pure function).
///
/// Two-pointer prefix/suffix trim: the standard minimal-diff-range approach
/// when the only available edit is "replace a contiguous slice".
pub fn minimal_range<L, C, F>(live: &[L], canonical: &[C], matches: F) -> DiffOutcome
where
    F: Fn(&L, &C) -> bool,
{
    let old_len = live.len();
    let new_len = canonical.len();

    let mut start = 0;
    while start < old_len.min(new_len) && matches(&live[start], &canonical[start]) {
        start += 1;
    }

    let mut old_end = old_len;
    let mut new_end = new_len;
    while old_end > start && new_end > start && matches(&live[old_end - 1], &canonical[new_end - 1])
    {
        old_end -= 1;
        new_end -= 1;
    }

    if start == old_end && old_end == new_end {
        DiffOutcome::Unchanged
    } else {
        DiffOutcome::Replace(CellRange {
            start,
            old_end,
            new_end,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn diff(live: &[i32], canonical: &[i32]) -> DiffOutcome {
        minimal_range(live, canonical, |a, b| a == b)
    }

    fn range(start: usize, old_end: usize, new_end: usize) -> DiffOutcome {
        DiffOutcome::Replace(CellRange {
            start,
            old_end,
            new_end,
        })
    }

    #[test]
    fn test_identical_sequences_are_unchanged() {
        assert_eq!(diff(&[1, 2, 3], &[1, 2, 3]), DiffOutcome::Unchanged);
        assert_eq!(diff(&[], &[]), DiffOutcome::Unchanged);
        assert_eq!(diff(&[7], &[7]), DiffOutcome::Unchanged);
    }

    #[test]
    fn test_middle_edit() {
        // old = [A, B, C], new = [A, B2, C]
        assert_eq!(diff(&[1, 2, 3], &[1, 9, 3]), range(1, 2, 2));
    }

    #[test]
    fn test_append() {
        assert_eq!(diff(&[1, 2], &[1, 2, 3]), range(2, 2, 3));
    }

    #[test]
    fn test_prepend() {
        assert_eq!(diff(&[2, 3], &[1, 2, 3]), range(0, 0, 1));
    }

    #[test]
    fn test_delete_middle() {
        assert_eq!(diff(&[1, 2, 3], &[1, 3]), range(1, 2, 1));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(diff(&[1, 2, 3], &[1]), range(1, 3, 1));
    }

    #[test]
    fn test_empty_to_full() {
        assert_eq!(diff(&[], &[1, 2]), range(0, 0, 2));
    }

    #[test]
    fn test_full_to_empty() {
        assert_eq!(diff(&[1, 2], &[]), range(0, 2, 0));
    }

    #[test]
    fn test_disjoint_sequences_replace_everything() {
        assert_eq!(diff(&[1, 2, 3], &[4, 5]), range(0, 3, 2));
    }

    #[test]
    fn test_repeated_elements_prefix_wins() {
        // Prefix trim consumes as much as possible before the suffix trim
        // runs; the two never overlap.
        assert_eq!(diff(&[1, 1, 1], &[1, 1]), range(2, 3, 2));
        assert_eq!(diff(&[1, 1], &[1, 1, 1]), range(2, 2, 3));
    }

    #[test]
    fn test_minimality_at_range_edges() {
        let old = [1, 2, 3, 4, 5];
        let new = [1, 8, 9, 4, 5];
        let DiffOutcome::Replace(r) = diff(&old, &new) else {
            panic!("expected a replace range");
        };

        // The cells just inside the range must genuinely differ.
        assert_ne!(old[r.start], new[r.start]);
        assert_ne!(old[r.old_end - 1], new[r.new_end - 1]);
        assert_eq!(
            r,
            CellRange {
                start: 1,
                old_end: 3,
                new_end: 3
            }
        );
    }

    #[test]
    fn test_range_lengths() {
        let r = CellRange {
            start: 1,
            old_end: 3,
            new_end: 2,
        };
        assert_eq!(r.inserted(), 1);
    }
}
