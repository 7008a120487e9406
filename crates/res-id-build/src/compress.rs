//! Maximal contiguous-run compression.
//!
//! Turns a sorted set of unique ids into the minimal ordered list of maximal
//! `[start, end)` runs — the bounds later baked into generated enumerators.

use res_id::{RawId, Run};

/// Compress sorted unique ids into maximal contiguous runs.
///
/// Single pass, O(n). The output runs are pairwise disjoint, ascending, and
/// never adjacent (adjacent runs are merged as they form), and their union
/// is exactly the input set. Empty input compresses to no runs. A sorted
/// unique input has exactly one correct compression, so the result is fully
/// deterministic.
///
/// Sortedness and uniqueness are preconditions established by the caller
/// (the table validates ids globally, the tree builder sorts per scope);
/// they are re-checked here only as a debug assertion.
pub fn compress_runs(ids: &[RawId]) -> Vec<Run> {
    let mut runs = Vec::new();
    let mut iter = ids.iter().copied();
    let Some(first) = iter.next() else {
        return runs;
    };

    let mut start = first;
    let mut end = first + 1;
    for id in iter {
        debug_assert!(id >= end, "compressor input must be sorted and unique");
        if id == end {
            end += 1;
        } else {
            runs.push(Run::new(start, end));
            start = id;
            end = id + 1;
        }
    }
    runs.push(Run::new(start, end));
    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runs(pairs: &[(RawId, RawId)]) -> Vec<Run> {
        pairs.iter().map(|&(s, e)| Run::new(s, e)).collect()
    }

    #[test]
    fn compresses_mixed_ids() {
        assert_eq!(
            compress_runs(&[1, 2, 3, 7, 8, 10]),
            runs(&[(1, 4), (7, 9), (10, 11)])
        );
    }

    #[test]
    fn empty_input_gives_no_runs() {
        assert_eq!(compress_runs(&[]), Vec::new());
    }

    #[test]
    fn single_id() {
        assert_eq!(compress_runs(&[5]), runs(&[(5, 6)]));
    }

    #[test]
    fn fully_contiguous_input_is_one_run() {
        assert_eq!(compress_runs(&[10, 11, 12, 13]), runs(&[(10, 14)]));
    }

    #[test]
    fn fully_scattered_input_is_one_run_each() {
        assert_eq!(compress_runs(&[0, 2, 4]), runs(&[(0, 1), (2, 3), (4, 5)]));
    }

    #[test]
    fn output_runs_are_disjoint_ascending_nonadjacent_and_cover_input() {
        let ids: Vec<RawId> = vec![0, 1, 4, 5, 6, 9, 13, 14, 20];
        let out = compress_runs(&ids);

        for pair in out.windows(2) {
            assert!(pair[1].start > pair[0].end, "runs must not touch or overlap");
        }

        let rebuilt: Vec<RawId> = out.iter().flat_map(|r| r.start..r.end).collect();
        assert_eq!(rebuilt, ids);
    }
}
