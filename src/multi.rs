//! Union of disjoint id runs presented as one iteration sequence.
//!
//! A namespace whose ids are not consecutive compresses into several maximal
//! runs. [`MultiRange`] holds those runs in a fixed array and iterates them
//! back-to-back with a sentinel-terminated cursor, so consumers see a single
//! ordered stream of ids with no runtime container behind it.

use std::marker::PhantomData;

use serde::{Deserialize, Serialize};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::RawId;

/// One maximal contiguous run `[start, end)` inside a multi-range.
///
/// Produced by the generator's run compressor; two runs emitted for the same
/// scope are never adjacent (adjacent runs would have been merged).
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    IntoBytes,
    FromBytes,
    Immutable,
    KnownLayout,
)]
#[repr(C)]
pub struct Run {
    pub start: RawId,
    pub end: RawId,
}

impl Run {
    #[inline]
    pub const fn new(start: RawId, end: RawId) -> Self {
        Self { start, end }
    }

    /// Number of ids in the run.
    #[inline]
    pub const fn len(&self) -> u32 {
        self.end - self.start
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[inline]
    pub const fn contains(&self, raw: RawId) -> bool {
        raw >= self.start && raw < self.end
    }
}

/// Synthetic terminating run. Never yielded; it only gives the cursor's
/// advance step an unconditional stopping state.
const SENTINEL: Run = Run { start: 0, end: 2 };

/// A compile-time-bounded union of `N` disjoint, ascending, non-adjacent
/// runs, iterable as a single sequence of `T`.
///
/// Like [`IdRange`](crate::IdRange), all bounds are construction-time
/// constants; the whole type is `Copy` and iteration costs a compare and an
/// add per element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MultiRange<T, const N: usize> {
    runs: [Run; N],
    _ty: PhantomData<fn() -> T>,
}

impl<T, const N: usize> MultiRange<T, N> {
    /// A multi-range over `runs`, in the order given.
    ///
    /// # Panics
    ///
    /// Panics (at compile time, in const contexts) if any run is empty or if
    /// the runs are not strictly ascending and non-adjacent. Generated code
    /// never trips this; the compressor's output is maximal by construction.
    pub const fn new(runs: [Run; N]) -> Self {
        let mut i = 0;
        while i < N {
            assert!(runs[i].start < runs[i].end, "runs must be non-empty");
            if i > 0 {
                assert!(
                    runs[i].start > runs[i - 1].end,
                    "runs must be ascending and non-adjacent"
                );
            }
            i += 1;
        }
        Self {
            runs,
            _ty: PhantomData,
        }
    }

    /// The run descriptors, in iteration order.
    #[inline]
    pub const fn runs(&self) -> &[Run] {
        &self.runs
    }

    /// Total number of ids across all runs.
    #[inline]
    pub const fn count(&self) -> u32 {
        let mut total = 0;
        let mut i = 0;
        while i < N {
            total += self.runs[i].len();
            i += 1;
        }
        total
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Whether `raw` falls inside any run.
    #[inline]
    pub const fn contains(&self, raw: RawId) -> bool {
        let mut i = 0;
        while i < N {
            if self.runs[i].contains(raw) {
                return true;
            }
            i += 1;
        }
        false
    }
}

impl<T: From<RawId>, const N: usize> MultiRange<T, N> {
    /// Cursor positioned one advance step before the first real id: the
    /// first element falls out of the shared advance path with no special
    /// first-iteration branch.
    #[inline]
    pub fn iter(&self) -> MultiRangeIter<T, N> {
        let first = if N == 0 { SENTINEL } else { self.runs[0] };
        let mut iter = MultiRangeIter {
            runs: self.runs,
            pos: first.start.wrapping_sub(1),
            run: 0,
            _ty: PhantomData,
        };
        iter.advance();
        iter
    }
}

impl<T: From<RawId>, const N: usize> IntoIterator for MultiRange<T, N> {
    type Item = T;
    type IntoIter = MultiRangeIter<T, N>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: From<RawId>, const N: usize> IntoIterator for &MultiRange<T, N> {
    type Item = T;
    type IntoIter = MultiRangeIter<T, N>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over a [`MultiRange`].
///
/// The cursor is the pair `(pos, run)`; `run == N` is the sentinel state
/// that terminates iteration. Equality derives over both fields: comparing
/// `pos` alone would be wrong, since two runs can coincidentally share a
/// boundary value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MultiRangeIter<T, const N: usize> {
    runs: [Run; N],
    pos: RawId,
    run: usize,
    _ty: PhantomData<fn() -> T>,
}

impl<T, const N: usize> MultiRangeIter<T, N> {
    #[inline]
    fn run_at(&self, index: usize) -> Run {
        if index < N { self.runs[index] } else { SENTINEL }
    }

    /// Step the cursor by one id. Re-checks `pos >= end` after every run
    /// switch (not just once), which keeps the step correct even for
    /// degenerate zero-length runs. The sentinel's `[0, 2)` always absorbs
    /// the final switch.
    #[inline]
    fn advance(&mut self) {
        self.pos = self.pos.wrapping_add(1);
        while self.run < N && self.pos >= self.runs[self.run].end {
            self.run += 1;
            self.pos = self.run_at(self.run).start;
        }
    }
}

impl<T: From<RawId>, const N: usize> Iterator for MultiRangeIter<T, N> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        if self.run == N {
            return None;
        }
        let raw = self.pos;
        self.advance();
        Some(T::from(raw))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.run == N {
            return (0, Some(0));
        }
        let mut remaining = (self.runs[self.run].end - self.pos) as usize;
        let mut i = self.run + 1;
        while i < N {
            remaining += self.runs[i].len() as usize;
            i += 1;
        }
        (remaining, Some(remaining))
    }
}

impl<T: From<RawId>, const N: usize> ExactSizeIterator for MultiRangeIter<T, N> {}
impl<T: From<RawId>, const N: usize> std::iter::FusedIterator for MultiRangeIter<T, N> {}
