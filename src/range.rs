//! Single contiguous id run — the common case for a namespace whose ids
//! happen to be consecutive.

use std::marker::PhantomData;

use crate::RawId;

/// A compile-time-bounded view over the contiguous run `[start, end)`.
///
/// Constructed entirely from literal bounds baked in by the generator.
/// `IdRange::new(0, 0)` is the distinguished empty enumerator: a scope with
/// no ids has `count() == 0` and yields nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IdRange<T> {
    start: RawId,
    end: RawId,
    _ty: PhantomData<fn() -> T>,
}

impl<T> IdRange<T> {
    /// A range covering `[start, end)`.
    ///
    /// # Panics
    ///
    /// Panics if `end < start`. Generated code never trips this; the
    /// compressor only produces well-formed runs.
    #[inline]
    pub const fn new(start: RawId, end: RawId) -> Self {
        assert!(start <= end, "IdRange bounds must satisfy start <= end");
        Self {
            start,
            end,
            _ty: PhantomData,
        }
    }

    /// Inclusive lower bound.
    #[inline]
    pub const fn start(&self) -> RawId {
        self.start
    }

    /// Exclusive upper bound.
    #[inline]
    pub const fn end(&self) -> RawId {
        self.end
    }

    /// Number of ids in the range.
    #[inline]
    pub const fn count(&self) -> u32 {
        self.end - self.start
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether `raw` falls inside `[start, end)`.
    #[inline]
    pub const fn contains(&self, raw: RawId) -> bool {
        raw >= self.start && raw < self.end
    }
}

impl<T: From<RawId>> IdRange<T> {
    /// The id at `offset` from the start of the range.
    ///
    /// # Panics
    ///
    /// Panics if `offset >= count()`. Out-of-bounds access here is a
    /// programming error, not a recoverable condition: structured iteration
    /// never produces an out-of-bounds position.
    #[inline]
    pub fn at(&self, offset: u32) -> T {
        assert!(
            offset < self.count(),
            "id offset {} out of range [{}, {})",
            offset,
            self.start,
            self.end
        );
        T::from(self.start + offset)
    }

    #[inline]
    pub fn iter(&self) -> IdRangeIter<T> {
        IdRangeIter {
            next: self.start,
            end: self.end,
            _ty: PhantomData,
        }
    }
}

impl<T: From<RawId>> IntoIterator for IdRange<T> {
    type Item = T;
    type IntoIter = IdRangeIter<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: From<RawId>> IntoIterator for &IdRange<T> {
    type Item = T;
    type IntoIter = IdRangeIter<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over an [`IdRange`].
///
/// Walks the scalar positions `next..end` and converts each to `T` on
/// yield. Double-ended and exact-sized, which covers the index arithmetic
/// a caller would otherwise do against the range's own scale.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdRangeIter<T> {
    next: RawId,
    end: RawId,
    _ty: PhantomData<fn() -> T>,
}

impl<T: From<RawId>> Iterator for IdRangeIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        if self.next == self.end {
            return None;
        }
        let raw = self.next;
        self.next += 1;
        Some(T::from(raw))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.end - self.next) as usize;
        (remaining, Some(remaining))
    }

    #[inline]
    fn nth(&mut self, n: usize) -> Option<T> {
        let remaining = (self.end - self.next) as usize;
        if n >= remaining {
            self.next = self.end;
            return None;
        }
        self.next += n as RawId;
        self.next()
    }
}

impl<T: From<RawId>> DoubleEndedIterator for IdRangeIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        if self.next == self.end {
            return None;
        }
        self.end -= 1;
        Some(T::from(self.end))
    }
}

impl<T: From<RawId>> ExactSizeIterator for IdRangeIter<T> {}
impl<T: From<RawId>> std::iter::FusedIterator for IdRangeIter<T> {}
