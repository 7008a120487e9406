//! # Resource-ID Range Enumeration (res-id)
//!
//! Runtime companion to the `res-id-build` generator. The generator turns a
//! flat table of `(path, id)` pairs into nested modules of named constants,
//! and each module exposes an `enumerate()` accessor covering every id
//! declared beneath it. The types in this crate are what those accessors
//! return: compile-time-bounded, zero-overhead views over contiguous id runs.
//!
//! ## Design
//!
//! All bounds are baked in at construction (`const fn new`), so a range is
//! nothing more than a disguised bounded scalar:
//!
//! ```ignore
//! for icon in resources::ui::icons::enumerate() {
//!     preload(icon);
//! }
//! ```
//!
//! - [`IdRange`] — one contiguous run `[start, end)`.
//! - [`MultiRange`] — a union of disjoint, non-adjacent runs presented as a
//!   single iteration sequence.
//!
//! Neither type allocates, locks, or refers back to generator-time data; any
//! number of threads may construct and iterate independent instances.

pub mod multi;
pub mod range;

pub use multi::{MultiRange, MultiRangeIter, Run};
pub use range::{IdRange, IdRangeIter};

use serde::{Deserialize, Serialize};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// Raw scalar form of a resource id.
pub type RawId = u32;

/// Default resource identifier type emitted by the generator.
///
/// A plain newtype over the raw id, POD and freely copyable. Projects that
/// want their own identifier type only need `const fn from_raw(u32)` and
/// `From<u32>` to slot into generated code instead of this one.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    IntoBytes,
    FromBytes,
    Immutable,
    KnownLayout,
)]
#[repr(transparent)]
pub struct ResId(pub RawId);

impl ResId {
    /// Const constructor used by generated constants.
    #[inline]
    pub const fn from_raw(raw: RawId) -> Self {
        Self(raw)
    }

    /// Underlying raw id.
    #[inline]
    pub const fn raw(self) -> RawId {
        self.0
    }
}

impl From<RawId> for ResId {
    #[inline]
    fn from(raw: RawId) -> Self {
        Self(raw)
    }
}

impl From<ResId> for RawId {
    #[inline]
    fn from(id: ResId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ResId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
