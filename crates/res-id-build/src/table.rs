//! The flat resource table — the generator's only input.
//!
//! The table arrives already extracted and already sorted from the asset
//! pipeline; this module only enforces the invariants the rest of the pass
//! relies on. A violated invariant fails the whole pass: a code generator
//! has no legitimate notion of partially-correct output.

use std::collections::HashMap;

use res_id::RawId;

/// One resource: a slash-separated path whose last segment names the leaf,
/// plus the numeric id assigned by the asset compiler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceEntry {
    pub path: String,
    pub id: RawId,
}

impl ResourceEntry {
    pub fn new(path: impl Into<String>, id: RawId) -> Self {
        Self {
            path: path.into(),
            id,
        }
    }

    /// Path segments; the last one is the leaf name.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.path.split('/')
    }
}

/// A validated table of resource entries, sorted ascending by path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceTable {
    entries: Vec<ResourceEntry>,
}

impl ResourceTable {
    /// Validate `entries` as a well-formed table.
    ///
    /// Invariants checked:
    /// - no empty path and no empty path segment;
    /// - sorted strictly ascending by path (equal neighbors are duplicates);
    /// - ids unique across the whole table;
    /// - ids below `u32::MAX` (the compressor needs `id + 1` representable).
    pub fn from_entries(entries: Vec<ResourceEntry>) -> Result<Self, TableError> {
        let mut seen_ids: HashMap<RawId, &str> = HashMap::with_capacity(entries.len());

        for (index, entry) in entries.iter().enumerate() {
            if entry.path.is_empty() {
                return Err(TableError::EmptyPath { index });
            }
            if entry.segments().any(str::is_empty) {
                return Err(TableError::EmptySegment {
                    path: entry.path.clone(),
                });
            }
            if entry.id == RawId::MAX {
                return Err(TableError::IdOutOfRange {
                    path: entry.path.clone(),
                });
            }
            if index > 0 {
                let prev = &entries[index - 1];
                if prev.path == entry.path {
                    return Err(TableError::DuplicatePath {
                        path: entry.path.clone(),
                    });
                }
                if prev.path > entry.path {
                    return Err(TableError::Unsorted {
                        prev: prev.path.clone(),
                        next: entry.path.clone(),
                    });
                }
            }
            if let Some(&first) = seen_ids.get(&entry.id) {
                return Err(TableError::DuplicateId {
                    id: entry.id,
                    first: first.to_string(),
                    second: entry.path.clone(),
                });
            }
            seen_ids.insert(entry.id, &entry.path);
        }

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[ResourceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Invariant violations in the input table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// An entry has an empty path.
    EmptyPath { index: usize },
    /// A path contains an empty segment (leading, trailing, or doubled '/').
    EmptySegment { path: String },
    /// The table is not sorted ascending by path.
    Unsorted { prev: String, next: String },
    /// Two entries share the same path.
    DuplicatePath { path: String },
    /// Two entries share the same id.
    DuplicateId {
        id: RawId,
        first: String,
        second: String,
    },
    /// Id value the compressor cannot represent.
    IdOutOfRange { path: String },
}

impl std::fmt::Display for TableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyPath { index } => write!(f, "entry {} has an empty path", index),
            Self::EmptySegment { path } => {
                write!(f, "path '{}' contains an empty segment", path)
            }
            Self::Unsorted { prev, next } => write!(
                f,
                "table is not sorted by path: '{}' precedes '{}'",
                prev, next
            ),
            Self::DuplicatePath { path } => write!(f, "duplicate path '{}'", path),
            Self::DuplicateId { id, first, second } => write!(
                f,
                "duplicate id {}: assigned to both '{}' and '{}'",
                id, first, second
            ),
            Self::IdOutOfRange { path } => {
                write!(f, "id for '{}' must be below u32::MAX", path)
            }
        }
    }
}

impl std::error::Error for TableError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(path: &str, id: RawId) -> ResourceEntry {
        ResourceEntry::new(path, id)
    }

    #[test]
    fn accepts_sorted_unique_table() {
        let table = ResourceTable::from_entries(vec![
            entry("a/b/x", 0),
            entry("a/b/y", 1),
            entry("a/c/z", 2),
        ])
        .unwrap();
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn accepts_empty_table() {
        let table = ResourceTable::from_entries(Vec::new()).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn rejects_unsorted_table() {
        let err = ResourceTable::from_entries(vec![entry("b", 0), entry("a", 1)]).unwrap_err();
        assert!(matches!(err, TableError::Unsorted { .. }));
    }

    #[test]
    fn rejects_duplicate_path() {
        let err = ResourceTable::from_entries(vec![entry("a", 0), entry("a", 1)]).unwrap_err();
        assert!(matches!(err, TableError::DuplicatePath { .. }));
    }

    #[test]
    fn rejects_duplicate_id() {
        let err = ResourceTable::from_entries(vec![entry("a", 7), entry("b", 7)]).unwrap_err();
        match err {
            TableError::DuplicateId { id, first, second } => {
                assert_eq!(id, 7);
                assert_eq!(first, "a");
                assert_eq!(second, "b");
            }
            other => panic!("expected DuplicateId, got {:?}", other),
        }
    }

    #[test]
    fn rejects_empty_path_and_segments() {
        assert!(matches!(
            ResourceTable::from_entries(vec![entry("", 0)]).unwrap_err(),
            TableError::EmptyPath { .. }
        ));
        for path in ["/a", "a/", "a//b"] {
            assert!(matches!(
                ResourceTable::from_entries(vec![entry(path, 0)]).unwrap_err(),
                TableError::EmptySegment { .. }
            ));
        }
    }

    #[test]
    fn rejects_id_max() {
        let err = ResourceTable::from_entries(vec![entry("a", RawId::MAX)]).unwrap_err();
        assert!(matches!(err, TableError::IdOutOfRange { .. }));
    }

    #[test]
    fn segments_split_on_slash() {
        let e = entry("ui/icons/save", 3);
        let segs: Vec<&str> = e.segments().collect();
        assert_eq!(segs, vec!["ui", "icons", "save"]);
    }
}
