//! TOML manifest surface for the generator.
//!
//! The real producer of the resource table is the asset compiler; this
//! manifest is its stand-in for build.rs use and for tests. The core pass
//! requires a sorted table, so the manifest layer sorts by path before
//! validation — duplicate paths or ids still fail.

use serde::Deserialize;
use std::path::Path;

use res_id::RawId;

use crate::codegen::GenOptions;
use crate::table::{ResourceEntry, ResourceTable, TableError};

/// Parsed and validated manifest: emission options plus the table.
#[derive(Debug, Clone)]
pub struct Manifest {
    pub options: GenOptions,
    pub table: ResourceTable,
}

/// Raw TOML structure.
#[derive(Debug, Deserialize)]
struct RawManifest {
    /// Optional outer module name (defaults to "resources").
    module_name: Option<String>,
    /// Optional crate path for the runtime types (defaults to "res_id").
    id_crate: Option<String>,
    /// Optional full path of the identifier type.
    type_name: Option<String>,
    resources: RawResources,
}

#[derive(Debug, Deserialize)]
struct RawResources {
    entries: Vec<RawEntry>,
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    path: String,
    id: RawId,
}

impl Manifest {
    /// Parse from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ManifestError::Io(format!("failed to read {}: {}", path.as_ref().display(), e))
        })?;
        Self::from_toml(&content)
    }

    /// Parse from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ManifestError> {
        let raw: RawManifest =
            toml::from_str(content).map_err(|e| ManifestError::Parse(e.to_string()))?;

        let mut options = GenOptions::default();
        if let Some(module_name) = raw.module_name {
            require_ident(&module_name, "module_name")?;
            options.module_name = module_name;
        }
        if let Some(id_crate) = raw.id_crate {
            require_ident(&id_crate, "id_crate")?;
            options.id_crate = id_crate;
        }
        if let Some(type_name) = raw.type_name {
            if type_name.is_empty() {
                return Err(ManifestError::Validation(
                    "type_name must not be empty".into(),
                ));
            }
            options.type_name = Some(type_name);
        }

        // Establish the core's sortedness precondition here; the asset
        // pipeline does the same before handing over a real table.
        let mut entries: Vec<ResourceEntry> = raw
            .resources
            .entries
            .into_iter()
            .map(|e| ResourceEntry::new(e.path, e.id))
            .collect();
        entries.sort_by(|a, b| a.path.cmp(&b.path));

        let table = ResourceTable::from_entries(entries)?;
        Ok(Self { options, table })
    }
}

fn require_ident(value: &str, key: &str) -> Result<(), ManifestError> {
    let mut chars = value.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(ManifestError::Validation(format!(
            "{} '{}' is not a valid identifier",
            key, value
        )))
    }
}

/// Errors during manifest loading.
#[derive(Debug)]
pub enum ManifestError {
    /// IO error.
    Io(String),
    /// TOML parse error.
    Parse(String),
    /// Option validation error.
    Validation(String),
    /// Table invariant violation.
    Table(TableError),
}

impl std::fmt::Display for ManifestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "IO error: {}", msg),
            Self::Parse(msg) => write!(f, "parse error: {}", msg),
            Self::Validation(msg) => write!(f, "validation error: {}", msg),
            Self::Table(e) => write!(f, "invalid resource table: {}", e),
        }
    }
}

impl std::error::Error for ManifestError {}

impl From<TableError> for ManifestError {
    fn from(e: TableError) -> Self {
        Self::Table(e)
    }
}
