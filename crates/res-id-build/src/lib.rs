//! Build-time generator for res-id.
//!
//! Compiles a flat, path-keyed table of numeric resource ids into:
//! - a hierarchy of named constants mirroring the directory structure of
//!   the paths, and
//! - per namespace, an `enumerate()` accessor returning a zero-overhead
//!   `IdRange` or `MultiRange` covering every id declared beneath it.
//!
//! The generator is single-threaded, single-pass, offline: it consumes its
//! input once per build and emits one complete text artifact. Any invariant
//! violation in the input (duplicate id, unsorted table, identifier
//! collision after sanitization) fails the pass — there is no partially
//! correct output.
//!
//! # Usage in build.rs
//!
//! ```ignore
//! // build.rs
//! fn main() {
//!     println!("cargo:rerun-if-changed=resources.toml");
//!     res_id_build::generate("resources.toml", "src/generated_resources.rs")
//!         .expect("failed to generate resource ids");
//! }
//! ```
//!
//! The manifest lists the `(path, id)` table produced by the asset compiler:
//!
//! ```toml
//! module_name = "resources"   # optional, default "resources"
//!
//! [resources]
//! entries = [
//!     { path = "ui/icons/save", id = 12 },
//!     { path = "sfx/jump", id = 2 },
//! ]
//! ```

mod codegen;
mod compress;
mod manifest;
mod table;

pub use codegen::{generate_code, CodegenError, GenOptions};
pub use compress::compress_runs;
pub use manifest::{Manifest, ManifestError};
pub use table::{ResourceEntry, ResourceTable, TableError};

use std::path::Path;

/// Main entry point for build.rs integration.
///
/// Reads the TOML manifest at `manifest_path`, generates the namespace
/// source text, and writes it to `output_path`. Re-running on an unchanged
/// manifest rewrites a byte-identical file.
///
/// # Errors
///
/// Returns an error if the manifest cannot be read or parsed, if the table
/// violates its invariants, if sanitization maps two distinct segments to
/// the same identifier, or if the output file cannot be written.
pub fn generate(
    manifest_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
) -> Result<(), GenerateError> {
    let manifest = Manifest::from_file(manifest_path)?;
    let code = generate_code(&manifest.options, &manifest.table)?;
    std::fs::write(output_path, code)?;
    Ok(())
}

/// Errors that can occur during generation.
#[derive(Debug)]
pub enum GenerateError {
    /// Failed to load or validate the manifest.
    Manifest(ManifestError),
    /// Emission failed.
    Codegen(CodegenError),
    /// IO error writing the output.
    Io(std::io::Error),
}

impl std::fmt::Display for GenerateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Manifest(e) => write!(f, "manifest error: {}", e),
            Self::Codegen(e) => write!(f, "codegen error: {}", e),
            Self::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for GenerateError {}

impl From<ManifestError> for GenerateError {
    fn from(e: ManifestError) -> Self {
        Self::Manifest(e)
    }
}

impl From<CodegenError> for GenerateError {
    fn from(e: CodegenError) -> Self {
        Self::Codegen(e)
    }
}

impl From<std::io::Error> for GenerateError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
