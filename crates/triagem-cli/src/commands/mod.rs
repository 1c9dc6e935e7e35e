pub mod catalog;
pub mod classify;
pub mod schedule;
pub mod serve;

use std::path::PathBuf;
use triagem_core::catalog::builtin;
use triagem_core::catalog::SectorCatalog;
use triagem_core::error::TriagemError;

/// The catalog named on the command line, or the builtin default.
pub fn resolve_catalog(path: Option<PathBuf>) -> Result<SectorCatalog, TriagemError> {
    match path {
        Some(path) => triagem_core::catalog::load_catalog(&path),
        None => builtin::default_catalog(),
    }
}
