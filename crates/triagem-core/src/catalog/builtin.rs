use crate::catalog::schema::CatalogDef;
use crate::catalog::SectorCatalog;
use crate::error::TriagemError;

const HOSPITAL_JSON: &str = include_str!("../../../../catalogs/hospital.json");

/// Available predefined catalogs.
pub const PRESETS: &[&str] = &["hospital"];

/// Name of the preset used when no catalog is given.
pub const DEFAULT_PRESET: &str = "hospital";

/// Load a predefined catalog by name.
pub fn load_preset(name: &str) -> Result<SectorCatalog, TriagemError> {
    match name {
        "hospital" => {
            let def: CatalogDef = serde_json::from_str(HOSPITAL_JSON)?;
            SectorCatalog::from_def(def)
        }
        _ => Err(TriagemError::CatalogInvalid(format!(
            "unknown preset '{}'. Available: {}",
            name,
            PRESETS.join(", ")
        ))),
    }
}

/// The catalog used when the caller does not provide one.
pub fn default_catalog() -> Result<SectorCatalog, TriagemError> {
    load_preset(DEFAULT_PRESET)
}
