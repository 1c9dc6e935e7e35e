pub mod builtin;
pub mod schema;

use crate::classify::outcome::RESERVED_LABELS;
use crate::error::TriagemError;
use regex::Regex;
use schema::CatalogDef;
use std::path::Path;

/// One compiled catalog entry. The pattern is stored uppercased.
#[derive(Debug, Clone)]
pub struct SectorEntry {
    pub pattern: String,
    pub stamp: String,
}

/// A validated, compiled sector catalog.
///
/// Immutable once built, so one instance can be shared by any number of
/// concurrent classification calls.
#[derive(Debug, Clone)]
pub struct SectorCatalog {
    pub name: String,
    pub version: String,
    pub description: Option<String>,
    entries: Vec<SectorEntry>,
    retraction_keywords: Vec<String>,
    shift_code: Regex,
    person_name: Regex,
}

impl SectorCatalog {
    /// Validate and compile a catalog definition.
    pub fn from_def(def: CatalogDef) -> Result<Self, TriagemError> {
        validate_catalog(&def)?;

        let shift_code = compile(&def.continuation.shift_code_pattern, "shift_code_pattern")?;
        let person_name = compile(&def.continuation.name_pattern, "name_pattern")?;

        let entries = def
            .entries
            .into_iter()
            .map(|e| SectorEntry {
                pattern: e.pattern.trim().to_uppercase(),
                stamp: e.stamp.trim().to_string(),
            })
            .collect();

        let retraction_keywords = def
            .retraction_keywords
            .iter()
            .map(|k| k.trim().to_uppercase())
            .collect();

        Ok(SectorCatalog {
            name: def.name,
            version: def.version,
            description: def.description,
            entries,
            retraction_keywords,
            shift_code,
            person_name,
        })
    }

    pub fn entries(&self) -> &[SectorEntry] {
        &self.entries
    }

    pub fn retraction_keywords(&self) -> &[String] {
        &self.retraction_keywords
    }

    /// First entry, in declaration order, whose pattern occurs in `sector`.
    /// `sector` must already be uppercased.
    pub fn match_sector(&self, sector: &str) -> Option<&SectorEntry> {
        self.entries.iter().find(|e| sector.contains(&e.pattern))
    }

    /// True if uppercased `text` mentions any retraction keyword.
    pub fn is_retraction(&self, upper_text: &str) -> bool {
        self.retraction_keywords
            .iter()
            .any(|k| upper_text.contains(k.as_str()))
    }

    /// True if `text` (original casing) looks like follow-on tabulated
    /// staff data: a shift/role code and a capitalised full name.
    pub fn is_continuation(&self, text: &str) -> bool {
        self.shift_code.is_match(text) && self.person_name.is_match(text)
    }

    /// Entries that can never win because an earlier pattern is contained
    /// in theirs. Returned as (shadowed index, shadowing index).
    pub fn shadowed_entries(&self) -> Vec<(usize, usize)> {
        let mut shadowed = Vec::new();
        for (i, later) in self.entries.iter().enumerate() {
            if let Some(j) = self.entries[..i]
                .iter()
                .position(|earlier| later.pattern.contains(&earlier.pattern))
            {
                shadowed.push((i, j));
            }
        }
        shadowed
    }
}

fn compile(pattern: &str, field: &str) -> Result<Regex, TriagemError> {
    Regex::new(pattern).map_err(|e| {
        TriagemError::CatalogInvalid(format!("continuation.{field} is not a valid regex: {e}"))
    })
}

/// Load a catalog from a JSON file.
pub fn load_catalog(path: &Path) -> Result<SectorCatalog, TriagemError> {
    let content = std::fs::read_to_string(path).map_err(|e| TriagemError::CatalogLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_catalog(&content, path)
}

/// Parse a catalog from a JSON string read from `source`.
pub fn parse_catalog(json: &str, source: &Path) -> Result<SectorCatalog, TriagemError> {
    let def: CatalogDef = serde_json::from_str(json).map_err(|e| TriagemError::CatalogLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    SectorCatalog::from_def(def)
}

/// Parse a catalog from a JSON string (no file path context).
pub fn parse_catalog_str(json: &str) -> Result<SectorCatalog, TriagemError> {
    let def: CatalogDef = serde_json::from_str(json).map_err(TriagemError::Json)?;
    SectorCatalog::from_def(def)
}

/// Validate that a catalog definition is well-formed.
pub fn validate_catalog(def: &CatalogDef) -> Result<(), TriagemError> {
    if def.entries.is_empty() {
        return Err(TriagemError::CatalogInvalid(
            "entries must not be empty".into(),
        ));
    }

    for (i, entry) in def.entries.iter().enumerate() {
        if entry.pattern.trim().is_empty() {
            return Err(TriagemError::CatalogInvalid(format!(
                "entry {} has an empty pattern",
                i
            )));
        }

        let stamp = entry.stamp.trim();
        if stamp.is_empty() {
            return Err(TriagemError::CatalogInvalid(format!(
                "pattern '{}' has an empty stamp",
                entry.pattern
            )));
        }

        if RESERVED_LABELS.contains(&stamp) {
            return Err(TriagemError::CatalogInvalid(format!(
                "pattern '{}' uses reserved label '{}' as stamp",
                entry.pattern, stamp
            )));
        }
    }

    if def
        .retraction_keywords
        .iter()
        .all(|k| k.trim().is_empty())
    {
        return Err(TriagemError::CatalogInvalid(
            "retraction_keywords must contain at least one keyword".into(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_valid_catalog() {
        let json = r#"{
            "name": "Test",
            "version": "1.0",
            "entries": [
                { "pattern": "parecer", "stamp": "Parecer" }
            ]
        }"#;
        let catalog = parse_catalog_str(json).unwrap();
        assert_eq!(catalog.name, "Test");
        assert_eq!(catalog.entries().len(), 1);
        assert_eq!(catalog.entries()[0].pattern, "PARECER");
        assert_eq!(
            catalog.retraction_keywords(),
            &["RETIFICAÇÃO".to_string(), "ALTERAÇÃO".to_string()]
        );
    }

    #[test]
    fn test_empty_entries_rejected() {
        let json = r#"{ "name": "Bad", "version": "1.0", "entries": [] }"#;
        assert!(matches!(
            parse_catalog_str(json),
            Err(TriagemError::CatalogInvalid(_))
        ));
    }

    #[test]
    fn test_reserved_stamp_rejected() {
        let json = r#"{
            "name": "Bad",
            "version": "1.0",
            "entries": [ { "pattern": "LIXO", "stamp": "descartada" } ]
        }"#;
        assert!(parse_catalog_str(json).is_err());
    }

    #[test]
    fn test_blank_pattern_rejected() {
        let json = r#"{
            "name": "Bad",
            "version": "1.0",
            "entries": [ { "pattern": "  ", "stamp": "X" } ]
        }"#;
        assert!(parse_catalog_str(json).is_err());
    }

    #[test]
    fn test_invalid_regex_rejected() {
        let json = r#"{
            "name": "Bad",
            "version": "1.0",
            "entries": [ { "pattern": "UTI", "stamp": "UTI" } ],
            "continuation": { "name_pattern": "([A-Z" }
        }"#;
        let err = parse_catalog_str(json).unwrap_err();
        assert!(err.to_string().contains("name_pattern"));
    }

    #[test]
    fn test_first_match_wins() {
        let json = r#"{
            "name": "Order",
            "version": "1.0",
            "entries": [
                { "pattern": "UTI", "stamp": "UTI Adulto" },
                { "pattern": "UTI NEONATAL", "stamp": "UTI Neonatal" }
            ]
        }"#;
        let catalog = parse_catalog_str(json).unwrap();
        let hit = catalog.match_sector("UTI NEONATAL - ALA B").unwrap();
        assert_eq!(hit.stamp, "UTI Adulto");
        assert_eq!(catalog.shadowed_entries(), vec![(1, 0)]);
    }

    #[test]
    fn test_load_catalog_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "name": "Arquivo", "version": "2", "entries": [ {{ "pattern": "FARMÁCIA", "stamp": "Farmácia" }} ] }}"#
        )
        .unwrap();
        let catalog = load_catalog(file.path()).unwrap();
        assert!(catalog.match_sector("SETOR FARMÁCIA CENTRAL").is_some());
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let err = load_catalog(Path::new("/nonexistent/catalog.json")).unwrap_err();
        assert!(matches!(err, TriagemError::CatalogLoad { .. }));
    }
}
