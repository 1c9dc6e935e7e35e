use serde::{Deserialize, Serialize};

pub const DEFAULT_RETRACTION_KEYWORDS: &[&str] = &["RETIFICAÇÃO", "ALTERAÇÃO"];
pub const DEFAULT_SHIFT_CODE_PATTERN: &str = r"\b(?:PSS|CH|PJ|M|T|N|D)\b";
pub const DEFAULT_NAME_PATTERN: &str = r"\b\p{Lu}\p{Ll}+(?:[ \t]+\p{Lu}\p{Ll}+)+";

/// A sector catalog as written in JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogDef {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    /// Ordered (pattern, stamp) pairs. The first pattern contained in a
    /// sector header wins.
    pub entries: Vec<SectorEntryDef>,
    /// Words that mark a page as a correction of the previous valid page.
    #[serde(default = "default_retraction_keywords")]
    pub retraction_keywords: Vec<String>,
    #[serde(default)]
    pub continuation: ContinuationDef,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectorEntryDef {
    pub pattern: String,
    pub stamp: String,
    #[serde(default)]
    pub note: Option<String>,
}

/// Regexes that recognise a page of tabulated staff data with no header of
/// its own. Both must match for the page to count as a continuation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContinuationDef {
    #[serde(default = "default_shift_code_pattern")]
    pub shift_code_pattern: String,
    #[serde(default = "default_name_pattern")]
    pub name_pattern: String,
}

impl Default for ContinuationDef {
    fn default() -> Self {
        Self {
            shift_code_pattern: default_shift_code_pattern(),
            name_pattern: default_name_pattern(),
        }
    }
}

fn default_retraction_keywords() -> Vec<String> {
    DEFAULT_RETRACTION_KEYWORDS
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_shift_code_pattern() -> String {
    DEFAULT_SHIFT_CODE_PATTERN.to_string()
}

fn default_name_pattern() -> String {
    DEFAULT_NAME_PATTERN.to_string()
}
