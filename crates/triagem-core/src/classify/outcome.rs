use crate::model::PageRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const PATTERN_NOT_FOUND: &str = "padrao_nao_localizado";
pub const RETRACTED: &str = "retificada";
pub const DISCARDED: &str = "descartada";

/// Labels that a catalog stamp may not use.
pub const RESERVED_LABELS: &[&str] = &[PATTERN_NOT_FOUND, RETRACTED, DISCARDED];

/// The label assigned to a page.
///
/// On the wire this is a plain string: the stamp name for a sector match,
/// or one of the reserved labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Classification {
    /// A sector, by stamp name. Either a header match or a carried-forward
    /// continuation of one.
    Sector(String),
    PatternNotFound,
    Retracted,
    Discarded,
}

impl Classification {
    pub fn as_str(&self) -> &str {
        match self {
            Classification::Sector(stamp) => stamp.as_str(),
            Classification::PatternNotFound => PATTERN_NOT_FOUND,
            Classification::Retracted => RETRACTED,
            Classification::Discarded => DISCARDED,
        }
    }

    /// Pages a retraction may still supersede.
    pub fn is_retractable(&self) -> bool {
        !matches!(self, Classification::Retracted | Classification::Discarded)
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Classification {
    fn from(s: String) -> Self {
        match s.as_str() {
            PATTERN_NOT_FOUND => Classification::PatternNotFound,
            RETRACTED => Classification::Retracted,
            DISCARDED => Classification::Discarded,
            _ => Classification::Sector(s),
        }
    }
}

impl From<Classification> for String {
    fn from(c: Classification) -> Self {
        match c {
            Classification::Sector(stamp) => stamp,
            other => other.as_str().to_string(),
        }
    }
}

/// Classification of a single page, echoing the page identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    #[serde(rename = "pagina")]
    pub page_number: i64,
    #[serde(rename = "arquivo")]
    pub filename: String,
    #[serde(rename = "conteudo")]
    pub payload: String,
    #[serde(rename = "classificacao")]
    pub classification: Classification,
    /// Sector short-name in force at this page, if any.
    #[serde(rename = "carimbo")]
    pub stamp: Option<String>,
}

impl ClassificationResult {
    pub(crate) fn for_page(
        page: &PageRecord,
        classification: Classification,
        stamp: Option<String>,
    ) -> Self {
        ClassificationResult {
            page_number: page.page_number,
            filename: page.filename.clone(),
            payload: page.payload.clone(),
            classification,
            stamp,
        }
    }
}
