use serde::{Deserialize, Serialize};

/// One scanned page as received from the OCR stage.
///
/// `payload` is the base64 encoded page document. It is carried through to
/// the result untouched and never decoded here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    #[serde(rename = "pagina", alias = "page_number")]
    pub page_number: i64,
    #[serde(rename = "arquivo", alias = "filename")]
    pub filename: String,
    #[serde(rename = "conteudo", alias = "payload")]
    pub payload: String,
    #[serde(rename = "texto", alias = "text", default)]
    pub text: String,
}

impl PageRecord {
    pub fn new(page_number: i64, filename: &str, text: &str) -> Self {
        PageRecord {
            page_number,
            filename: filename.to_string(),
            payload: String::new(),
            text: text.to_string(),
        }
    }
}
