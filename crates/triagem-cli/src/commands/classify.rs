use std::path::PathBuf;
use triagem_core::error::TriagemError;
use triagem_core::model::PageRecord;

use crate::commands::resolve_catalog;
use crate::output;

pub fn run(
    input_file: PathBuf,
    catalog_file: Option<PathBuf>,
    output_format: &str,
) -> Result<(), TriagemError> {
    let catalog = resolve_catalog(catalog_file)?;

    let json_bytes = std::fs::read(&input_file)?;
    let pages: Vec<PageRecord> = serde_json::from_slice(&json_bytes)?;
    let results = triagem_core::classify_pages(&pages, &catalog);

    match output_format {
        "json" => output::json::print(&results)?,
        _ => output::table::print_pages(&results),
    }

    Ok(())
}
