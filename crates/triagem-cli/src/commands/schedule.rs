use std::path::PathBuf;
use triagem_core::error::TriagemError;

use crate::output;

pub fn run(
    xlsx_file: PathBuf,
    output_format: &str,
    output_file: Option<PathBuf>,
) -> Result<(), TriagemError> {
    let bytes = std::fs::read(&xlsx_file)?;
    let extraction = triagem_core::normalize_schedule(&bytes)?;

    match output_file {
        Some(path) => {
            // Always write JSON when saving to file
            let json = serde_json::to_string_pretty(&extraction)?;
            std::fs::write(&path, json)?;
            eprintln!(
                "Normalized {} record(s), written to {}",
                extraction.records.len(),
                path.display()
            );
            for skipped in &extraction.skipped_sheets {
                eprintln!("  skipped sheet '{}': {}", skipped.sheet, skipped.reason);
            }
        }
        None => match output_format {
            "json" => output::json::print(&extraction)?,
            _ => output::table::print_schedule(&extraction),
        },
    }

    Ok(())
}
