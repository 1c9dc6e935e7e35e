pub mod catalog;
pub mod classify;
pub mod error;
pub mod model;
pub mod schedule;

use catalog::SectorCatalog;
use classify::ClassificationResult;
use error::TriagemError;
use model::PageRecord;
use schedule::ScheduleExtraction;
use tracing::info;

/// Classify an ordered batch of scanned pages by hospital sector.
///
/// Each call starts from empty context, so independent batches may be
/// classified concurrently against the same catalog. Pages within a batch
/// are always processed in order.
pub fn classify_pages(
    pages: &[PageRecord],
    catalog: &SectorCatalog,
) -> Vec<ClassificationResult> {
    let results = classify::classify(pages, catalog);
    info!(
        pages = pages.len(),
        catalog = %catalog.name,
        "pages classified"
    );
    results
}

/// Parse a JSON page batch and classify it.
pub fn classify_json(
    json: &[u8],
    catalog: &SectorCatalog,
) -> Result<Vec<ClassificationResult>, TriagemError> {
    let pages: Vec<PageRecord> = serde_json::from_slice(json)?;
    Ok(classify_pages(&pages, catalog))
}

/// Turn a duty-roster workbook (xlsx bytes) into one record per person,
/// day and shift.
///
/// Sheets that do not follow the roster layout are skipped and listed in
/// the result. Fails if the bytes are not an xlsx workbook or if no sheet
/// yields any record.
pub fn normalize_schedule(xlsx_bytes: &[u8]) -> Result<ScheduleExtraction, TriagemError> {
    let sheets = schedule::xlsx::read_workbook(xlsx_bytes)?;
    schedule::normalize_sheets(sheets)
}
