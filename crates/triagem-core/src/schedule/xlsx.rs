use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};
use tracing::warn;

use crate::error::TriagemError;
use crate::schedule::grid::{MergedRegion, SheetGrid};

/// Read every worksheet of an xlsx file into a grid with merged regions
/// flattened.
///
/// Fails only if the bytes are not an xlsx container. A sheet that cannot
/// be read comes back as its own `Err` so the caller can skip it.
pub fn read_workbook(
    bytes: &[u8],
) -> Result<Vec<Result<SheetGrid, TriagemError>>, TriagemError> {
    let cursor = Cursor::new(bytes);
    let mut workbook: Xlsx<_> = calamine::open_workbook_from_rs(cursor)
        .map_err(|e| TriagemError::InvalidWorkbook(format!("failed to open xlsx: {e}")))?;

    let merged_loaded = match workbook.load_merged_regions() {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "merged cell regions unavailable, reading cells as-is");
            false
        }
    };

    let mut sheets = Vec::new();
    for name in workbook.sheet_names() {
        let regions: Vec<MergedRegion> = if merged_loaded {
            workbook
                .merged_regions_by_sheet(&name)
                .into_iter()
                .map(|(_, _, dims)| MergedRegion {
                    start: (dims.start.0 as usize, dims.start.1 as usize),
                    end: (dims.end.0 as usize, dims.end.1 as usize),
                })
                .collect()
        } else {
            Vec::new()
        };

        let sheet = workbook
            .worksheet_range(&name)
            .map_err(|e| TriagemError::SheetStructure {
                sheet: name.clone(),
                reason: format!("unreadable worksheet: {e}"),
            })
            .map(|range| {
                let mut grid = SheetGrid::new(&name, Vec::new());
                if let (Some(start), Some(end)) = (range.start(), range.end()) {
                    let (row0, col0) = (start.0 as usize, start.1 as usize);
                    let width = end.1 as usize + 1;
                    grid.rows = vec![vec![String::new(); width]; end.0 as usize + 1];
                    for (r, c, cell) in range.cells() {
                        grid.rows[row0 + r][col0 + c] = cell_as_string(cell);
                    }
                }
                grid.flatten_merged(&regions);
                grid
            });
        sheets.push(sheet);
    }

    Ok(sheets)
}

fn cell_as_string(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Empty => String::new(),
        _ => format!("{cell}").trim().to_string(),
    }
}
