pub mod grid;
pub mod header;
pub mod metadata;
pub mod xlsx;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::TriagemError;
use grid::SheetGrid;
use header::find_header;
use metadata::{fold, scan_metadata};

/// One person on one day of a duty roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRecord {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "cargo")]
    pub role: String,
    #[serde(rename = "dia")]
    pub day: u32,
    #[serde(rename = "turno")]
    pub shift: String,
    #[serde(rename = "unidade")]
    pub unit: Option<String>,
    #[serde(rename = "setor")]
    pub sector: Option<String>,
    #[serde(rename = "mes")]
    pub month: Option<u32>,
    #[serde(rename = "ano")]
    pub year: Option<i32>,
    #[serde(rename = "planilha")]
    pub sheet: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedSheet {
    pub sheet: String,
    pub reason: String,
}

/// Records from every usable sheet, plus the sheets that were skipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleExtraction {
    pub records: Vec<ScheduleRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped_sheets: Vec<SkippedSheet>,
}

/// Reshape one wide roster sheet (one column per day) into one record per
/// filled shift cell.
pub fn normalize_sheet(sheet: &SheetGrid) -> Result<Vec<ScheduleRecord>, TriagemError> {
    let structure = |reason: &str| TriagemError::SheetStructure {
        sheet: sheet.name.clone(),
        reason: reason.to_string(),
    };

    let layout = find_header(&sheet.rows)
        .ok_or_else(|| structure("no header row with name and role columns"))?;
    if layout.day_cols.is_empty() {
        return Err(structure("header row has no day columns"));
    }

    let meta = scan_metadata(&sheet.rows[..layout.row]);

    let mut records = Vec::new();
    for row_idx in layout.row + 1..sheet.rows.len() {
        if is_legend_row(&sheet.rows[row_idx]) {
            continue;
        }

        let name = sheet.cell(row_idx, layout.name_col);
        if name.is_empty() {
            continue;
        }
        let role = sheet.cell(row_idx, layout.role_col);

        for &(col, day) in &layout.day_cols {
            let shift = sheet.cell(row_idx, col);
            if shift.is_empty() {
                continue;
            }
            records.push(ScheduleRecord {
                name: name.to_string(),
                role: role.to_string(),
                day,
                shift: shift.to_string(),
                unit: meta.unit.clone(),
                sector: meta.sector.clone(),
                month: meta.month,
                year: meta.year,
                sheet: sheet.name.clone(),
            });
        }
    }

    if records.is_empty() {
        return Err(structure("no filled shift cells below the header"));
    }

    Ok(records)
}

/// A legend row opens with "Legenda" in its first filled cell, wherever the
/// table starts on the sheet.
fn is_legend_row(row: &[String]) -> bool {
    row.iter()
        .find(|c| !c.trim().is_empty())
        .is_some_and(|c| fold(c).starts_with("LEGENDA"))
}

/// Normalize already-loaded sheets. Sheets that fail are skipped; the call
/// fails only when no sheet yields records.
pub fn normalize_sheets<I>(sheets: I) -> Result<ScheduleExtraction, TriagemError>
where
    I: IntoIterator<Item = Result<SheetGrid, TriagemError>>,
{
    let mut records = Vec::new();
    let mut skipped_sheets = Vec::new();

    for sheet in sheets {
        match sheet.and_then(|grid| normalize_sheet(&grid)) {
            Ok(mut sheet_records) => records.append(&mut sheet_records),
            Err(e) => {
                let (sheet, reason) = match e {
                    TriagemError::SheetStructure { sheet, reason } => (sheet, reason),
                    other => (String::from("?"), other.to_string()),
                };
                warn!(sheet = %sheet, reason = %reason, "sheet skipped");
                skipped_sheets.push(SkippedSheet { sheet, reason });
            }
        }
    }

    if records.is_empty() {
        let reasons: Vec<String> = skipped_sheets
            .iter()
            .map(|s| format!("{}: {}", s.sheet, s.reason))
            .collect();
        return Err(TriagemError::NoScheduleData(if reasons.is_empty() {
            "workbook has no sheets".into()
        } else {
            reasons.join("; ")
        }));
    }

    info!(
        records = records.len(),
        skipped = skipped_sheets.len(),
        "schedule normalized"
    );

    Ok(ScheduleExtraction {
        records,
        skipped_sheets,
    })
}
