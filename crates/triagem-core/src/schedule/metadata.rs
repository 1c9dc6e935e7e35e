use serde::{Deserialize, Serialize};

/// Sheet-level values found above the roster table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetMetadata {
    pub unit: Option<String>,
    pub sector: Option<String>,
    pub month: Option<u32>,
    pub year: Option<i32>,
}

const MONTHS: &[&str] = &[
    "JANEIRO",
    "FEVEREIRO",
    "MARCO",
    "ABRIL",
    "MAIO",
    "JUNHO",
    "JULHO",
    "AGOSTO",
    "SETEMBRO",
    "OUTUBRO",
    "NOVEMBRO",
    "DEZEMBRO",
];

/// Extract unit, sector, month and year from the rows above the header.
///
/// A label is recognised at the start of a cell ("Unidade", "Setor",
/// "Mês", "Ano"; the combined "Unidade/Setor" fills the sector). The value is whatever follows a colon in the same cell,
/// or else the next non-empty cell on the row. The first occurrence of
/// each label wins.
pub fn scan_metadata(rows: &[Vec<String>]) -> SheetMetadata {
    let mut meta = SheetMetadata::default();

    for row in rows {
        for (col, cell) in row.iter().enumerate() {
            // "Unidade/Setor" names the sector, not the unit
            if fold(cell).starts_with("UNIDADE/SETOR") {
                if meta.sector.is_none() {
                    meta.sector = labeled_value(row, col, cell, "UNIDADE/SETOR");
                }
                continue;
            }
            if meta.unit.is_none() {
                if let Some(v) = labeled_value(row, col, cell, "UNIDADE") {
                    meta.unit = Some(v);
                    continue;
                }
            }
            if meta.sector.is_none() {
                if let Some(v) = labeled_value(row, col, cell, "SETOR") {
                    meta.sector = Some(v);
                    continue;
                }
            }
            if meta.month.is_none() {
                if let Some(v) = labeled_value(row, col, cell, "MES") {
                    meta.month = parse_month(&v);
                    if meta.year.is_none() {
                        meta.year = trailing_year(&v);
                    }
                    continue;
                }
            }
            if meta.year.is_none() {
                if let Some(v) = labeled_value(row, col, cell, "ANO") {
                    meta.year = parse_year(&v);
                }
            }
        }
    }

    meta
}

fn labeled_value(row: &[String], col: usize, cell: &str, label: &str) -> Option<String> {
    let folded = fold(cell);
    let rest = folded.strip_prefix(label)?;
    // "ANOTACOES" is not "ANO"
    if rest
        .chars()
        .next()
        .is_some_and(|c| c.is_alphanumeric())
    {
        return None;
    }

    // `fold` keeps char boundaries one-to-one, so the label's char count
    // locates the remainder in the original cell.
    let original_rest: String = cell.trim().chars().skip(label.chars().count()).collect();
    let inline = match original_rest.find(':') {
        Some(idx) => &original_rest[idx + 1..],
        None => original_rest.trim_start_matches(|c: char| c == '-' || c.is_whitespace()),
    }
    .trim();
    if !inline.is_empty() {
        return Some(inline.to_string());
    }

    row[col + 1..]
        .iter()
        .map(|c| c.trim())
        .find(|c| !c.is_empty())
        .map(|c| c.to_string())
}

/// Uppercase and strip Portuguese diacritics, one char in, one char out.
pub(crate) fn fold(s: &str) -> String {
    s.trim()
        .chars()
        .map(|c| match c.to_uppercase().next().unwrap_or(c) {
            'Á' | 'À' | 'Â' | 'Ã' => 'A',
            'É' | 'Ê' => 'E',
            'Í' => 'I',
            'Ó' | 'Ô' | 'Õ' => 'O',
            'Ú' | 'Ü' => 'U',
            'Ç' => 'C',
            other => other,
        })
        .collect()
}

/// Month from a Portuguese name ("Março", "MAR") or a number (3, "03", 3.0).
pub fn parse_month(s: &str) -> Option<u32> {
    let folded = fold(s);
    let word: String = folded.chars().take_while(|c| c.is_alphabetic()).collect();
    if word.len() >= 3 {
        if let Some(idx) = MONTHS
            .iter()
            .position(|m| m.starts_with(&word) || word.starts_with(m))
        {
            return Some(idx as u32 + 1);
        }
    }

    let lead = folded.split(['/', '-', ' ']).next().unwrap_or("");
    let n = parse_whole_number(lead)?;
    if (1..=12).contains(&n) {
        Some(n as u32)
    } else {
        None
    }
}

pub fn parse_year(s: &str) -> Option<i32> {
    let n = parse_whole_number(s.trim())?;
    if (1900..=2200).contains(&n) {
        Some(n as i32)
    } else {
        None
    }
}

/// Year written after a month name, as in "Março de 2024" or "03/2024".
fn trailing_year(s: &str) -> Option<i32> {
    s.split(|c: char| !c.is_ascii_digit())
        .filter(|part| part.len() == 4)
        .find_map(parse_year)
}

/// Integer from "7", "07" or a spreadsheet float such as "7.0".
pub(crate) fn parse_whole_number(s: &str) -> Option<i64> {
    let s = s.trim();
    if let Ok(n) = s.parse::<i64>() {
        return Some(n);
    }
    let f: f64 = s.parse().ok()?;
    if f.fract() == 0.0 && f.is_finite() {
        Some(f as i64)
    } else {
        None
    }
}
