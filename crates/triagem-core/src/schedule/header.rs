use crate::schedule::metadata::{fold, parse_whole_number};

/// Column layout of a roster table, read from its header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderLayout {
    pub row: usize,
    pub name_col: usize,
    pub role_col: usize,
    /// (column, day of month) for every day column, left to right.
    pub day_cols: Vec<(usize, u32)>,
}

fn is_name_label(folded: &str) -> bool {
    folded.contains("NOME")
}

fn is_role_label(folded: &str) -> bool {
    folded.contains("CARGO") || folded.contains("FUNCAO")
}

/// Find the roster header: the first row holding both a name column and a
/// role column. Day columns are the header cells numbered 1 to 31.
pub fn find_header(rows: &[Vec<String>]) -> Option<HeaderLayout> {
    rows.iter().enumerate().find_map(|(row_idx, row)| {
        let folded: Vec<String> = row.iter().map(|c| fold(c)).collect();
        let name_col = folded.iter().position(|c| is_name_label(c))?;
        let role_col = folded
            .iter()
            .enumerate()
            .position(|(i, c)| i != name_col && is_role_label(c))?;

        let day_cols = row
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != name_col && *i != role_col)
            .filter_map(|(i, c)| {
                let day = parse_whole_number(c)?;
                (1..=31).contains(&day).then_some((i, day as u32))
            })
            .collect();

        Some(HeaderLayout {
            row: row_idx,
            name_col,
            role_col,
            day_cols,
        })
    })
}
