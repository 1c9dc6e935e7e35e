/// One worksheet as a dense grid of trimmed cell strings, indexed by
/// absolute (row, column) position. Empty cells are empty strings.
#[derive(Debug, Clone, Default)]
pub struct SheetGrid {
    pub name: String,
    pub rows: Vec<Vec<String>>,
}

/// An inclusive block of merged cells, in absolute coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergedRegion {
    pub start: (usize, usize),
    pub end: (usize, usize),
}

impl SheetGrid {
    pub fn new(name: &str, rows: Vec<Vec<String>>) -> Self {
        SheetGrid {
            name: name.to_string(),
            rows,
        }
    }

    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(|s| s.as_str())
            .unwrap_or("")
    }

    /// Copy the top-left value of every merged region into all of its
    /// cells, growing rows as needed.
    pub fn flatten_merged(&mut self, regions: &[MergedRegion]) {
        for region in regions {
            let value = self.cell(region.start.0, region.start.1).to_string();
            if value.is_empty() {
                continue;
            }
            for r in region.start.0..=region.end.0 {
                if r >= self.rows.len() {
                    self.rows.resize_with(r + 1, Vec::new);
                }
                let row = &mut self.rows[r];
                if row.len() <= region.end.1 {
                    row.resize(region.end.1 + 1, String::new());
                }
                for cell in &mut row[region.start.1..=region.end.1] {
                    cell.clone_from(&value);
                }
            }
        }
    }
}
