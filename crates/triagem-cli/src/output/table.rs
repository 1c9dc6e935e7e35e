use std::collections::BTreeMap;
use triagem_core::classify::{Classification, ClassificationResult};
use triagem_core::schedule::ScheduleExtraction;

pub fn print_pages(results: &[ClassificationResult]) {
    if results.is_empty() {
        println!("No pages.");
        return;
    }

    let file_width = results
        .iter()
        .map(|r| r.filename.chars().count())
        .max()
        .unwrap_or(8)
        .max(7);
    let label_width = results
        .iter()
        .map(|r| r.classification.as_str().chars().count())
        .max()
        .unwrap_or(13)
        .max(13);

    println!(
        "  {:>6}  {:<fw$}  {:<lw$}  Carimbo",
        "Página",
        "Arquivo",
        "Classificação",
        fw = file_width,
        lw = label_width
    );
    println!("  {}", "-".repeat(6 + file_width + label_width + 16));

    for r in results {
        println!(
            "  {:>6}  {:<fw$}  {:<lw$}  {}",
            r.page_number,
            r.filename,
            r.classification.as_str(),
            r.stamp.as_deref().unwrap_or("-"),
            fw = file_width,
            lw = label_width
        );
    }

    // Summary by label
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for r in results {
        *counts.entry(r.classification.as_str()).or_default() += 1;
    }
    let sectors = results
        .iter()
        .filter(|r| matches!(r.classification, Classification::Sector(_)))
        .count();

    println!();
    println!(
        "  {} page(s), {} assigned to a sector",
        results.len(),
        sectors
    );
    for (label, n) in counts {
        println!("    {:<lw$}  {}", label, n, lw = label_width);
    }
}

pub fn print_schedule(extraction: &ScheduleExtraction) {
    let mut by_sheet: BTreeMap<&str, Vec<_>> = BTreeMap::new();
    for record in &extraction.records {
        by_sheet.entry(record.sheet.as_str()).or_default().push(record);
    }

    for (sheet, records) in &by_sheet {
        let first = records[0];
        println!("=== {} ===\n", sheet);
        println!(
            "  Unidade: {}   Setor: {}   Mês/Ano: {}/{}\n",
            first.unit.as_deref().unwrap_or("?"),
            first.sector.as_deref().unwrap_or("?"),
            first
                .month
                .map(|m| format!("{m:02}"))
                .unwrap_or_else(|| "??".into()),
            first
                .year
                .map(|y| y.to_string())
                .unwrap_or_else(|| "????".into()),
        );

        let name_width = records
            .iter()
            .map(|r| r.name.chars().count())
            .max()
            .unwrap_or(10);
        let role_width = records
            .iter()
            .map(|r| r.role.chars().count())
            .max()
            .unwrap_or(10)
            .max(5);

        println!(
            "  {:<nw$}  {:<rw$}  {:>3}  Turno",
            "Nome",
            "Cargo",
            "Dia",
            nw = name_width,
            rw = role_width
        );
        for r in records {
            println!(
                "  {:<nw$}  {:<rw$}  {:>3}  {}",
                r.name,
                r.role,
                r.day,
                r.shift,
                nw = name_width,
                rw = role_width
            );
        }
        println!();
    }

    println!(
        "{} record(s) from {} sheet(s)",
        extraction.records.len(),
        by_sheet.len()
    );

    if !extraction.skipped_sheets.is_empty() {
        println!("\nSkipped sheets:");
        for s in &extraction.skipped_sheets {
            println!("  - {}: {}", s.sheet, s.reason);
        }
    }
}
