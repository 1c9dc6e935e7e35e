use std::path::{Path, PathBuf};
use triagem_core::catalog::{builtin, SectorCatalog};
use triagem_core::error::TriagemError;

use crate::commands::resolve_catalog;

pub fn list() -> Result<(), TriagemError> {
    println!("Available predefined catalogs:\n");
    for name in builtin::PRESETS {
        let catalog = builtin::load_preset(name)?;
        let default_marker = if *name == builtin::DEFAULT_PRESET {
            " [default]"
        } else {
            ""
        };
        println!(
            "  {:<10} {} (v{}){}",
            name, catalog.name, catalog.version, default_marker
        );
        if let Some(ref desc) = catalog.description {
            println!("             {}", desc);
        }
        println!(
            "             {} sector patterns",
            catalog.entries().len()
        );
        println!();
    }
    Ok(())
}

pub fn show(catalog_file: Option<PathBuf>) -> Result<(), TriagemError> {
    let catalog = resolve_catalog(catalog_file)?;

    println!("{} (version {})\n", catalog.name, catalog.version);
    if let Some(ref desc) = catalog.description {
        println!("{}\n", desc);
    }

    println!("Sector patterns, in match order (first contained pattern wins):\n");

    let width = catalog
        .entries()
        .iter()
        .map(|e| e.pattern.chars().count())
        .max()
        .unwrap_or(20);

    println!("  {:>3}  {:<width$}  Stamp", "#", "Pattern", width = width);
    println!("  {}", "-".repeat(width + 24));
    for (i, entry) in catalog.entries().iter().enumerate() {
        println!(
            "  {:>3}  {:<width$}  {}",
            i + 1,
            entry.pattern,
            entry.stamp,
            width = width
        );
    }

    println!();
    println!(
        "Retraction keywords: {}",
        catalog.retraction_keywords().join(", ")
    );
    println!("Pages with no sector header are continuations of the current");
    println!("sector when they contain both a shift code and a full name.");
    println!();

    print_shadow_warnings(&catalog);

    Ok(())
}

pub fn validate(file: &Path) -> Result<(), TriagemError> {
    let catalog = triagem_core::catalog::load_catalog(file)?;

    println!(
        "Catalog '{}' (v{}) is valid.",
        catalog.name, catalog.version
    );
    println!("  Sector patterns: {}", catalog.entries().len());
    println!(
        "  Retraction keywords: {}",
        catalog.retraction_keywords().join(", ")
    );

    print_shadow_warnings(&catalog);

    Ok(())
}

fn print_shadow_warnings(catalog: &SectorCatalog) {
    let shadowed = catalog.shadowed_entries();
    if shadowed.is_empty() {
        return;
    }

    let entries = catalog.entries();
    println!("\nWarnings:");
    for (later, earlier) in shadowed {
        println!(
            "  - pattern '{}' (#{}) can never match: '{}' (#{}) is contained in it and comes first",
            entries[later].pattern,
            later + 1,
            entries[earlier].pattern,
            earlier + 1
        );
    }
}
