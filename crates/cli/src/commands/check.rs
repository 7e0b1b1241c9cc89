use anyhow::{Context, Result};
use sitemap_kit_validator::{RecordKind, ValidationReport, validate_file};
use std::path::PathBuf;

/// Check a JSON file of villa or user records and print the report.
/// Fails when any record has errors; warnings alone pass.
pub async fn run(file: PathBuf, kind: RecordKind) -> Result<()> {
    println!("Checking {:?} records in: {}", kind, file.display());

    let report = validate_file(&file, kind)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    print_report(&report);

    if !report.is_valid() {
        anyhow::bail!("{} error(s) found", report.errors.len());
    }

    println!("\n✅ Records valid");
    Ok(())
}

fn print_report(report: &ValidationReport) {
    for msg in &report.info {
        println!("  ℹ {}", msg);
    }
    for msg in &report.warnings {
        println!("  ⚠ {}", msg);
    }
    for msg in &report.errors {
        println!("  ✗ {}", msg);
    }
}
