//! Dataset discovery and loading
//!
//! Records reach the evaluator from weekly export files: CSV in the legacy
//! French-header format, or JSON arrays in the legacy camelCase format.
//! A file that fails to parse is skipped with a warning; a malformed row
//! fails its file with row context.

use crate::record::VaccinationRecord;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Expected first CSV header, used to reject foreign CSV files early
const CSV_FIRST_HEADER: &str = "Semaine";

/// Collect dataset files from a path (file or directory)
///
/// Directories are walked recursively; hidden entries are skipped. Files
/// are sorted for deterministic order.
pub fn collect_dataset_files(path: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    if path.is_file() {
        if is_dataset_file(path) {
            files.push(path.to_path_buf());
        }
    } else if path.is_dir() {
        collect_dataset_files_recursive(path, &mut files)?;
    }

    files.sort();

    Ok(files)
}

/// Load every dataset file under a path into one record list
///
/// Files that fail to load are skipped with a warning (the remaining
/// files still count); a path with no dataset files at all is an error.
pub fn load_dataset(path: &Path) -> Result<Vec<VaccinationRecord>> {
    let files = collect_dataset_files(path)?;
    if files.is_empty() {
        anyhow::bail!("no dataset files (.csv or .json) found under {}", path.display());
    }

    let mut records = Vec::new();
    let mut skipped_files: usize = 0;
    for file in &files {
        match load_records(file) {
            Ok(loaded) => records.extend(loaded),
            Err(e) => {
                tracing::warn!(file = %file.display(), error = %e, "skipping dataset file");
                skipped_files += 1;
            }
        }
    }
    if skipped_files > 0 {
        tracing::warn!(skipped_files, "some dataset files could not be loaded");
    }

    Ok(records)
}

/// Load records from a single dataset file, dispatching on extension
pub fn load_records(path: &Path) -> Result<Vec<VaccinationRecord>> {
    match extension(path) {
        Some("csv") => load_csv_records(path),
        Some("json") => load_json_records(path),
        _ => anyhow::bail!("unsupported dataset file: {}", path.display()),
    }
}

/// Load records from a legacy CSV export
fn load_csv_records(path: &Path) -> Result<Vec<VaccinationRecord>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open CSV file: {}", path.display()))?;

    let headers = reader
        .headers()
        .with_context(|| format!("failed to read CSV headers: {}", path.display()))?;
    if headers.get(0) != Some(CSV_FIRST_HEADER) {
        anyhow::bail!(
            "unrecognized CSV header in {} (expected first column {:?})",
            path.display(),
            CSV_FIRST_HEADER
        );
    }

    let mut records = Vec::new();
    for (row_index, row) in reader.records().enumerate() {
        let row = row.with_context(|| format!("failed to read CSV row: {}", path.display()))?;
        // +2: one for the header line, one for 1-based numbering
        let line = row_index + 2;
        records.push(
            parse_csv_row(&row)
                .with_context(|| format!("{} line {}", path.display(), line))?,
        );
    }

    Ok(records)
}

/// Parse one data row of the legacy CSV export
fn parse_csv_row(row: &csv::StringRecord) -> Result<VaccinationRecord> {
    Ok(VaccinationRecord {
        week: field(row, 0, "Semaine")?.to_string(),
        department: field(row, 1, "Département")?.to_string(),
        coverage: parse_field(row, 2, "Couverture (%)")?,
        doses: parse_field(row, 3, "Doses")?,
        target: parse_field(row, 4, "Objectif")?,
        population: parse_field(row, 5, "Population")?,
        emergency_rate: parse_field(row, 6, "Taux Urgences")?,
        sos_rate: parse_field(row, 7, "Taux SOS")?,
        stock: parse_field(row, 8, "Stock")?,
        demand: parse_field(row, 9, "Demande")?,
        ias: parse_field(row, 10, "IAS")?,
        density: parse_field(row, 11, "Densité")?,
    })
}

/// Load records from a legacy JSON array
fn load_json_records(path: &Path) -> Result<Vec<VaccinationRecord>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read JSON file: {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("failed to parse JSON dataset: {}", path.display()))
}

/// Get a raw field by position
fn field<'a>(row: &'a csv::StringRecord, index: usize, name: &str) -> Result<&'a str> {
    row.get(index)
        .with_context(|| format!("missing column {index} ({name})"))
}

/// Get and parse a numeric field by position
fn parse_field<T>(row: &csv::StringRecord, index: usize, name: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw = field(row, index, name)?;
    raw.parse()
        .with_context(|| format!("invalid value {raw:?} in column {index} ({name})"))
}

/// Check if a path looks like a dataset file
fn is_dataset_file(path: &Path) -> bool {
    matches!(extension(path), Some("csv") | Some("json"))
}

/// File extension, if any
fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|e| e.to_str())
}

/// Recursively collect dataset files from a directory, skipping hidden
/// entries
fn collect_dataset_files_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry_result in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry_result?;
        let path = entry.path();

        let hidden = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with('.'));
        if hidden {
            continue;
        }

        if path.is_dir() {
            collect_dataset_files_recursive(&path, files)?;
        } else if is_dataset_file(&path) {
            files.push(path);
        }
    }

    Ok(())
}
