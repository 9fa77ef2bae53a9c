use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::error::{AppError, Result};

/// One roster row: who the card is for and how it should look.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowRecord {
    pub name: String,
    pub background_ref: String,
    pub font_ref: String,
    /// Number of sets to print
    pub quantity: u32,
}

/// Row as it appears in the spreadsheet export
#[derive(Debug, Deserialize)]
struct RosterEntry {
    nama: String,
    background: String,
    font: String,
    jumlah: String,
}

pub fn read_roster_file(path: &Path) -> Result<Vec<RowRecord>> {
    let file = File::open(path)
        .map_err(|e| AppError::MalformedInput(format!("{}: {}", path.display(), e)))?;
    read_roster(file)
}

pub fn read_roster<R: Read>(reader: R) -> Result<Vec<RowRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (index, entry) in csv_reader.deserialize::<RosterEntry>().enumerate() {
        let entry = entry?;
        rows.push(RowRecord {
            quantity: parse_quantity(&entry.jumlah, index + 1)?,
            name: entry.nama,
            background_ref: entry.background,
            font_ref: entry.font,
        });
    }

    if rows.is_empty() {
        return Err(AppError::EmptyInput("roster has no rows".into()));
    }
    Ok(rows)
}

/// Spreadsheet exports sometimes write whole numbers as `2.0`.
fn parse_quantity(raw: &str, row: usize) -> Result<u32> {
    let raw = raw.trim();
    let value = match raw.parse::<i64>() {
        Ok(n) => Some(n),
        Err(_) => raw
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite() && f.fract() == 0.0)
            .map(|f| f as i64),
    };

    match value {
        Some(n) if n > 0 && n <= u32::MAX as i64 => Ok(n as u32),
        Some(n) => Err(AppError::MalformedInput(format!(
            "row {}: jumlah must be a positive whole number, got {}",
            row, n
        ))),
        None => Err(AppError::MalformedInput(format!(
            "row {}: jumlah is not a number: {:?}",
            row, raw
        ))),
    }
}
