//! Table ingestion and export for batch runs.
//!
//! Input is a headed CSV or the first worksheet of a spreadsheet
//! (`.xlsx`, `.xlsm`, `.xls`, `.ods`), read fully into memory before any
//! lookups. Output is always CSV. It keeps every
//! input column in order and appends the computed ones; if a computed column
//! already exists (re-running on a previous export) it is overwritten in place.

use std::io;
use std::path::Path;

use anyhow::Context;
use calamine::Reader;
use bidmiles_core::{DistanceResult, MileageRecord, PipelineOptions, RecordInput};

pub(crate) const LAUNCHER_COLUMN: &str = "Launcher Coordinates";
pub(crate) const RECEIVER_COLUMN: &str = "Receiver Coordinates";
pub(crate) const LABEL_COLUMN: &str = "Line Name";
pub(crate) const FURTHEST_COLUMN: &str = "Furthest Distance (mi)";
pub(crate) const LAUNCHER_STATE_COLUMN: &str = "Launcher State";
pub(crate) const RECEIVER_STATE_COLUMN: &str = "Receiver State";
pub(crate) const TOTAL_COLUMN: &str = "Total Mileage (mi)";

const SPREADSHEET_EXTENSIONS: [&str; 4] = ["xlsx", "xlsm", "xls", "ods"];

/// A header row plus string cells. Every row has exactly `headers.len()` cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Reads `path` as a spreadsheet when its extension says so, otherwise
    /// as CSV.
    pub(crate) fn read_path(path: &Path) -> anyhow::Result<Self> {
        if is_spreadsheet(path) {
            return Self::read_workbook(path)
                .with_context(|| format!("failed to read {}", path.display()));
        }
        let file = std::fs::File::open(path)
            .with_context(|| format!("failed to open {}", path.display()))?;
        Self::from_reader(file).with_context(|| format!("failed to read {}", path.display()))
    }

    /// Reads a headed CSV. Short rows are padded with empty cells and long
    /// rows truncated to the header width.
    ///
    /// Cells are decoded lossily: bytes that are not UTF-8 (a Windows-1252
    /// degree sign, say) become U+FFFD and fail later as that record's parse
    /// error instead of aborting the whole table.
    pub(crate) fn from_reader<R: io::Read>(reader: R) -> anyhow::Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let headers: Vec<String> = reader
            .byte_headers()?
            .iter()
            .map(|h| lossy(h).trim().to_owned())
            .collect();

        let mut rows = Vec::new();
        for result in reader.byte_records() {
            let record = result?;
            rows.push(record.iter().map(lossy).collect());
        }

        Ok(Self::from_parts(headers, rows))
    }

    /// First worksheet, first row as headers.
    fn read_workbook(path: &Path) -> anyhow::Result<Self> {
        let mut workbook = calamine::open_workbook_auto(path)?;
        let range = workbook
            .worksheet_range_at(0)
            .context("workbook has no worksheets")??;

        let mut cells = range
            .rows()
            .map(|row| row.iter().map(ToString::to_string).collect::<Vec<_>>());
        let headers = cells
            .next()
            .unwrap_or_default()
            .into_iter()
            .map(|h| h.trim().to_owned())
            .collect();

        Ok(Self::from_parts(headers, cells.collect()))
    }

    /// Pads or truncates every row to the header width.
    fn from_parts(headers: Vec<String>, mut rows: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        for row in &mut rows {
            row.resize(width, String::new());
        }
        Self { headers, rows }
    }

    fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// One [`RecordInput`] per row.
    ///
    /// # Errors
    ///
    /// Fails if either coordinate column is missing. Bad cell contents are
    /// not an error here; they surface per record.
    pub(crate) fn record_inputs(&self) -> anyhow::Result<Vec<RecordInput>> {
        let require = |name: &str| {
            self.column(name).with_context(|| {
                format!(
                    "missing required column \"{name}\" (found: {})",
                    self.headers.join(", ")
                )
            })
        };
        let launcher = require(LAUNCHER_COLUMN)?;
        let receiver = require(RECEIVER_COLUMN)?;
        let label = self.column(LABEL_COLUMN);

        Ok(self
            .rows
            .iter()
            .map(|row| RecordInput {
                label: label
                    .map(|i| row[i].trim().to_owned())
                    .filter(|l| !l.is_empty()),
                launcher: row[launcher].clone(),
                receiver: row[receiver].clone(),
            })
            .collect())
    }

    /// Copy of this table with the computed columns filled from `records`,
    /// which must be in row order.
    pub(crate) fn with_results(&self, records: &[MileageRecord], options: &PipelineOptions) -> Table {
        let mut out = self.clone();

        let furthest = out.ensure_column(FURTHEST_COLUMN);
        let states = options.region_lookup.then(|| {
            (
                out.ensure_column(LAUNCHER_STATE_COLUMN),
                out.ensure_column(RECEIVER_STATE_COLUMN),
            )
        });
        let total = options
            .tracker_count
            .is_some()
            .then(|| out.ensure_column(TOTAL_COLUMN));

        for (row, record) in out.rows.iter_mut().zip(records) {
            row[furthest] = distance_cell(record.furthest);
            if let Some((launcher, receiver)) = states {
                row[launcher] = record.launcher_region.clone().unwrap_or_default();
                row[receiver] = record.receiver_region.clone().unwrap_or_default();
            }
            if let Some(total) = total {
                row[total] = record
                    .total_mileage
                    .map_or_else(String::new, distance_cell);
            }
        }
        out
    }

    /// Index of `name`, appending an empty column if absent.
    fn ensure_column(&mut self, name: &str) -> usize {
        if let Some(i) = self.column(name) {
            return i;
        }
        self.headers.push(name.to_owned());
        for row in &mut self.rows {
            row.push(String::new());
        }
        self.headers.len() - 1
    }

    pub(crate) fn write_path(&self, path: &Path) -> anyhow::Result<()> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        self.write(file)
            .with_context(|| format!("failed to write {}", path.display()))
    }

    pub(crate) fn write<W: io::Write>(&self, writer: W) -> anyhow::Result<()> {
        let mut writer = csv::Writer::from_writer(writer);
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

fn is_spreadsheet(path: &Path) -> bool {
    path.extension()
        .and_then(std::ffi::OsStr::to_str)
        .is_some_and(|e| {
            SPREADSHEET_EXTENSIONS
                .iter()
                .any(|x| e.eq_ignore_ascii_case(x))
        })
}

fn lossy(cell: &[u8]) -> String {
    String::from_utf8_lossy(cell).into_owned()
}

/// Unresolved distances export as empty cells.
fn distance_cell(distance: DistanceResult) -> String {
    distance.miles().map(|m| format!("{m:.2}")).unwrap_or_default()
}

#[cfg(test)]
#[path = "table_test.rs"]
mod tests;
