//! Table exporter: ordered records → single-sheet .xlsx

use crate::error::{SheetError, SheetResult};
use crate::types::Record;
use rust_xlsxwriter::{Format, Workbook};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Excel worksheet limits
pub const MAX_ROWS: usize = 1_048_576;
pub const MAX_COLUMNS: usize = 16_384;
pub const MAX_CELL_CHARS: usize = 32_767;
pub const MAX_SHEET_NAME_CHARS: usize = 31;

const FORBIDDEN_SHEET_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

/// Exports a list of uniform records as one worksheet
pub struct TableExporter<'a> {
    records: &'a [Record],
    sheet_name: String,
}

impl<'a> TableExporter<'a> {
    pub fn new(records: &'a [Record], sheet_name: impl Into<String>) -> Self {
        Self {
            records,
            sheet_name: sheet_name.into(),
        }
    }

    /// Check the input and return the header row
    ///
    /// Column names come from the first record. Every other record must carry
    /// exactly the same set of columns; order may differ since values are
    /// looked up by name.
    pub fn header(&self) -> SheetResult<Vec<String>> {
        validate_sheet_name(&self.sheet_name)?;

        let first = self.records.first().ok_or_else(|| {
            SheetError::InvalidInput("No records to export; cannot derive column names".into())
        })?;

        if first.is_empty() {
            return Err(SheetError::InvalidInput(
                "First record has no columns".into(),
            ));
        }
        if first.len() > MAX_COLUMNS {
            return Err(SheetError::InvalidInput(format!(
                "{} columns exceeds the worksheet limit of {}",
                first.len(),
                MAX_COLUMNS
            )));
        }
        if self.records.len() + 1 > MAX_ROWS {
            return Err(SheetError::InvalidInput(format!(
                "{} records exceeds the worksheet limit of {} data rows",
                self.records.len(),
                MAX_ROWS - 1
            )));
        }

        let header = first.column_names();

        for (idx, record) in self.records.iter().enumerate() {
            check_columns(idx, record, &header)?;
            for (column, value) in record.iter() {
                if value.chars().count() > MAX_CELL_CHARS {
                    return Err(SheetError::InvalidInput(format!(
                        "Record {}: value of '{}' is longer than {} characters",
                        idx + 1,
                        column,
                        MAX_CELL_CHARS
                    )));
                }
            }
        }
        if let Some(name) = header.iter().find(|h| h.chars().count() > MAX_CELL_CHARS) {
            return Err(SheetError::InvalidInput(format!(
                "Column name starting '{}' is longer than {} characters",
                name.chars().take(20).collect::<String>(),
                MAX_CELL_CHARS
            )));
        }

        Ok(header)
    }

    /// Build the workbook in memory
    pub fn build_workbook(&self) -> SheetResult<Workbook> {
        let header = self.header()?;

        // Text format on every cell: values stay text, and empty values are
        // still written as (blank) cells, so no row goes missing.
        let text = Format::new().set_num_format("@");

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(&self.sheet_name)
            .map_err(|e| SheetError::Export(format!("Failed to set worksheet name: {}", e)))?;

        // Header row (row 0)
        for (col_idx, name) in header.iter().enumerate() {
            worksheet
                .write_string_with_format(0, col_idx as u16, name, &text)
                .map_err(|e| SheetError::Export(format!("Failed to write header: {}", e)))?;
        }

        // Data rows start at row 1
        for (row_idx, record) in self.records.iter().enumerate() {
            let row = (row_idx + 1) as u32;
            for (col_idx, name) in header.iter().enumerate() {
                let value = record.get(name).unwrap_or_default();
                worksheet
                    .write_string_with_format(row, col_idx as u16, value, &text)
                    .map_err(|e| SheetError::Export(format!("Failed to write cell: {}", e)))?;
            }
        }

        debug!(
            sheet = %self.sheet_name,
            columns = header.len(),
            rows = self.records.len() + 1,
            "built workbook"
        );
        Ok(workbook)
    }

    /// Write the workbook to `output_path`, replacing any existing file
    ///
    /// Returns the absolute path of the written file.
    pub fn export(&self, output_path: &Path) -> SheetResult<PathBuf> {
        let mut workbook = self.build_workbook()?;
        let bytes = workbook
            .save_to_buffer()
            .map_err(|e| SheetError::Export(format!("Failed to serialize workbook: {}", e)))?;

        write_atomically(output_path, &bytes)?;

        let resolved =
            fs::canonicalize(output_path).map_err(|e| SheetError::fs(output_path, e))?;
        info!(
            path = %resolved.display(),
            records = self.records.len(),
            bytes = bytes.len(),
            "exported workbook"
        );
        Ok(resolved)
    }
}

/// Export `records` to a single sheet named `sheet_name`
pub fn export_records(
    records: &[Record],
    output_path: &Path,
    sheet_name: &str,
) -> SheetResult<PathBuf> {
    TableExporter::new(records, sheet_name).export(output_path)
}

/// Excel's rules for worksheet names
pub fn validate_sheet_name(name: &str) -> SheetResult<()> {
    if name.is_empty() {
        return Err(SheetError::InvalidInput("Sheet name is empty".into()));
    }
    if name.chars().count() > MAX_SHEET_NAME_CHARS {
        return Err(SheetError::InvalidInput(format!(
            "Sheet name '{}' is longer than {} characters",
            name, MAX_SHEET_NAME_CHARS
        )));
    }
    if let Some(c) = name.chars().find(|c| FORBIDDEN_SHEET_CHARS.contains(c)) {
        return Err(SheetError::InvalidInput(format!(
            "Sheet name '{}' contains forbidden character '{}'",
            name, c
        )));
    }
    if name.starts_with('\'') || name.ends_with('\'') {
        return Err(SheetError::InvalidInput(format!(
            "Sheet name '{}' cannot start or end with an apostrophe",
            name
        )));
    }
    Ok(())
}

fn check_columns(idx: usize, record: &Record, header: &[String]) -> SheetResult<()> {
    if let Some(dup) = record.duplicate_column() {
        return Err(SheetError::InvalidInput(format!(
            "Record {} repeats column '{}'",
            idx + 1,
            dup
        )));
    }
    if let Some(missing) = header.iter().find(|name| record.get(name).is_none()) {
        return Err(SheetError::InvalidInput(format!(
            "Record {} is missing column '{}'",
            idx + 1,
            missing
        )));
    }
    if let Some(extra) = record.columns().find(|name| !header.iter().any(|h| h.as_str() == *name)) {
        return Err(SheetError::InvalidInput(format!(
            "Record {} has unexpected column '{}'",
            idx + 1,
            extra
        )));
    }
    Ok(())
}

/// Write to a sibling temp file, then rename over the destination
fn write_atomically(dest: &Path, bytes: &[u8]) -> SheetResult<()> {
    let file_name = dest.file_name().ok_or_else(|| {
        SheetError::fs(
            dest,
            io::Error::new(io::ErrorKind::InvalidInput, "destination has no file name"),
        )
    })?;

    let parent = dest.parent().filter(|p| !p.as_os_str().is_empty());
    if let Some(dir) = parent {
        fs::create_dir_all(dir).map_err(|e| SheetError::fs(dir, e))?;
    }

    let tmp_name = format!(".{}.{}.tmp", file_name.to_string_lossy(), std::process::id());
    let tmp = match parent {
        Some(dir) => dir.join(tmp_name),
        None => PathBuf::from(tmp_name),
    };

    if let Err(e) = write_synced(&tmp, bytes) {
        let _ = fs::remove_file(&tmp);
        return Err(SheetError::fs(&tmp, e));
    }
    if let Err(e) = fs::rename(&tmp, dest) {
        let _ = fs::remove_file(&tmp);
        return Err(SheetError::fs(dest, e));
    }
    Ok(())
}

/// Write and fsync, so flush-time failures surface before the rename
fn write_synced(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}
