//! Excel export / import
//!
//! - Export: records → single-sheet workbook (.xlsx)
//! - Import: workbook → header + rows, for inspection and round-trip checks

mod exporter;
mod importer;

pub use exporter::{
    export_records, validate_sheet_name, TableExporter, MAX_CELL_CHARS, MAX_COLUMNS, MAX_ROWS,
    MAX_SHEET_NAME_CHARS,
};
pub use importer::TableImporter;
