//! Table importer: .xlsx → header + rows of display text

use crate::error::{SheetError, SheetResult};
use crate::types::Sheet;
use calamine::{open_workbook, Data, Reader, Xlsx};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::debug;

type XlsxFile = Xlsx<BufReader<File>>;

/// Reads worksheets back from an .xlsx file
pub struct TableImporter {
    path: PathBuf,
}

impl TableImporter {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Read every worksheet, in workbook order
    pub fn import(&self) -> SheetResult<Vec<Sheet>> {
        let mut workbook = self.open()?;
        let sheet_names = workbook.sheet_names().to_vec();

        let mut sheets = Vec::with_capacity(sheet_names.len());
        for name in sheet_names {
            sheets.push(read_sheet(&mut workbook, &name)?);
        }
        Ok(sheets)
    }

    /// Read a single worksheet by name
    pub fn import_sheet(&self, name: &str) -> SheetResult<Sheet> {
        let mut workbook = self.open()?;
        if !workbook.sheet_names().iter().any(|n| n == name) {
            return Err(SheetError::Import(format!(
                "Sheet '{}' not found in {}",
                name,
                self.path.display()
            )));
        }
        read_sheet(&mut workbook, name)
    }

    fn open(&self) -> SheetResult<XlsxFile> {
        open_workbook::<Xlsx<_>, _>(&self.path).map_err(|e| {
            SheetError::Import(format!(
                "Failed to open Excel file '{}': {}",
                self.path.display(),
                e
            ))
        })
    }
}

/// Walk the sheet cell by cell
///
/// `worksheet_range` drops blank cells, so a trailing row of blanks would
/// vanish. The cell reader still yields them.
fn read_sheet(workbook: &mut XlsxFile, name: &str) -> SheetResult<Sheet> {
    let read_err =
        |e: calamine::XlsxError| SheetError::Import(format!("Failed to read sheet '{}': {}", name, e));

    let mut reader = workbook.worksheet_cells_reader(name).map_err(read_err)?;
    let mut cells = Vec::new();
    while let Some(cell) = reader.next_cell().map_err(read_err)? {
        let value = Data::from(cell.get_value().clone());
        cells.push((cell.get_position(), cell_text(&value)));
    }

    let sheet = build_sheet(name, cells);
    debug!(sheet = name, rows = sheet.row_count(), "read sheet");
    Ok(sheet)
}

/// Lay cells out on a grid anchored at column A
///
/// The first row holding text is the header. Blank cells still extend the
/// grid, so every written row survives.
fn build_sheet(name: &str, cells: Vec<((u32, u32), String)>) -> Sheet {
    let first_row = cells
        .iter()
        .filter(|(_, text)| !text.is_empty())
        .map(|((row, _), _)| *row)
        .min();

    let Some(first_row) = first_row else {
        return Sheet {
            name: name.to_string(),
            ..Sheet::default()
        };
    };

    let cells: Vec<_> = cells
        .into_iter()
        .filter(|((row, _), _)| *row >= first_row)
        .collect();
    let last_row = cells.iter().map(|((row, _), _)| *row).max().unwrap_or(first_row);
    let width = cells
        .iter()
        .map(|((_, col), _)| *col as usize + 1)
        .max()
        .unwrap_or(0);

    let mut grid = vec![vec![String::new(); width]; (last_row - first_row) as usize + 1];
    for ((row, col), text) in cells {
        grid[(row - first_row) as usize][col as usize] = text;
    }

    let mut rows = grid.into_iter();
    let header = rows.next().unwrap_or_default();
    Sheet {
        name: name.to_string(),
        header,
        rows: rows.collect(),
    }
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&Data::Empty), "");
        assert_eq!(cell_text(&Data::String("Magic".into())), "Magic");
        assert_eq!(cell_text(&Data::Bool(true)), "true");
        assert_eq!(cell_text(&Data::Int(7)), "7");
    }

    fn cell(row: u32, col: u32, text: &str) -> ((u32, u32), String) {
        ((row, col), text.to_string())
    }

    #[test]
    fn test_build_sheet_keeps_trailing_blank_row() {
        let cells = vec![
            cell(0, 0, "a"),
            cell(0, 1, "b"),
            cell(1, 0, "1"),
            cell(1, 1, "2"),
            cell(2, 0, ""),
            cell(2, 1, ""),
        ];
        let sheet = build_sheet("Skills", cells);
        assert_eq!(sheet.header, vec!["a", "b"]);
        assert_eq!(sheet.rows, vec![vec!["1", "2"], vec!["", ""]]);
        assert_eq!(sheet.row_count(), 3);
    }

    #[test]
    fn test_build_sheet_header_is_first_row_with_text() {
        let cells = vec![cell(0, 0, ""), cell(2, 1, "name"), cell(3, 1, "x")];
        let sheet = build_sheet("S", cells);
        assert_eq!(sheet.header, vec!["", "name"]);
        assert_eq!(sheet.rows, vec![vec!["", "x"]]);
    }

    #[test]
    fn test_build_sheet_all_blank_is_empty() {
        let sheet = build_sheet("S", vec![cell(0, 0, ""), cell(1, 1, "")]);
        assert_eq!(sheet.row_count(), 0);
        assert_eq!(sheet.name, "S");
    }

    #[test]
    fn test_open_missing_file_is_import_error() {
        let err = TableImporter::new("/definitely/not/here.xlsx")
            .import()
            .unwrap_err();
        assert!(matches!(err, SheetError::Import(_)));
    }
}
