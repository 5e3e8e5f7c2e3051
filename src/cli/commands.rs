use crate::catalog::{self, DEFAULT_OUTPUT, DEFAULT_SHEET};
use crate::error::SheetResult;
use crate::excel::{TableExporter, TableImporter};
use crate::parser;
use crate::types::{Record, Sheet};
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;

/// Settings for one export run
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub output: PathBuf,
    pub sheet: String,
    /// Records file; the built-in skill table when unset
    pub input: Option<PathBuf>,
    pub verbose: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT),
            sheet: DEFAULT_SHEET.to_string(),
            input: None,
            verbose: false,
        }
    }
}

/// Execute the export command, returning the absolute path written
pub fn export(config: ExportConfig) -> SheetResult<PathBuf> {
    println!("{}", "📊 Skillsheet - Excel Export".bold().green());

    let records = match &config.input {
        Some(path) => {
            if config.verbose {
                println!("   Input:  {}", path.display());
            }
            parser::load_records(path)?
        }
        None => {
            if config.verbose {
                println!("   Input:  built-in skill table");
            }
            catalog::skill_records()
        }
    };

    if config.verbose {
        println!("   Sheet:  {}", config.sheet);
        println!("   Output: {}", config.output.display());
        println!("   Records: {}\n", records.len());
    }

    let exporter = TableExporter::new(&records, config.sheet.as_str());
    let resolved = exporter.export(&config.output)?;

    println!("{}", "✅ Export Complete!".bold().green());
    println!("Saved: {}", resolved.display());
    Ok(resolved)
}

#[derive(Serialize)]
struct SheetDump<'a> {
    name: &'a str,
    records: Vec<Record>,
}

/// Execute the inspect command
pub fn inspect(file: PathBuf, sheet: Option<String>, json: bool) -> SheetResult<()> {
    let importer = TableImporter::new(&file);
    let sheets = match sheet {
        Some(name) => vec![importer.import_sheet(&name)?],
        None => importer.import()?,
    };

    if json {
        let mut dumps = Vec::with_capacity(sheets.len());
        for s in &sheets {
            dumps.push(SheetDump {
                name: &s.name,
                records: s.to_records()?,
            });
        }
        println!("{}", serde_json::to_string_pretty(&dumps)?);
        return Ok(());
    }

    println!("{}", "🔍 Skillsheet - Inspect".bold().green());
    println!("   File: {}\n", file.display());
    for sheet in &sheets {
        println!(
            "{} ({} rows)",
            sheet.name.bold().cyan(),
            sheet.row_count()
        );
        print!("{}", format_table(sheet));
        println!();
    }
    Ok(())
}

/// Render a sheet as a left-aligned text grid
pub fn format_table(sheet: &Sheet) -> String {
    let width = sheet
        .rows
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(sheet.header.len()))
        .max()
        .unwrap_or(0);

    let mut widths = vec![0usize; width];
    for row in std::iter::once(&sheet.header).chain(sheet.rows.iter()) {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(cell.chars().count());
        }
    }

    let render = |row: &[String]| -> String {
        let cells: Vec<String> = (0..width)
            .map(|idx| {
                let cell = row.get(idx).map(String::as_str).unwrap_or("");
                let pad = widths[idx] - cell.chars().count();
                format!("{}{}", cell, " ".repeat(pad))
            })
            .collect();
        format!("{}\n", cells.join(" | ").trim_end())
    };

    let mut out = render(sheet.header.as_slice());
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&format!("{}\n", rule.join("-+-")));
    for row in &sheet.rows {
        out.push_str(&render(row.as_slice()));
    }
    out
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
