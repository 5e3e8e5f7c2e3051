//! Skillsheet - skill table to Excel exporter
//!
//! Turns an ordered list of uniform records (column name → display value)
//! into a single-sheet `.xlsx` workbook: one header row, then one row per
//! record, in input order.
//!
//! # Example
//!
//! ```no_run
//! use skillsheet::catalog::{skill_records, DEFAULT_SHEET};
//! use skillsheet::excel::export_records;
//! use std::path::Path;
//!
//! let records = skill_records();
//! let saved = export_records(&records, Path::new("SkillDataList.xlsx"), DEFAULT_SHEET)?;
//! println!("Saved: {}", saved.display());
//! # Ok::<(), skillsheet::error::SheetError>(())
//! ```

pub mod catalog;
pub mod cli;
pub mod error;
pub mod excel;
pub mod parser;
pub mod types;

// Re-export commonly used types
pub use error::{SheetError, SheetResult};
pub use types::{Record, Sheet};
