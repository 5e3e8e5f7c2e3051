use std::path::{Path, PathBuf};
use thiserror::Error;

pub type SheetResult<T> = Result<T, SheetError>;

#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("File system error at '{}': {source}", .path.display())]
    FileSystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Excel export error: {0}")]
    Export(String),

    #[error("Excel import error: {0}")]
    Import(String),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SheetError {
    /// Wrap an I/O error with the path it happened on
    pub fn fs(path: &Path, source: std::io::Error) -> Self {
        SheetError::FileSystem {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, SheetError::InvalidInput(_))
    }
}
