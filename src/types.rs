use crate::error::{SheetError, SheetResult};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashSet;

//==============================================================================
// Record
//==============================================================================

/// One exported entity: column name → display value, in column order
///
/// Key order is significant. The first record of an export decides the
/// header order of the whole sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column (builder style)
    pub fn with(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((column.into(), value.into()));
        self
    }

    /// Column names in their natural order
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn column_names(&self) -> Vec<String> {
        self.fields.iter().map(|(name, _)| name.clone()).collect()
    }

    /// Look up a value by column name
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// First column name that appears more than once, if any
    pub fn duplicate_column(&self) -> Option<&str> {
        let mut seen = HashSet::new();
        self.columns().find(|name| !seen.insert(*name))
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

//==============================================================================
// Sheet (read-back view)
//==============================================================================

/// A worksheet read back from a workbook, every cell as display text
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct Sheet {
    pub name: String,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    /// Total rows including the header (0 for a blank sheet)
    pub fn row_count(&self) -> usize {
        if self.header.is_empty() && self.rows.is_empty() {
            0
        } else {
            self.rows.len() + 1
        }
    }

    /// Rebuild records by zipping the header with each data row
    pub fn to_records(&self) -> SheetResult<Vec<Record>> {
        let mut seen = HashSet::new();
        if let Some(dup) = self.header.iter().find(|name| !seen.insert(name.as_str())) {
            return Err(SheetError::InvalidInput(format!(
                "Sheet '{}' repeats column '{}' in its header",
                self.name, dup
            )));
        }

        Ok(self
            .rows
            .iter()
            .map(|row| {
                self.header
                    .iter()
                    .enumerate()
                    .map(|(idx, name)| {
                        (name.clone(), row.get(idx).cloned().unwrap_or_default())
                    })
                    .collect()
            })
            .collect())
    }
}
