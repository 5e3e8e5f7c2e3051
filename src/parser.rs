use crate::error::{SheetError, SheetResult};
use crate::types::Record;
use serde_yaml::Value;
use std::path::Path;
use tracing::debug;

/// Load records from a YAML (or JSON) file
///
/// The document must be a sequence of flat mappings. Key order in each
/// mapping becomes column order.
pub fn load_records(path: &Path) -> SheetResult<Vec<Record>> {
    let content = std::fs::read_to_string(path).map_err(|e| SheetError::fs(path, e))?;
    let records = parse_records(&content)?;
    debug!(path = %path.display(), count = records.len(), "loaded records");
    Ok(records)
}

/// Parse records from YAML text
pub fn parse_records(content: &str) -> SheetResult<Vec<Record>> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    let yaml: Value = serde_yaml::from_str(content)?;

    let seq = match yaml {
        Value::Sequence(seq) => seq,
        Value::Null => Vec::new(),
        other => {
            return Err(SheetError::Parse(format!(
                "Expected a list of records, found {}",
                kind_of(&other)
            )))
        }
    };

    seq.iter()
        .enumerate()
        .map(|(idx, item)| parse_record(idx, item))
        .collect()
}

fn parse_record(idx: usize, item: &Value) -> SheetResult<Record> {
    let map = match item {
        Value::Mapping(map) => map,
        other => {
            return Err(SheetError::Parse(format!(
                "Record {} must be a mapping, found {}",
                idx + 1,
                kind_of(other)
            )))
        }
    };

    let mut record = Record::new();
    for (key, value) in map {
        let column = match key {
            Value::String(s) => s.clone(),
            other => {
                return Err(SheetError::Parse(format!(
                    "Record {}: column names must be strings, found {}",
                    idx + 1,
                    kind_of(other)
                )))
            }
        };
        let text = scalar_text(value).ok_or_else(|| {
            SheetError::Parse(format!(
                "Record {}: column '{}' holds a {}, expected a scalar",
                idx + 1,
                column,
                kind_of(value)
            ))
        })?;
        record = record.with(column, text);
    }
    Ok(record)
}

/// Display form of a scalar value (None for nested values)
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Tagged(tagged) => scalar_text(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "list",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_keeps_key_order() {
        let yaml = r#"
- Skill ID / Name: 01 Strong Slash
  Damage Type: Physical
  Cost: HP 10% / MP 0
- Skill ID / Name: 02 Fireball
  Damage Type: Magic
  Cost: HP 0% / MP 5
"#;
        let records = parse_records(yaml).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0].column_names(),
            vec!["Skill ID / Name", "Damage Type", "Cost"]
        );
        assert_eq!(records[1].get("Damage Type"), Some("Magic"));
    }

    #[test]
    fn test_parse_json_document() {
        let json = r#"[{"b": "2", "a": "1"}]"#;
        let records = parse_records(json).unwrap();
        assert_eq!(records[0].column_names(), vec!["b", "a"]);
    }

    #[test]
    fn test_scalars_become_display_text() {
        let yaml = "- name: x\n  cost: 5\n  ratio: 1.5\n  active: true\n  curse: ~\n";
        let records = parse_records(yaml).unwrap();
        let record = &records[0];
        assert_eq!(record.get("cost"), Some("5"));
        assert_eq!(record.get("ratio"), Some("1.5"));
        assert_eq!(record.get("active"), Some("true"));
        assert_eq!(record.get("curse"), Some(""));
    }

    #[test]
    fn test_empty_document_is_empty_list() {
        assert!(parse_records("").unwrap().is_empty());
        assert!(parse_records("[]").unwrap().is_empty());
    }

    #[test]
    fn test_rejects_top_level_mapping() {
        let err = parse_records("name: x\n").unwrap_err();
        assert!(matches!(err, SheetError::Parse(_)));
    }

    #[test]
    fn test_rejects_nested_value() {
        let err = parse_records("- name: x\n  tags: [a, b]\n").unwrap_err();
        assert!(err.to_string().contains("tags"));
    }

    #[test]
    fn test_rejects_non_string_key() {
        let err = parse_records("- 1: x\n").unwrap_err();
        assert!(matches!(err, SheetError::Parse(_)));
    }

    #[test]
    fn test_syntax_error_is_yaml_error() {
        let err = parse_records("- [unclosed").unwrap_err();
        assert!(matches!(err, SheetError::Yaml(_)));
    }

    #[test]
    fn test_load_missing_file_is_file_system_error() {
        let err = load_records(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(matches!(err, SheetError::FileSystem { .. }));
    }
}
