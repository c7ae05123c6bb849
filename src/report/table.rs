//! Per-group tabular export as CSV

use crate::analysis::{AnalysisResult, FlatRecord, FlatValue, GroupMember, ShapeGroup};

/// Metadata columns preceding the flattened keys
pub const METADATA_COLUMNS: [&str; 3] = ["file_name", "file_path", "field_names"];

/// One shape group laid out as rows and columns
#[derive(Debug, Clone, PartialEq)]
pub struct GroupTable {
    pub group: usize,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl GroupTable {
    /// Build a table, loading records that were not retained through `reload`
    pub fn build<F>(group: &ShapeGroup, mut reload: F) -> AnalysisResult<Self>
    where
        F: FnMut(&GroupMember) -> AnalysisResult<FlatRecord>,
    {
        let mut records = Vec::with_capacity(group.len());
        for member in &group.members {
            let record = match &member.record {
                Some(record) => record.clone(),
                None => reload(member)?,
            };
            records.push(record);
        }

        // Members share a fingerprint, but a reloaded file may have changed on disk
        let mut keys: Vec<String> = group.fingerprint.keys().to_vec();
        for record in &records {
            for key in record.keys() {
                if !group.fingerprint.contains(key) && !keys.contains(key) {
                    keys.push(key.clone());
                }
            }
        }
        keys.sort();

        // A flattened key named like a metadata column fills that column instead
        let (overrides, keys): (Vec<String>, Vec<String>) = keys
            .into_iter()
            .partition(|key| METADATA_COLUMNS.contains(&key.as_str()));

        let mut columns: Vec<String> = METADATA_COLUMNS.iter().map(|c| c.to_string()).collect();
        columns.extend(keys.iter().cloned());

        let rows = group
            .members
            .iter()
            .zip(&records)
            .map(|(member, record)| {
                let field_names = record.keys().cloned().collect::<Vec<_>>().join(", ");
                let mut row = vec![
                    member.name.clone(),
                    member.path.display().to_string(),
                    field_names,
                ];
                for key in &overrides {
                    if let (Some(value), Some(index)) = (
                        record.get(key),
                        METADATA_COLUMNS.iter().position(|c| *c == key.as_str()),
                    ) {
                        row[index] = cell(Some(value));
                    }
                }
                row.extend(keys.iter().map(|key| cell(record.get(key))));
                row
            })
            .collect();

        Ok(Self {
            group: group.id,
            columns,
            rows,
        })
    }

    /// Render as RFC 4180 CSV with a header row
    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        push_line(&mut out, &self.columns);
        for row in &self.rows {
            push_line(&mut out, row);
        }
        out
    }
}

fn cell(value: Option<&FlatValue>) -> String {
    match value {
        None | Some(FlatValue::Null) => String::new(),
        Some(value) => value.to_string(),
    }
}

fn push_line(out: &mut String, fields: &[String]) {
    let line = fields
        .iter()
        .map(|field| quote_field(field))
        .collect::<Vec<_>>()
        .join(",");
    out.push_str(&line);
    out.push_str("\r\n");
}

/// A field is quoted when it holds a delimiter, quote, line break or edge whitespace
fn needs_quoting(field: &str) -> bool {
    field.contains([',', '"', '\n', '\r'])
        || field.starts_with(char::is_whitespace)
        || field.ends_with(char::is_whitespace)
}

fn quote_field(field: &str) -> String {
    if !needs_quoting(field) {
        return field.to_string();
    }
    format!("\"{}\"", field.replace('"', "\"\""))
}
