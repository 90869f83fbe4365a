//! General model metadata: `key: value` lines.

use crate::error::{LoadError, Result};
use crate::source::SourceFile;

/// Parse the metadata file and return the model name.
///
/// `name` is the only key; the last `name` line wins. A line with nothing
/// after the `:` counts as a single field.
pub fn parse_general(file: &SourceFile) -> Result<String> {
    let mut name = None;
    for line in file.lines() {
        let mut fields: Vec<&str> = line.text().split(':').collect();
        while fields.len() > 1 && fields.last().is_some_and(|f| f.trim().is_empty()) {
            fields.pop();
        }
        let &[key, value] = fields.as_slice() else {
            return Err(LoadError::field_count(line.location(), 2, fields.len()));
        };
        match key.trim() {
            "name" => name = Some(value.trim().to_string()),
            other => return Err(LoadError::unknown_token(line.location(), "metadata key", other)),
        }
    }
    name.ok_or_else(|| LoadError::MissingName {
        file: file.name().to_string(),
    })
}
