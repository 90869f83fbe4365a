//! Line-oriented access to the model's text files.

use std::io::ErrorKind;
use std::path::Path;
use std::str::FromStr;

use crate::error::{LoadError, Location, Result};

/// The full contents of one input file.
///
/// Files are read whole, so no handle outlives [`SourceFile::read`].
#[derive(Debug, Clone)]
pub struct SourceFile {
    name: String,
    text: String,
}

impl SourceFile {
    /// Read `name` from the model directory `dir`.
    pub fn read(dir: &Path, name: &str) -> Result<Self> {
        let path = dir.join(name);
        let text = std::fs::read_to_string(&path).map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                LoadError::Missing { path: path.clone() }
            } else {
                LoadError::Io {
                    path: path.clone(),
                    source,
                }
            }
        })?;
        Ok(Self::from_text(name, text))
    }

    /// Wrap in-memory text as if it had been read from `name`.
    pub fn from_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    /// File name used in error locations.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Iterate over lines, numbered from 1, with `\r` stripped.
    pub fn lines(&self) -> impl Iterator<Item = SourceLine<'_>> {
        self.text.lines().enumerate().map(|(i, text)| SourceLine {
            file: &self.name,
            number: i + 1,
            text: text.trim_end_matches('\r'),
        })
    }
}

/// One line of an input file.
#[derive(Debug, Clone, Copy)]
pub struct SourceLine<'a> {
    file: &'a str,
    number: usize,
    text: &'a str,
}

impl<'a> SourceLine<'a> {
    /// The line text.
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Where this line lives, for error reporting.
    pub fn location(&self) -> Location {
        Location::new(self.file, self.number)
    }

    /// True if the line holds only whitespace.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Split on tabs, requiring exactly `expected` fields.
    ///
    /// Trailing empty fields are dropped, so a stray tab at the end of a
    /// line is harmless.
    pub fn tab_fields(&self, expected: usize) -> Result<Vec<&'a str>> {
        let mut fields: Vec<&str> = self.text.split('\t').collect();
        while fields.len() > 1 && fields.last().is_some_and(|f| f.is_empty()) {
            fields.pop();
        }
        self.check_count(fields, expected)
    }

    /// Split on runs of whitespace, requiring exactly `expected` fields.
    pub fn ws_fields(&self, expected: usize) -> Result<Vec<&'a str>> {
        let fields: Vec<&str> = self.text.split_whitespace().collect();
        self.check_count(fields, expected)
    }

    /// Parse an integer field of this line.
    pub fn int<T: FromStr>(&self, field: &str) -> Result<T> {
        field
            .trim()
            .parse()
            .map_err(|_| LoadError::NotAnInteger {
                at: self.location(),
                value: field.to_string(),
            })
    }

    fn check_count(&self, fields: Vec<&'a str>, expected: usize) -> Result<Vec<&'a str>> {
        if fields.len() != expected {
            return Err(LoadError::field_count(
                self.location(),
                expected,
                fields.len(),
            ));
        }
        Ok(fields)
    }
}
