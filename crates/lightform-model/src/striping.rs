//! Striping instructions: how LED pixels run across a panel's rows.
//!
//! One line per panel:
//!
//! ```text
//! <id> <baseRowLength> [U<c1>,<c2>,...] <L|R> <token>...
//! ```
//!
//! Rows taper by one pixel per step; each nudge pair adjusts the current row
//! on both ends, and gap runs insert dark positions before the next row.
//! The starting vertex of each panel comes from the signal-path table.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::{LoadError, Result};
use crate::nudge::{decode_token, StripeToken, TokenError};
use crate::source::SourceFile;

/// Trailing header label of the signal-path table.
pub const SIGNAL_IN_HEADER: &str = "Signal in vertex";

const SIGNAL_PATH_FIELDS: usize = 8;

/// Side of the panel the first row starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Side {
    /// Token `L`.
    Left,
    /// Token `R`.
    Right,
}

impl Side {
    /// Decode an `L`/`R` token.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "L" => Some(Side::Left),
            "R" => Some(Side::Right),
            _ => None,
        }
    }
}

/// Row-by-row pixel layout of one panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StripingInstructions {
    /// Vertex id where the signal enters the panel.
    pub starting_vertex: i32,
    /// Side the first row starts from.
    pub start_side: Side,
    /// Per-universe pixel splits (`U...`), carried as written.
    pub universe_lengths: Option<Vec<i32>>,
    /// Lit pixels per row.
    pub row_lengths: Vec<i32>,
    /// Nudge on the side each row starts from.
    pub before_nudges: Vec<i32>,
    /// Dark positions preceding each row.
    pub gaps: Vec<usize>,
}

impl StripingInstructions {
    /// Number of physical rows.
    pub fn row_count(&self) -> usize {
        self.row_lengths.len()
    }

    /// Whether row `row` starts from the left bound.
    pub fn row_starts_left(&self, row: usize) -> bool {
        (self.start_side == Side::Left) == (row % 2 == 0)
    }

    /// Total lit pixels over all rows.
    pub fn lit_pixels(&self) -> usize {
        self.row_lengths
            .iter()
            .map(|&n| usize::try_from(n).unwrap_or(0))
            .sum()
    }

    /// Lit pixels plus gap positions; the channel length on the wire.
    pub fn channel_len(&self) -> usize {
        self.lit_pixels() + self.gaps.iter().sum::<usize>()
    }
}

/// Row sequences produced by [`layout_rows`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowLayout {
    /// Lit pixels per row.
    pub row_lengths: Vec<i32>,
    /// Nudge on the side each row starts from.
    pub before_nudges: Vec<i32>,
    /// Dark positions preceding each row.
    pub gaps: Vec<usize>,
}

/// Run the striping state machine over the tokens after the side marker.
pub fn layout_rows<'t>(
    base_row_length: i32,
    side: Side,
    tokens: impl IntoIterator<Item = &'t str>,
) -> std::result::Result<RowLayout, (String, TokenError)> {
    let mut layout = RowLayout::default();
    let mut row_length = base_row_length;
    let mut pending_gap = 0;
    let mut phase = 0;

    for token in tokens {
        match decode_token(token).map_err(|e| (token.to_string(), e))? {
            StripeToken::Gap(n) => pending_gap += n,
            StripeToken::Nudge { left, right } => {
                let before = if (side == Side::Left) == (phase == 0) {
                    left
                } else {
                    right
                };
                layout.before_nudges.push(before);
                row_length += left + right;
                layout.row_lengths.push(row_length);
                row_length -= 1;
                layout.gaps.push(pending_gap);
                pending_gap = 0;
                phase = 1 - phase;
            }
        }
    }
    Ok(layout)
}

/// Read the signal-path table: panel id to signal-in vertex id.
pub fn parse_signal_paths(file: &SourceFile) -> Result<HashMap<String, i32>> {
    let mut lines = file.lines();
    let header = lines.next().map(|l| l.text()).unwrap_or_default();
    if !header.trim_end().ends_with(SIGNAL_IN_HEADER) {
        return Err(LoadError::BadHeader {
            file: file.name().to_string(),
            header: header.to_string(),
            expected: SIGNAL_IN_HEADER,
        });
    }

    let mut start_vertexes = HashMap::new();
    for line in lines {
        let fields = line.ws_fields(SIGNAL_PATH_FIELDS)?;
        let vertex = line.int(fields[SIGNAL_PATH_FIELDS - 1])?;
        start_vertexes.insert(fields[0].to_string(), vertex);
    }
    Ok(start_vertexes)
}

/// Parse the striping file, keyed by panel id.
pub fn parse_striping(
    file: &SourceFile,
    start_vertexes: &HashMap<String, i32>,
) -> Result<HashMap<String, StripingInstructions>> {
    let mut instructions = HashMap::new();

    for line in file.lines() {
        let cleaned = strip_remarks(line.text());
        let tokens: Vec<&str> = cleaned.split_whitespace().collect();
        let Some(&id) = tokens.first() else {
            continue;
        };
        if id.contains('.') {
            log::info!("Ignoring leftover striping IP {id}");
            continue;
        }
        if tokens.len() < 3 {
            continue;
        }

        let base_row_length: i32 = line.int(tokens[1])?;
        let mut next = 2;
        let mut universe_lengths = None;
        if let Some(splits) = tokens[next].strip_prefix('U') {
            let splits = splits
                .split(',')
                .map(|s| line.int(s))
                .collect::<Result<Vec<i32>>>()?;
            universe_lengths = Some(splits);
            next += 1;
        }

        let side_token = *tokens
            .get(next)
            .ok_or_else(|| LoadError::field_count(line.location(), next + 1, tokens.len()))?;
        let side = Side::from_token(side_token)
            .ok_or_else(|| LoadError::unknown_token(line.location(), "left/right token", side_token))?;
        next += 1;

        let rows = layout_rows(base_row_length, side, tokens[next..].iter().copied()).map_err(
            |(token, source)| LoadError::BadNudge {
                at: line.location(),
                token,
                source,
            },
        )?;

        let starting_vertex = *start_vertexes.get(id).ok_or_else(|| {
            LoadError::missing_reference(line.location(), "signal-in vertex for panel", id)
        })?;

        log::debug!(
            "Panel {id} has starting vertex {starting_vertex}{} and row lengths {:?}",
            universe_lengths
                .as_ref()
                .map(|u| format!(" and universe lengths {u:?}"))
                .unwrap_or_default(),
            rows.row_lengths
        );

        instructions.insert(
            id.to_string(),
            StripingInstructions {
                starting_vertex,
                start_side: side,
                universe_lengths,
                row_lengths: rows.row_lengths,
                before_nudges: rows.before_nudges,
                gaps: rows.gaps,
            },
        );
    }
    Ok(instructions)
}

/// Replace each parenthesized remark `(...)` with a single space.
///
/// A remark needs at least one character between the parentheses; an
/// unmatched `(` is kept as-is.
fn strip_remarks(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut rest = line;
    while let Some(open) = rest.find('(') {
        let after = &rest[open + 1..];
        let close = after
            .char_indices()
            .skip(1)
            .find(|&(_, c)| c == ')')
            .map(|(i, _)| i);
        match close {
            Some(close) => {
                out.push_str(&rest[..open]);
                out.push(' ');
                rest = &after[close + 1..];
            }
            None => break,
        }
    }
    out.push_str(rest);
    out
}
