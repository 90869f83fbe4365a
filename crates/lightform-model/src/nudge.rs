//! Tokenizer for the striping mini-language.
//!
//! Two token kinds follow a panel's header:
//! - gap runs (`g`, `gg`, ...) count dark pixel positions before the next row
//! - nudge pairs (`+.-`, `.+`, `--.`, `.`) adjust a row's length on its
//!   left and right ends

use thiserror::Error;

/// Why a striping token could not be decoded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// A nudge run holds something other than `+` or `-`.
    #[error("bad nudge char {0:?}")]
    BadChar(char),
    /// A nudge pair does not have exactly one `.` separator.
    #[error("expected exactly one '.', found {0}")]
    BadSeparator(usize),
}

/// A decoded striping token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StripeToken {
    /// A run of `g`: this many dark positions.
    Gap(usize),
    /// A `<left>.<right>` pair of nudges.
    Nudge {
        /// Net nudge of the left run.
        left: i32,
        /// Net nudge of the right run.
        right: i32,
    },
}

/// Net value of a nudge run: +1 per `+`, -1 per `-`.
pub fn calc_nudge(run: &str) -> Result<i32, TokenError> {
    run.chars().try_fold(0, |acc, c| match c {
        '+' => Ok(acc + 1),
        '-' => Ok(acc - 1),
        other => Err(TokenError::BadChar(other)),
    })
}

/// Classify and decode one whitespace-separated striping token.
pub fn decode_token(token: &str) -> Result<StripeToken, TokenError> {
    if !token.is_empty() && token.bytes().all(|b| b == b'g') {
        return Ok(StripeToken::Gap(token.len()));
    }

    let dots = token.matches('.').count();
    if dots != 1 {
        return Err(TokenError::BadSeparator(dots));
    }
    let (left, right) = token.split_once('.').ok_or(TokenError::BadSeparator(0))?;
    Ok(StripeToken::Nudge {
        left: calc_nudge(left)?,
        right: calc_nudge(right)?,
    })
}
