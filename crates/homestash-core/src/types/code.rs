//! Code formats for items and storage cells.
//!
//! Item codes: `ITEM-<YYYYMMDD>-<NNNNN>` where the suffix is a random
//! 5-digit value. Storage codes: `<RoomLetter><FurnitureNo><CellNumber:03>`,
//! e.g. `A3001`. A storage code is a pure function of its three parts and
//! is never edited independently of them.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::result::AppResult;

/// Prefix of every item code.
pub const ITEM_CODE_PREFIX: &str = "ITEM";

/// Inclusive range of the random item-code suffix.
pub const ITEM_SUFFIX_MIN: u32 = 10_000;
pub const ITEM_SUFFIX_MAX: u32 = 99_999;

/// An allocated item code, e.g. `ITEM-20240520-10086`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemCode(String);

impl ItemCode {
    /// Build a candidate code from a date and a 5-digit suffix.
    ///
    /// The caller is responsible for collision checking; two calls on the
    /// same day with the same suffix produce the same code.
    pub fn generate(date: NaiveDate, suffix: u32) -> Self {
        debug_assert!((ITEM_SUFFIX_MIN..=ITEM_SUFFIX_MAX).contains(&suffix));
        Self(format!(
            "{ITEM_CODE_PREFIX}-{}-{suffix:05}",
            date.format("%Y%m%d")
        ))
    }

    /// Parse and validate an item code from its textual form.
    pub fn parse(s: &str) -> AppResult<Self> {
        let mut parts = s.split('-');
        let (prefix, date, suffix) = match (parts.next(), parts.next(), parts.next(), parts.next())
        {
            (Some(p), Some(d), Some(n), None) => (p, d, n),
            _ => return Err(malformed(s)),
        };
        if prefix != ITEM_CODE_PREFIX
            || date.len() != 8
            || !date.bytes().all(|b| b.is_ascii_digit())
            || suffix.len() != 5
            || !suffix.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(malformed(s));
        }
        Ok(Self(s.to_string()))
    }

    /// The textual form of the code.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ItemCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn malformed(s: &str) -> AppError {
    AppError::validation(format!("'{s}' is not a valid item code"))
}

/// A composed storage-cell code, e.g. `A3001`.
///
/// Layout: one uppercase room letter, the furniture number (one or more
/// digits), and the zero-padded 3-digit cell number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StorageCode(String);

impl StorageCode {
    /// Compose a storage code from its three parts.
    pub fn compose(letter: char, furniture_no: i32, cell_number: i32) -> AppResult<Self> {
        if !letter.is_ascii_uppercase() {
            return Err(AppError::validation(format!(
                "Room letter must be A-Z, got '{letter}'"
            )));
        }
        if furniture_no < 1 || cell_number < 1 {
            return Err(AppError::validation(
                "Furniture and cell numbers start at 1",
            ));
        }
        if cell_number > 999 {
            return Err(AppError::validation(
                "Cell numbers beyond 999 do not fit the 3-digit code segment",
            ));
        }
        Ok(Self(format!("{letter}{furniture_no}{cell_number:03}")))
    }

    /// Parse a storage code back into `(letter, furniture_no, cell_number)`.
    pub fn parse(s: &str) -> AppResult<Self> {
        let (letter, furniture_no, cell_number) = Self::split(s)?;
        // Re-compose to reject non-canonical spellings (e.g. padded furniture numbers).
        let canonical = Self::compose(letter, furniture_no, cell_number)?;
        if canonical.0 != s {
            return Err(Self::malformed(s));
        }
        Ok(canonical)
    }

    /// The room letter segment.
    pub fn letter(&self) -> char {
        self.0.chars().next().unwrap_or('?')
    }

    /// The furniture number segment.
    pub fn furniture_no(&self) -> i32 {
        Self::split(&self.0).map(|(_, f, _)| f).unwrap_or(0)
    }

    /// The cell number segment.
    pub fn cell_number(&self) -> i32 {
        Self::split(&self.0).map(|(_, _, c)| c).unwrap_or(0)
    }

    /// The textual form of the code.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }

    fn split(s: &str) -> AppResult<(char, i32, i32)> {
        let bytes = s.as_bytes();
        // letter + at least one furniture digit + three cell digits
        if bytes.len() < 5 {
            return Err(Self::malformed(s));
        }
        let letter = bytes[0] as char;
        let digits = &s[1..];
        if !letter.is_ascii_uppercase() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Self::malformed(s));
        }
        let (furniture, cell) = digits.split_at(digits.len() - 3);
        let furniture_no: i32 = furniture.parse().map_err(|_| Self::malformed(s))?;
        let cell_number: i32 = cell.parse().map_err(|_| Self::malformed(s))?;
        Ok((letter, furniture_no, cell_number))
    }

    fn malformed(s: &str) -> AppError {
        AppError::validation(format!("'{s}' is not a valid storage code"))
    }
}

impl fmt::Display for StorageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
