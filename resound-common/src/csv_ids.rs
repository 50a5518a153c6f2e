//! Comma-separated identifier lists
//!
//! Bulk delete endpoints of both services accept `?id=1,2,3`. The grammar is
//! `id (, id)*` where every segment is trimmed and must parse as a base-10
//! integer greater than zero. The whole string is limited to
//! [`MAX_CSV_LENGTH`] characters, checked before any segment is parsed.

use thiserror::Error;

/// Maximum accepted length of the raw identifier list (in characters)
pub const MAX_CSV_LENGTH: usize = 200;

/// Rejections produced while parsing an identifier list
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CsvIdError {
    #[error("ID parameter cannot be empty")]
    Empty,

    #[error("CSV string length must be less than {MAX_CSV_LENGTH} characters")]
    TooLong,

    #[error("Invalid CSV format: empty ID value")]
    EmptySegment,

    #[error("Invalid CSV format: ID must be a valid number")]
    NotANumber,

    #[error("Invalid CSV format: ID must be a positive number")]
    NotPositive,
}

/// Parse a comma-separated list of positive identifiers
///
/// Returns the identifiers in input order. Duplicates are preserved; callers
/// decide how to treat them.
///
/// # Examples
/// ```
/// use resound_common::csv_ids::{parse_csv_ids, CsvIdError};
///
/// assert_eq!(parse_csv_ids(" 1, 2 ,30").unwrap(), vec![1, 2, 30]);
/// assert_eq!(parse_csv_ids("1,,2"), Err(CsvIdError::EmptySegment));
/// assert_eq!(parse_csv_ids("0"), Err(CsvIdError::NotPositive));
/// ```
pub fn parse_csv_ids(raw: &str) -> Result<Vec<i64>, CsvIdError> {
    if raw.trim().is_empty() {
        return Err(CsvIdError::Empty);
    }

    if raw.chars().count() > MAX_CSV_LENGTH {
        return Err(CsvIdError::TooLong);
    }

    raw.split(',').map(parse_segment).collect()
}

fn parse_segment(segment: &str) -> Result<i64, CsvIdError> {
    let trimmed = segment.trim();
    if trimmed.is_empty() {
        return Err(CsvIdError::EmptySegment);
    }

    let id: i64 = trimmed.parse().map_err(|_| CsvIdError::NotANumber)?;
    if id <= 0 {
        return Err(CsvIdError::NotPositive);
    }

    Ok(id)
}

/// Render identifiers back into the wire format accepted by [`parse_csv_ids`]
pub fn join_csv_ids(ids: &[i64]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
