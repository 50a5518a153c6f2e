//! Song payload validation
//!
//! Runs before any entity is built. Every failing field gets exactly one
//! message; all fields are checked so the caller sees every problem at once.

use resound_common::api::FieldErrors;
use serde::{Deserialize, Serialize};

const MAX_TEXT_CHARS: usize = 100;

/// Incoming song payload; every field optional so that absence can be
/// reported per field instead of as a body parse failure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SongDto {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub duration: Option<String>,
    pub year: Option<String>,
}

/// Validated catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub id: i64,
    pub name: String,
    pub artist: String,
    pub album: String,
    pub duration: String,
    pub year: String,
}

impl SongDto {
    /// Check every field and build a [`Song`], or return all field errors
    pub fn validate(self) -> Result<Song, FieldErrors> {
        let mut errors = FieldErrors::new();

        let id = match self.id {
            None => {
                errors.insert("id".into(), "ID is required".into());
                None
            }
            Some(id) if id <= 0 => {
                errors.insert("id".into(), "ID must be a positive number".into());
                None
            }
            Some(id) => Some(id),
        };

        let name = text_field(&mut errors, "name", "Name", self.name);
        let artist = text_field(&mut errors, "artist", "Artist", self.artist);
        let album = text_field(&mut errors, "album", "Album", self.album);

        let duration = patterned_field(
            &mut errors,
            "duration",
            "Duration is required",
            self.duration,
            is_mm_ss,
            "Duration must be in mm:ss format with leading zeros",
        );
        let year = patterned_field(
            &mut errors,
            "year",
            "Year is required",
            self.year,
            is_supported_year,
            "Year must be between 1900 and 2099",
        );

        match (id, name, artist, album, duration, year) {
            (Some(id), Some(name), Some(artist), Some(album), Some(duration), Some(year))
                if errors.is_empty() =>
            {
                Ok(Song {
                    id,
                    name,
                    artist,
                    album,
                    duration,
                    year,
                })
            }
            _ => Err(errors),
        }
    }
}

/// Required, non-blank, 1..=100 characters
fn text_field(
    errors: &mut FieldErrors,
    field: &str,
    label: &str,
    value: Option<String>,
) -> Option<String> {
    match value {
        Some(v) if !v.trim().is_empty() => {
            if v.chars().count() > MAX_TEXT_CHARS {
                errors.insert(
                    field.into(),
                    format!("{label} must be between 1 and {MAX_TEXT_CHARS} characters"),
                );
                None
            } else {
                Some(v)
            }
        }
        _ => {
            errors.insert(field.into(), format!("{label} is required"));
            None
        }
    }
}

fn patterned_field(
    errors: &mut FieldErrors,
    field: &str,
    required_message: &str,
    value: Option<String>,
    matches: fn(&str) -> bool,
    mismatch_message: &str,
) -> Option<String> {
    match value {
        Some(v) if !v.trim().is_empty() => {
            if matches(&v) {
                Some(v)
            } else {
                errors.insert(field.into(), mismatch_message.into());
                None
            }
        }
        _ => {
            errors.insert(field.into(), required_message.into());
            None
        }
    }
}

/// `^\d{2}:\d{2}$`
fn is_mm_ss(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 5
        && bytes[2] == b':'
        && bytes[..2].iter().all(u8::is_ascii_digit)
        && bytes[3..].iter().all(u8::is_ascii_digit)
}

/// `^(19\d{2}|20\d{2})$`
fn is_supported_year(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 4
        && (value.starts_with("19") || value.starts_with("20"))
        && bytes.iter().all(u8::is_ascii_digit)
}
