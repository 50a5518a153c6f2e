//! Song metadata extraction
//!
//! Parses the container with `lofty` and resolves each catalog field from an
//! ordered list of tag keys. The first non-blank value wins, searching the
//! primary tag before any other tag in the file. Every field has a default,
//! so a file with no tags at all still yields a complete record.

use crate::error::ApiError;
use lofty::file::{AudioFile, TaggedFileExt};
use lofty::probe::Probe;
use lofty::tag::{ItemKey, Tag};
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use tracing::debug;

pub const UNKNOWN: &str = "Unknown";
pub const DEFAULT_YEAR: &str = "1900";
pub const DEFAULT_DURATION: &str = "00:00";

const NAME_KEYS: &[ItemKey] = &[ItemKey::TrackTitle];
const ARTIST_KEYS: &[ItemKey] = &[ItemKey::TrackArtist, ItemKey::AlbumArtist];
const ALBUM_KEYS: &[ItemKey] = &[ItemKey::AlbumTitle];
const YEAR_KEYS: &[ItemKey] = &[
    ItemKey::RecordingDate,
    ItemKey::Year,
    ItemKey::OriginalReleaseDate,
];

/// Catalog record derived from one stored resource
///
/// `id` is the resource identifier; the song service keys its rows by it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongMetadata {
    pub id: i64,
    pub name: String,
    pub artist: String,
    pub album: String,
    pub duration: String,
    pub year: String,
}

/// Stateless extractor; cheap to share
#[derive(Debug, Default, Clone, Copy)]
pub struct MetadataExtractor;

impl MetadataExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Parse `data` and build the catalog record for `resource_id`
    ///
    /// Fails with `InvalidAudioData` only when the container itself cannot be
    /// read. Missing or odd tag values fall back to defaults.
    pub fn extract(&self, resource_id: i64, data: &[u8]) -> Result<SongMetadata, ApiError> {
        let tagged_file = Probe::new(Cursor::new(data))
            .guess_file_type()
            .map_err(|e| parse_failure(&e))?
            .read()
            .map_err(|e| parse_failure(&e))?;

        // Primary tag first, then whatever else the file carries
        let primary = tagged_file.primary_tag();
        let mut tags: Vec<&Tag> = primary.into_iter().collect();
        tags.extend(
            tagged_file
                .tags()
                .iter()
                .filter(|t| primary.map_or(true, |p| p.tag_type() != t.tag_type())),
        );

        let duration = tagged_file.properties().duration();
        let raw_seconds = (!duration.is_zero()).then(|| duration.as_secs_f64().to_string());

        let metadata = SongMetadata {
            id: resource_id,
            name: or_unknown(first_non_blank(&tags, NAME_KEYS)),
            artist: or_unknown(first_non_blank(&tags, ARTIST_KEYS)),
            album: or_unknown(first_non_blank(&tags, ALBUM_KEYS)),
            duration: format_duration(raw_seconds.as_deref()),
            year: normalize_year(first_non_blank(&tags, YEAR_KEYS).as_deref()),
        };

        debug!(
            resource_id,
            name = %metadata.name,
            artist = %metadata.artist,
            duration = %metadata.duration,
            tag_count = tags.len(),
            "Extracted metadata"
        );

        Ok(metadata)
    }
}

fn parse_failure(err: &dyn std::fmt::Display) -> ApiError {
    ApiError::InvalidAudioData(format!("Failed to parse MP3 file: {}", err))
}

/// First trimmed, non-blank value across `keys` (outer) and `tags` (inner)
fn first_non_blank(tags: &[&Tag], keys: &[ItemKey]) -> Option<String> {
    keys.iter().find_map(|key| {
        tags.iter()
            .filter_map(|tag| tag.get_string(key))
            .map(str::trim)
            .find(|value| !value.is_empty())
            .map(str::to_string)
    })
}

fn or_unknown(value: Option<String>) -> String {
    value.unwrap_or_else(|| UNKNOWN.to_string())
}

/// Reduce a date-like tag value to a year
///
/// Values of four or more characters are cut to their first four characters
/// when those parse as an integer; otherwise the full value is kept. Shorter
/// values pass through. Absent or blank values become `"1900"`.
pub fn normalize_year(raw: Option<&str>) -> String {
    let Some(value) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return DEFAULT_YEAR.to_string();
    };

    if value.chars().count() >= 4 {
        let prefix: String = value.chars().take(4).collect();
        if prefix.parse::<i32>().is_ok() {
            return prefix;
        }
    }

    value.to_string()
}

/// Format a seconds value (decimal string) as zero-padded `mm:ss`
///
/// Rounds to the nearest whole second. Absent, blank, unparsable, negative or
/// non-finite input yields `"00:00"`.
pub fn format_duration(raw_seconds: Option<&str>) -> String {
    let seconds = raw_seconds
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|s| s.is_finite() && *s >= 0.0);

    let Some(seconds) = seconds else {
        return DEFAULT_DURATION.to_string();
    };

    let total = seconds.round() as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// ID3v2.3 tag with Latin-1 text frames
    fn id3v23_tag(frames: &[(&str, &str)]) -> Vec<u8> {
        let mut body = Vec::new();
        for (id, text) in frames {
            let payload_len = text.len() as u32 + 1;
            body.extend_from_slice(id.as_bytes());
            body.extend_from_slice(&payload_len.to_be_bytes());
            body.extend_from_slice(&[0x00, 0x00]);
            body.push(0x00); // ISO-8859-1
            body.extend_from_slice(text.as_bytes());
        }

        let size = body.len() as u32;
        let syncsafe = [
            ((size >> 21) & 0x7F) as u8,
            ((size >> 14) & 0x7F) as u8,
            ((size >> 7) & 0x7F) as u8,
            (size & 0x7F) as u8,
        ];

        let mut tag = b"ID3".to_vec();
        tag.extend_from_slice(&[0x03, 0x00, 0x00]);
        tag.extend_from_slice(&syncsafe);
        tag.extend_from_slice(&body);
        tag
    }

    /// MPEG-1 Layer III, 128 kbps, 44.1 kHz frames of silence (417 bytes each)
    fn mpeg_frames(count: usize) -> Vec<u8> {
        let mut frame = vec![0u8; 417];
        frame[..4].copy_from_slice(&[0xFF, 0xFB, 0x90, 0x00]);
        frame.repeat(count)
    }

    #[test]
    fn test_extracts_tagged_mp3() {
        let mut data = id3v23_tag(&[
            ("TIT2", "Blue in Green"),
            ("TPE1", "Miles Davis"),
            ("TALB", "Kind of Blue"),
            ("TYER", "1959"),
        ]);
        data.extend(mpeg_frames(40));

        let metadata = MetadataExtractor::new().extract(12, &data).unwrap();

        assert_eq!(metadata.id, 12);
        assert_eq!(metadata.name, "Blue in Green");
        assert_eq!(metadata.artist, "Miles Davis");
        assert_eq!(metadata.album, "Kind of Blue");
        assert_eq!(metadata.year, "1959");
        assert_eq!(metadata.duration.len(), 5);
        assert_eq!(&metadata.duration[2..3], ":");
    }

    #[test]
    fn test_untagged_mp3_gets_defaults() {
        let data = mpeg_frames(40);

        let metadata = MetadataExtractor::new().extract(3, &data).unwrap();

        assert_eq!(metadata.name, UNKNOWN);
        assert_eq!(metadata.artist, UNKNOWN);
        assert_eq!(metadata.album, UNKNOWN);
        assert_eq!(metadata.year, DEFAULT_YEAR);
    }

    #[test]
    fn test_unrecognized_container_fails() {
        let result = MetadataExtractor::new().extract(1, b"definitely not an audio container");
        assert!(matches!(result, Err(ApiError::InvalidAudioData(_))));
    }

    #[test]
    fn test_first_non_blank_prefers_key_order_then_tag_order() {
        let mut primary = Tag::new(lofty::tag::TagType::Id3v2);
        primary.insert_text(ItemKey::TrackArtist, "   ".to_string());
        primary.insert_text(ItemKey::AlbumArtist, "Album Artist".to_string());

        let mut secondary = Tag::new(lofty::tag::TagType::Ape);
        secondary.insert_text(ItemKey::TrackArtist, " Track Artist ".to_string());

        let tags = [&primary, &secondary];
        // Blank primary value is skipped; the secondary tag supplies the first key
        assert_eq!(
            first_non_blank(&tags, ARTIST_KEYS).as_deref(),
            Some("Track Artist")
        );
        assert_eq!(first_non_blank(&tags, ALBUM_KEYS), None);
    }

    #[test]
    fn test_duration_conversion() {
        assert_eq!(format_duration(Some("125.6")), "02:06");
        assert_eq!(format_duration(Some("59")), "00:59");
        assert_eq!(format_duration(Some("59.5")), "01:00");
        assert_eq!(format_duration(Some("3600")), "60:00");
        assert_eq!(format_duration(Some("0")), "00:00");
    }

    #[test]
    fn test_duration_defaults() {
        assert_eq!(format_duration(None), "00:00");
        assert_eq!(format_duration(Some("")), "00:00");
        assert_eq!(format_duration(Some("   ")), "00:00");
        assert_eq!(format_duration(Some("abc")), "00:00");
        assert_eq!(format_duration(Some("NaN")), "00:00");
        assert_eq!(format_duration(Some("-4")), "00:00");
    }

    #[test]
    fn test_year_normalization() {
        assert_eq!(normalize_year(Some("1995-06-01")), "1995");
        assert_eq!(normalize_year(Some("2001")), "2001");
        assert_eq!(normalize_year(Some("Spring 1999")), "Spring 1999");
        assert_eq!(normalize_year(Some("99")), "99");
        assert_eq!(normalize_year(Some(" 1987 ")), "1987");
    }

    #[test]
    fn test_year_defaults() {
        assert_eq!(normalize_year(None), "1900");
        assert_eq!(normalize_year(Some("  ")), "1900");
    }
}
