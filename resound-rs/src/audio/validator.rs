//! MP3 sniff validation
//!
//! Looks at the first bytes only. Passing here does not mean the stream
//! parses; the extractor reports that separately and the upload survives it.

use crate::error::ApiError;

const ID3_MARKER: &[u8; 3] = b"ID3";
const FRAME_SYNC_MASK: u8 = 0xE0;

/// Accept bytes that start with an ID3v2 tag or an MPEG frame sync
pub fn validate_audio_data(data: &[u8]) -> Result<(), ApiError> {
    if data.is_empty() {
        return Err(ApiError::InvalidAudioData(
            "Audio data cannot be empty".to_string(),
        ));
    }

    if data.len() < 3 {
        return Err(invalid_format());
    }

    let has_id3_tag = &data[..3] == ID3_MARKER;
    let has_frame_sync = data[0] == 0xFF && data[1] & FRAME_SYNC_MASK == FRAME_SYNC_MASK;

    if has_id3_tag || has_frame_sync {
        Ok(())
    } else {
        Err(invalid_format())
    }
}

fn invalid_format() -> ApiError {
    ApiError::InvalidAudioData("Invalid MP3 file format".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(result: Result<(), ApiError>) -> String {
        match result {
            Err(ApiError::InvalidAudioData(msg)) => msg,
            other => panic!("expected InvalidAudioData, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_rejected() {
        assert_eq!(message(validate_audio_data(&[])), "Audio data cannot be empty");
    }

    #[test]
    fn test_short_inputs_rejected() {
        assert_eq!(message(validate_audio_data(b"I")), "Invalid MP3 file format");
        assert_eq!(message(validate_audio_data(b"ID")), "Invalid MP3 file format");
        // A frame sync alone is still too short
        assert!(validate_audio_data(&[0xFF, 0xFB]).is_err());
    }

    #[test]
    fn test_id3_prefix_accepted() {
        assert!(validate_audio_data(b"ID3").is_ok());
        assert!(validate_audio_data(b"ID3\x04\x00\x00\x00\x00\x00\x00").is_ok());
    }

    #[test]
    fn test_frame_sync_accepted() {
        for second in [0xE0u8, 0xE3, 0xFA, 0xFB, 0xFF] {
            assert!(
                validate_audio_data(&[0xFF, second, 0x90]).is_ok(),
                "0xFF 0x{:02X} should pass",
                second
            );
        }
    }

    #[test]
    fn test_near_misses_rejected() {
        // Top three bits of byte 1 not all set
        assert!(validate_audio_data(&[0xFF, 0xC0, 0x00]).is_err());
        assert!(validate_audio_data(&[0xFE, 0xFB, 0x00]).is_err());
        // Case matters for the tag marker
        assert!(validate_audio_data(b"id3xxxx").is_err());
        assert!(validate_audio_data(b"RIFF\x00\x00\x00\x00WAVE").is_err());
    }
}
