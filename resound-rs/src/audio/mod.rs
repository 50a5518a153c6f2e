//! Audio byte handling: structural sniffing and tag extraction

pub mod extractor;
pub mod validator;

pub use extractor::{MetadataExtractor, SongMetadata};
pub use validator::validate_audio_data;
