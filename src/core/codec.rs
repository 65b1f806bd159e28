//! Payload encoding for embedded assets
//!
//! Assets are stored as gzip streams wrapped in standard base64 text.
//!
//! **Format**:
//! - Compression: gzip (deflate, best ratio), whole file as one member
//! - Encoding: standard alphabet base64 with padding
//! - ASCII whitespace inside the text is ignored, so payloads may be wrapped

use crate::core::error::DecodeError;
use base64::prelude::{Engine as _, BASE64_STANDARD};
use flate2::{read::GzDecoder, write::GzEncoder, Compression};
use std::io::{self, Read, Write};

/// Turns a stored payload back into the original bytes.
///
/// Implementations must be pure: the same payload always yields the same
/// outcome. Assets cache whatever the decoder returns for the lifetime of the
/// process.
pub trait Decoder: Send + Sync {
    fn decode(&self, payload: &str) -> Result<Vec<u8>, DecodeError>;
}

/// Base64 + gzip decoder used for the bundled asset table
#[derive(Debug, Clone, Copy, Default)]
pub struct GzipBase64;

impl Decoder for GzipBase64 {
    fn decode(&self, payload: &str) -> Result<Vec<u8>, DecodeError> {
        let compact: Vec<u8> = payload
            .bytes()
            .filter(|b| !b.is_ascii_whitespace())
            .collect();

        let compressed = BASE64_STANDARD
            .decode(&compact)
            .map_err(|e| DecodeError::Encoding(e.to_string()))?;

        let mut decompressed = Vec::new();
        GzDecoder::new(compressed.as_slice())
            .read_to_end(&mut decompressed)
            .map_err(|e| match e.kind() {
                io::ErrorKind::UnexpectedEof => DecodeError::UnexpectedEof,
                _ => DecodeError::Decompress(e.to_string()),
            })?;

        Ok(decompressed)
    }
}

/// Compress and encode `data` into the payload format `GzipBase64` reads.
pub fn encode(data: &[u8]) -> io::Result<String> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(data)?;
    let compressed = encoder.finish()?;
    Ok(BASE64_STANDARD.encode(compressed))
}
