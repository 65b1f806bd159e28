//! Asset descriptors and the lazy, at-most-once decode cell
//!
//! An [`Asset`] is immutable apart from its decode cache. The cache is a
//! `OnceLock`: the first caller of [`Asset::materialize`] runs the decoder,
//! concurrent callers block on that run, and everybody observes the same
//! outcome. Failures are cached the same way as successes.

use crate::core::codec::Decoder;
use crate::core::error::DecodeError;
use crate::core::fs::FileInfo;
use crate::core::path;
use bytes::Bytes;
use std::borrow::Cow;
use std::sync::OnceLock;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};

/// Where an asset's decode cache currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeState {
    /// Nobody has asked for the bytes yet
    Unresolved,
    /// Decoded bytes are cached
    Resolved,
    /// Decoding failed; the error is cached
    Failed,
}

/// Row of the compiled-in asset table generated by `build.rs`
#[derive(Debug, Clone, Copy)]
pub struct BundledAsset {
    pub logical_path: &'static str,
    pub local_path: &'static str,
    pub payload: &'static str,
    pub size: u64,
    pub mod_time: u64,
    pub is_dir: bool,
}

/// One entry of the asset registry: a file or a synthetic directory marker
#[derive(Debug)]
pub struct Asset {
    logical_path: String,
    local_path: String,
    payload: Cow<'static, str>,
    size: u64,
    mod_time: u64,
    is_dir: bool,
    decoded: OnceLock<Result<Bytes, DecodeError>>,
}

impl Asset {
    /// A file asset. `size` is the declared uncompressed length and
    /// `mod_time` is in Unix seconds.
    pub fn file(
        logical_path: &str,
        local_path: impl Into<String>,
        payload: impl Into<Cow<'static, str>>,
        size: u64,
        mod_time: u64,
    ) -> Self {
        Asset {
            logical_path: path::normalize(logical_path),
            local_path: local_path.into(),
            payload: payload.into(),
            size,
            mod_time,
            is_dir: false,
            decoded: OnceLock::new(),
        }
    }

    /// A directory marker. It has no payload and never decodes.
    pub fn dir(logical_path: &str, local_path: impl Into<String>, mod_time: u64) -> Self {
        Asset {
            logical_path: path::normalize(logical_path),
            local_path: local_path.into(),
            payload: Cow::Borrowed(""),
            size: 0,
            mod_time,
            is_dir: true,
            decoded: OnceLock::new(),
        }
    }

    pub fn logical_path(&self) -> &str {
        &self.logical_path
    }

    pub fn local_path(&self) -> &str {
        &self.local_path
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn mod_time(&self) -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(self.mod_time)
    }

    pub fn is_dir(&self) -> bool {
        self.is_dir
    }

    /// Stat-style view of this asset
    pub fn info(&self) -> FileInfo {
        FileInfo {
            name: path::basename(&self.logical_path).to_string(),
            size: self.size,
            mod_time: self.mod_time(),
            is_dir: self.is_dir,
        }
    }

    pub fn state(&self) -> DecodeState {
        match self.decoded.get() {
            None => DecodeState::Unresolved,
            Some(Ok(_)) => DecodeState::Resolved,
            Some(Err(_)) => DecodeState::Failed,
        }
    }

    /// Decoded bytes, running `decoder` on the first call only.
    ///
    /// Directory markers short-circuit to an empty buffer and leave the
    /// cache untouched. Zero-length files resolve to an empty buffer without
    /// decoding.
    pub fn materialize(&self, decoder: &dyn Decoder) -> Result<Bytes, DecodeError> {
        if self.is_dir {
            return Ok(Bytes::new());
        }

        self.decoded
            .get_or_init(|| {
                if self.size == 0 {
                    return Ok(Bytes::new());
                }
                debug!("Decoding embedded asset {}", self.logical_path);
                match decoder.decode(&self.payload) {
                    Ok(data) => {
                        debug!(
                            "Decoded {} ({} -> {} bytes)",
                            self.logical_path,
                            self.payload.len(),
                            data.len()
                        );
                        Ok(Bytes::from(data))
                    }
                    Err(e) => {
                        warn!("Embedded asset {} is corrupt: {}", self.logical_path, e);
                        Err(e)
                    }
                }
            })
            .clone()
    }
}

impl From<&BundledAsset> for Asset {
    fn from(row: &BundledAsset) -> Self {
        if row.is_dir {
            Asset::dir(row.logical_path, row.local_path, row.mod_time)
        } else {
            Asset::file(
                row.logical_path,
                row.local_path,
                row.payload,
                row.size,
                row.mod_time,
            )
        }
    }
}
