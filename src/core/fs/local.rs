use super::file::{AssetFile, FileInfo};
use super::FileSystem;
use crate::core::error::{AssetError, Result};
use crate::core::path;
use bytes::Bytes;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;
use tracing::debug;

/// Filesystem reading the same logical paths straight from disk.
///
/// The root is joined with the normalized logical path. Normalization
/// clamps `..` at `/`, so lookups cannot leave the root. Files are read
/// fully at open time; nothing is cached between opens.
#[derive(Debug, Clone)]
pub struct LocalFs {
    root: PathBuf,
}

impl LocalFs {
    /// The directory does not need to exist yet; a missing root simply
    /// makes every lookup `NotFound`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        LocalFs { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, logical: &str) -> PathBuf {
        let relative = logical.trim_start_matches('/');
        if relative.is_empty() {
            self.root.clone()
        } else {
            self.root.join(relative)
        }
    }
}

impl FileSystem for LocalFs {
    fn open(&self, path: &str) -> Result<AssetFile> {
        let logical = path::normalize(path);
        let full_path = self.resolve(&logical);

        let metadata = fs::metadata(&full_path).map_err(|e| AssetError::from_io(&logical, e))?;
        let mod_time = metadata.modified().unwrap_or(UNIX_EPOCH);
        let name = path::basename(&logical).to_string();

        if metadata.is_dir() {
            debug!("Opened local directory {:?}", full_path);
            return Ok(AssetFile::directory(FileInfo {
                name,
                size: 0,
                mod_time,
                is_dir: true,
            }));
        }

        let data = fs::read(&full_path).map_err(|e| AssetError::from_io(&logical, e))?;
        debug!("Read local file {:?} ({} bytes)", full_path, data.len());

        Ok(AssetFile::new(
            FileInfo {
                name,
                size: data.len() as u64,
                mod_time,
                is_dir: false,
            },
            Bytes::from(data),
        ))
    }
}
