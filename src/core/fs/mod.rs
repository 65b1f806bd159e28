//! Filesystem view over assets
//!
//! [`FileSystem`] is the only thing consumers see. It has two backends:
//!
//! - [`EmbeddedFs`]: resolves through the [`Registry`](crate::core::registry::Registry)
//!   and decodes each asset once
//! - [`LocalFs`]: reads the same logical paths from real files (development)
//!
//! [`AssetFs`] picks one of them once, at construction, from a boolean. [`DirFs`]
//! re-roots any filesystem under a path prefix.

mod dir;
mod embedded;
mod file;
mod local;

pub use dir::DirFs;
pub use embedded::EmbeddedFs;
pub use file::{AssetFile, FileInfo};
pub use local::LocalFs;

use crate::config::AssetConfig;
use crate::core::error::{AssetError, Result};
use crate::core::registry::Registry;
use bytes::Bytes;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Read-only access to assets by logical path.
///
/// Paths are normalized by the implementation, so callers can pass raw
/// request paths.
pub trait FileSystem: Send + Sync {
    /// Open `path`. Missing paths are `AssetError::NotFound`.
    fn open(&self, path: &str) -> Result<AssetFile>;

    /// Full content of `path`. Directories read as empty.
    fn read_bytes(&self, path: &str) -> Result<Bytes> {
        Ok(self.open(path)?.into_bytes())
    }

    /// Full content of `path` as UTF-8 text
    fn read_string(&self, path: &str) -> Result<String> {
        let bytes = self.read_bytes(path)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| AssetError::InvalidUtf8(path.to_string()))
    }
}

impl<F: FileSystem + ?Sized> FileSystem for Arc<F> {
    fn open(&self, path: &str) -> Result<AssetFile> {
        (**self).open(path)
    }

    fn read_bytes(&self, path: &str) -> Result<Bytes> {
        (**self).read_bytes(path)
    }
}

impl<F: FileSystem + ?Sized> FileSystem for &F {
    fn open(&self, path: &str) -> Result<AssetFile> {
        (**self).open(path)
    }

    fn read_bytes(&self, path: &str) -> Result<Bytes> {
        (**self).read_bytes(path)
    }
}

/// Embedded or local assets, fixed for the lifetime of the value
#[derive(Debug, Clone)]
pub enum AssetFs {
    Embedded(EmbeddedFs),
    Local(LocalFs),
}

impl AssetFs {
    /// `use_local` selects [`LocalFs`] rooted at `local_root`; otherwise the
    /// registry backs an [`EmbeddedFs`].
    pub fn new(use_local: bool, registry: Arc<Registry>, local_root: impl Into<PathBuf>) -> Self {
        if use_local {
            let local = LocalFs::new(local_root);
            info!("Serving assets from disk under {:?}", local.root());
            AssetFs::Local(local)
        } else {
            info!("Serving {} embedded asset entries", registry.len());
            AssetFs::Embedded(EmbeddedFs::new(registry))
        }
    }

    pub fn from_config(config: &AssetConfig, registry: Arc<Registry>) -> Self {
        AssetFs::new(config.use_local_disk, registry, config.local_root.clone())
    }

    /// Re-root this filesystem under `prefix`
    pub fn dir(self, prefix: &str) -> DirFs<AssetFs> {
        DirFs::new(self, prefix)
    }

    pub fn is_local(&self) -> bool {
        matches!(self, AssetFs::Local(_))
    }
}

impl FileSystem for AssetFs {
    fn open(&self, path: &str) -> Result<AssetFile> {
        match self {
            AssetFs::Embedded(fs) => fs.open(path),
            AssetFs::Local(fs) => fs.open(path),
        }
    }

    fn read_bytes(&self, path: &str) -> Result<Bytes> {
        match self {
            AssetFs::Embedded(fs) => fs.read_bytes(path),
            AssetFs::Local(fs) => fs.read_bytes(path),
        }
    }
}
