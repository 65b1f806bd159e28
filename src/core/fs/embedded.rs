use super::file::AssetFile;
use super::FileSystem;
use crate::core::error::Result;
use crate::core::registry::Registry;
use bytes::Bytes;
use std::sync::Arc;
use tracing::debug;

/// Filesystem over the compiled-in asset registry
#[derive(Debug, Clone)]
pub struct EmbeddedFs {
    registry: Arc<Registry>,
}

impl EmbeddedFs {
    pub fn new(registry: Arc<Registry>) -> Self {
        EmbeddedFs { registry }
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }
}

impl FileSystem for EmbeddedFs {
    fn open(&self, path: &str) -> Result<AssetFile> {
        let asset = self.registry.resolve(path)?;
        if asset.is_dir() {
            debug!("Opened embedded directory {}", asset.logical_path());
            return Ok(AssetFile::directory(asset.info()));
        }

        let content = self.registry.decode(asset)?;
        debug!("Opened embedded file {}", asset.logical_path());
        Ok(AssetFile::new(asset.info(), content))
    }

    fn read_bytes(&self, path: &str) -> Result<Bytes> {
        self.registry.materialize(path)
    }
}
