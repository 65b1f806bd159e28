//! The asset registry
//!
//! Immutable table from normalized logical paths to [`Asset`] descriptors,
//! built once and shared behind an `Arc`. The registry also owns the
//! [`Decoder`] used to materialize its assets, so every filesystem built on
//! the same registry shares one decode cache per asset.

use crate::core::asset::{Asset, BundledAsset};
use crate::core::codec::{Decoder, GzipBase64};
use crate::core::error::{AssetError, Result};
use crate::core::path;
use bytes::Bytes;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, warn};

mod bundled {
    use super::BundledAsset;

    include!(concat!(env!("OUT_DIR"), "/bundled_assets.rs"));
}

pub struct Registry {
    assets: HashMap<String, Asset>,
    decoder: Box<dyn Decoder>,
}

impl Registry {
    /// Registry over the assets compiled into this binary
    pub fn bundled() -> Self {
        let registry = Registry::from_entries(bundled::BUNDLED.iter().map(Asset::from));
        debug!("Loaded {} bundled asset entries", registry.len());
        registry
    }

    /// Registry over an explicit set of descriptors, decoded with
    /// [`GzipBase64`]. Later entries replace earlier ones with the same path.
    pub fn from_entries(entries: impl IntoIterator<Item = Asset>) -> Self {
        let mut assets = HashMap::new();
        for asset in entries {
            let key = asset.logical_path().to_string();
            if assets.insert(key, asset).is_some() {
                warn!("Duplicate asset entry replaced");
            }
        }

        Registry {
            assets,
            decoder: Box::new(GzipBase64),
        }
    }

    /// Swap the decoder. Only meaningful before any asset has been
    /// materialized, which consuming `self` enforces.
    pub fn with_decoder(mut self, decoder: impl Decoder + 'static) -> Self {
        self.decoder = Box::new(decoder);
        self
    }

    /// Look up `path` after normalizing it
    pub fn get(&self, path: &str) -> Option<&Asset> {
        self.assets.get(&path::normalize(path))
    }

    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    pub fn decoder(&self) -> &dyn Decoder {
        self.decoder.as_ref()
    }

    /// Like [`get`](Registry::get), but a miss is a `NotFound` error
    pub fn resolve(&self, path: &str) -> Result<&Asset> {
        self.get(path)
            .ok_or_else(|| AssetError::NotFound(path::normalize(path)))
    }

    /// Decoded bytes of the asset at `path`.
    ///
    /// Directory markers yield an empty buffer.
    pub fn materialize(&self, path: &str) -> Result<Bytes> {
        let asset = self.resolve(path)?;
        self.decode(asset)
    }

    pub(crate) fn decode(&self, asset: &Asset) -> Result<Bytes> {
        asset
            .materialize(self.decoder())
            .map_err(|source| AssetError::Decode {
                path: asset.logical_path().to_string(),
                source,
            })
    }

    /// All registered logical paths, sorted
    pub fn paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.assets.keys().map(String::as_str).collect();
        paths.sort_unstable();
        paths
    }

    pub fn iter(&self) -> impl Iterator<Item = &Asset> {
        self.assets.values()
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Registry::bundled()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("paths", &self.paths())
            .finish_non_exhaustive()
    }
}
