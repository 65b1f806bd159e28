use super::file::AssetFile;
use super::FileSystem;
use crate::core::error::Result;
use crate::core::path;
use bytes::Bytes;

/// Mounts the subtree of `base` found under `prefix` at `/`.
///
/// `open("/script/a.js")` on a proxy with prefix `/assets` is
/// `base.open("/assets/script/a.js")`. The proxy holds no state of its own
/// beyond the prefix. `name` is not cleaned on its own, so `..` in it can
/// reach outside the prefix exactly as it would in the base; callers taking
/// untrusted names normalize them first.
#[derive(Debug, Clone)]
pub struct DirFs<F> {
    base: F,
    prefix: String,
}

impl<F: FileSystem> DirFs<F> {
    pub fn new(base: F, prefix: &str) -> Self {
        DirFs {
            base,
            prefix: path::normalize(prefix),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn base(&self) -> &F {
        &self.base
    }

    /// Logical path in `base` that `name` maps to
    pub fn resolve(&self, name: &str) -> String {
        path::join(&self.prefix, name)
    }
}

impl<F: FileSystem> FileSystem for DirFs<F> {
    fn open(&self, name: &str) -> Result<AssetFile> {
        self.base.open(&self.resolve(name))
    }

    fn read_bytes(&self, name: &str) -> Result<Bytes> {
        self.base.read_bytes(&self.resolve(name))
    }
}
