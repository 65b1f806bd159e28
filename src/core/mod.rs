//! Embedded asset filesystem
//!
//! Static assets are compiled in as base64-wrapped gzip blobs, listed in an
//! immutable [`registry::Registry`], decoded lazily and at most once per asset,
//! and exposed through the [`fs::FileSystem`] trait.

pub mod asset;
pub mod codec;
pub mod error;
pub mod fs;
pub mod path;
pub mod registry;

pub use asset::{Asset, DecodeState};
pub use registry::Registry;
