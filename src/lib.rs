//! # Uptimey - Host Uptime Dashboard
//!
//! `uptimey` serves a small dashboard showing how long the host has been up.
//! Its static assets (markup, stylesheets, scripts) are compiled into the
//! binary and exposed through an embedded virtual filesystem:
//!
//! - **Embedded assets** stored as base64-wrapped gzip, decoded lazily and
//!   at most once per asset, even under concurrent access
//! - **Local mode** reading the same logical paths from disk for development
//! - **Directory proxies** mounting a subtree under its own root
//! - **HTTP server** (feature `server`) serving the dashboard and the assets
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use uptimey::{AssetFs, FileSystem, Registry};
//!
//! # fn main() -> uptimey::Result<()> {
//! let registry = Arc::new(Registry::bundled());
//! let fs = AssetFs::new(false, registry, ".");
//!
//! // Decoded on first access, cached afterwards
//! let index = fs.read_string("/assets/index.html")?;
//!
//! // Mount /assets at the root
//! let assets = fs.dir("/assets");
//! let css = assets.open("/css/style.min.css")?;
//! println!("{} bytes, {}", css.stat().size, index.len());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod core;

#[cfg(feature = "server")]
pub mod dashboard;
#[cfg(feature = "server")]
pub mod error;
#[cfg(feature = "server")]
pub mod server;
#[cfg(feature = "server")]
pub mod static_files;

pub use crate::config::{AssetConfig, ConfigError, ServerConfig};
pub use crate::core::{
    asset::{Asset, DecodeState},
    codec::{Decoder, GzipBase64},
    error::{AssetError, DecodeError, Result},
    fs::{AssetFile, AssetFs, DirFs, EmbeddedFs, FileInfo, FileSystem, LocalFs},
    registry::Registry,
};

#[cfg(feature = "server")]
pub use crate::error::{ServerError, ServerResult};
