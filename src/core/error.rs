use thiserror::Error;

/// Failure to turn an embedded payload back into the original bytes.
///
/// Cloneable because a failed decode is cached on the asset and handed to
/// every later caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("malformed base64 payload: {0}")]
    Encoding(String),

    #[error("corrupt gzip stream: {0}")]
    Decompress(String),

    #[error("unexpected end of compressed stream")]
    UnexpectedEof,
}

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Failed to decode embedded asset {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: DecodeError,
    },

    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Asset is not valid UTF-8: {0}")]
    InvalidUtf8(String),
}

impl AssetError {
    /// Map a disk error for `path`, folding a missing file into `NotFound`.
    ///
    /// A path that runs through a regular file (`index.html/extra.js`) is
    /// missing too.
    pub fn from_io(path: impl Into<String>, err: std::io::Error) -> Self {
        let path = path.into();
        match err.kind() {
            std::io::ErrorKind::NotFound | std::io::ErrorKind::NotADirectory => {
                AssetError::NotFound(path)
            }
            _ => AssetError::Io { path, source: err },
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, AssetError::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, AssetError>;
