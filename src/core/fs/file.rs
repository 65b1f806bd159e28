//! Open file handles
//!
//! Every handle is fully memory-resident: embedded assets hand out their
//! cached decode buffer, local files are read in one go at open time.

use bytes::Bytes;
use std::io::{self, Cursor, Read, Seek, SeekFrom};
use std::time::SystemTime;

/// Stat information for an opened asset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    /// Base name (e.g., "style.min.css"), `/` for the root
    pub name: String,

    /// Size in bytes, 0 for directories
    pub size: u64,

    /// Last modification time
    pub mod_time: SystemTime,

    /// True for directories
    pub is_dir: bool,
}

/// A readable, seekable handle over an asset's full contents
#[derive(Debug)]
pub struct AssetFile {
    info: FileInfo,
    content: Cursor<Bytes>,
}

impl AssetFile {
    pub(crate) fn new(info: FileInfo, content: Bytes) -> Self {
        AssetFile {
            info,
            content: Cursor::new(content),
        }
    }

    pub(crate) fn directory(info: FileInfo) -> Self {
        AssetFile::new(info, Bytes::new())
    }

    pub fn stat(&self) -> &FileInfo {
        &self.info
    }

    pub fn is_dir(&self) -> bool {
        self.info.is_dir
    }

    /// Directory entries. Listings are not tracked, so this is always empty.
    pub fn read_dir(&self) -> Vec<FileInfo> {
        Vec::new()
    }

    /// The whole content, independent of the read position
    pub fn bytes(&self) -> &Bytes {
        self.content.get_ref()
    }

    pub fn into_bytes(self) -> Bytes {
        self.content.into_inner()
    }

    /// Nothing to release; provided for parity with real file handles.
    pub fn close(self) -> io::Result<()> {
        Ok(())
    }
}

impl Read for AssetFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.content.read(buf)
    }
}

impl Seek for AssetFile {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.content.seek(pos)
    }
}
