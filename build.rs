//! Packs everything under `assets/` into a generated asset table.
//!
//! Each file is gzipped, base64-encoded and written as a row of `BUNDLED`
//! together with its size and modification time. Every directory on the way
//! (including `/`) gets a synthetic directory row so that lookups of
//! directory paths resolve.

use base64::prelude::{Engine as _, BASE64_STANDARD};
use flate2::{write::GzEncoder, Compression};
use std::collections::BTreeMap;
use std::env;
use std::fmt::Write as _;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;
use walkdir::WalkDir;

const ASSET_DIR: &str = "assets";

struct Row {
    local_path: String,
    size: u64,
    mod_time: u64,
    payload: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let out_dir = PathBuf::from(env::var("OUT_DIR")?);
    let asset_root = manifest_dir.join(ASSET_DIR);

    println!("cargo:rerun-if-changed={}", ASSET_DIR);

    let mut rows: BTreeMap<String, Row> = BTreeMap::new();
    rows.insert(
        "/".to_string(),
        Row {
            local_path: ".".to_string(),
            size: 0,
            mod_time: 0,
            payload: None,
        },
    );

    if asset_root.is_dir() {
        for entry in WalkDir::new(&asset_root).sort_by_file_name() {
            let entry = entry?;
            let relative = relative_path(&manifest_dir, entry.path())?;
            let logical = format!("/{}", relative);
            let metadata = entry.metadata()?;
            let mod_time = metadata
                .modified()
                .ok()
                .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
                .map(|d| d.as_secs())
                .unwrap_or(0);

            let row = if metadata.is_dir() {
                Row {
                    local_path: relative,
                    size: 0,
                    mod_time,
                    payload: None,
                }
            } else {
                let data = fs::read(entry.path())?;
                Row {
                    local_path: relative,
                    size: data.len() as u64,
                    mod_time,
                    payload: Some(encode(&data)?),
                }
            };
            rows.insert(logical, row);
        }
    }

    let mut generated = String::new();
    writeln!(generated, "pub static BUNDLED: &[BundledAsset] = &[")?;
    for (logical, row) in &rows {
        writeln!(
            generated,
            "    BundledAsset {{ logical_path: {:?}, local_path: {:?}, payload: {:?}, size: {}, mod_time: {}, is_dir: {} }},",
            logical,
            row.local_path,
            row.payload.as_deref().unwrap_or(""),
            row.size,
            row.mod_time,
            row.payload.is_none(),
        )?;
    }
    writeln!(generated, "];")?;

    fs::write(out_dir.join("bundled_assets.rs"), generated)?;
    Ok(())
}

/// Path of `path` relative to the crate root, always with `/` separators.
fn relative_path(root: &Path, path: &Path) -> Result<String, Box<dyn std::error::Error>> {
    let relative = path.strip_prefix(root)?;
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Ok(parts.join("/"))
}

fn encode(data: &[u8]) -> std::io::Result<String> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(data)?;
    let compressed = encoder.finish()?;
    Ok(BASE64_STANDARD.encode(compressed))
}
