//! Embedded filesystem behaviour against the bundled table and fixtures

use std::io::Read;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use uptimey::core::codec::encode;
use uptimey::{
    Asset, AssetError, AssetFs, DecodeError, DecodeState, Decoder, EmbeddedFs, FileSystem,
    GzipBase64, Registry,
};

struct CountingDecoder(Arc<AtomicUsize>);

impl Decoder for CountingDecoder {
    fn decode(&self, payload: &str) -> Result<Vec<u8>, DecodeError> {
        self.0.fetch_add(1, Ordering::SeqCst);
        GzipBase64.decode(payload)
    }
}

fn counted_bundled() -> (EmbeddedFs, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let registry = Registry::bundled().with_decoder(CountingDecoder(calls.clone()));
    (EmbeddedFs::new(Arc::new(registry)), calls)
}

#[test]
fn test_every_bundled_file_round_trips() {
    let registry = Arc::new(Registry::bundled());
    let fs = EmbeddedFs::new(registry.clone());
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));

    let files: Vec<&Asset> = registry.iter().filter(|a| !a.is_dir()).collect();
    assert!(files.len() >= 5);

    for asset in files {
        let mut file = fs.open(asset.logical_path()).unwrap();
        let mut content = Vec::new();
        file.read_to_end(&mut content).unwrap();

        assert_eq!(content.len() as u64, asset.size(), "{}", asset.logical_path());
        assert_eq!(file.stat().size, asset.size());

        let on_disk = std::fs::read(manifest_dir.join(asset.local_path())).unwrap();
        assert_eq!(content, on_disk, "{}", asset.logical_path());

        let reencoded = encode(&content).unwrap();
        assert_eq!(GzipBase64.decode(&reencoded).unwrap(), content);
        assert_eq!(GzipBase64.decode(asset.payload()).unwrap(), content);
    }
}

#[test]
fn test_missing_path_is_not_found() {
    let fs = AssetFs::new(false, Arc::new(Registry::bundled()), ".");

    for path in ["/assets/missing.js", "/nope", "/assets/css/style.min.css/extra"] {
        let err = fs.open(path).unwrap_err();
        assert!(err.is_not_found(), "{}: {}", path, err);
        assert!(fs.read_bytes(path).unwrap_err().is_not_found());
    }
}

#[test]
fn test_equivalent_paths_share_content() {
    let fs = AssetFs::new(false, Arc::new(Registry::bundled()), ".");

    let canonical = fs.read_bytes("/assets/css/style.min.css").unwrap();
    for alias in [
        "/assets/css/../css/style.min.css",
        "assets/css/style.min.css",
        "//assets/./css//style.min.css",
        "/../assets/css/style.min.css",
    ] {
        assert_eq!(fs.read_bytes(alias).unwrap(), canonical, "{}", alias);
    }
}

#[test]
fn test_second_read_uses_cache() {
    let (fs, calls) = counted_bundled();

    let first = fs.read_bytes("/assets/script/functions.js").unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let second = fs.read_bytes("/assets/script/functions.js").unwrap();
    assert_eq!(first, second);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // Opening goes through the same cache
    let opened = fs.open("/assets/script/functions.js").unwrap();
    assert_eq!((&opened).bytes(), &first);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_each_asset_decodes_independently() {
    let (fs, calls) = counted_bundled();

    fs.read_bytes("/assets/script/base.js").unwrap();
    fs.read_bytes("/assets/script/require.config.js").unwrap();
    fs.read_bytes("/assets/script/base.js").unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(
        fs.registry().get("/assets/index.html").unwrap().state(),
        DecodeState::Unresolved
    );
}

#[test]
fn test_directory_markers_open_as_empty_directories() {
    let (fs, calls) = counted_bundled();

    for path in ["/", "/assets", "/assets/css", "/assets/script/"] {
        let mut dir = fs.open(path).unwrap();
        let info = dir.stat().clone();
        assert!(info.is_dir, "{}", path);
        assert_eq!(info.size, 0);
        assert!(dir.read_dir().is_empty());

        let mut content = Vec::new();
        assert_eq!(dir.read_to_end(&mut content).unwrap(), 0);
        dir.close().unwrap();
    }

    assert_eq!(fs.open("/").unwrap().stat().name, "/");
    assert_eq!(fs.open("/assets/css").unwrap().stat().name, "css");
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_corrupt_payload_fails_permanently() {
    let calls = Arc::new(AtomicUsize::new(0));
    let good = b"body { color: #fff; }";
    let registry = Registry::from_entries([
        Asset::file("/assets/broken.css", "assets/broken.css", "not*base64", 128, 0),
        Asset::file(
            "/assets/good.css",
            "assets/good.css",
            encode(good).unwrap(),
            good.len() as u64,
            0,
        ),
    ])
    .with_decoder(CountingDecoder(calls.clone()));
    let fs = EmbeddedFs::new(Arc::new(registry));

    for _ in 0..3 {
        match fs.open("/assets/broken.css") {
            Err(AssetError::Decode { path, source }) => {
                assert_eq!(path, "/assets/broken.css");
                assert!(matches!(source, DecodeError::Encoding(_)));
            }
            other => panic!("expected decode error, got {:?}", other.map(|f| f.stat().clone())),
        }
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(
        fs.registry().get("/assets/broken.css").unwrap().state(),
        DecodeState::Failed
    );

    // A poisoned asset does not affect its neighbours
    assert_eq!(&fs.read_bytes("/assets/good.css").unwrap()[..], good);
}

#[test]
fn test_read_string_on_bundled_markup() {
    let fs = AssetFs::new(false, Arc::new(Registry::bundled()), ".");
    let index = fs.read_string("/assets/index.html").unwrap();
    assert!(index.contains("<!DOCTYPE html>"));
    assert!(index.contains("/assets/css/style.min.css"));
}

#[test]
fn test_handles_are_independent() {
    let fs = AssetFs::new(false, Arc::new(Registry::bundled()), ".");

    let mut a = fs.open("/assets/script/base.js").unwrap();
    let mut b = fs.open("/assets/script/base.js").unwrap();

    let mut first = [0u8; 16];
    a.read_exact(&mut first).unwrap();

    let mut whole = Vec::new();
    b.read_to_end(&mut whole).unwrap();

    assert_eq!(&whole[..16], &first);
}
