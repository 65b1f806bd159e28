//! Local (development) mode against real files

use std::io::{Read, Seek, SeekFrom};
use std::sync::Arc;
use tempfile::TempDir;
use uptimey::{AssetConfig, AssetError, AssetFs, FileSystem, LocalFs, Registry};

fn site() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    std::fs::create_dir_all(root.join("assets/css")).unwrap();
    std::fs::create_dir_all(root.join("assets/script")).unwrap();
    std::fs::write(root.join("assets/index.html"), "<html>dev</html>").unwrap();
    std::fs::write(root.join("assets/css/style.min.css"), "body{}").unwrap();
    std::fs::write(root.join("assets/script/base.js"), "var x = 1;").unwrap();
    std::fs::write(root.join("secret.txt"), "outside").unwrap();
    temp_dir
}

#[test]
fn test_local_reads_current_disk_content() {
    let temp_dir = site();
    let fs = AssetFs::new(true, Arc::new(Registry::bundled()), temp_dir.path());
    assert!(fs.is_local());

    assert_eq!(fs.read_string("/assets/index.html").unwrap(), "<html>dev</html>");

    // Local mode reads through to disk on every open
    std::fs::write(temp_dir.path().join("assets/index.html"), "<html>edited</html>").unwrap();
    assert_eq!(fs.read_string("/assets/index.html").unwrap(), "<html>edited</html>");
}

#[test]
fn test_local_missing_file_is_not_found() {
    let temp_dir = site();
    let fs = LocalFs::new(temp_dir.path());

    let err = fs.open("/assets/script/missing.js").unwrap_err();
    assert!(matches!(err, AssetError::NotFound(ref p) if p == "/assets/script/missing.js"));
}

#[test]
fn test_local_path_through_a_file_is_not_found() {
    let temp_dir = site();
    let local = AssetFs::new(true, Arc::new(Registry::bundled()), temp_dir.path());
    let embedded = AssetFs::new(false, Arc::new(Registry::bundled()), ".");

    let path = "/assets/index.html/extra.js";
    let err = local.open(path).unwrap_err();
    assert!(matches!(err, AssetError::NotFound(ref p) if p == path), "{}", err);
    assert!(local.read_bytes(path).unwrap_err().is_not_found());
    assert!(embedded.open(path).unwrap_err().is_not_found());
}

#[test]
fn test_local_directory_opens_as_directory() {
    let temp_dir = site();
    let fs = LocalFs::new(temp_dir.path());

    let dir = fs.open("/assets/css/").unwrap();
    assert!(dir.stat().is_dir);
    assert_eq!(dir.stat().size, 0);
    assert_eq!(dir.stat().name, "css");
    assert!(dir.read_dir().is_empty());
    assert!(fs.read_bytes("/assets/css").unwrap().is_empty());
}

#[test]
fn test_local_normalizes_paths() {
    let temp_dir = site();
    let fs = LocalFs::new(temp_dir.path());

    let canonical = fs.read_bytes("/assets/css/style.min.css").unwrap();
    assert_eq!(
        fs.read_bytes("/assets/script/../css/./style.min.css").unwrap(),
        canonical
    );
}

#[test]
fn test_local_dotdot_cannot_escape_root() {
    let temp_dir = site();
    let fs = LocalFs::new(temp_dir.path().join("assets"));

    // "/../secret.txt" clamps to "/secret.txt" inside the root, which does not exist
    assert!(fs.open("/../secret.txt").unwrap_err().is_not_found());
    assert!(fs.open("/css/../../secret.txt").unwrap_err().is_not_found());
}

#[test]
fn test_local_handle_supports_seek() {
    let temp_dir = site();
    let fs = LocalFs::new(temp_dir.path());

    let mut file = fs.open("/assets/script/base.js").unwrap();
    assert_eq!(file.stat().size, 10);
    file.seek(SeekFrom::Start(4)).unwrap();
    let mut rest = String::new();
    file.read_to_string(&mut rest).unwrap();
    assert_eq!(rest, "x = 1;");
}

#[cfg(unix)]
#[test]
fn test_local_permission_error_is_io() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = site();
    let locked = temp_dir.path().join("assets/locked.css");
    std::fs::write(&locked, "a{}").unwrap();
    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o000)).unwrap();

    // Root ignores permission bits; nothing to check in that case
    if std::fs::read(&locked).is_ok() {
        return;
    }

    let fs = LocalFs::new(temp_dir.path());
    let err = fs.open("/assets/locked.css").unwrap_err();
    assert!(matches!(err, AssetError::Io { .. }), "{}", err);
}

#[test]
fn test_local_and_embedded_agree_on_repository_assets() {
    let registry = Arc::new(Registry::bundled());
    let config = AssetConfig {
        use_local_disk: true,
        local_root: env!("CARGO_MANIFEST_DIR").into(),
        ..AssetConfig::default()
    };
    let local = AssetFs::from_config(&config, registry.clone());
    let embedded = AssetFs::new(false, registry.clone(), ".");

    for asset in registry.iter() {
        let path = asset.logical_path();
        assert_eq!(
            local.open(path).unwrap().is_dir(),
            embedded.open(path).unwrap().is_dir(),
            "{}",
            path
        );
        if !asset.is_dir() {
            assert_eq!(
                local.read_bytes(path).unwrap(),
                embedded.read_bytes(path).unwrap(),
                "{}",
                path
            );
        }
    }
}
