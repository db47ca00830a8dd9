use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use yep_asset_pack::pack_io::compiling::AssetPackCompiler;

/// Materializes `files` (relative name, contents) under `root`, creating
/// intermediate directories as needed.
pub fn write_tree(root: &Path, files: &[(&str, &[u8])]) {
    for (name, contents) in files {
        let path = root.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }
}

/// Packs `files` into a fresh archive and returns the tempdir keeping it
/// alive along with the archive path.
pub fn pack_fixture(files: &[(&str, &[u8])]) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();

    let assets = dir.path().join("assets");
    fs::create_dir(&assets).unwrap();
    write_tree(&assets, files);

    let pack = dir.path().join("fixture.yep");
    AssetPackCompiler::new().compile(&assets, &pack).unwrap();

    (dir, pack)
}
