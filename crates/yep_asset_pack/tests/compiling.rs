use std::fs;
use tracing_test::traced_test;
use yep_asset_pack::pack_io::compiling::{AssetPackCompiler, CompileError};
use yep_asset_pack::pack_io::format::CompressionKind;
use yep_asset_pack::pack_io::reading::AssetPackReader;

mod common;

use common::{pack_fixture, write_tree};

#[test]
fn packed_entries_round_trip() {
    let (_dir, pack) = pack_fixture(&[
        ("a.txt", b"0123456789".as_slice()),
        ("sub/b.bin", &[0u8; 500]),
    ]);

    let mut reader = AssetPackReader::new_from_path(&pack).unwrap();
    assert_eq!(reader.entry_count(), 2);

    // 10 bytes sits below the compression threshold, 500 above it.
    assert_eq!(
        reader.header("a.txt").unwrap().compression,
        CompressionKind::None
    );
    assert_eq!(
        reader.header("sub/b.bin").unwrap().compression,
        CompressionKind::Deflate
    );

    assert_eq!(reader.extract("a.txt").unwrap(), b"0123456789");
    assert_eq!(reader.extract("sub/b.bin").unwrap(), vec![0u8; 500]);
}

#[test]
fn compressed_entries_survive_poorly_compressible_data() {
    // A pseudo-random payload stays above the threshold but barely
    // shrinks; the round trip must still be exact.
    let noise: Vec<u8> = (0u32..4096)
        .map(|i| (i.wrapping_mul(2654435761) >> 24) as u8)
        .collect();

    let (_dir, pack) = pack_fixture(&[("noise.bin", noise.as_slice())]);

    let mut reader = AssetPackReader::new_from_path(&pack).unwrap();
    assert_eq!(reader.extract("noise.bin").unwrap(), noise);
}

#[test]
fn threshold_tunes_compression_eligibility() {
    let dir = tempfile::tempdir().unwrap();
    let assets = dir.path().join("assets");
    fs::create_dir(&assets).unwrap();
    write_tree(&assets, &[("tiny.txt", b"ab"), ("small.txt", b"abcdef")]);

    let pack = dir.path().join("out.yep");
    AssetPackCompiler::new()
        .compression_threshold(4)
        .compile(&assets, &pack)
        .unwrap();

    let mut reader = AssetPackReader::new_from_path(&pack).unwrap();
    assert_eq!(
        reader.header("tiny.txt").unwrap().compression,
        CompressionKind::None
    );
    assert_eq!(
        reader.header("small.txt").unwrap().compression,
        CompressionKind::Deflate
    );

    assert_eq!(reader.extract("tiny.txt").unwrap(), b"ab");
    assert_eq!(reader.extract("small.txt").unwrap(), b"abcdef");
}

#[test]
#[traced_test]
fn over_long_names_are_excluded_from_the_archive() {
    let long_name = format!("{}/{}.txt", "d".repeat(40), "f".repeat(40));
    let (_dir, pack) = pack_fixture(&[
        ("ok.txt", b"kept".as_slice()),
        (long_name.as_str(), b"dropped"),
    ]);

    let mut reader = AssetPackReader::new_from_path(&pack).unwrap();
    assert_eq!(reader.entry_count(), 1);
    assert!(reader.has_entry("ok.txt"));
    assert!(!reader.has_entry(&long_name));
    assert_eq!(reader.extract("ok.txt").unwrap(), b"kept");

    assert!(logs_contain("does not fit"));
}

#[test]
fn an_empty_tree_packs_to_an_empty_archive() {
    let (_dir, pack) = pack_fixture(&[]);

    let mut reader = AssetPackReader::new_from_path(&pack).unwrap();
    assert_eq!(reader.entry_count(), 0);
    assert!(reader.extract("anything").is_err());
}

#[test]
fn a_failed_pack_leaves_no_output_behind() {
    let dir = tempfile::tempdir().unwrap();
    let missing_assets = dir.path().join("not_there");
    let pack = dir.path().join("never.yep");

    let err = AssetPackCompiler::new()
        .compile(&missing_assets, &pack)
        .unwrap_err();

    assert!(matches!(err, CompileError::NotADirectory(_)));
    assert!(!pack.exists());
}

#[test]
fn repacking_replaces_an_existing_archive() {
    let dir = tempfile::tempdir().unwrap();
    let assets = dir.path().join("assets");
    fs::create_dir(&assets).unwrap();
    let pack = dir.path().join("out.yep");

    write_tree(&assets, &[("v.txt", b"first")]);
    AssetPackCompiler::new().compile(&assets, &pack).unwrap();

    fs::write(assets.join("v.txt"), b"second").unwrap();
    AssetPackCompiler::new().compile(&assets, &pack).unwrap();

    let mut reader = AssetPackReader::new_from_path(&pack).unwrap();
    assert_eq!(reader.extract("v.txt").unwrap(), b"second");
}
