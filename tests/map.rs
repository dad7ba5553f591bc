// ── Tests ─────────────────────────────────────────────────────────────────────

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use flate2::Compression;
use flate2::write::{GzEncoder, ZlibEncoder};
use glam::IVec2;
use tilegrid::camera::Camera;
use tilegrid::grid::PackedColor;
use tilegrid::map::{MapError, load_layer};

// ── helpers ───────────────────────────────────────────────────────────────────

/// Write a fixture map file into the system temp dir and return its path.
fn write_fixture(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("tilegrid_map_{name}.tmx"));
    fs::write(&path, contents).unwrap();
    path
}

fn map_xml(layers: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<map version="1.10" orientation="orthogonal" width="3" height="2" tilewidth="16" tileheight="24">
{layers}
</map>"#
    )
}

/// File-side tile values as a little-endian byte stream.
fn le_bytes(values: &[i32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

// ── csv ───────────────────────────────────────────────────────────────────────

#[test]
fn loads_a_csv_layer() {
    let path = write_fixture(
        "csv",
        &map_xml(
            r#" <layer id="1" name="floor" width="3" height="2">
  <data encoding="csv">
3,4,5,
6,7,8
  </data>
 </layer>"#,
        ),
    );
    let grid = load_layer(path.to_str().unwrap(), "floor").unwrap();

    assert_eq!(grid.width(), 3);
    assert_eq!(grid.height(), 2);
    // File ids are 1-based: stored row-major as [[2,3,4],[5,6,7]].
    for (i, expected) in [2, 3, 4, 5, 6, 7].into_iter().enumerate() {
        assert_eq!(grid.tiles()[i], expected, "cell {i}");
    }
    assert!(grid.colors().iter().all(|&c| c == PackedColor::WHITE));
}

#[test]
fn picks_the_named_layer_among_several() {
    let path = write_fixture(
        "multi",
        &map_xml(
            r#" <layer id="1" name="floor" width="3" height="2">
  <data encoding="csv">1,1,1,1,1,1</data>
 </layer>
 <layer id="2" name="walls" width="3" height="2">
  <data encoding="csv">9,9,9,9,9,9</data>
 </layer>"#,
        ),
    );
    let grid = load_layer(path.to_str().unwrap(), "walls").unwrap();
    assert!(grid.tiles().iter().all(|&t| t == 8));
}

// ── base64 ────────────────────────────────────────────────────────────────────

#[test]
fn loads_an_uncompressed_base64_layer() {
    let payload = BASE64.encode(le_bytes(&[1, 2, 3, 4, 5, 6]));
    let path = write_fixture(
        "b64",
        &map_xml(&format!(
            r#" <layer id="1" name="floor" width="3" height="2">
  <data encoding="base64">{payload}</data>
 </layer>"#
        )),
    );
    let grid = load_layer(path.to_str().unwrap(), "floor").unwrap();
    assert_eq!(grid.tiles(), &[0, 1, 2, 3, 4, 5]);
}

#[test]
fn loads_a_gzip_compressed_layer() {
    let mut enc = GzEncoder::new(Vec::new(), Compression::default());
    enc.write_all(&le_bytes(&[10, 20, 30, 40, 50, 60])).unwrap();
    let payload = BASE64.encode(enc.finish().unwrap());

    let path = write_fixture(
        "gzip",
        &map_xml(&format!(
            r#" <layer id="1" name="floor" width="3" height="2">
  <data encoding="base64" compression="gzip">{payload}</data>
 </layer>"#
        )),
    );
    let grid = load_layer(path.to_str().unwrap(), "floor").unwrap();
    assert_eq!(grid.tiles(), &[9, 19, 29, 39, 49, 59]);
}

#[test]
fn loads_a_zlib_compressed_layer() {
    let mut enc = ZlibEncoder::new(Vec::new(), Compression::default());
    enc.write_all(&le_bytes(&[7, 8, 9, 10, 11, 12])).unwrap();
    let payload = BASE64.encode(enc.finish().unwrap());

    let path = write_fixture(
        "zlib",
        &map_xml(&format!(
            r#" <layer id="1" name="floor" width="3" height="2">
  <data encoding="base64" compression="zlib">{payload}</data>
 </layer>"#
        )),
    );
    let grid = load_layer(path.to_str().unwrap(), "floor").unwrap();
    assert_eq!(grid.tiles(), &[6, 7, 8, 9, 10, 11]);
}

// ── error paths ───────────────────────────────────────────────────────────────

#[test]
fn empty_path_or_layer_name_is_invalid() {
    assert!(matches!(load_layer("", "floor"), Err(MapError::InvalidArgument)));
    assert!(matches!(load_layer("some.tmx", ""), Err(MapError::InvalidArgument)));
}

#[test]
fn missing_file_is_reported() {
    let path = std::env::temp_dir().join("tilegrid_map_definitely_absent.tmx");
    let result = load_layer(path.to_str().unwrap(), "floor");
    assert!(matches!(result, Err(MapError::FileNotFound(_))));
}

#[test]
fn unknown_layer_is_reported() {
    let path = write_fixture(
        "nolayer",
        &map_xml(
            r#" <layer id="1" name="floor" width="1" height="1">
  <data encoding="csv">1</data>
 </layer>"#,
        ),
    );
    let result = load_layer(path.to_str().unwrap(), "ceiling");
    assert!(matches!(result, Err(MapError::LayerNotFound(name)) if name == "ceiling"));
}

#[test]
fn unknown_encoding_is_reported() {
    let path = write_fixture(
        "badenc",
        &map_xml(
            r#" <layer id="1" name="floor" width="1" height="1">
  <data encoding="hex">FF</data>
 </layer>"#,
        ),
    );
    let result = load_layer(path.to_str().unwrap(), "floor");
    assert!(matches!(result, Err(MapError::UnsupportedFormat(_))));
}

#[test]
fn malformed_dimensions_yield_an_empty_grid_not_an_error() {
    let path = write_fixture(
        "baddims",
        &map_xml(
            r#" <layer id="1" name="floor" width="broad" height="tall">
  <data encoding="csv">1,2,3</data>
 </layer>"#,
        ),
    );
    let grid = load_layer(path.to_str().unwrap(), "floor").unwrap();
    assert_eq!(grid.width(), 0);
    assert_eq!(grid.height(), 0);
    assert!(grid.tiles().is_empty());
}

// ── downstream consumption ────────────────────────────────────────────────────

#[test]
fn decoded_grid_feeds_a_camera_snapshot() {
    let path = write_fixture(
        "camera",
        &map_xml(
            r#" <layer id="1" name="floor" width="3" height="2">
  <data encoding="csv">1,2,3,4,5,6</data>
 </layer>"#,
        ),
    );
    let grid = load_layer(path.to_str().unwrap(), "floor").unwrap();

    // A 2×2 window over the bottom-right corner, one row hanging below.
    let snap = Camera::new(IVec2::new(1, 1), IVec2::new(2, 2)).snapshot(&grid);
    assert_eq!(snap.get_tile(IVec2::new(0, 0)), 4);
    assert_eq!(snap.get_tile(IVec2::new(1, 0)), 5);
    assert_eq!(snap.get_tile(IVec2::new(0, 1)), 0);
    assert_eq!(snap.get_color(IVec2::new(0, 0)), PackedColor::WHITE);
    assert_eq!(snap.get_color(IVec2::new(0, 1)), PackedColor::BLACK);
}
