use std::fs;
use std::io::Read;
use std::path::Path;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use flate2::read::{GzDecoder, ZlibDecoder};
use glam::IVec2;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::grid::{PackedColor, TileGrid};

// ── Errors ───────────────────────────────────────────────────────────────────

/// Errors that abort layer decoding.
///
/// Any of these means construction failed outright: a partially populated
/// grid is never returned.  Recoverable irregularities (missing dimensions,
/// malformed csv tokens, indices past the end of the layer) are absorbed
/// during decoding instead and never surface here.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("map path and layer name must be non-empty")]
    InvalidArgument,
    #[error("map file not found: {0}")]
    FileNotFound(String),
    #[error("no layer named '{0}' in map file")]
    LayerNotFound(String),
    #[error("unsupported layer data format: {0}")]
    UnsupportedFormat(String),
    #[error("malformed map xml: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("malformed base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ── Layer description ────────────────────────────────────────────────────────

/// One `<layer>` element pulled out of a map file.
///
/// Transient: consumed once by [`decode_layer`] to populate a grid, then
/// discarded.  Missing or non-numeric `width`/`height` attributes default
/// to `0`, which yields an empty grid rather than an error.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LayerDesc {
    pub width: i32,
    pub height: i32,
    /// Payload encoding; absent means csv.
    pub encoding: Option<String>,
    /// Only meaningful for base64 payloads.
    pub compression: Option<String>,
    /// Raw inner text of the `<data>` element.
    pub data: String,
}

/// Decompression applied to a base64 payload after decoding.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Compression {
    None,
    Gzip,
    Zlib,
}

// ── Loading ──────────────────────────────────────────────────────────────────

/// Decode the named layer of the map file at `path` into a fresh grid.
///
/// The file is scanned for `<layer>` elements; the first one whose `name`
/// attribute equals `layer_name` wins and later layers with the same name
/// are never inspected.
pub fn load_layer(path: &str, layer_name: &str) -> Result<TileGrid, MapError> {
    if path.is_empty() || layer_name.is_empty() {
        return Err(MapError::InvalidArgument);
    }
    if !Path::new(path).is_file() {
        return Err(MapError::FileNotFound(path.to_string()));
    }
    let xml = fs::read_to_string(path)?;
    let desc = scan_for_layer(&xml, layer_name)?
        .ok_or_else(|| MapError::LayerNotFound(layer_name.to_string()))?;
    decode_layer(&desc)
}

/// Walk the map XML and extract the first `<layer>` matching `target`,
/// including the attributes and inner text of its `<data>` child.
fn scan_for_layer(xml: &str, target: &str) -> Result<Option<LayerDesc>, MapError> {
    let mut reader = Reader::from_str(xml);
    let mut desc: Option<LayerDesc> = None;
    let mut in_data = false;

    loop {
        match reader.read_event()? {
            Event::Start(ref e) if desc.is_none() && e.name().as_ref() == b"layer" => {
                desc = matching_layer(e, target);
            }
            Event::Empty(ref e) if desc.is_none() && e.name().as_ref() == b"layer" => {
                // Self-closing layer: no payload, but still the first match.
                if let Some(d) = matching_layer(e, target) {
                    return Ok(Some(d));
                }
            }
            Event::Start(ref e) if e.name().as_ref() == b"data" => {
                if let Some(d) = desc.as_mut() {
                    for attr in e.attributes().flatten() {
                        let value = String::from_utf8_lossy(attr.value.as_ref()).into_owned();
                        match attr.key.as_ref() {
                            b"encoding" => d.encoding = Some(value),
                            b"compression" => d.compression = Some(value),
                            _ => {}
                        }
                    }
                    in_data = true;
                }
            }
            Event::Text(t) => {
                if in_data {
                    if let Some(d) = desc.as_mut() {
                        d.data.push_str(&String::from_utf8_lossy(&t.into_inner()));
                    }
                }
            }
            Event::CData(t) => {
                if in_data {
                    if let Some(d) = desc.as_mut() {
                        d.data.push_str(&String::from_utf8_lossy(&t.into_inner()));
                    }
                }
            }
            Event::End(ref e) if e.name().as_ref() == b"data" => {
                in_data = false;
            }
            Event::End(ref e) if e.name().as_ref() == b"layer" => {
                if desc.is_some() {
                    return Ok(desc);
                }
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
    }
}

/// Read a `<layer>` element's attributes; `Some` only when its name matches.
/// Non-numeric dimension attributes silently parse to `0`.
fn matching_layer(e: &BytesStart, target: &str) -> Option<LayerDesc> {
    let mut name = String::new();
    let mut desc = LayerDesc::default();
    for attr in e.attributes().flatten() {
        let value = String::from_utf8_lossy(attr.value.as_ref()).into_owned();
        match attr.key.as_ref() {
            b"name" => name = value,
            b"width" => desc.width = value.trim().parse().unwrap_or(0),
            b"height" => desc.height = value.trim().parse().unwrap_or(0),
            _ => {}
        }
    }
    (name == target).then_some(desc)
}

// ── Decoding ─────────────────────────────────────────────────────────────────

/// Decode a layer description into a grid.
///
/// Supported payload formats: `csv` (also the default when no encoding is
/// given), `base64`, `base64`+`gzip` and `base64`+`zlib`; anything else is
/// [`MapError::UnsupportedFormat`].  File tile ids are 1-based, so every
/// decoded value is shifted down by one and the file's `0` ("no tile")
/// becomes `-1`.  After decoding, every color cell is the fully untinted
/// [`PackedColor::WHITE`] regardless of tile values.
pub fn decode_layer(desc: &LayerDesc) -> Result<TileGrid, MapError> {
    let mut grid = TileGrid::new(desc.width, desc.height);
    grid.fill(0, PackedColor::WHITE);

    let values = match desc.encoding.as_deref() {
        None | Some("csv") => {
            if let Some(c) = desc.compression.as_deref() {
                return Err(MapError::UnsupportedFormat(format!("csv+{c}")));
            }
            decode_csv(&desc.data)
        }
        Some("base64") => {
            let compression = match desc.compression.as_deref() {
                None => Compression::None,
                Some("gzip") => Compression::Gzip,
                Some("zlib") => Compression::Zlib,
                Some(other) => {
                    return Err(MapError::UnsupportedFormat(format!("base64+{other}")));
                }
            };
            let raw = BASE64.decode(desc.data.trim())?;
            let raw = match compression {
                Compression::None => raw,
                Compression::Gzip => decompress(GzDecoder::new(raw.as_slice()))?,
                Compression::Zlib => decompress(ZlibDecoder::new(raw.as_slice()))?,
            };
            decode_le_i32(&raw)
        }
        Some(other) => return Err(MapError::UnsupportedFormat(other.to_string())),
    };

    place_row_major(&mut grid, &values);
    Ok(grid)
}

/// Drain a decompression stream into a byte buffer.
fn decompress(mut stream: impl Read) -> Result<Vec<u8>, MapError> {
    let mut out = Vec::new();
    stream.read_to_end(&mut out)?;
    Ok(out)
}

/// Split on commas, trim, parse, shift down by one.  Malformed tokens are
/// absorbed as the file sentinel `0` with a warning rather than aborting
/// the decode.
fn decode_csv(payload: &str) -> Vec<i32> {
    payload
        .split(',')
        .map(|token| {
            let token = token.trim();
            let id = token.parse::<i32>().unwrap_or_else(|_| {
                log::warn!("map: malformed csv tile id {token:?}, using 0");
                0
            });
            id - 1
        })
        .collect()
}

/// Reinterpret every 4 consecutive bytes as a little-endian signed 32-bit
/// integer, shifted down by one.  A trailing partial chunk is ignored.
fn decode_le_i32(raw: &[u8]) -> Vec<i32> {
    raw.chunks_exact(4)
        .map(|b| i32::from_le_bytes([b[0], b[1], b[2], b[3]]) - 1)
        .collect()
}

/// Place decoded values row-major (`index = y * width + x`, x fastest).
/// Linear indices past the end of the layer clamp to the last valid cell
/// instead of failing.
fn place_row_major(grid: &mut TileGrid, values: &[i32]) {
    let w = grid.width();
    let h = grid.height();
    if w <= 0 || h <= 0 {
        return;
    }
    let cells = w as usize * h as usize;
    for (i, &id) in values.iter().enumerate() {
        let idx = if i < cells {
            i
        } else {
            log::warn!("map: tile index {i} outside {w}x{h} layer, clamping");
            cells - 1
        };
        let pos = IVec2::new(idx as i32 % w, idx as i32 / w);
        grid.set_tile(pos, id, PackedColor::WHITE);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
