pub mod camera;
pub mod grid;
pub mod map;
pub mod text;

/// Tile ids for the non-alphanumeric glyphs of the atlas font rows,
/// embedded at compile time (char-keyed JSON, see `text::symbols`).
/// Letters and digits are not listed; they occupy fixed contiguous runs
/// and are computed directly.
pub const SYMBOL_MAP_JSON: &str = include_str!("../resources/symbol_map.json");
