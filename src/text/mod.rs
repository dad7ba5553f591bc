// ── Text drawing into tile grids ─────────────────────────────────────────────

pub mod symbols;
pub mod wrap;

pub use symbols::{SymbolTable, symbol_to_tile};
pub use wrap::{Alignment, layout};

use glam::IVec2;

use crate::grid::{PackedColor, TileGrid};

/// Write one already-laid-out line of text at grid row `origin.y + row`.
///
/// Mapped symbols are written through [`TileGrid::set_tile`] at
/// consecutive columns (space maps to tile `0` and still takes a column).
/// Unmapped symbols are skipped without consuming a column, so every
/// later character on the line shifts one column left per skipped
/// symbol; callers rely on that shift.
pub fn set_text_line(grid: &mut TileGrid, origin: IVec2, row: i32, text: &str, color: PackedColor) {
    let mut col = 0;
    for ch in text.chars() {
        if let Some(id) = symbols::symbol_to_tile(ch) {
            grid.set_tile(IVec2::new(origin.x + col, origin.y + row), id, color);
            col += 1;
        }
    }
}

/// Lay out `lines` in a `size` box anchored at `origin` and write the
/// result into `grid`, one produced row per grid row starting at
/// `origin.y`.  Rows beyond the box height were already dropped by
/// [`layout`], so at most `size.y` grid rows are touched.
pub fn draw_text(
    grid: &mut TileGrid,
    origin: IVec2,
    size: IVec2,
    lines: &[String],
    word_wrap: bool,
    alignment: Alignment,
    color: PackedColor,
) {
    for (row, line) in layout(lines, size, word_wrap, alignment).iter().enumerate() {
        set_text_line(grid, origin, row as i32, line, color);
    }
}
