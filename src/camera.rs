use glam::IVec2;

use crate::grid::{PackedColor, TileGrid};

// ── Camera ───────────────────────────────────────────────────────────────────

/// A windowed read over a [`TileGrid`].
///
/// `position` is the source coordinate of the window's first cell and may be
/// negative or lie outside the grid entirely.  `size` is a signed vector:
/// its magnitude gives the snapshot dimensions, its per-axis sign the
/// iteration direction through the source.  The camera holds no reference
/// to any grid: every call to [`Self::snapshot`] re-reads the source and
/// returns a fresh copy.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Camera {
    pub position: IVec2,
    pub size: IVec2,
}

impl Camera {
    pub fn new(position: IVec2, size: IVec2) -> Self {
        Self { position, size }
    }

    /// Copy the windowed region out of `grid`.
    ///
    /// Output dimensions are always `(|size.x|, |size.y|)`.  The first axis
    /// walks from `position.x` stepping `+1` if `size.x >= 0` else `-1`,
    /// the second axis analogously with `size.y`.  Reads outside the source
    /// grid yield the default sentinels (tile `0`, black) through the
    /// grid's total accessors.  A new snapshot is allocated on every call;
    /// callers wanting per-frame reuse must cache on their side.
    pub fn snapshot(&self, grid: &TileGrid) -> CameraSnapshot {
        let w = self.size.x.abs();
        let h = self.size.y.abs();
        let sx = if self.size.x >= 0 { 1 } else { -1 };
        let sy = if self.size.y >= 0 { 1 } else { -1 };

        let cells = w as usize * h as usize;
        let mut tiles = vec![0i32; cells];
        let mut colors = vec![PackedColor::BLACK; cells];

        for ox in 0..w {
            let src_x = self.position.x + sx * ox;
            for oy in 0..h {
                let src = IVec2::new(src_x, self.position.y + sy * oy);
                let i = (oy * w + ox) as usize;
                tiles[i] = grid.get_tile(src);
                colors[i] = grid.get_color(src);
            }
        }

        CameraSnapshot { width: w, height: h, tiles, colors }
    }
}

// ── CameraSnapshot ───────────────────────────────────────────────────────────

/// One windowed copy of a grid, detached from its source.
///
/// Addressable exactly like a grid: row-major co-indexed tile and color
/// buffers plus total per-cell accessors, so the renderer can consume
/// either interchangeably.
pub struct CameraSnapshot {
    width: i32,
    height: i32,
    tiles: Vec<i32>,
    colors: Vec<PackedColor>,
}

impl CameraSnapshot {
    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Tile id at `pos`, or `0` when out of range.
    pub fn get_tile(&self, pos: IVec2) -> i32 {
        if self.in_bounds(pos) {
            self.tiles[(pos.y * self.width + pos.x) as usize]
        } else {
            0
        }
    }

    /// Color at `pos`, or [`PackedColor::BLACK`] when out of range.
    pub fn get_color(&self, pos: IVec2) -> PackedColor {
        if self.in_bounds(pos) {
            self.colors[(pos.y * self.width + pos.x) as usize]
        } else {
            PackedColor::BLACK
        }
    }

    fn in_bounds(&self, pos: IVec2) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// Row-major tile buffer.
    pub fn tiles(&self) -> &[i32] {
        &self.tiles
    }

    /// Row-major color buffer.
    pub fn colors(&self) -> &[PackedColor] {
        &self.colors
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
