use glam::IVec2;

// ── PackedColor ──────────────────────────────────────────────────────────────

/// Tile tint packed into a single byte: 3 bits red, 3 bits green, 2 bits blue.
///
/// The renderer treats each channel as an independent multiplier, so the
/// channels are scaled separately, red and green over 8 levels, blue over 4.
/// `0xFF` is the fully untinted marker; `0x00` is black and doubles as the
/// out-of-range sentinel.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PackedColor(pub u8);

impl PackedColor {
    pub const BLACK: Self = Self(0x00);
    pub const WHITE: Self = Self(0xFF);

    /// Pack channel levels `r`, `g` in `0..=7` and `b` in `0..=3`.
    /// Levels above a channel's range are clamped.
    pub fn from_levels(r: u8, g: u8, b: u8) -> Self {
        Self((r.min(7) << 5) | (g.min(7) << 2) | b.min(3))
    }

    /// Quantize 8-bit channels into the 3-3-2 layout.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self((r & 0xE0) | ((g >> 3) & 0x1C) | (b >> 6))
    }

    /// Red level in `0..=7`.
    pub fn red(self) -> u8 {
        self.0 >> 5
    }

    /// Green level in `0..=7`.
    pub fn green(self) -> u8 {
        (self.0 >> 2) & 0x07
    }

    /// Blue level in `0..=3`.
    pub fn blue(self) -> u8 {
        self.0 & 0x03
    }

    /// Per-channel multiplier in `[0, 1]`, each channel scaled to its own
    /// range (red/green out of 7, blue out of 3).
    pub fn to_rgb_f32(self) -> [f32; 3] {
        [
            self.red() as f32 / 7.0,
            self.green() as f32 / 7.0,
            self.blue() as f32 / 3.0,
        ]
    }
}

// ── TileGrid ─────────────────────────────────────────────────────────────────

/// A rectangular store of tile identifiers and packed tint colors.
///
/// Tile ids index an external sprite atlas; `0` doubles as the "empty"
/// sentinel returned for out-of-range reads.  The two buffers always share
/// the grid's dimensions and are co-indexed row-major (`y * width + x`).
/// Dimensions are fixed at construction; all mutation happens in place and
/// the grid is never resized.
///
/// Every accessor is total: out-of-range reads return the sentinel and
/// out-of-range writes are dropped, never signalled.
pub struct TileGrid {
    width: i32,
    height: i32,
    tiles: Vec<i32>,
    colors: Vec<PackedColor>,
}

impl TileGrid {
    /// Create a grid with every tile `0` and every color [`PackedColor::BLACK`].
    /// Zero or negative dimensions yield an empty grid.
    pub fn new(width: i32, height: i32) -> Self {
        let cells = if width > 0 && height > 0 {
            width as usize * height as usize
        } else {
            0
        };
        Self {
            width: width.max(0),
            height: height.max(0),
            tiles: vec![0; cells],
            colors: vec![PackedColor::BLACK; cells],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// `true` if `pos` lies within `[0, width) × [0, height)`.
    pub fn in_bounds(&self, pos: IVec2) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    fn index(&self, pos: IVec2) -> usize {
        (pos.y * self.width + pos.x) as usize
    }

    /// Stored tile id at `pos`, or `0` when out of range.
    pub fn get_tile(&self, pos: IVec2) -> i32 {
        if self.in_bounds(pos) {
            self.tiles[self.index(pos)]
        } else {
            0
        }
    }

    /// Stored color at `pos`, or [`PackedColor::BLACK`] when out of range.
    pub fn get_color(&self, pos: IVec2) -> PackedColor {
        if self.in_bounds(pos) {
            self.colors[self.index(pos)]
        } else {
            PackedColor::BLACK
        }
    }

    /// Write tile id and color together at `pos`.  Out-of-range writes are
    /// silently dropped; callers rely on the clamp-to-no-op behavior, so
    /// there is no error signal.
    pub fn set_tile(&mut self, pos: IVec2, id: i32, color: PackedColor) {
        if self.in_bounds(pos) {
            let i = self.index(pos);
            self.tiles[i] = id;
            self.colors[i] = color;
        }
    }

    /// Overwrite every cell with `id` / `color`.
    pub fn fill(&mut self, id: i32, color: PackedColor) {
        self.tiles.fill(id);
        self.colors.fill(color);
    }

    /// Fill the signed rectangle spanned from `origin` to `origin + size`
    /// (exclusive).  Each axis steps `+1` or `-1` according to the sign of
    /// its size component, so a negative size iterates backward from
    /// `origin`.  Cells are written through [`Self::set_tile`], which means
    /// parts of the square outside the grid are skipped cell by cell rather
    /// than clipped as a rectangle.
    pub fn set_square(&mut self, origin: IVec2, size: IVec2, id: i32, color: PackedColor) {
        let sx = if size.x >= 0 { 1 } else { -1 };
        let sy = if size.y >= 0 { 1 } else { -1 };
        for dx in 0..size.x.abs() {
            for dy in 0..size.y.abs() {
                self.set_tile(
                    IVec2::new(origin.x + sx * dx, origin.y + sy * dy),
                    id,
                    color,
                );
            }
        }
    }

    /// Row-major tile buffer handed to the renderer.
    pub fn tiles(&self) -> &[i32] {
        &self.tiles
    }

    /// Row-major color buffer handed to the renderer.
    pub fn colors(&self) -> &[PackedColor] {
        &self.colors
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
