use std::collections::HashMap;
use std::sync::OnceLock;

// ── SymbolTable ──────────────────────────────────────────────────────────────

/// Character → tile-id mapping for the glyph rows of the sprite atlas.
///
/// Letters and digits occupy fixed contiguous runs and are computed;
/// everything else (punctuation, box drawing, arrows, card suits, ...)
/// comes from an explicit table.  The table is immutable once built and
/// shared read-only across all text operations via [`shared`].
pub struct SymbolTable {
    extra: HashMap<char, i32>,
}

impl SymbolTable {
    /// Parse a char-keyed JSON object of explicit tile ids:
    ///
    /// ```json
    /// { "!": 140, "─": 172, "♥": 210, ... }
    /// ```
    ///
    /// Keys longer than a single character are ignored.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let raw: HashMap<String, i32> = serde_json::from_str(json)?;
        let extra = raw
            .into_iter()
            .filter_map(|(key, id)| {
                // Only accept single-character keys.
                let mut chars = key.chars();
                let ch = chars.next()?;
                if chars.next().is_some() {
                    return None;
                }
                Some((ch, id))
            })
            .collect();
        Ok(Self { extra })
    }

    /// Tile id for `ch`, or `None` when the symbol has no glyph.
    ///
    /// Space maps to tile `0`: "draw nothing", not an error.  Callers are
    /// expected to skip `None` without advancing their column cursor.
    pub fn symbol_to_tile(&self, ch: char) -> Option<i32> {
        match ch {
            'A'..='Z' => Some(78 + (ch as i32 - 'A' as i32)),
            'a'..='z' => Some(104 + (ch as i32 - 'a' as i32)),
            '0'..='9' => Some(130 + (ch as i32 - '0' as i32)),
            ' ' => Some(0),
            _ => self.extra.get(&ch).copied(),
        }
    }
}

/// Process-wide shared table, built from the embedded resource on first use
/// and never mutated afterwards.
pub fn shared() -> &'static SymbolTable {
    static TABLE: OnceLock<SymbolTable> = OnceLock::new();
    TABLE.get_or_init(|| {
        SymbolTable::from_json(crate::SYMBOL_MAP_JSON)
            .expect("embedded symbol map is valid JSON")
    })
}

/// Shorthand for [`SymbolTable::symbol_to_tile`] on the [`shared`] table.
pub fn symbol_to_tile(ch: char) -> Option<i32> {
    shared().symbol_to_tile(ch)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
