use glam::IVec2;
use serde::{Deserialize, Serialize};

// ── Alignment ────────────────────────────────────────────────────────────────

/// Nine-way placement of a text block inside its box.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Alignment {
    UpLeft,
    Up,
    UpRight,
    Left,
    Center,
    Right,
    DownLeft,
    Down,
    DownRight,
}

impl Alignment {
    /// Content pushed to the bottom of the box.
    fn is_down(self) -> bool {
        matches!(self, Self::DownLeft | Self::Down | Self::DownRight)
    }

    /// Content vertically centered.
    fn is_middle(self) -> bool {
        matches!(self, Self::Left | Self::Center | Self::Right)
    }

    /// Lines horizontally centered.
    fn is_h_center(self) -> bool {
        matches!(self, Self::Up | Self::Center | Self::Down)
    }

    /// Lines flushed to the right edge.
    fn is_h_right(self) -> bool {
        matches!(self, Self::UpRight | Self::Right | Self::DownRight)
    }
}

// ── layout ───────────────────────────────────────────────────────────────────

/// Transform `lines` into the rows to be written into a `size.x × size.y`
/// box, applying word-wrap and nine-way alignment.
///
/// The input is never mutated; the result is a fresh sequence, one string
/// per output row, at most `size.y` rows.  Rows carry their final padding,
/// so callers place them verbatim at successive grid rows.
///
/// A newline marker is appended to every input line except the last so
/// that original line breaks stay distinguishable from wrapped
/// continuations until alignment resolves them: a marker still embedded
/// when a row is emitted displays as a single space.
pub fn layout(lines: &[String], size: IVec2, word_wrap: bool, alignment: Alignment) -> Vec<String> {
    let w = size.x.max(0) as usize;
    let h = size.y.max(0) as usize;

    let mut rows: Vec<Vec<char>> = lines.iter().map(|l| l.chars().collect()).collect();
    let last = rows.len().saturating_sub(1);
    for row in rows.iter_mut().take(last) {
        row.push('\n');
    }

    wrap_pass(&mut rows, w, h, word_wrap);

    // Vertical placement: bottom alignment takes the whole deficit as
    // leading blank rows, vertical centering half of it (rounded down).
    let deficit = h.saturating_sub(rows.len());
    let pad_top = if alignment.is_down() {
        deficit
    } else if alignment.is_middle() {
        deficit / 2
    } else {
        0
    };
    for _ in 0..pad_top {
        rows.insert(0, Vec::new());
    }

    // Rows beyond the box height are dropped outright.
    rows.truncate(h);

    rows.into_iter().map(|row| align_row(row, w, alignment)).collect()
}

/// Walk the rows, splitting each at its required break point.  Scanning
/// stops once the number of produced rows exceeds the box height.
fn wrap_pass(rows: &mut Vec<Vec<char>>, w: usize, h: usize, word_wrap: bool) {
    let mut i = 0;
    while i < rows.len() {
        scan_row(rows, i, w, word_wrap);
        i += 1;
        if rows.len() > h {
            break;
        }
    }
}

/// Scan one row for its break point and split it there.
///
/// A break lands on the first column past `w` whose character is not a
/// newline marker; a marker at or before `w` forces a break of its own,
/// while a marker past `w` suppresses the overflow break at its column.
/// The remainder of a split row is carried onto the next row (joined
/// with a single space unless it already ends in a marker) or becomes a
/// new final row.
fn scan_row(rows: &mut Vec<Vec<char>>, i: usize, w: usize, word_wrap: bool) {
    let row = &rows[i];
    let mut split: Option<(usize, bool)> = None; // (index, consume char there)

    for j in 0..row.len() {
        let newline = row[j] == '\n';
        let overflow = j > w;
        if overflow == newline {
            continue;
        }
        if newline {
            if j + 1 == row.len() {
                // The marker is the very last character: strip it rather
                // than splitting an already-finished row.
                rows[i].truncate(j);
                return;
            }
            split = Some((j, true));
        } else if word_wrap {
            // True overflow: prefer the nearest space at or before the
            // width limit, falling back to a hard cut at the limit.
            split = match (0..=w).rev().find(|&k| row[k] == ' ') {
                Some(k) => Some((k, true)),
                None => Some((w, false)),
            };
        } else {
            // Without word-wrap an overflow still advances a row, cut
            // hard at the limit.
            split = Some((w, false));
        }
        break;
    }

    let Some((at, consume)) = split else {
        return;
    };

    let row = &mut rows[i];
    let rest: Vec<char> = row[at + usize::from(consume)..].to_vec();
    row.truncate(at);

    if i + 1 < rows.len() {
        let mut joined = rest;
        if joined.last() != Some(&'\n') {
            joined.push(' ');
        }
        joined.extend_from_slice(&rows[i + 1]);
        rows[i + 1] = joined;
    } else {
        rows.push(rest);
    }
}

/// Resolve one produced row into its final string form: any marker still
/// embedded displays as a single space, then horizontal padding is
/// applied per the alignment group.
fn align_row(row: Vec<char>, w: usize, alignment: Alignment) -> String {
    let text: String = row
        .into_iter()
        .map(|c| if c == '\n' { ' ' } else { c })
        .collect();
    let len = text.chars().count();

    if alignment.is_h_center() {
        let left = w.saturating_sub(len) / 2;
        let mut padded = " ".repeat(left);
        padded.push_str(&text);
        let total = left + len;
        padded.push_str(&" ".repeat(w.saturating_sub(total)));
        padded
    } else if alignment.is_h_right() {
        let mut padded = " ".repeat(w.saturating_sub(len));
        padded.push_str(&text);
        padded
    } else {
        text
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
