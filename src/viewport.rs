//! # Viewport
//!
//! Cursor position (in both logical `chars` and rendered `render`
//! coordinates) and the scroll offsets of the visible window.

use crate::document::Document;
use crate::input::Direction;

/// Cursor position and scroll state.
#[derive(Default, Clone)]
pub(crate) struct Viewport {
    /// Logical cursor column: a byte index into `rows[cy].chars`.
    pub(crate) cx: usize,
    /// Logical cursor row; may equal `rows.len()` (the phantom row past EOF).
    pub(crate) cy: usize,
    /// Rendered cursor column, recomputed by `scroll`.
    pub(crate) rx: usize,
    /// Topmost visible logical row.
    pub(crate) rowoff: usize,
    /// Leftmost visible rendered column.
    pub(crate) coloff: usize,
    /// Visible rows, excluding the status bar and message bar.
    pub(crate) screenrows: usize,
    /// Visible columns.
    pub(crate) screencols: usize,
}

impl Viewport {
    /// Recompute `rx` from `(cy, cx)`, then clamp `rowoff`/`coloff` so the
    /// cursor stays on screen. Called before every render.
    pub(crate) fn scroll(&mut self, doc: &Document) {
        self.rx = doc.rows.get(self.cy).map_or(0, |row| row.cx_to_rx(self.cx));
        self.rowoff = self.rowoff.clamp(self.cy.saturating_sub(self.screenrows.saturating_sub(1)), self.cy);
        self.coloff = self.coloff.clamp(self.rx.saturating_sub(self.screencols.saturating_sub(1)), self.rx);
    }

    /// Clamp `cx` to the length of the row at `cy` (or 0 on the phantom row).
    fn clamp_cx(&mut self, doc: &Document) {
        self.cx = self.cx.min(doc.rows.get(self.cy).map_or(0, |row| row.chars.len()));
    }

    /// Move the cursor following an arrow key.
    pub(crate) fn move_cursor(&mut self, dir: Direction, doc: &Document) {
        match (dir, doc.rows.get(self.cy)) {
            (Direction::Left, _) if self.cx > 0 => self.cx -= 1,
            (Direction::Left, _) if self.cy > 0 => {
                self.cy -= 1;
                self.cx = doc.rows[self.cy].chars.len();
            }
            (Direction::Right, Some(row)) if self.cx < row.chars.len() => self.cx += 1,
            (Direction::Right, Some(_)) => {
                self.cy += 1;
                self.cx = 0;
            }
            (Direction::Up, _) if self.cy > 0 => self.cy -= 1,
            (Direction::Down, _) if self.cy < doc.rows.len() => self.cy += 1,
            _ => (),
        }
        self.clamp_cx(doc);
    }

    /// HOME: move to the start of the row.
    pub(crate) fn move_home(&mut self) { self.cx = 0; }

    /// END: move to the end of the row, if on a real row.
    pub(crate) fn move_end(&mut self, doc: &Document) {
        if let Some(row) = doc.rows.get(self.cy) {
            self.cx = row.chars.len();
        }
    }

    /// PAGE_UP: jump to the top of the screen, then move up `screenrows`.
    pub(crate) fn page_up(&mut self, doc: &Document) {
        self.cy = self.rowoff;
        self.cy = self.cy.saturating_sub(self.screenrows);
        self.clamp_cx(doc);
    }

    /// PAGE_DOWN: jump to the bottom of the screen, then move down
    /// `screenrows`.
    pub(crate) fn page_down(&mut self, doc: &Document) {
        self.cy = (self.rowoff + 2 * self.screenrows).saturating_sub(1).min(doc.rows.len());
        self.clamp_cx(doc);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with(lines: &[&str]) -> Document {
        let mut doc = Document::new(8);
        doc.set_contents(lines.join("\n").as_bytes());
        doc
    }

    #[test]
    fn left_at_column_zero_wraps_to_previous_row() {
        let doc = doc_with(&["ab", "cd"]);
        let mut vp = Viewport { cy: 1, ..Viewport::default() };
        vp.move_cursor(Direction::Left, &doc);
        assert_eq!((vp.cy, vp.cx), (0, 2));
    }

    #[test]
    fn right_at_end_of_row_wraps_to_next_row() {
        let doc = doc_with(&["ab", "cd"]);
        let mut vp = Viewport { cx: 2, ..Viewport::default() };
        vp.move_cursor(Direction::Right, &doc);
        assert_eq!((vp.cy, vp.cx), (1, 0));
    }

    #[test]
    fn scroll_keeps_cursor_in_view() {
        let doc = doc_with(&["a"; 50]);
        let mut vp = Viewport { screenrows: 10, screencols: 80, cy: 30, ..Viewport::default() };
        vp.scroll(&doc);
        assert!(vp.rowoff <= vp.cy);
        assert!(vp.cy < vp.rowoff + vp.screenrows);
    }
}
