//! # Document
//!
//! The ordered sequence of rows that make up the file being edited, plus the
//! bookkeeping the rest of the editor needs: the dirty counter, the file
//! name, and the syntax rule selected from it.

use std::path::Path;

use crate::row::Row;
use crate::syntax::{self, SyntaxRule};

/// The in-memory text buffer.
#[derive(Default)]
pub(crate) struct Document {
    /// Rows in file order.
    pub(crate) rows: Vec<Row>,
    /// Incremented on every structural or content mutation; reset to 0 on
    /// successful save or after load.
    pub(crate) dirty: usize,
    /// The file this document was loaded from or last saved to.
    pub(crate) filename: Option<String>,
    /// The syntax rule selected by `filename`'s extension, if recognised.
    pub(crate) syntax: Option<&'static SyntaxRule>,
    tab_stop: usize,
}

impl Document {
    /// Create an empty document with a single empty row.
    pub(crate) fn new(tab_stop: usize) -> Self {
        let mut doc = Self { tab_stop, ..Self::default() };
        doc.rows.push(Row::new(Vec::new()));
        doc.rows[0].update(tab_stop, None);
        doc
    }

    /// Replace the rows of this document with those parsed from `bytes`: `\n`
    /// is a line *terminator*, not a separator, so a single trailing `\n` is
    /// stripped before splitting (with trailing `\r` stripped from each
    /// line), matching `rows_to_bytes`'s own output.
    pub(crate) fn set_contents(&mut self, bytes: &[u8]) {
        let bytes = bytes.strip_suffix(b"\n").unwrap_or(bytes);
        self.rows = bytes
            .split(|&b| b == b'\n')
            .map(|line| {
                let line = line.strip_suffix(b"\r").unwrap_or(line);
                let mut row = Row::new(line.to_vec());
                row.update(self.tab_stop, self.syntax);
                row
            })
            .collect();
        if self.rows.is_empty() {
            self.rows.push(Row::new(Vec::new()));
            self.rows[0].update(self.tab_stop, self.syntax);
        }
        self.dirty = 0;
    }

    /// Serialize the document back to bytes: each row's `chars` followed by a
    /// single `\n`.
    pub(crate) fn rows_to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for row in &self.rows {
            out.extend_from_slice(&row.chars);
            out.push(b'\n');
        }
        out
    }

    /// Insert a new (empty, then filled) row at `at`, updating it and
    /// incrementing `dirty`.
    pub(crate) fn insert_row(&mut self, at: usize, bytes: Vec<u8>) {
        let mut row = Row::new(bytes);
        row.update(self.tab_stop, self.syntax);
        self.rows.insert(at.min(self.rows.len()), row);
        self.dirty += 1;
    }

    /// Remove the row at `at`, shifting successors down.
    pub(crate) fn del_row(&mut self, at: usize) {
        if at < self.rows.len() {
            self.rows.remove(at);
            self.dirty += 1;
        }
    }

    /// Insert byte `b` at `(cy, cx)`. If `cy` is the phantom row past EOF, a
    /// new empty row is created first. Returns the cursor's new `cx`.
    pub(crate) fn insert_char(&mut self, cy: usize, cx: usize, b: u8) -> usize {
        if cy == self.rows.len() {
            self.insert_row(cy, Vec::new());
        }
        let row = &mut self.rows[cy];
        row.insert_char(cx, b, self.tab_stop, self.syntax);
        self.dirty += 1;
        cx + 1
    }

    /// Delete the byte logically before `(cy, cx)`, per the merge-with-
    /// previous-row rule at column 0. Returns the new `(cy, cx)`.
    pub(crate) fn del_char(&mut self, cy: usize, cx: usize) -> (usize, usize) {
        if cy == 0 && cx == 0 {
            return (cy, cx);
        }
        if cy >= self.rows.len() {
            return (cy, cx);
        }
        if cx > 0 {
            self.rows[cy].del_char(cx - 1, self.tab_stop, self.syntax);
            self.dirty += 1;
            (cy, cx - 1)
        } else {
            let removed = self.rows.remove(cy);
            let prev = &mut self.rows[cy - 1];
            let new_cx = prev.chars.len();
            prev.append_bytes(&removed.chars, self.tab_stop, self.syntax);
            self.dirty += 1;
            (cy - 1, new_cx)
        }
    }

    /// Split the row at `(cy, cx)`, inserting a newline. Returns the new
    /// `(cy, cx)`, always `(cy + 1, 0)`.
    pub(crate) fn insert_newline(&mut self, cy: usize, cx: usize) -> (usize, usize) {
        if cx == 0 {
            self.insert_row(cy, Vec::new());
        } else {
            let remainder = self.rows[cy].chars.split_off(cx);
            self.rows[cy].update(self.tab_stop, self.syntax);
            self.insert_row(cy + 1, remainder);
        }
        (cy + 1, 0)
    }

    /// Select the syntax rule matching `path`'s extension, if any, and
    /// rehighlight every row if it differs from the current one.
    pub(crate) fn select_syntax(&mut self, path: &Path) {
        let rule = path.extension().and_then(std::ffi::OsStr::to_str).and_then(syntax::find);
        let changed = rule.map(|r| r.filetype) != self.syntax.map(|r| r.filetype);
        self.syntax = rule;
        if changed {
            for row in &mut self.rows {
                row.update(self.tab_stop, self.syntax);
            }
        }
    }

    /// Total byte count across all rows, excluding the separating newlines.
    pub(crate) fn byte_len(&self) -> u64 { self.rows.iter().map(|r| r.chars.len() as u64).sum() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newline_splits_row_at_cursor() {
        let mut doc = Document::new(8);
        doc.set_contents(b"helloworld");
        let (cy, cx) = doc.insert_newline(0, 5);
        assert_eq!((cy, cx), (1, 0));
        assert_eq!(doc.rows[0].chars, b"hello");
        assert_eq!(doc.rows[1].chars, b"world");
    }

    #[test]
    fn del_char_merges_rows_at_column_zero() {
        let mut doc = Document::new(8);
        doc.set_contents(b"foo\nbar");
        let (cy, cx) = doc.del_char(1, 0);
        assert_eq!((cy, cx), (0, 3));
        assert_eq!(doc.rows.len(), 1);
        assert_eq!(doc.rows[0].chars, b"foobar");
    }

    #[test]
    fn insert_char_on_phantom_row_creates_row() {
        let mut doc = Document::new(8);
        doc.set_contents(b"");
        let cx = doc.insert_char(1, 0, b'x');
        assert_eq!(cx, 1);
        assert_eq!(doc.rows.len(), 2);
        assert_eq!(doc.rows[1].chars, b"x");
    }

    #[test]
    fn rows_to_bytes_round_trip() {
        let mut doc = Document::new(8);
        doc.set_contents(b"foo\nbar\n");
        assert_eq!(doc.rows.len(), 2);
        assert_eq!(doc.rows_to_bytes(), b"foo\nbar\n");
    }

    #[test]
    fn dirty_resets_after_set_contents() {
        let mut doc = Document::new(8);
        doc.insert_char(0, 0, b'a');
        assert!(doc.dirty > 0);
        doc.set_contents(b"loaded");
        assert_eq!(doc.dirty, 0);
    }
}
