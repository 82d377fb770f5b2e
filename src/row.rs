//! # Row
//!
//! A single logical line: the raw bytes typed by the user (`chars`), their
//! tab-expanded rendering (`render`), and the per-rendered-byte syntax
//! highlight codes (`hl`). This is a byte-only model: one byte is one display
//! cell except for TAB, so there is no Unicode width bookkeeping.

use crate::ansi_escape::{RESET_FMT, REVERSE_VIDEO};
use crate::buffer::ByteBuffer;
use crate::syntax::{HlType, SyntaxRule};

/// Bytes considered separators by the highlighter, besides space and NUL.
const SEPARATOR_PUNCTUATION: &[u8] = b",.()+-/*=~%<>[];";

/// Return whether `b` is a highlighter separator: space, NUL, or one of
/// `,.()+-/*=~%<>[];`.
const fn is_separator(b: u8) -> bool { b == b' ' || b == 0 || is_in(b, SEPARATOR_PUNCTUATION) }

/// `const`-compatible byte membership test (`slice::contains` is not `const`).
const fn is_in(b: u8, set: &[u8]) -> bool {
    let mut i = 0;
    while i < set.len() {
        if set[i] == b {
            return true;
        }
        i += 1;
    }
    false
}

/// One logical line of the document.
#[derive(Default)]
pub(crate) struct Row {
    /// The raw bytes of the line, with no trailing newline.
    pub(crate) chars: Vec<u8>,
    /// `chars` with every TAB expanded to spaces up to the next tab stop.
    render: Vec<u8>,
    /// `cx2rx[cx]` is the rendered column at which byte `cx` of `chars`
    /// starts; `cx2rx[|chars|]` is the rendered length of the row.
    cx2rx: Vec<usize>,
    /// `rx2cx[rx]` is the byte index of `chars` that rendered column `rx`
    /// belongs to; `rx2cx[|render|]` is `|chars|`.
    rx2cx: Vec<usize>,
    /// Highlight code for each byte of `render`; always `|hl| == |render|`.
    pub(crate) hl: Vec<HlType>,
}

impl Row {
    /// Create a new row from raw bytes. `update` must be called before the
    /// row is rendered or searched.
    pub(crate) fn new(chars: Vec<u8>) -> Self { Self { chars, ..Self::default() } }

    /// Recompute `render`, `cx2rx`, `rx2cx` from `chars` using tab expansion,
    /// then recompute `hl` from the active syntax rule.
    pub(crate) fn update(&mut self, tab_stop: usize, rule: Option<&SyntaxRule>) {
        self.render.clear();
        self.cx2rx.clear();
        self.rx2cx.clear();
        let mut rx = 0;
        for (cx, &b) in self.chars.iter().enumerate() {
            self.cx2rx.push(rx);
            if b == b'\t' {
                let advance = tab_stop - (rx % tab_stop);
                self.render.extend(std::iter::repeat_n(b' ', advance));
                self.rx2cx.extend(std::iter::repeat_n(cx, advance));
                rx += advance;
            } else {
                self.render.push(b);
                self.rx2cx.push(cx);
                rx += 1;
            }
        }
        self.cx2rx.push(rx);
        self.rx2cx.push(self.chars.len());
        self.highlight(rule);
    }

    /// Insert byte `b` at position `at` (clamped to `[0, |chars|]`) and
    /// recompute the row.
    pub(crate) fn insert_char(&mut self, at: usize, b: u8, tab_stop: usize, rule: Option<&SyntaxRule>) {
        self.chars.insert(at.min(self.chars.len()), b);
        self.update(tab_stop, rule);
    }

    /// Remove the byte at `at`, if `at ∈ [0, |chars|)`, and recompute the row.
    pub(crate) fn del_char(&mut self, at: usize, tab_stop: usize, rule: Option<&SyntaxRule>) {
        if at < self.chars.len() {
            self.chars.remove(at);
            self.update(tab_stop, rule);
        }
    }

    /// Append `bytes` to the end of the row and recompute it.
    pub(crate) fn append_bytes(&mut self, bytes: &[u8], tab_stop: usize, rule: Option<&SyntaxRule>) {
        self.chars.extend_from_slice(bytes);
        self.update(tab_stop, rule);
    }

    /// Rendered column at which byte `cx` of `chars` starts.
    pub(crate) fn cx_to_rx(&self, cx: usize) -> usize { self.cx2rx[cx] }

    /// Byte index of `chars` that rendered column `rx` belongs to.
    pub(crate) fn rx_to_cx(&self, rx: usize) -> usize {
        self.rx2cx[rx.min(self.rx2cx.len() - 1)]
    }

    /// The tab-expanded rendering of this row.
    pub(crate) fn render(&self) -> &[u8] { &self.render }

    /// Single left-to-right pass over `render`, producing `hl` of length
    /// `|render|`. Highlight state never carries over from the previous row:
    /// block comments and block strings are not recognised.
    fn highlight(&mut self, rule: Option<&SyntaxRule>) {
        self.hl = vec![HlType::Normal; self.render.len()];
        let Some(rule) = rule else { return };

        let mut i = 0;
        let mut prev_sep = true;
        let mut in_string: Option<u8> = None;
        let line = &self.render;

        while i < line.len() {
            if in_string.is_none()
                && let Some(prefix) = rule.line_comment_prefix
                && line[i..].starts_with(prefix.as_bytes())
            {
                self.hl[i..].fill(HlType::Comment);
                break;
            }

            if rule.highlight_strings
                && let Some(quote) = in_string
            {
                self.hl[i] = HlType::String;
                if line[i] == b'\\' && i + 1 < line.len() {
                    self.hl[i + 1] = HlType::String;
                    i += 2;
                } else {
                    if line[i] == quote {
                        in_string = None;
                    }
                    i += 1;
                }
                prev_sep = true;
                continue;
            }

            if rule.highlight_strings && (line[i] == b'"' || line[i] == b'\'') {
                in_string = Some(line[i]);
                self.hl[i] = HlType::String;
                i += 1;
                continue;
            }

            if rule.highlight_numbers
                && ((line[i].is_ascii_digit() && (prev_sep || self.hl[i - 1] == HlType::Number))
                    || (line[i] == b'.' && i > 0 && self.hl[i - 1] == HlType::Number))
            {
                self.hl[i] = HlType::Number;
                prev_sep = false;
                i += 1;
                continue;
            }

            if prev_sep {
                let keyword = [(HlType::Keyword1, rule.keyword1), (HlType::Keyword2, rule.keyword2)]
                    .into_iter()
                    .flat_map(|(hl_type, words)| words.iter().map(move |w| (hl_type, *w)))
                    .find(|(_, w)| {
                        line[i..].starts_with(w.as_bytes())
                            && line.get(i + w.len()).is_none_or(|b| is_separator(*b))
                    });
                if let Some((hl_type, word)) = keyword {
                    self.hl[i..i + word.len()].fill(hl_type);
                    i += word.len();
                    prev_sep = false;
                    continue;
                }
            }

            prev_sep = is_separator(line[i]);
            i += 1;
        }
    }

    /// Write this row's rendered bytes, starting at rendered column `offset`
    /// and clamped to `max_len` cells, into `buf`, emitting a color switch
    /// whenever the highlight code changes.
    pub(crate) fn draw(&self, offset: usize, max_len: usize, buf: &mut ByteBuffer) {
        let len = self.render.len().saturating_sub(offset).min(max_len);
        let mut current = HlType::Normal;
        for (rel, &b) in self.render.iter().skip(offset).take(len).enumerate() {
            let idx = offset + rel;
            let hl = self.hl.get(idx).copied().unwrap_or(HlType::Normal);
            if b.is_ascii_control() {
                let rendered = if b <= 26 { b'@' + b } else { b'?' };
                buf.push_str(REVERSE_VIDEO);
                buf.push_byte(rendered);
                buf.push_str(RESET_FMT);
                if current != HlType::Normal {
                    buf.push_str(&current.to_string());
                }
            } else {
                if hl != current {
                    buf.push_str(&hl.to_string());
                    current = hl;
                }
                buf.push_byte(b);
            }
        }
        buf.push_str(RESET_FMT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rust_rule() -> Option<&'static SyntaxRule> { crate::syntax::find("rs") }

    #[test]
    fn tab_expands_to_next_stop() {
        let mut row = Row::new(b"a\tb".to_vec());
        row.update(8, None);
        assert_eq!(row.render(), b"a       b");
        assert_eq!(row.cx_to_rx(2), 8);
    }

    #[test]
    fn hl_always_matches_render_length() {
        let mut row = Row::new(b"int x = 42; // hi".to_vec());
        row.update(8, rust_rule());
        assert_eq!(row.hl.len(), row.render().len());
    }

    #[test]
    fn round_trip_cx_rx() {
        let mut row = Row::new(b"a\tbc\td".to_vec());
        row.update(4, None);
        for cx in 0..=row.chars.len() {
            let rx = row.cx_to_rx(cx);
            assert_eq!(row.rx_to_cx(rx), cx, "round trip failed for cx={cx}");
        }
    }

    #[test]
    fn comment_highlighting() {
        let mut row = Row::new(b"int x = 42; // hi".to_vec());
        row.update(8, rust_rule());
        assert!(row.hl[13..].iter().all(|&h| h == HlType::Comment));
        assert!(row.hl[8..10].iter().all(|&h| h == HlType::Number));
    }

    #[test]
    fn string_highlighting() {
        let rule = SyntaxRule {
            filetype: "C",
            extensions: &["c"],
            keyword1: &[],
            keyword2: &[],
            line_comment_prefix: None,
            highlight_numbers: false,
            highlight_strings: true,
        };
        let mut row = Row::new(br#"char* s = "hi";"#.to_vec());
        row.update(8, Some(&rule));
        let quote_start = br#"char* s = "hi";"#.iter().position(|&b| b == b'"').unwrap_or(0);
        assert!(row.hl[quote_start..quote_start + 4].iter().all(|&h| h == HlType::String));
    }

    #[test]
    fn keyword_not_split_inside_identifier() {
        let mut row = Row::new(b"let letter = 1;".to_vec());
        row.update(8, rust_rule());
        assert_eq!(row.hl[0..3], [HlType::Keyword1; 3]);
        assert!(row.hl[4..10].iter().all(|&h| h == HlType::Normal));
    }

    #[test]
    fn insert_and_delete_char_round_trip() {
        let mut row = Row::new(b"helo".to_vec());
        row.insert_char(2, b'l', 4, None);
        assert_eq!(row.chars, b"hello");
        row.del_char(2, 4, None);
        assert_eq!(row.chars, b"helo");
    }
}
