//! # Renderer
//!
//! Composes one terminal frame (rows, status bar, message bar, cursor
//! placement) into a `ByteBuffer` and writes it to stdout in a single call.

use std::fmt::Write as _;
use std::io::{self, Write as _};
use std::time::{Duration, Instant};

use crate::ansi_escape::*;
use crate::buffer::ByteBuffer;
use crate::config::Config;
use crate::document::Document;
use crate::viewport::Viewport;
use crate::Error;

const WELCOME_MESSAGE: &str = "Kilo editor -- version 0.0.1";

/// A message shown in the message bar, with the time it was set.
pub(crate) struct StatusMessage {
    pub(crate) text: String,
    time: Instant,
}

impl StatusMessage {
    pub(crate) fn new(text: String) -> Self { Self { text, time: Instant::now() } }
}

/// Where the cursor should be placed for the next frame.
pub(crate) enum CursorTarget {
    /// Regular edit mode: follow the document cursor.
    Document,
    /// Prompt mode: place the cursor at the end of the message bar line, at
    /// the given display column.
    Prompt(usize),
}

fn draw_rows(doc: &Document, viewport: &Viewport, buf: &mut ByteBuffer) {
    for i in viewport.rowoff..viewport.rowoff + viewport.screenrows {
        buf.push_str(CLEAR_LINE_RIGHT_OF_CURSOR);
        match doc.rows.get(i) {
            Some(row) => row.draw(viewport.coloff, viewport.screencols, buf),
            None if doc.rows.len() <= 1 && doc.byte_len() == 0 && i == viewport.screenrows / 3 => {
                draw_welcome(viewport.screencols, buf);
            }
            None => buf.push_byte(b'~'),
        }
        buf.push_str("\r\n");
    }
}

/// Draw the centered welcome banner: a leading `~`, padding spaces, then the
/// message, truncated to `screencols`.
fn draw_welcome(screencols: usize, buf: &mut ByteBuffer) {
    let welcome_len = WELCOME_MESSAGE.len().min(screencols);
    let mut padding = screencols.saturating_sub(welcome_len) / 2;
    if padding > 0 {
        buf.push_byte(b'~');
        padding -= 1;
    }
    for _ in 0..padding {
        buf.push_byte(b' ');
    }
    buf.push_str(&WELCOME_MESSAGE[..welcome_len]);
}

fn draw_status_bar(doc: &Document, viewport: &Viewport, buf: &mut ByteBuffer) {
    let modified = if doc.dirty > 0 { " (modified)" } else { "" };
    let mut left = format!(
        "{:.30} - {} lines{modified}",
        doc.filename.as_deref().unwrap_or("[No Name]"),
        doc.rows.len()
    );
    left.truncate(viewport.screencols);

    let filetype = doc.syntax.map_or("no ft", |s| s.filetype);
    let right = format!("{filetype} | {}/{}", viewport.cy + 1, doc.rows.len());

    let rw = viewport.screencols.saturating_sub(left.len());
    let _ = write!(buf, "{REVERSE_VIDEO}{left}{right:>rw$.rw$}{RESET_FMT}\r\n");
}

fn draw_message_bar(status: Option<&StatusMessage>, config: &Config, screencols: usize, buf: &mut ByteBuffer) {
    buf.push_str(CLEAR_LINE_RIGHT_OF_CURSOR);
    if let Some(sm) = status.filter(|sm| sm.time.elapsed() < config.message_duration) {
        buf.push_str(&sm.text[..sm.text.len().min(screencols)]);
    }
}

/// Compose and write one frame: hide the cursor, redraw rows/status/message
/// bars, reposition the cursor, show it again, then flush stdout.
pub(crate) fn refresh_screen(
    doc: &Document,
    viewport: &Viewport,
    config: &Config,
    status: Option<&StatusMessage>,
    cursor_target: &CursorTarget,
) -> Result<(), Error> {
    let mut buf = ByteBuffer::new();
    buf.push_str(HIDE_CURSOR);
    buf.push_str(MOVE_CURSOR_TO_START);
    draw_rows(doc, viewport, &mut buf);
    draw_status_bar(doc, viewport, &mut buf);
    draw_message_bar(status, config, viewport.screencols, &mut buf);

    let (col, row) = match cursor_target {
        CursorTarget::Document => (viewport.rx - viewport.coloff + 1, viewport.cy - viewport.rowoff + 1),
        CursorTarget::Prompt(col) => (*col + 1, viewport.screenrows + 2),
    };
    let _ = write!(buf, "\x1b[{row};{col}H{SHOW_CURSOR}");

    io::stdout().write_all(buf.as_bytes())?;
    io::stdout().flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn welcome_message_is_centered() {
        let mut buf = ByteBuffer::new();
        draw_welcome(80, &mut buf);
        let bytes = buf.as_bytes();
        assert_eq!(bytes[0], b'~');
        let text = std::str::from_utf8(bytes).unwrap();
        assert!(text.ends_with(WELCOME_MESSAGE));
        assert_eq!(bytes.len() - WELCOME_MESSAGE.len(), 26);
    }

    #[test]
    fn message_bar_hides_expired_status() {
        let mut buf = ByteBuffer::new();
        let config = Config { message_duration: Duration::from_secs(0), ..Config::default() };
        let status = StatusMessage::new("hello".to_string());
        std::thread::sleep(Duration::from_millis(5));
        draw_message_bar(Some(&status), &config, 80, &mut buf);
        assert!(!std::str::from_utf8(buf.as_bytes()).unwrap().contains("hello"));
    }
}
