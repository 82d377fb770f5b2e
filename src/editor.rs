//! # Controller
//!
//! Owns the `Document`, `Viewport` and terminal lifetime, dispatches decoded
//! key events to the right handler, and drives the render loop.

use std::path::Path;
use std::thread;

use crate::ansi_escape::{CLEAR_SCREEN, MOVE_CURSOR_TO_START};
use crate::config::Config;
use crate::document::Document;
use crate::input::{self, Direction, Key, PageDir};
use crate::render::{self, CursorTarget, StatusMessage};
use crate::syntax::HlType;
use crate::viewport::Viewport;
use crate::{file_store, sys, terminal, Error};

const fn ctrl_key(key: u8) -> u8 { key & 0x1f }
const EXIT: u8 = ctrl_key(b'Q');
const DELETE_BIS: u8 = ctrl_key(b'H');
const REFRESH_SCREEN: u8 = ctrl_key(b'L');
const SAVE: u8 = ctrl_key(b'S');
const FIND: u8 = ctrl_key(b'F');
const BACKSPACE: u8 = 127;

const HELP_MESSAGE: &str = "^S save | ^Q quit | ^F find";

/// Prompt state, active while `Editor::mode` is `Some`.
enum Mode {
    /// Save-as prompt: the buffer typed so far.
    Save(Vec<u8>),
    /// Incremental find prompt.
    Find(FindState),
}

struct FindState {
    query: Vec<u8>,
    /// The cursor/scroll state to restore if the prompt is cancelled.
    saved_viewport: Viewport,
    last_match: Option<usize>,
}

impl Mode {
    fn status_text(&self) -> String {
        match self {
            Self::Save(buffer) => format!("Save as: {}", String::from_utf8_lossy(buffer)),
            Self::Find(state) =>
                format!("Search (Use ESC/Arrows/Enter): {}", String::from_utf8_lossy(&state.query)),
        }
    }
}

/// The outcome of feeding one key to the prompt buffer.
enum PromptState {
    Active,
    Completed,
    Cancelled,
}

/// Update `buffer` in place per `key`: ENTER completes, ESC/Ctrl+Q cancels,
/// BACKSPACE/Ctrl+H pops a byte, any other non-control byte is appended.
fn process_prompt_keypress(buffer: &mut Vec<u8>, key: &Key) -> PromptState {
    match key {
        Key::Char(b'\r') => PromptState::Completed,
        Key::Escape | Key::Char(EXIT) => PromptState::Cancelled,
        Key::Char(BACKSPACE | DELETE_BIS) => {
            buffer.pop();
            PromptState::Active
        }
        Key::Char(c) if !c.is_ascii_control() => {
            buffer.push(*c);
            PromptState::Active
        }
        _ => PromptState::Active,
    }
}

/// Return the index of the first occurrence of `needle` in `s`, if any.
fn slice_find(s: &[u8], needle: &[u8]) -> Option<usize> {
    (0..(s.len() + 1).saturating_sub(needle.len())).find(|&i| s[i..].starts_with(needle))
}

/// The editor: state, configuration, and the terminal lifetime.
#[derive(Default)]
pub struct Editor {
    document: Document,
    viewport: Viewport,
    config: Config,
    status: Option<StatusMessage>,
    /// Remaining warnings before Ctrl+Q quits with unsaved changes.
    quit_times: usize,
    mode: Option<Mode>,
    /// `(row, rendered column, original highlight codes)` of the currently
    /// overlaid match, if any, so it can be restored.
    match_overlay: Option<(usize, usize, Vec<HlType>)>,
    orig_term_mode: Option<sys::TermMode>,
}

impl Editor {
    /// Enable raw terminal mode, register the resize handler, and probe the
    /// initial window size.
    ///
    /// # Errors
    ///
    /// Returns `Err` if raw mode cannot be enabled or the window size cannot
    /// be determined.
    pub fn new(config: Config) -> Result<Self, Error> {
        sys::register_winsize_change_signal_handler()?;
        let orig_term_mode = sys::enable_raw_mode()?;
        let mut editor = Self {
            document: Document::new(config.tab_stop),
            quit_times: config.quit_times,
            config,
            status: Some(StatusMessage::new(HELP_MESSAGE.to_string())),
            orig_term_mode: Some(orig_term_mode),
            ..Self::default()
        };
        editor.update_window_size()?;
        Ok(editor)
    }

    fn update_window_size(&mut self) -> Result<(), Error> {
        let (rows, cols) = sys::get_window_size().or_else(|_| terminal::get_window_size_using_cursor())?;
        self.viewport.screenrows = rows.saturating_sub(2);
        self.viewport.screencols = cols;
        Ok(())
    }

    fn insert_char(&mut self, b: u8) {
        self.viewport.cx = self.document.insert_char(self.viewport.cy, self.viewport.cx, b);
    }

    fn insert_newline(&mut self) {
        (self.viewport.cy, self.viewport.cx) =
            self.document.insert_newline(self.viewport.cy, self.viewport.cx);
    }

    fn delete_char(&mut self) {
        (self.viewport.cy, self.viewport.cx) = self.document.del_char(self.viewport.cy, self.viewport.cx);
    }

    fn save_and_report(&mut self, filename: &str) {
        match file_store::save(Path::new(filename), &self.document.rows_to_bytes()) {
            Ok(written) => {
                self.status = Some(StatusMessage::new(format!("{written} bytes written to {filename}")));
                self.document.dirty = 0;
            }
            Err(err) => self.status = Some(StatusMessage::new(format!("Can't save! I/O error: {err:?}"))),
        }
    }

    /// Overlay `HlType::Match` on `len` rendered columns of `row_idx` starting
    /// at rendered column `rx`, saving the bytes it overwrites.
    fn apply_match_highlight(&mut self, row_idx: usize, rx: usize, len: usize) {
        self.clear_match_highlight();
        if let Some(row) = self.document.rows.get_mut(row_idx) {
            let end = (rx + len).min(row.hl.len());
            if rx >= end {
                return;
            }
            self.match_overlay = Some((row_idx, rx, row.hl[rx..end].to_vec()));
            row.hl[rx..end].fill(HlType::Match);
        }
    }

    /// Undo the effect of `apply_match_highlight`, if an overlay is active.
    fn clear_match_highlight(&mut self) {
        if let Some((row_idx, rx, saved)) = self.match_overlay.take()
            && let Some(row) = self.document.rows.get_mut(row_idx)
        {
            let end = (rx + saved.len()).min(row.hl.len());
            row.hl[rx..end].copy_from_slice(&saved[..end - rx]);
        }
    }

    /// Search for `query` as a plain byte substring of each row's rendered
    /// form (so tabs match as the spaces they expand to), starting just after
    /// `last_match` (or the last row, if `None`) and wrapping around. On a
    /// hit, forces `rowoff` to recenter the match on the next scroll.
    fn find(&mut self, query: &[u8], last_match: Option<usize>, forward: bool) -> Option<usize> {
        if query.is_empty() {
            return None;
        }
        let num_rows = self.document.rows.len();
        let mut current = last_match.unwrap_or_else(|| num_rows.saturating_sub(1));
        for _ in 0..num_rows {
            current = (current + if forward { 1 } else { num_rows - 1 }) % num_rows;
            if let Some(rx) = slice_find(self.document.rows[current].render(), query) {
                self.viewport.cy = current;
                self.viewport.cx = self.document.rows[current].rx_to_cx(rx);
                self.viewport.coloff = 0;
                self.viewport.rowoff = self.document.rows.len();
                self.apply_match_highlight(current, rx, query.len());
                return Some(current);
            }
        }
        None
    }

    /// Process a key while not in prompt mode. Returns whether to quit.
    fn process_keypress(&mut self, key: &Key) -> bool {
        let mut quit_times = self.config.quit_times;
        match key {
            Key::Arrow(dir) => self.viewport.move_cursor(*dir, &self.document),
            Key::Page(PageDir::Up) => self.viewport.page_up(&self.document),
            Key::Page(PageDir::Down) => self.viewport.page_down(&self.document),
            Key::Home => self.viewport.move_home(),
            Key::End => self.viewport.move_end(&self.document),
            Key::Char(b'\r' | b'\n') => self.insert_newline(),
            Key::Char(BACKSPACE | DELETE_BIS) => self.delete_char(),
            Key::Delete => {
                self.viewport.move_cursor(Direction::Right, &self.document);
                self.delete_char();
            }
            Key::Escape | Key::Char(REFRESH_SCREEN) => (),
            Key::Char(EXIT) => {
                quit_times = self.quit_times.saturating_sub(1);
                if self.document.dirty == 0 || quit_times == 0 {
                    return true;
                }
                let times = if quit_times > 1 { "times" } else { "time" };
                self.status =
                    Some(StatusMessage::new(format!("Press Ctrl+Q {quit_times} more {times} to quit.")));
            }
            Key::Char(SAVE) => match self.document.filename.clone() {
                Some(filename) => self.save_and_report(&filename),
                None => self.mode = Some(Mode::Save(Vec::new())),
            },
            Key::Char(FIND) =>
                self.mode = Some(Mode::Find(FindState {
                    query: Vec::new(),
                    saved_viewport: self.viewport.clone(),
                    last_match: None,
                })),
            Key::Char(c) => self.insert_char(*c),
        }
        self.quit_times = quit_times;
        false
    }

    /// Process a key while `self.mode` is `Some`.
    fn handle_prompt_key(&mut self, key: &Key) -> Result<(), Error> {
        let Some(mode) = self.mode.take() else { return Ok(()) };
        self.status = None;
        match mode {
            Mode::Save(mut buffer) => match process_prompt_keypress(&mut buffer, key) {
                PromptState::Active => self.mode = Some(Mode::Save(buffer)),
                PromptState::Cancelled =>
                    self.status = Some(StatusMessage::new("Save aborted".to_string())),
                PromptState::Completed if buffer.is_empty() =>
                    self.status = Some(StatusMessage::new("Save aborted".to_string())),
                PromptState::Completed => {
                    let filename = String::from_utf8_lossy(&buffer).into_owned();
                    self.save_and_report(&filename);
                    self.document.select_syntax(Path::new(&filename));
                    self.document.filename = Some(filename);
                }
            },
            Mode::Find(mut state) => {
                self.clear_match_highlight();
                match process_prompt_keypress(&mut state.query, key) {
                    PromptState::Active => {
                        let (last_match, forward) = match key {
                            Key::Arrow(Direction::Right | Direction::Down) | Key::Char(FIND) =>
                                (state.last_match, true),
                            Key::Arrow(Direction::Left | Direction::Up) => (state.last_match, false),
                            _ => (None, true),
                        };
                        state.last_match = self.find(&state.query, last_match, forward);
                        self.mode = Some(Mode::Find(state));
                    }
                    PromptState::Cancelled => self.viewport = state.saved_viewport,
                    PromptState::Completed => (),
                }
            }
        }
        Ok(())
    }

    /// Load `file_name` if given, then run the render/input loop until the
    /// user quits.
    ///
    /// # Errors
    ///
    /// Returns `Err` on any terminal or file I/O failure.
    pub fn run(&mut self, file_name: Option<String>) -> Result<(), Error> {
        if let Some(name) = file_name {
            let path = sys::path(&name);
            self.document.select_syntax(path.as_path());
            let bytes = file_store::load(path.as_path())?;
            self.document.set_contents(&bytes);
            self.document.filename = Some(name);
        }
        loop {
            if sys::has_window_size_changed() {
                self.update_window_size()?;
            }
            if let Some(mode) = &self.mode {
                self.status = Some(StatusMessage::new(mode.status_text()));
            }
            self.viewport.scroll(&self.document);
            let cursor_target = match &self.mode {
                None => CursorTarget::Document,
                Some(mode) => CursorTarget::Prompt(mode.status_text().len()),
            };
            render::refresh_screen(&self.document, &self.viewport, &self.config, self.status.as_ref(), &cursor_target)?;

            let key = input::next_key()?;
            if self.mode.is_some() {
                self.handle_prompt_key(&key)?;
            } else if self.process_keypress(&key) {
                return Ok(());
            }
        }
    }
}

impl Drop for Editor {
    /// Restore the original terminal mode and clear the screen.
    fn drop(&mut self) {
        if let Some(orig_term_mode) = self.orig_term_mode.take() {
            sys::set_term_mode(&orig_term_mode).expect("could not restore original terminal mode");
        }
        if !thread::panicking() {
            print!("{CLEAR_SCREEN}{MOVE_CURSOR_TO_START}");
            let _ = std::io::Write::flush(&mut std::io::stdout());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_char_appends_and_marks_dirty() {
        let mut editor = Editor::default();
        for b in b"XYZ" {
            editor.insert_char(*b);
        }
        assert_eq!(editor.viewport.cx, 3);
        assert_eq!(editor.document.rows[0].chars, b"XYZ");
        assert!(editor.document.dirty > 0);
    }

    #[test]
    fn insert_newline_splits_rows() {
        let mut editor = Editor::default();
        for _ in 0..3 {
            editor.insert_newline();
        }
        assert_eq!(editor.viewport.cy, 3);
        assert_eq!(editor.document.rows.len(), 3);
    }

    #[test]
    fn delete_char_removes_last_inserted_byte() {
        let mut editor = Editor::default();
        for b in b"Hello" {
            editor.insert_char(*b);
        }
        editor.delete_char();
        assert_eq!(editor.document.rows[0].chars, b"Hell");
    }

    #[test]
    fn ctrl_q_quits_immediately_when_clean() {
        let mut editor = Editor::default();
        editor.quit_times = editor.config.quit_times;
        assert!(editor.process_keypress(&Key::Char(EXIT)));
    }

    #[test]
    fn ctrl_q_warns_before_quitting_when_dirty() {
        let mut editor = Editor::default();
        editor.quit_times = editor.config.quit_times;
        editor.insert_char(b'x');
        assert!(!editor.process_keypress(&Key::Char(EXIT)));
        assert!(editor.status.is_some());
    }

    #[test]
    fn find_locates_query_and_overlays_match_highlight() {
        let mut editor = Editor::default();
        editor.document.set_contents(b"hello\nworld\n");
        let found = editor.find(b"world", None, true);
        assert_eq!(found, Some(1));
        assert_eq!(editor.viewport.cy, 1);
        assert_eq!(editor.viewport.cx, 0);
        assert!(editor.document.rows[1].hl[0..5].iter().all(|&h| h == HlType::Match));
        editor.clear_match_highlight();
        assert!(editor.match_overlay.is_none());
    }

    #[test]
    fn find_matches_rendered_tabs_and_forces_recentre() {
        let mut editor = Editor::default();
        editor.document.set_contents(b"a\tbc");
        editor.viewport.rowoff = 0;
        let found = editor.find(b" bc", None, true);
        assert_eq!(found, Some(0));
        assert_eq!(editor.viewport.cx, 1);
        assert_eq!(editor.viewport.rowoff, editor.document.rows.len());
    }

    #[test]
    fn ctrl_f_opens_find_prompt() {
        let mut editor = Editor::default();
        assert!(!editor.process_keypress(&Key::Char(FIND)));
        assert!(matches!(editor.mode, Some(Mode::Find(_))));
    }

    #[test]
    fn return_on_empty_save_prompt_aborts_without_saving() {
        let mut editor = Editor::default();
        editor.mode = Some(Mode::Save(Vec::new()));
        editor.handle_prompt_key(&Key::Char(b'\r')).unwrap();
        assert!(editor.mode.is_none());
        assert!(editor.document.filename.is_none());
        assert_eq!(editor.status.as_ref().map(|s| s.text.as_str()), Some("Save aborted"));
    }
}
