//! # tersed
//!
//! A minimalist terminal text editor.

pub use crate::{config::Config, editor::Editor, error::Error};

/// Exposed only so the `fuzz/` workspace member can drive the highlighter
/// without reaching into private modules.
pub mod fuzz {
    use crate::row::Row;
    use crate::syntax::SYNTAX_RULES;

    /// Run the incremental highlighter over arbitrary bytes, picking a
    /// syntax rule (or none) from the first byte of `data`.
    pub fn highlight_does_not_panic(data: &[u8]) {
        let Some((&selector, rest)) = data.split_first() else { return };
        let rule = usize::from(selector)
            .checked_rem(SYNTAX_RULES.len() + 1)
            .and_then(|i| SYNTAX_RULES.get(i));
        let mut row = Row::new(rest.to_vec());
        row.update(8, rule);
        assert_eq!(row.hl.len(), row.render().len(), "highlight codes must cover every rendered byte");
    }
}

pub mod ansi_escape;
mod buffer;
mod config;
mod document;
mod editor;
mod error;
mod file_store;
mod input;
mod render;
mod row;
mod syntax;
mod terminal;
mod viewport;

#[cfg(windows)] mod windows;
#[cfg(windows)] use windows as sys;

#[cfg(unix)] mod unix;
#[cfg(unix)] use unix as sys;

#[cfg(target_os = "wasi")] mod wasi;
#[cfg(target_os = "wasi")] use wasi as sys;
