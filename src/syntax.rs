//! # Syntax
//!
//! Static syntax-highlighting rules, selected by file extension. These are
//! not loaded from files on disk: there is no persistent, user-editable
//! configuration, so every rule is a `const` table baked into the binary.

use std::fmt::{self, Display, Formatter};

/// Type of syntax highlighting for a single rendered byte.
///
/// Each `HlType` is associated with a color, via its discriminant, following
/// the ANSI SGR codes described here:
/// <https://en.wikipedia.org/wiki/ANSI_escape_code#Colors>
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HlType {
    Normal = 39,   // Default foreground color
    Number = 31,   // Red
    Match = 34,    // Blue
    Comment = 36,  // Cyan
    Keyword2 = 32, // Green
    String = 35,   // Magenta
    Keyword1 = 33, // Yellow
}

impl Display for HlType {
    /// Write the ANSI color escape sequence for the `HlType` using the given
    /// formatter.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result { write!(f, "\x1b[{}m", *self as u32) }
}

/// Static syntax-highlighting rule for one file type, selected by extension.
///
/// A keyword listed in `keyword2` is distinguished from one in `keyword1`
/// only by the highlight it receives; the split mirrors the source data's `|`
/// suffix convention (a keyword ending in `|` belongs to the second class).
#[derive(Clone, Copy, Debug)]
pub struct SyntaxRule {
    /// The name of the language, e.g. "Rust", shown in the status bar.
    pub filetype: &'static str,
    /// File extensions that select this rule, without the leading dot.
    pub extensions: &'static [&'static str],
    /// Primary keywords (types, control flow).
    pub keyword1: &'static [&'static str],
    /// Secondary keywords (built-in values, common type names).
    pub keyword2: &'static [&'static str],
    /// The token that starts a single-line comment, e.g. "//", if any.
    pub line_comment_prefix: Option<&'static str>,
    /// Whether to highlight numeric literals.
    pub highlight_numbers: bool,
    /// Whether to highlight single/double-quoted strings.
    pub highlight_strings: bool,
}

/// Static table of known syntax rules, tried in order.
pub static SYNTAX_RULES: &[SyntaxRule] = &[
    SyntaxRule {
        filetype: "Rust",
        extensions: &["rs"],
        keyword1: &[
            "as", "break", "const", "continue", "crate", "dyn", "else", "enum", "extern", "fn",
            "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub", "ref",
            "return", "self", "Self", "static", "struct", "super", "trait", "type", "unsafe",
            "use", "where", "while",
        ],
        keyword2: &[
            "bool", "char", "str", "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32",
            "u64", "u128", "usize", "f32", "f64", "true", "false", "Some", "None", "Ok", "Err",
        ],
        line_comment_prefix: Some("//"),
        highlight_numbers: true,
        highlight_strings: true,
    },
    SyntaxRule {
        filetype: "C",
        extensions: &["c", "h"],
        keyword1: &[
            "switch", "if", "while", "for", "break", "continue", "return", "else", "struct",
            "union", "typedef", "static", "enum", "case", "do", "goto", "sizeof", "default",
            "const", "extern",
        ],
        keyword2: &[
            "int", "long", "double", "float", "char", "unsigned", "signed", "void", "short",
        ],
        line_comment_prefix: Some("//"),
        highlight_numbers: true,
        highlight_strings: true,
    },
    SyntaxRule {
        filetype: "Python",
        extensions: &["py"],
        keyword1: &[
            "and", "as", "assert", "break", "class", "continue", "def", "del", "elif", "else",
            "except", "finally", "for", "from", "global", "if", "import", "in", "is", "lambda",
            "nonlocal", "not", "or", "pass", "raise", "return", "try", "while", "with", "yield",
        ],
        keyword2: &["None", "True", "False", "self"],
        line_comment_prefix: Some("#"),
        highlight_numbers: true,
        highlight_strings: true,
    },
];

/// Find the syntax rule whose extension list contains the given extension
/// (without the leading dot), if any.
#[must_use]
pub fn find(extension: &str) -> Option<&'static SyntaxRule> {
    SYNTAX_RULES.iter().find(|rule| rule.extensions.contains(&extension))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::rust("rs", "Rust")]
    #[case::c_source("c", "C")]
    #[case::c_header("h", "C")]
    #[case::python("py", "Python")]
    fn finds_rule_by_extension(#[case] extension: &str, #[case] filetype: &str) {
        let rule = find(extension).expect("extension should select a rule");
        assert_eq!(rule.filetype, filetype);
    }

    #[test]
    fn unknown_extension_has_no_rule() {
        assert!(find("xyz123").is_none());
    }

    #[test]
    fn rust_rule_recognises_fn_keyword() {
        let rule = find("rs").expect("rs should select the Rust rule");
        assert!(rule.keyword1.contains(&"fn"));
    }

    #[rstest]
    #[case::normal(HlType::Normal, "\x1b[39m")]
    #[case::keyword1(HlType::Keyword1, "\x1b[33m")]
    #[case::string(HlType::String, "\x1b[35m")]
    fn hltype_display_matches_discriminant(#[case] hl: HlType, #[case] expected: &str) {
        assert_eq!(hl.to_string(), expected);
    }
}
