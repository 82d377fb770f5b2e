//! # Errors

/// Error type for tersed. `main` returns `Result<(), Error>`, so the default
/// `Termination` impl prints `Error: {:?}` to stderr and exits with code 1 for
/// any `Err`.
#[derive(Debug)]
pub enum Error {
    /// Wrapper around `std::io::Error`: covers terminal setup/teardown, reads
    /// and writes on stdin/stdout, and file loading.
    Io(std::io::Error),
    /// The window size obtained through a system call or the cursor-position
    /// probe was invalid (zero rows or columns).
    InvalidWindowSize,
    /// The cursor position report (`ESC [ r ; c R`) could not be parsed.
    CursorPosition,
    /// More than one command-line argument was given.
    TooManyArguments(usize),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self { Self::Io(err) }
}
