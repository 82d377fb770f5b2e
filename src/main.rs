//! # tersed

use tersed::{Config, Editor, Error};

/// Initialize the editor and run the program, optionally opening a file if an
/// argument is given.
///
/// # Errors
///
/// Any error that occurs during the execution of the program is returned by
/// this function.
fn main() -> Result<(), Error> {
    let mut args = std::env::args();
    match (args.nth(1), /* remaining_args= */ args.len()) {
        (file_name, 0) => Editor::new(Config::load())?.run(file_name)?,
        (_, n_remaining_args) => return Err(Error::TooManyArguments(n_remaining_args + 1)),
    }
    Ok(())
}
