//! # FileStore
//!
//! Narrow load/save functions, decoupled from `Document`: strip trailing
//! `\r`/`\n` per line on load, and write each row followed by a single `\n`
//! on save.

use std::fs::File;
use std::io::{ErrorKind, Read, Write};
use std::path::Path;

use crate::Error;

/// Load the bytes of `path`. If the file does not exist, returns an empty
/// buffer rather than an error, so a missing file opens as a new, empty
/// document.
pub(crate) fn load(path: &Path) -> Result<Vec<u8>, Error> {
    let mut bytes = Vec::new();
    match File::open(path) {
        Ok(mut file) => {
            file.read_to_end(&mut bytes)?;
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }
    Ok(bytes)
}

/// Write `bytes` to `path`, creating it (mode 0644) if absent and truncating
/// it to exactly `bytes.len()`. Returns the number of bytes written.
pub(crate) fn save(path: &Path, bytes: &[u8]) -> Result<usize, Error> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()?;
    Ok(bytes.len())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn missing_file_loads_as_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("does-not-exist");
        assert_eq!(load(&path).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("roundtrip.txt");
        let contents = b"hello\nworld\n";
        save(&path, contents).unwrap();
        assert_eq!(load(&path).unwrap(), contents);
    }
}
