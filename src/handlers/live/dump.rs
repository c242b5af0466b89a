use std::io::Write;
use std::path::{Path, PathBuf};

/// Prefix of every dumped server message file.
pub const DUMP_PREFIX: &str = "livestream";

/// Write one serialized server message to a fresh `livestream*` file in `dir`.
///
/// The file is kept on disk; its path is returned.
pub fn dump_message(dir: &Path, json: &[u8]) -> std::io::Result<PathBuf> {
    let mut file = tempfile::Builder::new()
        .prefix(DUMP_PREFIX)
        .tempfile_in(dir)?;
    file.write_all(json)?;
    let (_, path) = file.keep().map_err(|e| e.error)?;
    Ok(path)
}
