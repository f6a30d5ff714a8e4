use std::fs;
use std::io::{self, Write};
use std::path::Path;

use log::debug;
use tempfile::NamedTempFile;

/// Replace the file at `path` with `content` in a single rename.
///
/// The temporary file is created next to `path` so the rename never crosses a
/// file system. Readers see either the old content or the new, never a mix.
pub(crate) fn write_file(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));

    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(content)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|err| err.error)?;

    debug!("wrote {}", path.display());
    Ok(())
}

/// Like `write_file`, but skip the write if `path` already holds `content`.
pub(crate) fn write_file_if_changed(path: &Path, content: &[u8]) -> io::Result<()> {
    match fs::read(path) {
        Ok(existing) if existing == content => Ok(()),
        Ok(_) => write_file(path, content),
        Err(err) if err.kind() == io::ErrorKind::NotFound => write_file(path, content),
        Err(err) => Err(err),
    }
}
