//! Writing output files without clobbering existing ones.

use std::io::Write;
use std::path::Path;

use tempfile::{Builder, NamedTempFile};

use crate::error::{Error, Result};

/// Fail early if `path` exists and may not be replaced.
pub fn ensure_writable(path: &Path, overwrite: bool) -> Result<()> {
    if !overwrite && path.exists() {
        return Err(Error::OutputExists(path.to_path_buf()));
    }
    Ok(())
}

/// Temporary file beside `path`, so the final rename stays on one filesystem.
pub fn temp_beside(path: &Path) -> Result<NamedTempFile> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    Ok(Builder::new()
        .prefix(".pdf-reduce-")
        .suffix(".pdf")
        .tempfile_in(dir)?)
}

/// Move a finished temporary file into place.
///
/// Without `overwrite` the rename fails if the destination appeared in the
/// meantime; the temporary file is removed either way.
pub fn persist(temp: NamedTempFile, path: &Path, overwrite: bool) -> Result<()> {
    let result = if overwrite {
        temp.persist(path)
    } else {
        temp.persist_noclobber(path)
    };

    match result {
        Ok(_) => Ok(()),
        Err(e) if e.error.kind() == std::io::ErrorKind::AlreadyExists => {
            Err(Error::OutputExists(path.to_path_buf()))
        }
        Err(e) => Err(Error::Io(e.error)),
    }
}

/// Write `bytes` to `path` through a temporary file.
pub fn write_output(path: &Path, bytes: &[u8], overwrite: bool) -> Result<()> {
    ensure_writable(path, overwrite)?;
    let mut temp = temp_beside(path)?;
    temp.write_all(bytes)?;
    temp.as_file().sync_all()?;
    persist(temp, path, overwrite)
}
