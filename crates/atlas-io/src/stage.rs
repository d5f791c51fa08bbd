//! Staged file writes.
//!
//! Export output lands in a temp file beside the target and is
//! renamed into place only once complete, so a failed export never
//! leaves a readable partial file behind.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{IoError, IoResult};

/// Write `bytes` into an unnamed staging file in the target's
/// directory.
///
/// Dropping the returned handle removes the staging file; call
/// [`persist`] to move it onto the target path.
pub(crate) fn stage(target: &Path, bytes: &[u8]) -> IoResult<NamedTempFile> {
    let dir = target
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut staged = NamedTempFile::new_in(dir)?;
    staged.write_all(bytes)?;
    staged.flush()?;
    Ok(staged)
}

/// Rename a staged file onto its target path.
pub(crate) fn persist(staged: NamedTempFile, target: &Path) -> IoResult<()> {
    staged.persist(target).map_err(|e| IoError::Io(e.error))?;
    Ok(())
}
