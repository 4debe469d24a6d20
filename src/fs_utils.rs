//! Filesystem utility functions
//!
//! Atomic replacement of the AWS files: contents are staged into a sibling
//! temporary file and only renamed over the target on commit.

use anyhow::{Context, Result};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// A fully written temporary file waiting to replace its target
///
/// Dropping an uncommitted write removes the temporary file and leaves the
/// target untouched.
#[derive(Debug)]
pub struct StagedWrite {
    temp_path: PathBuf,
    target: PathBuf,
    committed: bool,
}

impl StagedWrite {
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Rename the staged file over its target
    pub fn commit(mut self) -> Result<()> {
        fs::rename(&self.temp_path, &self.target).with_context(|| {
            format!(
                "Failed to replace {:?} with {:?}",
                self.target, self.temp_path
            )
        })?;
        self.committed = true;
        log::debug!("wrote {}", self.target.display());
        Ok(())
    }
}

impl Drop for StagedWrite {
    fn drop(&mut self) {
        if !self.committed {
            let _ = fs::remove_file(&self.temp_path);
        }
    }
}

/// Path of the temporary file used while replacing `target`
pub fn temp_path_for(target: &Path) -> PathBuf {
    let mut name = target
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    target.with_file_name(name)
}

/// Write `contents` next to `target` without touching `target` itself
///
/// The temporary file is created fresh (a leftover one, or a symlink in its
/// place, is removed first) with the permission bits of `target`, or `0600`
/// when `target` does not exist, before any byte is written. It is synced to
/// disk before returning.
///
/// # Errors
/// Returns an error if the temporary file cannot be created, written, or synced.
pub fn stage_write(target: &Path, contents: &str) -> Result<StagedWrite> {
    let temp_path = temp_path_for(target);
    match fs::remove_file(&temp_path) {
        Ok(()) => log::debug!("removed stale {}", temp_path.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => {
            return Err(e)
                .with_context(|| format!("Failed to remove stale temp file: {:?}", temp_path));
        }
    }

    let permissions = fs::metadata(target).ok().map(|meta| meta.permissions());
    let mut file = open_private(&temp_path, permissions.as_ref())
        .with_context(|| format!("Failed to create temp file: {:?}", temp_path))?;

    let staged = StagedWrite {
        temp_path,
        target: target.to_path_buf(),
        committed: false,
    };

    // umask may have narrowed the creation mode
    if let Some(permissions) = permissions {
        fs::set_permissions(&staged.temp_path, permissions).with_context(|| {
            format!("Failed to copy permissions onto {:?}", staged.temp_path)
        })?;
    }

    file.write_all(contents.as_bytes())
        .with_context(|| format!("Failed to write temp file: {:?}", staged.temp_path))?;
    file.sync_all()
        .with_context(|| format!("Failed to sync temp file: {:?}", staged.temp_path))?;

    Ok(staged)
}

#[cfg(unix)]
fn open_private(path: &Path, permissions: Option<&fs::Permissions>) -> std::io::Result<File> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let mode = permissions.map_or(0o600, |p| p.mode() & 0o777);
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .mode(mode)
        .open(path)
}

#[cfg(not(unix))]
fn open_private(path: &Path, _permissions: Option<&fs::Permissions>) -> std::io::Result<File> {
    OpenOptions::new().write(true).create_new(true).open(path)
}

/// Replace `target` with `contents` in one rename
pub fn write_atomic(target: &Path, contents: &str) -> Result<()> {
    stage_write(target, contents)?.commit()
}
