use anyhow::{Context, Result};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::path::Path;

/// Exclusive advisory lock held while the default profile is being rewritten
///
/// Only `set` takes it; readers never block.
pub struct ProfileLock {
    file: File,
}

impl ProfileLock {
    /// Open (creating if needed) and lock the lock file, blocking until it is free
    pub fn acquire(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .with_context(|| format!("Failed to open lock file: {:?}", path))?;

        file.lock_exclusive()
            .with_context(|| format!("Failed to lock {:?}", path))?;
        log::debug!("acquired {}", path.display());

        Ok(Self { file })
    }
}

impl Drop for ProfileLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}
