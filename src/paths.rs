use anyhow::{Context, Result};
use directories::BaseDirs;
use std::path::{Path, PathBuf};

/// All computed paths used by awsprof
#[derive(Debug, Clone)]
pub struct AwsPaths {
    /// ~/.aws
    pub aws_dir: PathBuf,
    /// ~/.aws/credentials
    pub credentials: PathBuf,
    /// ~/.aws/config
    pub config: PathBuf,
    /// ~/.aws/.awsprof.lock
    pub lock_file: PathBuf,
}

impl AwsPaths {
    pub fn new() -> Result<Self> {
        let base_dirs = BaseDirs::new().context("Failed to determine home directory")?;
        Ok(Self::in_dir(base_dirs.home_dir().join(".aws")))
    }

    /// Lay out the AWS files under an arbitrary directory
    pub fn in_dir(aws_dir: impl Into<PathBuf>) -> Self {
        let aws_dir = aws_dir.into();
        let credentials = aws_dir.join("credentials");
        let config = aws_dir.join("config");
        let lock_file = aws_dir.join(".awsprof.lock");

        Self {
            aws_dir,
            credentials,
            config,
            lock_file,
        }
    }

    /// Short name used in user messages for one of the two managed files
    pub fn file_label(&self, path: &Path) -> &'static str {
        if path == self.credentials {
            "credentials"
        } else {
            "config"
        }
    }
}
