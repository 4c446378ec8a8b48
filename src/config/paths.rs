use std::fs;
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;

use crate::error::Result;

/// Manages paths for appshelf configuration and cached data
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root configuration directory (~/.appshelf)
    pub root: PathBuf,
    /// Configuration file path (~/.appshelf/config.toml)
    pub config_file: PathBuf,
    /// Cache directory (~/.appshelf/cache)
    pub cache_dir: PathBuf,
}

impl Paths {
    /// Create a new Paths instance using the user's home directory
    pub fn new() -> Result<Self> {
        let home = std::env::var("HOME")?;
        let root = PathBuf::from(home).join(".appshelf");

        Ok(Self {
            config_file: root.join("config.toml"),
            cache_dir: root.join("cache"),
            root,
        })
    }

    /// Ensure the configuration directories exist with proper permissions
    pub fn ensure_dirs(&self) -> Result<()> {
        fs::create_dir_all(&self.root)?;
        fs::create_dir_all(&self.cache_dir)?;

        // Restrict to the owner (700)
        #[cfg(unix)]
        {
            let perms = fs::Permissions::from_mode(0o700);
            fs::set_permissions(&self.root, perms)?;
        }

        Ok(())
    }

    /// Check if the config file exists
    pub fn config_exists(&self) -> bool {
        self.config_file.exists()
    }
}

impl Default for Paths {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| Self {
            root: PathBuf::from(".appshelf"),
            config_file: PathBuf::from(".appshelf/config.toml"),
            cache_dir: PathBuf::from(".appshelf/cache"),
        })
    }
}
