use anyhow::Result;
use std::path::{Path, PathBuf};

pub struct PathManager {
    config_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("showreel");
        Ok(Self { config_dir })
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn catalog_file(&self) -> PathBuf {
        self.config_dir.join("catalog.toml")
    }
}

/// Where to read the catalog seed from when no path is given on the command
/// line: `SHOWREEL_CATALOG` if set, otherwise the platform config dir
/// (e.g. `~/.config/showreel/catalog.toml` on Linux).
pub fn default_catalog_file() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("SHOWREEL_CATALOG") {
        return Ok(PathBuf::from(path));
    }
    Ok(PathManager::new()?.catalog_file())
}
