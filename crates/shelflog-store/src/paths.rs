use anyhow::Result;
use std::path::{Path, PathBuf};

/// Get the data directory override from the environment, if set.
pub fn env_data_dir() -> Option<PathBuf> {
    std::env::var("SHELFLOG_DATA_DIR").ok().map(PathBuf::from)
}

/// Resolves where shelflog keeps its per-profile state.
pub struct ShelfPaths {
    data_dir: PathBuf,
}

impl ShelfPaths {
    pub fn new() -> Result<Self> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?
            .join("shelflog");
        Ok(Self { data_dir })
    }

    /// Root all state under an explicit directory (tests, `--data-dir`).
    pub fn with_base(base: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: base.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn key_file(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", key))
    }

    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.data_dir)?;
        Ok(())
    }
}

impl Default for ShelfPaths {
    fn default() -> Self {
        if let Some(base) = env_data_dir() {
            return Self::with_base(base);
        }
        Self::new().unwrap_or_else(|_| Self::with_base("."))
    }
}
