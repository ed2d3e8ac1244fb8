use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use crate::health::logfile::LogfileWriterSink;

/// Where and how the logfile sink writes
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Logfile location (supports ~ and $VARS)
    pub path: PathBuf,
    /// Append to an existing file instead of truncating it
    pub append: bool,
    /// Create missing parent directories on open
    pub create_dirs: bool,
}

impl Default for Config {
    fn default() -> Self {
        let log_dir = dirs::data_local_dir()
            .map(|dir| dir.join("joblog"))
            .unwrap_or_else(|| PathBuf::from("."));

        Self {
            path: log_dir.join("jobs.log"),
            append: true,
            create_dirs: true,
        }
    }
}

impl Config {
    /// Load configuration from an explicit file, or fall back to defaults
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        match config_path {
            Some(path) => {
                Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()))
            }
            None => {
                log::info!("No config file given, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Expand a path that may contain ~ or env vars
    pub fn expand_path(path: &Path) -> PathBuf {
        let path_str = path.to_string_lossy();
        let expanded = shellexpand::full(&path_str).unwrap_or_else(|_| path_str.clone());
        PathBuf::from(expanded.as_ref())
    }

    /// Open the configured logfile and wrap it in a sink
    pub fn open_sink(&self) -> Result<LogfileWriterSink<File>> {
        let path = Self::expand_path(&self.path);

        if self.create_dirs
            && let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty())
        {
            fs::create_dir_all(parent).context(format!("Failed to create log directory {}", parent.display()))?;
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .append(self.append)
            .truncate(!self.append)
            .open(&path)
            .context(format!("Failed to open log file {}", path.display()))?;

        log::debug!("Opened job log: {} (append: {})", path.display(), self.append);
        Ok(LogfileWriterSink::new(file))
    }
}
