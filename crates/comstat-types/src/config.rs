//! Runtime configuration loaded from `comstat.toml`.
//!
//! Every key is optional. A missing file means "all defaults":
//!
//! ```toml
//! prompt = "ComStat> "
//! music_file = "musics/music.wav"
//! help_file = "web/index.html"
//! log_file = "logs/log.csv"
//! statistics_file = "logs/statistics.csv"
//! monitor_interval_ms = 1000
//! sysfs_root = "/"
//! audio_player = ["aplay", "-q"]
//! document_opener = ["xdg-open"]
//! show_banner = true
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{ComstatError, Result};

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "comstat.toml";

/// ComStat runtime configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ComstatConfig {
    /// Prompt printed before each input line.
    #[serde(default = "default_prompt")]
    pub prompt: String,
    /// Audio asset played by `musicon`.
    #[serde(default = "default_music_file")]
    pub music_file: PathBuf,
    /// Help document opened by `help`.
    #[serde(default = "default_help_file")]
    pub help_file: PathBuf,
    /// Append-only log written by the continuous monitor.
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
    /// Append-only statistics file written by `save`.
    #[serde(default = "default_statistics_file")]
    pub statistics_file: PathBuf,
    /// Continuous monitor polling interval in milliseconds.
    #[serde(default = "default_monitor_interval_ms")]
    pub monitor_interval_ms: u64,
    /// Root under which `/proc`, `/sys` and `/etc` are read.
    #[serde(default = "default_sysfs_root")]
    pub sysfs_root: PathBuf,
    /// Player command (argv); the music file path is appended.
    #[serde(default = "default_audio_player")]
    pub audio_player: Vec<String>,
    /// Document opener command (argv); the help file path is appended.
    #[serde(default = "default_document_opener")]
    pub document_opener: Vec<String>,
    /// Whether the ASCII banner is printed at startup.
    #[serde(default = "yes")]
    pub show_banner: bool,
}

fn default_prompt() -> String {
    "ComStat> ".to_string()
}
fn default_music_file() -> PathBuf {
    PathBuf::from("musics/music.wav")
}
fn default_help_file() -> PathBuf {
    PathBuf::from("web/index.html")
}
fn default_log_file() -> PathBuf {
    PathBuf::from("logs/log.csv")
}
fn default_statistics_file() -> PathBuf {
    PathBuf::from("logs/statistics.csv")
}
fn default_monitor_interval_ms() -> u64 {
    1000
}
fn default_sysfs_root() -> PathBuf {
    PathBuf::from("/")
}
fn default_audio_player() -> Vec<String> {
    vec!["aplay".to_string(), "-q".to_string()]
}
fn default_document_opener() -> Vec<String> {
    if cfg!(target_os = "macos") {
        vec!["open".to_string()]
    } else if cfg!(target_os = "windows") {
        vec!["explorer".to_string()]
    } else {
        vec!["xdg-open".to_string()]
    }
}
fn yes() -> bool {
    true
}

impl Default for ComstatConfig {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            music_file: default_music_file(),
            help_file: default_help_file(),
            log_file: default_log_file(),
            statistics_file: default_statistics_file(),
            monitor_interval_ms: default_monitor_interval_ms(),
            sysfs_root: default_sysfs_root(),
            audio_player: default_audio_player(),
            document_opener: default_document_opener(),
            show_banner: true,
        }
    }
}

impl ComstatConfig {
    /// Parse a config from TOML text and validate it.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`, falling back to defaults when the file is absent.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            log::info!("{} not found -- using default configuration", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&text)?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Monitor polling interval.
    pub fn monitor_interval(&self) -> Duration {
        Duration::from_millis(self.monitor_interval_ms)
    }

    fn validate(&self) -> Result<()> {
        if self.monitor_interval_ms == 0 {
            return Err(ComstatError::Config(
                "monitor_interval_ms must be greater than zero".to_string(),
            ));
        }
        if self.audio_player.is_empty() {
            return Err(ComstatError::Config(
                "audio_player must name a program".to_string(),
            ));
        }
        if self.document_opener.is_empty() {
            return Err(ComstatError::Config(
                "document_opener must name a program".to_string(),
            ));
        }
        Ok(())
    }
}
