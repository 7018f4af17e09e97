//! Configuration primitives for the Assembly Insight site toolchain.
//!
//! Stored in a machine-readable TOML file located at:
//!   %APPDATA%/AssemblyInsight/config/config.toml on Windows
//!   $XDG_DATA_HOME/AssemblyInsight/config/config.toml on Linux
//!   ~/Library/Application Support/AssemblyInsight/config/config.toml on macOS
//!
//! The config tracks which record source feeds the page build and the
//! per-install export limits (news/video caps, keyword count, trend window).

use serde::{Deserialize, Serialize};

/// Root configuration persisted per installation.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Build pipeline options (record source, output naming, parallelism).
    #[serde(default)]
    pub build: BuildSettings,
    /// Export step options (list caps, keyword count, trend window).
    #[serde(default)]
    pub export: ExportSettings,
}

/// Where member records come from when building detail pages.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SourceMode {
    /// Flat scan of the per-member JSON export directory.
    Files,
    /// Join of the policy/analysis collection against the profile collection.
    Join,
}

impl Default for SourceMode {
    fn default() -> Self {
        SourceMode::Files
    }
}

impl SourceMode {
    /// The output-naming scheme each mode historically shipped with.
    pub fn default_naming(self) -> NamingScheme {
        match self {
            SourceMode::Files => NamingScheme::MemberId,
            SourceMode::Join => NamingScheme::DisplayName,
        }
    }
}

/// How rendered page files are keyed on disk.
///
/// Identifier-keyed naming is collision-free. Display-name naming can collide
/// when two members share a name; the builder flags collisions but keeps the
/// historical behavior.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NamingScheme {
    MemberId,
    DisplayName,
}

/// Build-related preferences tied to the local install.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildSettings {
    /// Record source used when no mode is given on the command line.
    #[serde(default)]
    pub source_mode: SourceMode,
    /// Output naming override; when absent the mode default applies.
    #[serde(default)]
    pub naming: Option<NamingScheme>,
    /// Maximum number of pages rendered concurrently.
    #[serde(default = "default_max_parallel_renders")]
    pub max_parallel_renders: u32,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            source_mode: SourceMode::default(),
            naming: None,
            max_parallel_renders: default_max_parallel_renders(),
        }
    }
}

impl BuildSettings {
    /// Naming scheme in effect for the given mode.
    pub fn effective_naming(&self, mode: SourceMode) -> NamingScheme {
        self.naming.unwrap_or_else(|| mode.default_naming())
    }
}

const fn default_max_parallel_renders() -> u32 {
    4
}

/// Export step limits mirroring the upstream data pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportSettings {
    /// Newest news items kept per member.
    #[serde(default = "default_news_limit")]
    pub news_limit: u32,
    /// Newest videos kept per member.
    #[serde(default = "default_video_limit")]
    pub video_limit: u32,
    /// Keywords kept per member after frequency ranking.
    #[serde(default = "default_keyword_limit")]
    pub keyword_limit: u32,
    /// Days covered by the news trend series, ending today.
    #[serde(default = "default_trend_window_days")]
    pub trend_window_days: u32,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            news_limit: default_news_limit(),
            video_limit: default_video_limit(),
            keyword_limit: default_keyword_limit(),
            trend_window_days: default_trend_window_days(),
        }
    }
}

const fn default_news_limit() -> u32 {
    30
}

const fn default_video_limit() -> u32 {
    20
}

const fn default_keyword_limit() -> u32 {
    15
}

const fn default_trend_window_days() -> u32 {
    7
}

/// Standard relative path to the config file (resolved per OS at runtime).
pub const CONFIG_FILE_NAME: &str = "config.toml";

use anyhow::{Context, Result};
use directories::BaseDirs;
use std::env;
use std::fs;
use std::path::PathBuf;

use super::layout::{
    COLLECTIONS_SUBDIR, DATA_EXPORT_SUBDIR, DETAILS_SUBDIR, TEMPLATES_SUBDIR,
};

/// Returns the root directory where Assembly Insight stores data.
///
/// Order of precedence:
/// 1. `ASSEMBLY_INSIGHT_HOME` environment variable.
/// 2. OS-specific data directory via `directories::BaseDirs`.
pub fn workspace_root() -> Result<PathBuf> {
    if let Ok(path) = env::var("ASSEMBLY_INSIGHT_HOME") {
        return Ok(PathBuf::from(path));
    }
    let base_dirs = BaseDirs::new().context("Unable to determine OS data directory")?;
    Ok(base_dirs.data_dir().join("AssemblyInsight"))
}

/// Returns the config directory under the workspace root.
pub fn config_dir() -> Result<PathBuf> {
    let root = workspace_root()?;
    Ok(root.join("config"))
}

/// Path to the config file.
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Loads the configuration from disk or returns defaults.
pub fn load_or_default() -> Result<AppConfig> {
    let path = config_file_path()?;
    if path.exists() {
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let cfg: AppConfig = toml::from_str(&data)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        Ok(cfg)
    } else {
        Ok(AppConfig::default())
    }
}

/// Persists the configuration to disk.
pub fn save(config: &AppConfig) -> Result<()> {
    let dir = config_dir()?;
    fs::create_dir_all(&dir)?;
    let path = config_file_path()?;
    let data = toml::to_string_pretty(config)?;
    fs::write(&path, data)?;
    Ok(())
}

/// Ensures the workspace structure exists (export, details, collections,
/// templates directories).
pub fn ensure_workspace_structure() -> Result<SitePaths> {
    let root = workspace_root()?;
    let data_export_dir = root.join(DATA_EXPORT_SUBDIR);
    let details_dir = root.join(DETAILS_SUBDIR);
    let collections_dir = root.join(COLLECTIONS_SUBDIR);
    let templates_dir = root.join(TEMPLATES_SUBDIR);
    fs::create_dir_all(&data_export_dir)?;
    fs::create_dir_all(&details_dir)?;
    fs::create_dir_all(&collections_dir)?;
    fs::create_dir_all(&templates_dir)?;
    Ok(SitePaths {
        root,
        data_export_dir,
        details_dir,
        collections_dir,
        templates_dir,
    })
}

/// Convenience struct exposing important workspace paths.
#[derive(Debug, Clone)]
pub struct SitePaths {
    pub root: PathBuf,
    pub data_export_dir: PathBuf,
    pub details_dir: PathBuf,
    pub collections_dir: PathBuf,
    pub templates_dir: PathBuf,
}
