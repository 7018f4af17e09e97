mod config;
pub mod layout;

pub use config::{
    config_file_path, ensure_workspace_structure, load_or_default, save, workspace_root,
    AppConfig, BuildSettings, ExportSettings, NamingScheme, SitePaths, SourceMode,
};
pub use layout::SiteLayout;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Party shown when a member has no current party affiliation.
pub const FALLBACK_PARTY: &str = "무소속";
/// Region shown for at-large members without a district.
pub const FALLBACK_REGION: &str = "비례대표";
/// Photo used when the profile carries no portrait path.
pub const FALLBACK_PHOTO: &str = "/images/default_profile.png";
/// Summary sentence shown before any analysis has been produced.
pub const FALLBACK_SUMMARY: &str = "아직 수집된 정책 요약이 없습니다.";

/// Canonical per-member record consumed by the template renderer.
///
/// Constructed fresh on every build run, never mutated afterwards, and
/// discarded once its page is rendered. The `id` is the stable member code;
/// records without one never reach this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberRecord {
    pub id: String,
    pub name: String,
    pub party_name: String,
    pub region_name: String,
    pub photo_path: String,
    pub achievement_rate: f64,
    pub ai_summary: String,
}

impl MemberRecord {
    /// Builds a record from raw source fields, applying the defined fallback
    /// for every absent or blank optional field.
    pub fn normalized(
        id: impl Into<String>,
        name: Option<String>,
        party_name: Option<String>,
        region_name: Option<String>,
        photo_path: Option<String>,
        achievement_rate: Option<f64>,
        ai_summary: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: or_fallback(name, ""),
            party_name: or_fallback(party_name, FALLBACK_PARTY),
            region_name: or_fallback(region_name, FALLBACK_REGION),
            photo_path: or_fallback(photo_path, FALLBACK_PHOTO),
            achievement_rate: achievement_rate.unwrap_or(0.0),
            ai_summary: or_fallback(ai_summary, FALLBACK_SUMMARY),
        }
    }
}

fn or_fallback(value: Option<String>, fallback: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => fallback.to_string(),
    }
}

/// Manages workspace paths and configuration for one toolchain invocation.
pub struct SiteManager {
    pub config: AppConfig,
    pub paths: SitePaths,
    pub config_path: PathBuf,
}

impl SiteManager {
    pub fn new() -> Result<Self> {
        let paths = ensure_workspace_structure()?;
        let config = config::load_or_default()?;
        let config_path = config::config_file_path()?;
        Ok(Self {
            config,
            paths,
            config_path,
        })
    }

    pub fn layout(&self) -> SiteLayout {
        SiteLayout::new(&self.paths.root)
    }

    /// Naming scheme in effect for the given source mode.
    pub fn effective_naming(&self, mode: SourceMode) -> NamingScheme {
        self.config.build.effective_naming(mode)
    }
}
