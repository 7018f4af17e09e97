//! Template loading and placeholder substitution.

pub mod builder;

pub use builder::{BuildIssue, BuildIssueReason, BuildManifest, BuildOutcome, BuildSummary,
    PageOutputEntry, SiteBuilder};

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::site::MemberRecord;

/// The recognized placeholder tokens. Tokens are disjoint, non-overlapping
/// literals, so replacement order across tokens is irrelevant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderToken {
    MemberId,
    MemberName,
    PartyName,
    RegionName,
    PhotoPath,
    AchievementRate,
    AiSummary,
}

impl PlaceholderToken {
    pub const ALL: [PlaceholderToken; 7] = [
        PlaceholderToken::MemberId,
        PlaceholderToken::MemberName,
        PlaceholderToken::PartyName,
        PlaceholderToken::RegionName,
        PlaceholderToken::PhotoPath,
        PlaceholderToken::AchievementRate,
        PlaceholderToken::AiSummary,
    ];

    pub fn literal(self) -> &'static str {
        match self {
            PlaceholderToken::MemberId => "{{MEMBER_ID}}",
            PlaceholderToken::MemberName => "{{MEMBER_NAME}}",
            PlaceholderToken::PartyName => "{{PARTY_NAME}}",
            PlaceholderToken::RegionName => "{{REGION_NAME}}",
            PlaceholderToken::PhotoPath => "{{PHOTO_PATH}}",
            PlaceholderToken::AchievementRate => "{{ACHIEVEMENT_RATE}}",
            PlaceholderToken::AiSummary => "{{AI_SUMMARY}}",
        }
    }

    pub fn value_for(self, record: &MemberRecord) -> String {
        match self {
            PlaceholderToken::MemberId => record.id.clone(),
            PlaceholderToken::MemberName => record.name.clone(),
            PlaceholderToken::PartyName => record.party_name.clone(),
            PlaceholderToken::RegionName => record.region_name.clone(),
            PlaceholderToken::PhotoPath => record.photo_path.clone(),
            PlaceholderToken::AchievementRate => {
                format_achievement_rate(record.achievement_rate)
            }
            PlaceholderToken::AiSummary => record.ai_summary.clone(),
        }
    }
}

/// Whole rates print without a decimal point, fractional ones with one
/// decimal (the upstream statistics round to one decimal).
pub fn format_achievement_rate(rate: f64) -> String {
    if rate.fract() == 0.0 {
        format!("{}", rate as i64)
    } else {
        format!("{rate:.1}")
    }
}

/// The shared page template, loaded once per build run and read-only
/// thereafter.
#[derive(Debug, Clone)]
pub struct PageTemplate {
    raw: String,
}

impl PageTemplate {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read template {:?}", path))?;
        Ok(Self { raw })
    }

    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Substitutes every occurrence of every recognized token with the
    /// record's corresponding field.
    pub fn render(&self, record: &MemberRecord) -> String {
        let mut page = self.raw.clone();
        for token in PlaceholderToken::ALL {
            page = page.replace(token.literal(), &token.value_for(record));
        }
        page
    }
}

/// True when any recognized token survives in the rendered output.
pub fn contains_unresolved_tokens(html: &str) -> bool {
    PlaceholderToken::ALL
        .iter()
        .any(|token| html.contains(token.literal()))
}
