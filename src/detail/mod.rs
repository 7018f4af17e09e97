//! Detail page presentation logic.
//!
//! The browser-side script fetches one member's combined JSON document and
//! populates fixed page regions. The shapes and pure rendering rules live
//! here so they are testable: document deserialization, chart view models,
//! outcome badges, bounded lists, and the co-mention tag ranking.

pub mod listing;
pub mod mentions;
pub mod outcome;
pub mod page;

pub use listing::BoundedList;
pub use mentions::{rank_co_mentions, MentionEmphasis, MentionTag, MENTION_CAP};
pub use outcome::{classify_outcome, display_result, BillOutcome};

use serde::Deserialize;

use crate::export::{CohortTrend, NewsTrend, PolicyStats};

/// One member's fetched combined document. Every section is optional so a
/// partially exported member still renders.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemberDetailDoc {
    #[serde(default)]
    pub profile: serde_json::Value,
    #[serde(default)]
    pub analysis: DetailAnalysis,
    #[serde(default)]
    pub recent_news: Vec<NewsItem>,
    #[serde(default)]
    pub recent_bills: Vec<BillItem>,
    #[serde(default)]
    pub recent_videos: Vec<VideoItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DetailAnalysis {
    #[serde(default)]
    pub ai_policy_summary: Option<String>,
    #[serde(default)]
    pub policy_stats: Option<PolicyStats>,
    #[serde(default)]
    pub trend_news: Option<NewsTrend>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewsItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub press: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(rename = "pubDate", default)]
    pub pub_date: Option<String>,
    #[serde(default)]
    pub related_members: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BillItem {
    #[serde(rename = "BILL_NAME", default)]
    pub bill_name: String,
    #[serde(rename = "BILL_ID", default)]
    pub bill_id: Option<String>,
    #[serde(rename = "PROC_RESULT", default)]
    pub proc_result: Option<String>,
    #[serde(rename = "PROPOSE_DT", default)]
    pub propose_dt: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub channel: Option<String>,
}

/// Doughnut distribution of bill outcomes with the total in the center.
#[derive(Debug, Clone, PartialEq)]
pub struct OutcomeDonut {
    pub labels: [&'static str; 4],
    pub data: [u32; 4],
    pub center_label: String,
}

impl OutcomeDonut {
    pub fn from_stats(stats: &PolicyStats) -> Self {
        Self {
            labels: ["가결", "반영", "계류", "실패"],
            data: [stats.passed, stats.reflected, stats.pending, stats.failed],
            center_label: format!("총 {}건", stats.total),
        }
    }
}

/// Trend line of the member's series, optionally compared against the
/// cohort average series.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendLine {
    pub labels: Vec<String>,
    pub member: Vec<u32>,
    pub cohort: Option<Vec<f64>>,
}

impl TrendLine {
    pub fn new(trend: &NewsTrend, cohort: Option<&CohortTrend>) -> Self {
        Self {
            labels: trend.labels.clone(),
            member: trend.data.clone(),
            // The comparison series only makes sense over the same days.
            cohort: cohort
                .filter(|c| c.labels == trend.labels)
                .map(|c| c.data.clone()),
        }
    }
}

/// Harvests the flat co-mention stream from fetched news items.
pub fn collect_mentions(news: &[NewsItem]) -> Vec<&str> {
    news.iter()
        .flat_map(|item| item.related_members.iter().map(String::as_str))
        .collect()
}
