//! Export step: turns the document collections into the per-member combined
//! JSON documents (plus the roster and cohort trend aggregates) that feed the
//! file-scan build mode and the client page.

pub mod keywords;
pub mod stats;
pub mod trend;

pub use keywords::{extract_keywords, KeywordAnalysis, KeywordCount, WeightedText};
pub use stats::{summarize_bills, PolicyStats};
pub use trend::{cohort_average, news_trend, CohortTrend, NewsTrend};

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::orchestration::{log_event, EventType};
use crate::records::join::{
    CollectionSession, PolicyDoc, NEWS_COLLECTION_FILE, VIDEO_COLLECTION_FILE,
};
use crate::site::layout::{COHORT_TREND_FILE, ROSTER_FILE};
use crate::site::SiteManager;

#[derive(Debug, Clone)]
pub struct ExportIssue {
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct ExportSummary {
    pub total_members: usize,
    pub exported: usize,
    pub skipped: usize,
    pub issues: Vec<ExportIssue>,
}

impl ExportSummary {
    pub fn describe_for_console(&self) -> String {
        let mut line = format!(
            "Exported {} of {} active members (skipped {}).",
            self.exported, self.total_members, self.skipped
        );
        if let Some(first) = self.issues.first() {
            line.push_str(&format!(" Example issue: {} ({}).", first.subject, first.message));
        }
        line
    }
}

/// Produces one combined document per active-term member.
pub struct InsightExporter<'a> {
    manager: &'a SiteManager,
    session: CollectionSession,
    out_dir: PathBuf,
    today: NaiveDate,
}

impl<'a> InsightExporter<'a> {
    pub fn new(
        manager: &'a SiteManager,
        session: CollectionSession,
        out_dir: impl Into<PathBuf>,
        today: NaiveDate,
    ) -> Self {
        Self {
            manager,
            session,
            out_dir: out_dir.into(),
            today,
        }
    }

    pub fn run(&self) -> Result<ExportSummary> {
        log_event(
            self.manager,
            EventType::ExportStarted,
            json!({ "store": self.session.root().display().to_string() }),
        )?;

        let members = self.load_active_members()?;
        if members.is_empty() {
            anyhow::bail!("No active-term members found in the collection store");
        }
        fs::create_dir_all(&self.out_dir)
            .with_context(|| format!("Failed to create export dir {:?}", self.out_dir))?;
        fs::write(
            self.out_dir.join(ROSTER_FILE),
            serde_json::to_vec_pretty(&members)?,
        )
        .context("Failed to write roster file")?;

        let news: Vec<Value> = self.session.load_documents(NEWS_COLLECTION_FILE)?;
        let videos: Vec<Value> = self.session.load_documents(VIDEO_COLLECTION_FILE)?;
        let policy_docs = self.session.load_policy_docs()?;
        let policy_by_code: HashMap<&str, &PolicyDoc> = policy_docs
            .iter()
            .filter_map(|doc| doc.naas_cd.as_deref().map(|code| (code, doc)))
            .collect();

        let settings = &self.manager.config.export;
        let mut summary = ExportSummary {
            total_members: members.len(),
            ..ExportSummary::default()
        };
        let mut member_trends = Vec::new();

        for member in &members {
            let Some(code) = member.get("NAAS_CD").and_then(Value::as_str) else {
                summary.skipped += 1;
                summary.issues.push(ExportIssue {
                    subject: member_label(member),
                    message: "Member document has no NAAS_CD".into(),
                });
                continue;
            };
            let name = member
                .get("HG_NM")
                .or_else(|| member.get("NAAS_NM"))
                .and_then(Value::as_str)
                .unwrap_or_default();

            let member_news =
                select_newest(&news, "related_members", code, "pubDate", settings.news_limit);
            let member_videos =
                select_newest(&videos, "MONA_CD", code, "upload_date", settings.video_limit);
            let policy = policy_by_code.get(code).copied();
            let bills = policy.map(|p| p.representative_bills.clone()).unwrap_or_default();
            let policy_stats = summarize_bills(
                bills
                    .iter()
                    .map(|bill| bill.get("PROC_RESULT").and_then(Value::as_str)),
            );
            let trend = news_trend(
                member_news
                    .iter()
                    .filter_map(|item| item.get("pubDate").and_then(Value::as_str)),
                self.today,
                settings.trend_window_days,
            );
            let analysis = extract_keywords(
                member_news.iter().chain(member_videos.iter()).map(|item| WeightedText {
                    title: item.get("title").and_then(Value::as_str).unwrap_or_default(),
                    description: item
                        .get("description")
                        .and_then(Value::as_str)
                        .unwrap_or_default(),
                }),
                name,
                settings.keyword_limit as usize,
            );

            let now = Utc::now().to_rfc3339();
            let combined = json!({
                "profile": member,
                "analysis": {
                    "keywords": analysis.top_keywords,
                    "keyword_frequency": analysis.keyword_details,
                    "policy_stats": policy_stats,
                    "ai_policy_summary": policy.and_then(|p| p.ai_summary.clone()),
                    "trend_news": &trend,
                    "last_analyzed_at": now,
                },
                "recent_news": member_news,
                "recent_videos": member_videos,
                "recent_bills": bills,
                "exported_at": now,
            });
            let path = self.out_dir.join(format!("{code}.json"));
            fs::write(&path, serde_json::to_vec_pretty(&combined)?)
                .with_context(|| format!("Failed to write {:?}", path))?;
            member_trends.push(trend);
            summary.exported += 1;
        }

        let cohort = cohort_average(&member_trends);
        fs::write(
            self.out_dir.join(COHORT_TREND_FILE),
            serde_json::to_vec_pretty(&cohort)?,
        )
        .context("Failed to write cohort trend file")?;

        log_event(
            self.manager,
            EventType::ExportCompleted,
            json!({
                "exported": summary.exported,
                "skipped": summary.skipped,
                "total_members": summary.total_members,
            }),
        )?;
        Ok(summary)
    }

    fn load_active_members(&self) -> Result<Vec<Value>> {
        let members = self
            .session
            .load_documents(crate::records::join::MEMBER_COLLECTION_FILE)?;
        Ok(members
            .into_iter()
            .filter(|member| {
                member
                    .get("is_22nd")
                    .and_then(Value::as_bool)
                    .unwrap_or(false)
            })
            .collect())
    }
}

fn member_label(member: &Value) -> String {
    member
        .get("NAAS_NM")
        .or_else(|| member.get("HG_NM"))
        .and_then(Value::as_str)
        .unwrap_or("unknown member")
        .to_string()
}

/// Documents related to `code` via `key_field` (string equality or array
/// membership), newest first by the ISO date in `date_field`, capped.
fn select_newest(docs: &[Value], key_field: &str, code: &str, date_field: &str, cap: u32) -> Vec<Value> {
    let mut selected: Vec<&Value> = docs
        .iter()
        .filter(|doc| match doc.get(key_field) {
            Some(Value::String(value)) => value == code,
            Some(Value::Array(values)) => {
                values.iter().any(|v| v.as_str() == Some(code))
            }
            _ => false,
        })
        .collect();
    selected.sort_by(|a, b| {
        let date_a = a.get(date_field).and_then(Value::as_str).unwrap_or_default();
        let date_b = b.get(date_field).and_then(Value::as_str).unwrap_or_default();
        date_b.cmp(date_a)
    });
    selected.truncate(cap as usize);
    selected.into_iter().cloned().collect()
}
