use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

use super::PageTemplate;
use crate::orchestration::{log_event, EventType};
use crate::records::{LoadIssue, LoadIssueReason, RecordSource};
use crate::site::{MemberRecord, NamingScheme, SiteManager};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildIssueReason {
    ReadFailure,
    ParseFailure,
    MissingIdentifier,
    WriteFailure,
    DuplicateOutputName,
}

impl From<LoadIssueReason> for BuildIssueReason {
    fn from(reason: LoadIssueReason) -> Self {
        match reason {
            LoadIssueReason::ReadFailure => BuildIssueReason::ReadFailure,
            LoadIssueReason::ParseFailure => BuildIssueReason::ParseFailure,
            LoadIssueReason::MissingIdentifier => BuildIssueReason::MissingIdentifier,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BuildIssue {
    pub subject: String,
    pub reason: BuildIssueReason,
    pub message: String,
}

impl From<LoadIssue> for BuildIssue {
    fn from(issue: LoadIssue) -> Self {
        Self {
            subject: issue.source,
            reason: issue.reason.into(),
            message: issue.message,
        }
    }
}

/// Accounting for one build run.
#[derive(Debug, Default)]
pub struct BuildSummary {
    pub scanned: usize,
    pub rendered: usize,
    pub skipped: usize,
    pub failed: usize,
    pub dropped_unmatched: usize,
    pub issues: Vec<BuildIssue>,
}

impl BuildSummary {
    pub fn describe_for_console(&self) -> String {
        let mut line = format!(
            "Rendered {} of {} source records (skipped {}, failed {}).",
            self.rendered, self.scanned, self.skipped, self.failed
        );
        if self.dropped_unmatched > 0 {
            line.push_str(&format!(
                " {} policy records had no matching profile and were dropped.",
                self.dropped_unmatched
            ));
        }
        if let Some(first) = self.issues.first() {
            line.push_str(&format!(
                " Example issue: {:?} at {}.",
                first.reason, first.subject
            ));
        }
        line
    }
}

/// One rendered page recorded in the build manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageOutputEntry {
    pub member_id: String,
    pub file_name: String,
    pub path: PathBuf,
    pub content_hash: String,
}

/// Per-run manifest persisted under `manifests/<request_id>.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildManifest {
    pub request_id: Uuid,
    pub source: String,
    pub naming: NamingScheme,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub outputs: Vec<PageOutputEntry>,
}

impl BuildManifest {
    fn new(request_id: Uuid, source: String, naming: NamingScheme) -> Self {
        let now = Utc::now();
        Self {
            request_id,
            source,
            naming,
            started_at: now,
            completed_at: now,
            outputs: Vec::new(),
        }
    }

    pub fn save(&self, manager: &SiteManager) -> Result<PathBuf> {
        let path = manager.layout().manifest_file(self.request_id);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, serde_json::to_vec_pretty(self)?)
            .with_context(|| format!("Failed to write manifest {:?}", path))?;
        Ok(path)
    }
}

#[derive(Debug)]
pub struct BuildOutcome {
    pub summary: BuildSummary,
    pub manifest: BuildManifest,
}

/// Renders one page per source record into the output directory.
///
/// Rendering is pure per record and runs on a bounded thread pool; writes
/// happen sequentially in source order so a display-name collision keeps the
/// historical last-write-wins behavior deterministically.
pub struct SiteBuilder<'a> {
    manager: &'a SiteManager,
    template: PageTemplate,
    output_dir: PathBuf,
    naming: NamingScheme,
}

impl<'a> SiteBuilder<'a> {
    pub fn new(
        manager: &'a SiteManager,
        template: PageTemplate,
        output_dir: impl Into<PathBuf>,
        naming: NamingScheme,
    ) -> Self {
        Self {
            manager,
            template,
            output_dir: output_dir.into(),
            naming,
        }
    }

    pub fn run(&self, source: &dyn RecordSource) -> Result<BuildOutcome> {
        let request_id = Uuid::new_v4();
        log_event(
            self.manager,
            EventType::BuildStarted,
            json!({ "request_id": request_id, "source": source.label() }),
        )?;

        let batch = source.load()?;
        fs::create_dir_all(&self.output_dir)
            .with_context(|| format!("Failed to create output dir {:?}", self.output_dir))?;

        let mut summary = BuildSummary {
            scanned: batch.scanned,
            dropped_unmatched: batch.dropped_unmatched,
            ..BuildSummary::default()
        };
        summary.skipped = batch.issues.len();
        summary.issues = batch.issues.into_iter().map(BuildIssue::from).collect();
        for issue in &summary.issues {
            log_event(
                self.manager,
                EventType::RecordSkipped,
                json!({
                    "request_id": request_id,
                    "subject": issue.subject,
                    "message": issue.message,
                }),
            )?;
        }

        let mut manifest =
            BuildManifest::new(request_id, source.label(), self.naming);

        let concurrency = self.manager.config.build.max_parallel_renders.max(1) as usize;
        let pool = ThreadPoolBuilder::new()
            .num_threads(concurrency)
            .build()
            .context("Failed to configure render thread pool")?;
        let rendered: Vec<RenderedPage> = pool.install(|| {
            batch
                .records
                .par_iter()
                .map(|record| self.render_page(record))
                .collect()
        });

        let mut name_counts: HashMap<String, usize> = HashMap::new();
        for page in rendered {
            *name_counts.entry(page.file_name.clone()).or_insert(0) += 1;
            let path = self.output_dir.join(&page.file_name);
            match fs::write(&path, &page.html) {
                Ok(()) => {
                    summary.rendered += 1;
                    manifest.outputs.push(PageOutputEntry {
                        member_id: page.member_id,
                        file_name: page.file_name,
                        path,
                        content_hash: page.content_hash,
                    });
                }
                Err(err) => {
                    summary.failed += 1;
                    summary.issues.push(BuildIssue {
                        subject: page.file_name,
                        reason: BuildIssueReason::WriteFailure,
                        message: format!("Unable to write page: {err}"),
                    });
                }
            }
        }

        for (file_name, count) in name_counts {
            if count > 1 {
                summary.issues.push(BuildIssue {
                    subject: file_name,
                    reason: BuildIssueReason::DuplicateOutputName,
                    message: format!("{count} records share this output name; last write wins"),
                });
            }
        }

        manifest.completed_at = Utc::now();
        manifest.save(self.manager)?;
        log_event(
            self.manager,
            EventType::BuildCompleted,
            json!({
                "request_id": request_id,
                "rendered": summary.rendered,
                "skipped": summary.skipped,
                "failed": summary.failed,
                "dropped_unmatched": summary.dropped_unmatched,
            }),
        )?;
        Ok(BuildOutcome { summary, manifest })
    }

    fn render_page(&self, record: &MemberRecord) -> RenderedPage {
        let html = self.template.render(record);
        let mut hasher = Sha256::new();
        hasher.update(html.as_bytes());
        let content_hash = hasher
            .finalize()
            .iter()
            .map(|byte| format!("{byte:02x}"))
            .collect();
        RenderedPage {
            member_id: record.id.clone(),
            file_name: format!("{}.html", self.file_key(record)),
            html,
            content_hash,
        }
    }

    fn file_key<'b>(&self, record: &'b MemberRecord) -> &'b str {
        match self.naming {
            NamingScheme::MemberId => &record.id,
            NamingScheme::DisplayName => &record.name,
        }
    }
}

struct RenderedPage {
    member_id: String,
    file_name: String,
    html: String,
    content_hash: String,
}
