use anyhow::Result;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{LoadIssue, LoadIssueReason, MemberProfileDoc, RecordBatch, RecordSource};
use crate::export::stats::PolicyStats;
use crate::site::layout::{COHORT_TREND_FILE, ROSTER_FILE};
use crate::site::MemberRecord;

/// Flat scan over the per-member JSON export directory.
///
/// Reads every `*.json` in the directory except the aggregate roster file,
/// parses each as one member's combined document, and extracts the nested
/// profile fields. One malformed file skips that member only.
pub struct FileScanSource {
    data_dir: PathBuf,
}

impl FileScanSource {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }
}

impl RecordSource for FileScanSource {
    fn label(&self) -> String {
        format!("files:{}", self.data_dir.display())
    }

    fn load(&self) -> Result<RecordBatch> {
        if !self.data_dir.exists() {
            anyhow::bail!("Export directory {:?} does not exist", self.data_dir);
        }
        let mut batch = RecordBatch::default();
        for path in enumerate_member_files(&self.data_dir) {
            batch.scanned += 1;
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            let data = match fs::read_to_string(&path) {
                Ok(data) => data,
                Err(err) => {
                    batch.issues.push(LoadIssue::new(
                        file_name,
                        LoadIssueReason::ReadFailure,
                        format!("Unable to read file: {err}"),
                    ));
                    continue;
                }
            };
            let doc: MemberExportDoc = match serde_json::from_str(&data) {
                Ok(doc) => doc,
                Err(err) => {
                    batch.issues.push(LoadIssue::new(
                        file_name,
                        LoadIssueReason::ParseFailure,
                        format!("Invalid member document: {err}"),
                    ));
                    continue;
                }
            };
            match member_record_from(doc) {
                Some(record) => batch.records.push(record),
                None => batch.issues.push(LoadIssue::new(
                    file_name,
                    LoadIssueReason::MissingIdentifier,
                    "Member document has no NAAS_CD",
                )),
            }
        }
        Ok(batch)
    }
}

fn member_record_from(doc: MemberExportDoc) -> Option<MemberRecord> {
    let profile = doc.profile;
    let id = profile.naas_cd.as_deref()?.trim();
    if id.is_empty() {
        return None;
    }
    let rate = doc
        .analysis
        .policy_stats
        .as_ref()
        .map(|stats| stats.achievement_rate);
    Some(MemberRecord::normalized(
        id,
        profile.naas_nm,
        profile.curr_plpt_nm,
        profile.curr_elecd_nm,
        profile.photo_path,
        rate,
        doc.analysis.ai_policy_summary,
    ))
}

/// Member files in sorted order: `*.json` at depth 1, aggregate files excluded.
fn enumerate_member_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "json"))
        .filter(|e| e.file_name() != ROSTER_FILE && e.file_name() != COHORT_TREND_FILE)
        .map(|e| e.into_path())
        .collect();
    files.sort();
    files
}

/// One member's combined export document. Every field beyond the profile is
/// optional so partially-exported members still build.
#[derive(Debug, Default, Deserialize)]
struct MemberExportDoc {
    #[serde(default)]
    profile: MemberProfileDoc,
    #[serde(default)]
    analysis: AnalysisDoc,
}

#[derive(Debug, Default, Deserialize)]
struct AnalysisDoc {
    #[serde(default)]
    ai_policy_summary: Option<String>,
    #[serde(default)]
    policy_stats: Option<PolicyStats>,
}
