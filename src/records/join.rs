use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::{LoadIssue, LoadIssueReason, MemberProfileDoc, RecordBatch, RecordSource};
use crate::export::stats::PolicyStats;
use crate::site::MemberRecord;

/// Collection file holding policy/analysis documents.
pub const POLICY_COLLECTION_FILE: &str = "members_policy.json";
/// Collection file holding member profile documents.
pub const MEMBER_COLLECTION_FILE: &str = "members.json";
/// Collection file holding news documents.
pub const NEWS_COLLECTION_FILE: &str = "news.json";
/// Collection file holding video documents.
pub const VIDEO_COLLECTION_FILE: &str = "youtube_videos.json";

/// Scoped handle over the document collection store.
///
/// Opening fails when the store root is unreachable, which is fatal to the
/// whole run: no partial output is attempted. The handle is released on every
/// exit path by going out of scope.
pub struct CollectionSession {
    root: PathBuf,
}

impl CollectionSession {
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            anyhow::bail!("Collection store {:?} is unreachable", root);
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn load_policy_docs(&self) -> Result<Vec<PolicyDoc>> {
        self.read_collection(POLICY_COLLECTION_FILE)
    }

    pub fn load_member_profiles(&self) -> Result<Vec<MemberProfileDoc>> {
        self.read_collection(MEMBER_COLLECTION_FILE)
    }

    /// Loads a collection as raw documents for callers that need fields the
    /// typed shapes do not carry.
    pub fn load_documents(&self, file_name: &str) -> Result<Vec<serde_json::Value>> {
        self.read_collection(file_name)
    }

    /// An absent collection file reads as empty; a malformed one is fatal.
    fn read_collection<T: DeserializeOwned>(&self, file_name: &str) -> Result<Vec<T>> {
        let path = self.root.join(file_name);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read(&path)
            .with_context(|| format!("Failed to read collection {:?}", path))?;
        serde_json::from_slice(&data)
            .with_context(|| format!("Failed to parse collection {:?}", path))
    }
}

/// Policy/analysis document keyed by member code.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PolicyDoc {
    #[serde(default)]
    pub naas_cd: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub ai_summary: Option<String>,
    #[serde(default)]
    pub analysis_stats: Option<PolicyStats>,
    #[serde(default)]
    pub representative_bills: Vec<serde_json::Value>,
}

/// One-to-one left composition of the policy collection with the profile
/// collection, matched on the member code. Policy docs without a matching
/// profile are dropped and counted, not reported as errors.
pub struct JoinSource {
    session: CollectionSession,
}

impl JoinSource {
    pub fn new(session: CollectionSession) -> Self {
        Self { session }
    }
}

impl RecordSource for JoinSource {
    fn label(&self) -> String {
        format!("join:{}", self.session.root().display())
    }

    fn load(&self) -> Result<RecordBatch> {
        let policy_docs = self.session.load_policy_docs()?;
        let profiles = self.session.load_member_profiles()?;
        let by_code: HashMap<&str, &MemberProfileDoc> = profiles
            .iter()
            .filter_map(|p| p.naas_cd.as_deref().map(|code| (code, p)))
            .collect();

        let mut batch = RecordBatch::default();
        for (index, policy) in policy_docs.iter().enumerate() {
            batch.scanned += 1;
            let code = match policy.naas_cd.as_deref().map(str::trim) {
                Some(code) if !code.is_empty() => code,
                _ => {
                    batch.issues.push(LoadIssue::new(
                        format!("{POLICY_COLLECTION_FILE}#{index}"),
                        LoadIssueReason::MissingIdentifier,
                        "Policy document has no naas_cd",
                    ));
                    continue;
                }
            };
            let profile = match by_code.get(code) {
                Some(profile) => *profile,
                None => {
                    batch.dropped_unmatched += 1;
                    continue;
                }
            };
            let rate = policy
                .analysis_stats
                .as_ref()
                .map(|stats| stats.achievement_rate);
            batch.records.push(MemberRecord::normalized(
                code,
                policy.name.clone().or_else(|| profile.naas_nm.clone()),
                profile.curr_plpt_nm.clone(),
                profile.curr_elecd_nm.clone(),
                profile.photo_path.clone(),
                rate,
                policy.ai_summary.clone(),
            ));
        }
        Ok(batch)
    }
}
