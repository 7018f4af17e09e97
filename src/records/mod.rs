//! Record sources feeding the page build.
//!
//! The two historical build scripts (flat file scan vs. collection join)
//! are modeled as one `RecordSource` trait with two implementations,
//! selected by configuration.

pub mod file_scan;
pub mod join;

pub use file_scan::FileScanSource;
pub use join::{CollectionSession, JoinSource};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::site::MemberRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadIssueReason {
    ReadFailure,
    ParseFailure,
    MissingIdentifier,
}

/// One recoverable per-record problem. Issues never abort a batch.
#[derive(Debug, Clone)]
pub struct LoadIssue {
    /// Identifying label for the failing record (file name or doc position).
    pub source: String,
    pub reason: LoadIssueReason,
    pub message: String,
}

impl LoadIssue {
    pub fn new(
        source: impl Into<String>,
        reason: LoadIssueReason,
        message: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            reason,
            message: message.into(),
        }
    }
}

/// Output of one loader invocation.
#[derive(Debug, Default)]
pub struct RecordBatch {
    pub records: Vec<MemberRecord>,
    pub issues: Vec<LoadIssue>,
    /// Source entries inspected, whether or not they produced a record.
    pub scanned: usize,
    /// Join-mode policy docs dropped for lack of a matching profile.
    /// An accepted data-completeness assumption, not an error.
    pub dropped_unmatched: usize,
}

/// A configured origin of canonical member records.
pub trait RecordSource {
    /// Short human label for logs and console output.
    fn label(&self) -> String;

    /// Produces the full batch for one build run. Per-record problems are
    /// reported as issues; an `Err` here is fatal to the whole run.
    fn load(&self) -> Result<RecordBatch>;
}

/// Profile fields shared by the per-member export documents and the member
/// profile collection. Field names follow the upstream assembly API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemberProfileDoc {
    #[serde(rename = "NAAS_CD", default)]
    pub naas_cd: Option<String>,
    #[serde(rename = "NAAS_NM", default)]
    pub naas_nm: Option<String>,
    #[serde(rename = "CURR_PLPT_NM", default)]
    pub curr_plpt_nm: Option<String>,
    #[serde(rename = "CURR_ELECD_NM", default)]
    pub curr_elecd_nm: Option<String>,
    #[serde(rename = "PHOTO_PATH", default)]
    pub photo_path: Option<String>,
}
