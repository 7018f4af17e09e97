//! Shared filesystem layout helpers for the site workspace.
//!
//! Every artifact the toolchain touches lives under the workspace root.
//! Centralizing the sub-directory and file-name logic here avoids duplicating
//! string constants across the build and export modules.

use std::path::{Path, PathBuf};

use uuid::Uuid;

/// Subdirectory holding per-member combined JSON exports.
pub const DATA_EXPORT_SUBDIR: &str = "data_export";
/// Subdirectory receiving rendered per-member HTML pages.
pub const DETAILS_SUBDIR: &str = "details";
/// Subdirectory holding the document collections backing join mode.
pub const COLLECTIONS_SUBDIR: &str = "collections";
/// Subdirectory holding page templates.
pub const TEMPLATES_SUBDIR: &str = "templates";
/// Subdirectory holding one manifest per build run.
pub const MANIFESTS_SUBDIR: &str = "manifests";
/// Append-only structured event log at the workspace root.
pub const EVENT_LOG_FILE: &str = "events.jsonl";
/// Default detail page template file name.
pub const DETAIL_TEMPLATE_FILE: &str = "detail_template.html";
/// Aggregate roster file; excluded from the per-member file scan.
pub const ROSTER_FILE: &str = "members_all.json";
/// Cohort-average trend series written next to the roster.
pub const COHORT_TREND_FILE: &str = "cohort_trend.json";

/// Convenience wrapper for locating workspace files from the root.
#[derive(Debug, Clone)]
pub struct SiteLayout {
    root: PathBuf,
}

impl SiteLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path to the combined JSON document for one member code.
    pub fn member_export(&self, member_code: &str) -> PathBuf {
        self.root
            .join(DATA_EXPORT_SUBDIR)
            .join(format!("{member_code}.json"))
    }

    /// Path to the aggregate roster document.
    pub fn roster_file(&self) -> PathBuf {
        self.root.join(DATA_EXPORT_SUBDIR).join(ROSTER_FILE)
    }

    /// Path to the cohort-average trend document.
    pub fn cohort_trend_file(&self) -> PathBuf {
        self.root.join(DATA_EXPORT_SUBDIR).join(COHORT_TREND_FILE)
    }

    /// Default location of the detail page template.
    pub fn detail_template(&self) -> PathBuf {
        self.root.join(TEMPLATES_SUBDIR).join(DETAIL_TEMPLATE_FILE)
    }

    /// Path to the structured event log.
    pub fn event_log(&self) -> PathBuf {
        self.root.join(EVENT_LOG_FILE)
    }

    /// Path to the manifest written for one build run.
    pub fn manifest_file(&self, request_id: Uuid) -> PathBuf {
        self.root
            .join(MANIFESTS_SUBDIR)
            .join(format!("{request_id}.json"))
    }
}
