//! Structured build/export event log.
//!
//! Every pipeline run appends its lifecycle events to `events.jsonl` under
//! the workspace root. Console output stays human-readable; this log is the
//! machine-readable history.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use uuid::Uuid;

use crate::site::{SiteLayout, SiteManager, SitePaths};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    BuildStarted,
    BuildCompleted,
    RecordSkipped,
    ExportStarted,
    ExportCompleted,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteEvent {
    pub event_id: Uuid,
    pub event_type: EventType,
    pub timestamp: DateTime<Utc>,
    pub details: serde_json::Value,
}

/// Append-only JSONL event log under the workspace root.
pub struct SiteLog {
    path: PathBuf,
}

impl SiteLog {
    pub fn for_workspace(paths: &SitePaths) -> Self {
        Self {
            path: SiteLayout::new(&paths.root).event_log(),
        }
    }

    pub fn append_event(&self, event: &SiteEvent) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open event log {:?}", self.path))?;
        file.write_all(serde_json::to_string(event)?.as_bytes())?;
        file.write_all(b"\n")?;
        Ok(())
    }

    pub fn read_events(&self) -> Result<Vec<SiteEvent>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(&self.path)?;
        let mut events = Vec::new();
        for line in data.lines().filter(|l| !l.trim().is_empty()) {
            let event: SiteEvent = serde_json::from_str(line)?;
            events.push(event);
        }
        Ok(events)
    }
}

/// Records one event with a fresh id and the current timestamp.
pub fn log_event(
    manager: &SiteManager,
    event_type: EventType,
    details: serde_json::Value,
) -> Result<Uuid> {
    let event = SiteEvent {
        event_id: Uuid::new_v4(),
        event_type,
        timestamp: Utc::now(),
        details,
    };
    let log = SiteLog::for_workspace(&manager.paths);
    log.append_event(&event)?;
    Ok(event.event_id)
}
