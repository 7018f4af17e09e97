//! Bill outcome statistics.
//!
//! Classifies each bill's `PROC_RESULT` into the four display categories and
//! derives the achievement rate. Classification here is exact-category (the
//! upstream statistics step); the badge logic in `detail::outcome` matches by
//! substring instead.

use serde::{Deserialize, Serialize};

/// Results counted as legislative success.
pub const PASSED_RESULTS: [&str; 2] = ["원안가결", "수정가결"];
/// Results counted as policy reflection.
pub const REFLECTED_RESULTS: [&str; 2] = ["대안반영폐기", "수정안반영폐기"];
/// Results counted as failure or withdrawal.
pub const FAILED_RESULTS: [&str; 2] = ["폐기", "철회"];

/// Aggregated bill outcome counts for one member.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolicyStats {
    #[serde(default)]
    pub passed: u32,
    #[serde(default)]
    pub reflected: u32,
    #[serde(default)]
    pub pending: u32,
    #[serde(default)]
    pub failed: u32,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub achievement_rate: f64,
}

/// Summarizes raw `PROC_RESULT` values.
///
/// A null or empty result counts as pending; an unrecognized non-empty value
/// contributes to the total only, matching the upstream classifier.
pub fn summarize_bills<'a, I>(results: I) -> PolicyStats
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut stats = PolicyStats::default();
    for result in results {
        stats.total += 1;
        match result.map(str::trim) {
            Some(value) if PASSED_RESULTS.contains(&value) => stats.passed += 1,
            Some(value) if REFLECTED_RESULTS.contains(&value) => stats.reflected += 1,
            Some(value) if FAILED_RESULTS.contains(&value) => stats.failed += 1,
            None | Some("") => stats.pending += 1,
            Some(_) => {}
        }
    }
    stats.achievement_rate = if stats.total > 0 {
        let success = (stats.passed + stats.reflected) as f64;
        (success / stats.total as f64 * 1000.0).round() / 10.0
    } else {
        0.0
    };
    stats
}
