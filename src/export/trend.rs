//! News trend series.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Per-day news counts over a window ending today. Labels are `MM-DD`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewsTrend {
    pub labels: Vec<String>,
    pub data: Vec<u32>,
}

/// Element-wise mean of every member's trend series, shown alongside one
/// member's own series for comparison.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CohortTrend {
    pub labels: Vec<String>,
    pub data: Vec<f64>,
}

/// Counts publication dates per day over the `window_days` ending at `today`.
///
/// Dates are matched on their leading `YYYY-MM-DD`; anything outside the
/// window (or unparseable) is ignored.
pub fn news_trend<I, S>(pub_dates: I, today: NaiveDate, window_days: u32) -> NewsTrend
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let days = window_days.max(1) as i64;
    let iso_dates: Vec<String> = (0..days)
        .rev()
        .map(|offset| (today - Duration::days(offset)).format("%Y-%m-%d").to_string())
        .collect();
    let mut data = vec![0u32; iso_dates.len()];
    for pub_date in pub_dates {
        let Some(day) = pub_date.as_ref().get(0..10) else {
            continue;
        };
        if let Some(position) = iso_dates.iter().position(|d| d == day) {
            data[position] += 1;
        }
    }
    NewsTrend {
        labels: iso_dates.iter().map(|d| d[5..].to_string()).collect(),
        data,
    }
}

/// Averages the member series element-wise, one decimal. Series shorter than
/// the first one contribute zero for their missing days.
pub fn cohort_average(trends: &[NewsTrend]) -> CohortTrend {
    let Some(first) = trends.first() else {
        return CohortTrend::default();
    };
    let len = first.labels.len();
    let mut sums = vec![0f64; len];
    for trend in trends {
        for (index, value) in trend.data.iter().take(len).enumerate() {
            sums[index] += f64::from(*value);
        }
    }
    let count = trends.len() as f64;
    CohortTrend {
        labels: first.labels.clone(),
        data: sums
            .into_iter()
            .map(|sum| (sum / count * 10.0).round() / 10.0)
            .collect(),
    }
}
