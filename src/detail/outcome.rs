//! Bill outcome badges.
//!
//! Badge classification matches by substring containment, in a fixed order,
//! so composite result strings like `대안반영폐기` land on the tier of the
//! first matching substring.

/// Display tier of one bill's processing result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillOutcome {
    Passed,
    Reflected,
    Failed,
    Pending,
}

impl BillOutcome {
    /// Chart label for this tier.
    pub fn label(self) -> &'static str {
        match self {
            BillOutcome::Passed => "가결",
            BillOutcome::Reflected => "반영",
            BillOutcome::Pending => "계류",
            BillOutcome::Failed => "실패",
        }
    }

    /// CSS classes of the result badge.
    pub fn badge_class(self) -> &'static str {
        match self {
            BillOutcome::Passed => "bg-blue-600 text-white",
            BillOutcome::Reflected => "bg-sky-100 text-sky-600",
            BillOutcome::Failed => "bg-red-50 text-red-500",
            BillOutcome::Pending => "bg-slate-100 text-slate-500",
        }
    }
}

/// Classifies a raw `PROC_RESULT` string.
///
/// Checked in order: 가결, then 반영, then 폐기/철회. Anything else,
/// including an absent or blank result, is pending.
pub fn classify_outcome(raw: Option<&str>) -> BillOutcome {
    let value = raw.unwrap_or("").trim();
    if value.contains("가결") {
        BillOutcome::Passed
    } else if value.contains("반영") {
        BillOutcome::Reflected
    } else if value.contains("폐기") || value.contains("철회") {
        BillOutcome::Failed
    } else {
        BillOutcome::Pending
    }
}

/// The badge text: the raw result, or the pending label when absent.
pub fn display_result(raw: Option<&str>) -> &str {
    match raw.map(str::trim) {
        Some(value) if !value.is_empty() => value,
        _ => BillOutcome::Pending.label(),
    }
}
