use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One generated treatment plan in a patient's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PlanEntry {
    /// Creation time, second precision.
    pub timestamp: jiff::Timestamp,
    /// The text returned by the completion service, unmodified.
    pub plan_text: String,
}

impl PlanEntry {
    /// A new entry stamped with the current time.
    pub fn new(plan_text: impl Into<String>) -> Self {
        Self::at(jiff::Timestamp::now(), plan_text)
    }

    /// A new entry stamped with `timestamp`, truncated to whole seconds.
    pub fn at(timestamp: jiff::Timestamp, plan_text: impl Into<String>) -> Self {
        let timestamp = jiff::Timestamp::from_second(timestamp.as_second()).unwrap_or(timestamp);
        Self {
            timestamp,
            plan_text: plan_text.into(),
        }
    }
}

/// A point on the treatment timeline chart: history position and time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TimelinePoint {
    pub index: usize,
    pub timestamp: jiff::Timestamp,
}
