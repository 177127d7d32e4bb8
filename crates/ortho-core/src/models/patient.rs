use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::field::FieldValue;
use super::plan::{PlanEntry, TimelinePoint};

/// A patient held in a session, keyed by name.
///
/// `treatment_plans` is append-only: entries are added by
/// [`PatientRecord::append_plan`] and never reordered or edited.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PatientRecord {
    pub name: String,
    /// Intake fields keyed by the form's field name (`age`, `biteType`, ...).
    #[serde(default)]
    pub info: BTreeMap<String, FieldValue>,
    #[serde(default)]
    treatment_plans: Vec<PlanEntry>,
    pub created_at: jiff::Timestamp,
}

impl PatientRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            info: BTreeMap::new(),
            treatment_plans: Vec::new(),
            created_at: jiff::Timestamp::now(),
        }
    }

    pub fn field(&self, key: &str) -> Option<&FieldValue> {
        self.info.get(key)
    }

    pub fn set_field(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.info.insert(key.into(), value.into());
    }

    /// Overwrite the given fields, leaving all others untouched.
    pub fn merge_info<I>(&mut self, fields: I)
    where
        I: IntoIterator<Item = (String, FieldValue)>,
    {
        self.info.extend(fields);
    }

    pub fn treatment_plans(&self) -> &[PlanEntry] {
        &self.treatment_plans
    }

    pub fn latest_plan(&self) -> Option<&PlanEntry> {
        self.treatment_plans.last()
    }

    /// Append a plan to the history and return its index.
    pub fn append_plan(&mut self, entry: PlanEntry) -> usize {
        self.treatment_plans.push(entry);
        self.treatment_plans.len() - 1
    }

    pub fn timeline(&self) -> Vec<TimelinePoint> {
        self.treatment_plans
            .iter()
            .enumerate()
            .map(|(index, entry)| TimelinePoint {
                index,
                timestamp: entry.timestamp,
            })
            .collect()
    }
}
