use ortho_core::models::field::FieldValue;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

/// What kind of input a form field collects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export)]
pub enum FieldKind {
    /// Whole number within an inclusive range.
    Integer { min: i64, max: i64 },
    /// Measurement within an inclusive range (millimetres, degrees).
    Decimal { min: f64, max: f64 },
    /// Single-select from a fixed option list.
    Choice { options: Vec<String> },
    /// Free text.
    Text,
}

/// One intake field definition.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FieldSpec {
    /// Key used in the patient's `info` map, e.g. `"biteType"`.
    pub key: String,
    /// Label used in the form and in the rendered prompt, e.g. `"Bite Type"`.
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    pub description: Option<String>,
}

impl FieldSpec {
    pub fn integer(key: &str, label: &str, min: i64, max: i64) -> Self {
        Self::with_kind(key, label, FieldKind::Integer { min, max })
    }

    pub fn decimal(key: &str, label: &str, min: f64, max: f64) -> Self {
        Self::with_kind(key, label, FieldKind::Decimal { min, max })
    }

    pub fn choice(key: &str, label: &str, options: &[&str]) -> Self {
        let options = options.iter().map(|o| o.to_string()).collect();
        Self::with_kind(key, label, FieldKind::Choice { options })
    }

    pub fn text(key: &str, label: &str) -> Self {
        Self::with_kind(key, label, FieldKind::Text)
    }

    fn with_kind(key: &str, label: &str, kind: FieldKind) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            kind,
            required: false,
            description: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn describe(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Convert numeric text for a numeric field into a number.
    ///
    /// Form inputs often arrive as strings (`"12"`). Anything that does not
    /// parse as a finite number is returned unchanged for [`FieldSpec::check`]
    /// to reject.
    pub fn normalize(&self, value: FieldValue) -> FieldValue {
        let FieldValue::Text(text) = &value else {
            return value;
        };
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return value;
        }

        match self.kind {
            FieldKind::Integer { .. } => match trimmed.parse::<i64>() {
                Ok(n) => FieldValue::Integer(n),
                Err(_) => parse_finite(trimmed).map_or(value, FieldValue::Decimal),
            },
            FieldKind::Decimal { .. } => parse_finite(trimmed).map_or(value, FieldValue::Decimal),
            FieldKind::Choice { .. } | FieldKind::Text => value,
        }
    }

    /// Check a submitted value against this field's kind.
    ///
    /// Blank values always pass: clearing a field is allowed, and missing
    /// required fields are caught when a plan is requested.
    pub fn check(&self, value: &FieldValue) -> Result<(), FieldValidationError> {
        if value.is_blank() {
            return Ok(());
        }

        let ok = match &self.kind {
            FieldKind::Integer { min, max } => match value {
                FieldValue::Integer(n) => (*min..=*max).contains(n),
                FieldValue::Decimal(x) => {
                    x.fract() == 0.0 && *x >= *min as f64 && *x <= *max as f64
                }
                FieldValue::Text(_) => false,
            },
            FieldKind::Decimal { min, max } => value
                .as_f64()
                .is_some_and(|x| x >= *min && x <= *max),
            FieldKind::Choice { options } => value.as_text().is_some_and(|s| {
                let s = s.trim();
                options.iter().any(|o| o.eq_ignore_ascii_case(s))
            }),
            FieldKind::Text => true,
        };

        if ok {
            Ok(())
        } else {
            Err(FieldValidationError {
                field: self.key.clone(),
                message: self.expectation(value),
            })
        }
    }

    fn expectation(&self, value: &FieldValue) -> String {
        let value = match value {
            FieldValue::Text(s) => format!("'{}'", s.trim()),
            other => other.to_string(),
        };
        match &self.kind {
            FieldKind::Integer { min, max } => format!(
                "{}: {value} is not a whole number in [{min}, {max}]",
                self.label
            ),
            FieldKind::Decimal { min, max } => {
                format!("{}: {value} is not a number in [{min}, {max}]", self.label)
            }
            FieldKind::Choice { options } => format!(
                "{}: {value} is not one of {}",
                self.label,
                options.join(", ")
            ),
            FieldKind::Text => format!("{}: invalid value {value}", self.label),
        }
    }
}

fn parse_finite(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|x| x.is_finite())
}

/// A titled group of fields, rendered as one block of the prompt.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Section {
    pub id: String,
    pub title: String,
    pub fields: Vec<FieldSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[error("{message}")]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}
