//! ortho-intake
//!
//! Orthodontic intake profiles. Pure data, no network dependency.
//! Each profile defines the form fields a deployment collects, which of
//! them must be filled before a plan can be generated, and the sections the
//! generated plan is asked to cover.

pub mod error;
pub mod fields;
pub mod profiles;

use std::collections::BTreeMap;

use ortho_core::models::field::FieldValue;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use error::IntakeError;
use fields::{FieldSpec, FieldValidationError, Section};

/// Heading for populated fields that the profile does not define.
const ADDITIONAL_SECTION_TITLE: &str = "Additional Information";

/// Rendered in place of a blank optional field.
const BLANK_VALUE: &str = "None reported";

/// Trait implemented by each intake profile.
pub trait IntakeProfile: Send + Sync {
    /// Unique identifier (e.g., "basic", "comprehensive").
    fn id(&self) -> &str;

    /// Human-readable name.
    fn name(&self) -> &str;

    /// Field groups, in form and prompt order.
    fn sections(&self) -> &[Section];

    /// What the generated plan must cover, e.g. "estimated treatment duration".
    fn plan_sections(&self) -> &[&str];

    /// Keys that must be present and non-blank before generation.
    fn required_fields(&self) -> Vec<&str> {
        self.sections()
            .iter()
            .flat_map(|s| &s.fields)
            .filter(|f| f.required)
            .map(|f| f.key.as_str())
            .collect()
    }

    fn field(&self, key: &str) -> Option<&FieldSpec> {
        self.sections()
            .iter()
            .flat_map(|s| &s.fields)
            .find(|f| f.key == key)
    }

    /// Required keys that are absent or blank in `info`, in profile order.
    fn missing_fields(&self, info: &BTreeMap<String, FieldValue>) -> Vec<String> {
        self.required_fields()
            .into_iter()
            .filter(|key| info.get(*key).is_none_or(FieldValue::is_blank))
            .map(str::to_string)
            .collect()
    }

    /// Apply [`FieldSpec::normalize`] to every value the profile defines.
    fn normalize(&self, fields: BTreeMap<String, FieldValue>) -> BTreeMap<String, FieldValue> {
        fields
            .into_iter()
            .map(|(key, value)| {
                let value = match self.field(&key) {
                    Some(spec) => spec.normalize(value),
                    None => value,
                };
                (key, value)
            })
            .collect()
    }

    /// Check submitted values against their field definitions.
    ///
    /// Keys the profile does not define are accepted as free text.
    fn validate(&self, fields: &BTreeMap<String, FieldValue>) -> Vec<FieldValidationError> {
        fields
            .iter()
            .filter_map(|(key, value)| self.field(key).and_then(|spec| spec.check(value).err()))
            .collect()
    }

    /// Like [`IntakeProfile::validate`], as a `Result`.
    fn check(&self, fields: &BTreeMap<String, FieldValue>) -> Result<(), IntakeError> {
        let errors = self.validate(fields);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(IntakeError::Invalid(errors))
        }
    }

    /// Render the populated fields as labelled blocks for inclusion in a prompt.
    ///
    /// Deterministic: sections in profile order, fields in section order,
    /// then any extra keys in sorted order under "Additional Information".
    fn to_structured_input(&self, info: &BTreeMap<String, FieldValue>) -> String {
        let mut blocks = Vec::new();

        for section in self.sections() {
            let lines: Vec<String> = section
                .fields
                .iter()
                .filter_map(|f| info.get(&f.key).map(|v| field_line(&f.label, v)))
                .collect();
            if !lines.is_empty() {
                blocks.push(block(&section.title, &lines));
            }
        }

        let extra: Vec<String> = info
            .iter()
            .filter(|(key, _)| self.field(key).is_none())
            .map(|(key, value)| field_line(key, value))
            .collect();
        if !extra.is_empty() {
            blocks.push(block(ADDITIONAL_SECTION_TITLE, &extra));
        }

        blocks.join("\n")
    }

    /// Serializable description for form rendering.
    fn describe(&self) -> ProfileDescriptor {
        let required = self.required_fields();
        let sections = self
            .sections()
            .iter()
            .map(|s| Section {
                fields: s
                    .fields
                    .iter()
                    .map(|f| FieldSpec {
                        required: required.contains(&f.key.as_str()),
                        ..f.clone()
                    })
                    .collect(),
                ..s.clone()
            })
            .collect();

        ProfileDescriptor {
            id: self.id().to_string(),
            name: self.name().to_string(),
            sections,
            required_fields: required.into_iter().map(str::to_string).collect(),
            plan_sections: self.plan_sections().iter().map(|s| s.to_string()).collect(),
        }
    }
}

fn field_line(label: &str, value: &FieldValue) -> String {
    if value.is_blank() {
        format!("- {label}: {BLANK_VALUE}")
    } else {
        format!("- {label}: {value}")
    }
}

fn block(title: &str, lines: &[String]) -> String {
    let mut out = format!("{title}:\n");
    for line in lines {
        out.push_str(line);
        out.push('\n');
    }
    out
}

/// A profile as sent to the form front end.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProfileDescriptor {
    pub id: String,
    pub name: String,
    pub sections: Vec<Section>,
    pub required_fields: Vec<String>,
    pub plan_sections: Vec<String>,
}

/// A profile whose required-field set is replaced by deployment configuration.
pub struct ConfiguredProfile {
    base: Box<dyn IntakeProfile>,
    required: Vec<String>,
}

impl ConfiguredProfile {
    /// Blank keys in `required` are dropped. An override left with no keys
    /// would disable the completeness check, so it is rejected.
    pub fn new(base: Box<dyn IntakeProfile>, required: Vec<String>) -> Result<Self, IntakeError> {
        let required: Vec<String> = required
            .into_iter()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .collect();
        if required.is_empty() {
            return Err(IntakeError::EmptyRequiredFields(base.id().to_string()));
        }
        Ok(Self { base, required })
    }
}

impl IntakeProfile for ConfiguredProfile {
    fn id(&self) -> &str {
        self.base.id()
    }

    fn name(&self) -> &str {
        self.base.name()
    }

    fn sections(&self) -> &[Section] {
        self.base.sections()
    }

    fn plan_sections(&self) -> &[&str] {
        self.base.plan_sections()
    }

    fn required_fields(&self) -> Vec<&str> {
        self.required.iter().map(String::as_str).collect()
    }
}

/// Return all registered profiles.
pub fn all_profiles() -> Vec<Box<dyn IntakeProfile>> {
    vec![
        Box::new(profiles::basic::Basic),
        Box::new(profiles::clinical::Clinical),
        Box::new(profiles::comprehensive::Comprehensive),
    ]
}

/// Look up a profile by ID.
pub fn get_profile(id: &str) -> Option<Box<dyn IntakeProfile>> {
    all_profiles().into_iter().find(|p| p.id() == id)
}

/// Look up a profile by ID, optionally overriding its required fields.
pub fn resolve_profile(
    id: &str,
    required_override: Option<Vec<String>>,
) -> Result<Box<dyn IntakeProfile>, IntakeError> {
    let base = get_profile(id).ok_or_else(|| IntakeError::UnknownProfile(id.to_string()))?;
    Ok(match required_override {
        Some(required) => Box::new(ConfiguredProfile::new(base, required)?),
        None => base,
    })
}
