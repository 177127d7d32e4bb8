//! Prompt construction. Pure: the same intake always yields the same text.

use std::collections::BTreeMap;

use ortho_core::models::field::FieldValue;
use ortho_intake::IntakeProfile;

pub const SYSTEM_INSTRUCTION: &str =
    "You are an experienced orthodontist providing treatment plans.";

const PLAN_REQUEST: &str =
    "Based on the above information, provide a suggested orthodontic treatment plan.";

/// Render the user prompt for a patient's intake under `profile`.
pub fn build_prompt(profile: &dyn IntakeProfile, info: &BTreeMap<String, FieldValue>) -> String {
    let mut prompt = profile.to_structured_input(info);
    prompt.push('\n');
    prompt.push_str(PLAN_REQUEST);
    prompt.push('\n');

    let sections = join_sections(profile.plan_sections());
    if !sections.is_empty() {
        prompt.push_str(&format!("Include {sections}.\n"));
    }

    prompt
}

/// `["a"]` → `a`, `["a", "b"]` → `a and b`, `["a", "b", "c"]` → `a, b, and c`.
pub fn join_sections(sections: &[&str]) -> String {
    match sections {
        [] => String::new(),
        [only] => only.to_string(),
        [first, second] => format!("{first} and {second}"),
        [init @ .., last] => format!("{}, and {last}", init.join(", ")),
    }
}
