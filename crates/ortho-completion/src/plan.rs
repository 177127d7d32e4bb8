//! Treatment plan generation.
//!
//! [`generate_plan`] is the whole operation for a caller that owns the
//! record. A server that must not hold its store lock across the network
//! call uses the three steps separately: [`prepare`], [`PlanRequest::send`],
//! then [`record_plan`].

use ortho_core::models::patient::PatientRecord;
use ortho_core::models::plan::PlanEntry;
use ortho_intake::IntakeProfile;
use tracing::{info, warn};

use crate::error::{PlanError, ServiceError};
use crate::prompt::{SYSTEM_INSTRUCTION, build_prompt};
use crate::service::CompletionService;

/// A checked, rendered request, detached from the record it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanRequest {
    pub patient_name: String,
    pub system_instruction: String,
    pub prompt: String,
}

impl PlanRequest {
    pub fn send(&self, service: &dyn CompletionService) -> Result<String, ServiceError> {
        service.complete(Some(&self.system_instruction), &self.prompt)
    }
}

/// Check required fields and render the prompt. No side effects.
pub fn prepare(
    record: &PatientRecord,
    profile: &dyn IntakeProfile,
) -> Result<PlanRequest, PlanError> {
    let missing = profile.missing_fields(&record.info);
    if !missing.is_empty() {
        info!(
            patient = %record.name,
            missing = missing.len(),
            "plan generation blocked by incomplete intake"
        );
        return Err(PlanError::IncompletePatientData { missing });
    }

    Ok(PlanRequest {
        patient_name: record.name.clone(),
        system_instruction: SYSTEM_INSTRUCTION.to_string(),
        prompt: build_prompt(profile, &record.info),
    })
}

/// Append a generated plan to the record's history. Returns its index.
pub fn record_plan(record: &mut PatientRecord, plan_text: impl Into<String>) -> usize {
    let index = record.append_plan(PlanEntry::new(plan_text));
    info!(patient = %record.name, index, "treatment plan recorded");
    index
}

/// Check, prompt, call the service, and on success append the plan.
///
/// On any error the record is left unchanged.
pub fn generate_plan(
    record: &mut PatientRecord,
    profile: &dyn IntakeProfile,
    service: &dyn CompletionService,
) -> Result<String, PlanError> {
    let request = prepare(record, profile)?;

    info!(patient = %record.name, profile = profile.id(), "generating treatment plan");

    let plan_text = request.send(service).inspect_err(|e| {
        warn!(patient = %record.name, error = %e, "treatment plan generation failed");
    })?;

    record_plan(record, plan_text.clone());
    Ok(plan_text)
}
