use crate::IntakeProfile;
use crate::fields::{FieldSpec, Section};

pub const GENDERS: &[&str] = &["Male", "Female", "Other"];
pub const BITE_TYPES: &[&str] = &["Normal", "Overbite", "Underbite", "Crossbite", "Open Bite"];
pub const CROWDING_LEVELS: &[&str] = &["None", "Mild", "Moderate", "Severe"];

/// The original single-page intake: demographics, chief complaint, bite and
/// crowding. Everything except treatment history is required.
pub struct Basic;

/// The "Patient Information" block shared by every profile.
pub fn patient_information() -> Section {
    Section {
        id: "patient_information".to_string(),
        title: "Patient Information".to_string(),
        fields: vec![
            FieldSpec::integer("age", "Age", 0, 120).required(),
            FieldSpec::choice("gender", "Gender", GENDERS).required(),
            FieldSpec::text("mainConcern", "Main Concern")
                .required()
                .describe("Chief complaint in the patient's words"),
            FieldSpec::choice("biteType", "Bite Type", BITE_TYPES).required(),
            FieldSpec::choice("crowding", "Crowding", CROWDING_LEVELS).required(),
            FieldSpec::text("treatmentHistory", "Treatment History")
                .describe("Previous orthodontic or dental treatment"),
        ],
    }
}

impl IntakeProfile for Basic {
    fn id(&self) -> &str {
        "basic"
    }

    fn name(&self) -> &str {
        "Orthodontic Intake"
    }

    fn sections(&self) -> &[Section] {
        static SECTIONS: std::sync::LazyLock<Vec<Section>> =
            std::sync::LazyLock::new(|| vec![patient_information()]);
        &SECTIONS
    }

    fn plan_sections(&self) -> &[&str] {
        &[
            "recommendations for appliances",
            "estimated treatment duration",
            "any additional considerations",
        ]
    }
}
