use crate::IntakeProfile;
use crate::fields::{FieldSpec, Section};

use super::basic::patient_information;

pub const FACIAL_PROFILES: &[&str] = &["Straight", "Convex", "Concave"];
pub const MOLAR_RELATIONSHIPS: &[&str] = &[
    "Class I",
    "Class II Division 1",
    "Class II Division 2",
    "Class III",
];
pub const CANINE_RELATIONSHIPS: &[&str] = &["Class I", "Class II", "Class III"];
pub const ORAL_HYGIENE_LEVELS: &[&str] = &["Good", "Fair", "Poor"];

/// Intake plus chairside clinical examination findings.
pub struct Clinical;

/// Clinical examination block. With `strict`, every structured finding is
/// required; otherwise only the core occlusal measurements are.
pub fn clinical_examination(strict: bool) -> Section {
    let maybe_required = |f: FieldSpec| if strict { f.required() } else { f };

    Section {
        id: "clinical_examination".to_string(),
        title: "Clinical Examination".to_string(),
        fields: vec![
            FieldSpec::choice("facialProfile", "Facial Profile", FACIAL_PROFILES).required(),
            FieldSpec::choice("molarRelationship", "Molar Relationship", MOLAR_RELATIONSHIPS)
                .required(),
            maybe_required(FieldSpec::choice(
                "canineRelationship",
                "Canine Relationship",
                CANINE_RELATIONSHIPS,
            )),
            FieldSpec::decimal("overjet", "Overjet (mm)", -10.0, 20.0).required(),
            FieldSpec::decimal("overbite", "Overbite (mm)", -10.0, 15.0).required(),
            maybe_required(FieldSpec::decimal(
                "midlineDeviation",
                "Midline Deviation (mm)",
                0.0,
                10.0,
            )),
            maybe_required(FieldSpec::choice(
                "oralHygiene",
                "Oral Hygiene",
                ORAL_HYGIENE_LEVELS,
            )),
            FieldSpec::text("tmjFindings", "TMJ Findings")
                .describe("Clicking, deviation on opening, tenderness"),
        ],
    }
}

impl IntakeProfile for Clinical {
    fn id(&self) -> &str {
        "clinical"
    }

    fn name(&self) -> &str {
        "Clinical Examination"
    }

    fn sections(&self) -> &[Section] {
        static SECTIONS: std::sync::LazyLock<Vec<Section>> = std::sync::LazyLock::new(|| {
            vec![patient_information(), clinical_examination(false)]
        });
        &SECTIONS
    }

    fn plan_sections(&self) -> &[&str] {
        &[
            "appliance recommendations",
            "estimated treatment duration",
            "treatment phases",
            "retention protocol",
            "lifestyle considerations",
        ]
    }
}
