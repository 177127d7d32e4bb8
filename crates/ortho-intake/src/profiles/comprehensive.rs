use crate::IntakeProfile;
use crate::fields::{FieldSpec, Section};

use super::basic::patient_information;
use super::clinical::clinical_examination;

/// Intake, full clinical examination and lateral cephalometric analysis.
/// All structured clinical and radiographic fields are required.
pub struct Comprehensive;

impl IntakeProfile for Comprehensive {
    fn id(&self) -> &str {
        "comprehensive"
    }

    fn name(&self) -> &str {
        "Comprehensive Orthodontic Assessment"
    }

    fn sections(&self) -> &[Section] {
        static SECTIONS: std::sync::LazyLock<Vec<Section>> = std::sync::LazyLock::new(|| {
            vec![
                patient_information(),
                clinical_examination(true),
                Section {
                    id: "cephalometric_analysis".to_string(),
                    title: "Cephalometric Analysis".to_string(),
                    fields: vec![
                        FieldSpec::decimal("sna", "SNA (degrees)", 60.0, 100.0)
                            .required()
                            .describe("Maxilla to cranial base, norm 82 ± 2"),
                        FieldSpec::decimal("snb", "SNB (degrees)", 60.0, 100.0)
                            .required()
                            .describe("Mandible to cranial base, norm 80 ± 2"),
                        FieldSpec::decimal("anb", "ANB (degrees)", -15.0, 15.0)
                            .required()
                            .describe("Skeletal base relationship, norm 2 ± 2"),
                        FieldSpec::decimal("fma", "FMA (degrees)", 10.0, 50.0).required(),
                        FieldSpec::decimal("impa", "IMPA (degrees)", 60.0, 130.0).required(),
                        FieldSpec::decimal("u1Sn", "U1-SN (degrees)", 80.0, 140.0).required(),
                        FieldSpec::decimal("wits", "Wits Appraisal (mm)", -15.0, 15.0)
                            .required(),
                    ],
                },
            ]
        });
        &SECTIONS
    }

    fn plan_sections(&self) -> &[&str] {
        &[
            "appliance recommendations",
            "estimated treatment duration",
            "treatment phases",
            "retention protocol",
            "an estimated cost range",
            "lifestyle considerations",
        ]
    }
}
