use std::collections::BTreeMap;

use ortho_core::models::field::FieldValue;
use ortho_intake::error::IntakeError;
use ortho_intake::{IntakeProfile, all_profiles, get_profile, resolve_profile};

fn alice_info() -> BTreeMap<String, FieldValue> {
    BTreeMap::from([
        ("age".to_string(), FieldValue::Integer(12)),
        ("gender".to_string(), FieldValue::from("Female")),
        ("mainConcern".to_string(), FieldValue::from("crowding")),
        ("biteType".to_string(), FieldValue::from("Overbite")),
        ("crowding".to_string(), FieldValue::from("Mild")),
        ("treatmentHistory".to_string(), FieldValue::from("")),
    ])
}

#[test]
fn profile_ids_are_unique() {
    let mut ids: Vec<String> = all_profiles().iter().map(|p| p.id().to_string()).collect();
    let count = ids.len();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), count);
}

#[test]
fn every_required_field_is_defined_by_its_profile() {
    for profile in all_profiles() {
        for key in profile.required_fields() {
            assert!(
                profile.field(key).is_some(),
                "{}: required field '{key}' has no definition",
                profile.id()
            );
        }
    }
}

#[test]
fn basic_requires_the_five_intake_fields() {
    let basic = get_profile("basic").unwrap();
    assert_eq!(
        basic.required_fields(),
        vec!["age", "gender", "mainConcern", "biteType", "crowding"]
    );
}

#[test]
fn comprehensive_requires_more_than_clinical() {
    let clinical = get_profile("clinical").unwrap();
    let comprehensive = get_profile("comprehensive").unwrap();

    let clinical_required = clinical.required_fields();
    let comprehensive_required = comprehensive.required_fields();
    for key in &clinical_required {
        assert!(comprehensive_required.contains(key), "missing {key}");
    }
    assert!(comprehensive_required.contains(&"anb"));
    assert!(comprehensive_required.contains(&"canineRelationship"));
    assert!(!clinical_required.contains(&"canineRelationship"));
}

#[test]
fn complete_basic_info_has_no_missing_fields() {
    let basic = get_profile("basic").unwrap();
    assert!(basic.missing_fields(&alice_info()).is_empty());
}

#[test]
fn blank_and_absent_required_fields_are_reported_in_profile_order() {
    let basic = get_profile("basic").unwrap();
    let mut info = alice_info();
    info.insert("mainConcern".to_string(), FieldValue::from("   "));
    info.remove("age");

    assert_eq!(basic.missing_fields(&info), vec!["age", "mainConcern"]);
}

#[test]
fn structured_input_matches_the_intake_layout() {
    let basic = get_profile("basic").unwrap();
    let rendered = basic.to_structured_input(&alice_info());

    assert_eq!(
        rendered,
        "Patient Information:\n\
         - Age: 12\n\
         - Gender: Female\n\
         - Main Concern: crowding\n\
         - Bite Type: Overbite\n\
         - Crowding: Mild\n\
         - Treatment History: None reported\n"
    );
}

#[test]
fn unknown_fields_render_under_additional_information() {
    let basic = get_profile("basic").unwrap();
    let mut info = alice_info();
    info.insert("referringDentist".to_string(), FieldValue::from("Dr. Lee"));
    info.insert("allergies".to_string(), FieldValue::from("latex"));

    let rendered = basic.to_structured_input(&info);
    assert!(rendered.ends_with(
        "Additional Information:\n- allergies: latex\n- referringDentist: Dr. Lee\n"
    ));
}

#[test]
fn structured_input_is_deterministic() {
    let profile = get_profile("comprehensive").unwrap();
    let mut info = alice_info();
    info.insert("overjet".to_string(), FieldValue::Decimal(6.5));
    info.insert("anb".to_string(), FieldValue::Decimal(5.0));

    let first = profile.to_structured_input(&info);
    let second = profile.to_structured_input(&info.clone());
    assert_eq!(first, second);
    assert!(first.contains("Clinical Examination:\n- Overjet (mm): 6.5\n"));
    assert!(first.contains("Cephalometric Analysis:\n- ANB (degrees): 5\n"));
}

#[test]
fn validation_accepts_well_formed_values() {
    let clinical = get_profile("clinical").unwrap();
    let mut fields = alice_info();
    fields.insert("gender".to_string(), FieldValue::from("female"));
    fields.insert("overjet".to_string(), FieldValue::Integer(4));
    fields.insert("molarRelationship".to_string(), FieldValue::from("Class II Division 1"));
    fields.insert("freeNote".to_string(), FieldValue::Integer(7));

    assert!(clinical.validate(&fields).is_empty());
}

#[test]
fn validation_rejects_out_of_range_and_unknown_options() {
    let basic = get_profile("basic").unwrap();
    let fields = BTreeMap::from([
        ("age".to_string(), FieldValue::Integer(250)),
        ("biteType".to_string(), FieldValue::from("Sideways")),
        ("crowding".to_string(), FieldValue::Integer(2)),
    ]);

    let errors = basic.validate(&fields);
    let mut keys: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
    keys.sort();
    assert_eq!(keys, vec!["age", "biteType", "crowding"]);

    let err = basic.check(&fields).unwrap_err();
    assert!(matches!(err, IntakeError::Invalid(ref e) if e.len() == 3));
    assert!(err.to_string().contains("Bite Type: 'Sideways' is not one of"));
}

#[test]
fn fractional_age_is_rejected() {
    let basic = get_profile("basic").unwrap();
    let fields = BTreeMap::from([("age".to_string(), FieldValue::Decimal(12.5))]);
    assert_eq!(basic.validate(&fields).len(), 1);
}

#[test]
fn configured_required_fields_replace_the_profile_defaults() {
    let profile = resolve_profile(
        "clinical",
        Some(vec!["age".to_string(), " ".to_string(), "overjet".to_string()]),
    )
    .unwrap();

    assert_eq!(profile.id(), "clinical");
    assert_eq!(profile.required_fields(), vec!["age", "overjet"]);

    let descriptor = profile.describe();
    assert_eq!(descriptor.required_fields, vec!["age", "overjet"]);
    let gender = descriptor
        .sections
        .iter()
        .flat_map(|s| &s.fields)
        .find(|f| f.key == "gender")
        .unwrap();
    assert!(!gender.required);
}

#[test]
fn unknown_profile_is_an_error() {
    assert!(matches!(
        resolve_profile("orthognathic", None),
        Err(IntakeError::UnknownProfile(id)) if id == "orthognathic"
    ));
}

#[test]
fn descriptor_serializes_field_kinds_with_a_type_tag() {
    let descriptor = get_profile("basic").unwrap().describe();
    let json = serde_json::to_value(&descriptor).unwrap();

    let age = &json["sections"][0]["fields"][0];
    assert_eq!(age["key"], "age");
    assert_eq!(age["kind"]["type"], "integer");
    assert_eq!(age["kind"]["max"], 120);
    assert_eq!(json["plan_sections"][1], "estimated treatment duration");
}

#[test]
fn numeric_text_is_normalized_for_numeric_fields_only() {
    let profile = get_profile("clinical").unwrap();
    let fields = BTreeMap::from([
        ("age".to_string(), FieldValue::from(" 12 ")),
        ("overjet".to_string(), FieldValue::from("4.5")),
        ("mainConcern".to_string(), FieldValue::from("7")),
        ("gender".to_string(), FieldValue::from("Female")),
        ("treatmentHistory".to_string(), FieldValue::from("")),
        ("freeNote".to_string(), FieldValue::from("3")),
    ]);

    let normalized = profile.normalize(fields);
    assert_eq!(normalized["age"], FieldValue::Integer(12));
    assert_eq!(normalized["overjet"], FieldValue::Decimal(4.5));
    assert_eq!(normalized["mainConcern"], FieldValue::from("7"));
    assert_eq!(normalized["gender"], FieldValue::from("Female"));
    assert_eq!(normalized["treatmentHistory"], FieldValue::from(""));
    assert_eq!(normalized["freeNote"], FieldValue::from("3"));
    assert!(profile.validate(&normalized).is_empty());
}

#[test]
fn unparseable_numeric_text_is_left_for_validation() {
    let basic = get_profile("basic").unwrap();
    let fields = BTreeMap::from([
        ("age".to_string(), FieldValue::from("twelve")),
        ("crowding".to_string(), FieldValue::from("NaN")),
    ]);

    let normalized = basic.normalize(fields);
    assert_eq!(normalized["age"], FieldValue::from("twelve"));

    let errors = basic.validate(&normalized);
    let age = errors.iter().find(|e| e.field == "age").unwrap();
    assert_eq!(age.message, "Age: 'twelve' is not a whole number in [0, 120]");
}

#[test]
fn fractional_text_for_an_integer_field_is_rejected() {
    let basic = get_profile("basic").unwrap();
    let fields = basic.normalize(BTreeMap::from([(
        "age".to_string(),
        FieldValue::from("12.5"),
    )]));

    assert_eq!(fields["age"], FieldValue::Decimal(12.5));
    assert_eq!(basic.validate(&fields).len(), 1);
}

#[test]
fn empty_required_field_override_is_rejected() {
    let result = resolve_profile("basic", Some(vec![" ".to_string(), String::new()]));
    assert!(matches!(
        result,
        Err(IntakeError::EmptyRequiredFields(id)) if id == "basic"
    ));

    assert!(resolve_profile("basic", Some(Vec::new())).is_err());
}
