use chrono::Utc;
use uuid::Uuid;

use treatment_core::models::condition::{Condition, ConditionStatus};
use treatment_core::models::medication::{Medication, MedicationStatus};
use treatment_openai::context::build_profile_block;

fn condition(name: &str, icd10: Option<&str>) -> Condition {
    Condition {
        id: Uuid::new_v4(),
        account_id: Uuid::new_v4(),
        name: name.to_string(),
        icd10_code: icd10.map(str::to_string),
        status: ConditionStatus::Active,
        diagnosed_on: None,
        notes: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn medication(name: &str, dosage: &str, frequency: &str) -> Medication {
    Medication {
        id: Uuid::new_v4(),
        account_id: Uuid::new_v4(),
        name: name.to_string(),
        dosage: dosage.to_string(),
        frequency: frequency.to_string(),
        status: MedicationStatus::Active,
        prescriber: None,
        started_on: None,
        stopped_on: None,
        notes: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[test]
fn empty_record_returns_empty_string() {
    assert_eq!(build_profile_block(&[], &[]), "");
}

#[test]
fn conditions_only_omits_medications_section() {
    let block = build_profile_block(&[condition("Hypertension", Some("I10"))], &[]);

    assert!(block.starts_with("<health_profile>"));
    assert!(block.ends_with("</health_profile>"));
    assert!(block.contains("- Hypertension (active, ICD-10 I10)"));
    assert!(!block.contains("<medications>"));
}

#[test]
fn condition_without_code_has_no_icd_suffix() {
    let block = build_profile_block(&[condition("Migraine", None)], &[]);

    assert!(block.contains("- Migraine (active)\n"));
}

#[test]
fn full_record_includes_both_sections() {
    let block = build_profile_block(
        &[condition("Hypertension", Some("I10"))],
        &[medication("Lisinopril", "10 mg", "once daily")],
    );

    assert!(block.contains("<conditions>"));
    assert!(block.contains("<medications>"));
    assert!(block.contains("- Lisinopril 10 mg once daily (active)"));
}
