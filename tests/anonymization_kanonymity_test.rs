//! Integration tests for k-anonymity grouping with l-diversity suppression

use aegis::anonymization::{AnonymizationConfig, AnonymizationEngine};
use aegis::domain::{AegisError, PersonalData};
use std::collections::{HashMap, HashSet};

fn engine() -> AnonymizationEngine {
    AnonymizationEngine::new(AnonymizationConfig::default()).expect("Failed to create engine")
}

fn cohort() -> Vec<PersonalData> {
    vec![
        // 30-39 / F / 280: three records, two diseases -> released
        PersonalData::new(31, "F", "28013", "flu"),
        PersonalData::new(34, "F", "28044", "asthma"),
        PersonalData::new(39, "F", "28099", "flu"),
        // 20-29 / M / 080: three records, one disease -> suppressed by l
        PersonalData::new(22, "M", "08001", "diabetes"),
        PersonalData::new(25, "M", "08002", "diabetes"),
        PersonalData::new(29, "M", "08003", "diabetes"),
        // 40-49 / F / 410: two records -> suppressed by k
        PersonalData::new(41, "F", "41001", "flu"),
        PersonalData::new(45, "F", "41002", "asthma"),
        // 20-29 / F / 080: released, sorts before 30-39
        PersonalData::new(20, "F", "08010", "migraine"),
        PersonalData::new(21, "F", "08011", "flu"),
        PersonalData::new(28, "F", "08012", "asthma"),
    ]
}

#[test]
fn test_every_released_group_meets_k_and_l() {
    let (released, report) = engine().anonymize_with_report(&cohort(), 3, 2).unwrap();

    let mut groups: HashMap<u32, Vec<&str>> = HashMap::new();
    for record in &released {
        groups
            .entry(record.group_id)
            .or_default()
            .push(record.sensitive_value.as_str());
    }

    for (group_id, values) in &groups {
        assert!(values.len() >= 3, "group {group_id} smaller than k");
        let distinct: HashSet<_> = values.iter().collect();
        assert!(distinct.len() >= 2, "group {group_id} not 2-diverse");
    }

    assert_eq!(report.classes_total, 4);
    assert_eq!(report.classes_released, 2);
    assert_eq!(report.records_released, 6);
    assert_eq!(report.records_suppressed, 5);
    assert_eq!(report.suppressed_by_size, 1);
    assert_eq!(report.suppressed_by_diversity, 1);
}

#[test]
fn test_group_ids_follow_generalized_key_order() {
    let released = engine().anonymize_with_k_anonymity(&cohort(), 3).unwrap();

    let first = &released[0];
    assert_eq!(first.group_id, 1);
    assert_eq!(first.generalized_attributes["age"], "20-29");
    assert_eq!(first.generalized_attributes["gender"], "F");
    assert_eq!(first.generalized_attributes["zip"], "080**");

    let last = released.last().unwrap();
    assert_eq!(last.group_id, 2);
    assert_eq!(last.generalized_attributes["age"], "30-39");
    assert_eq!(last.generalized_attributes["zip"], "280**");
}

#[test]
fn test_numbering_independent_of_input_order() {
    let forward = engine().anonymize_with_k_anonymity(&cohort(), 3).unwrap();

    let mut reversed_input = cohort();
    reversed_input.reverse();
    let reversed = engine().anonymize_with_k_anonymity(&reversed_input, 3).unwrap();

    let ids = |records: &[aegis::domain::AnonymizedData]| {
        let mut pairs: Vec<(u32, String)> = records
            .iter()
            .map(|r| (r.group_id, r.generalized_attributes["age"].clone()))
            .collect();
        pairs.sort();
        pairs.dedup();
        pairs
    };
    assert_eq!(ids(&forward), ids(&reversed));
}

#[test]
fn test_members_keep_input_order_and_values() {
    let released = engine().anonymize_with_k_anonymity(&cohort(), 3).unwrap();
    let thirties: Vec<&str> = released
        .iter()
        .filter(|r| r.group_id == 2)
        .map(|r| r.sensitive_value.as_str())
        .collect();
    assert_eq!(thirties, vec!["flu", "asthma", "flu"]);
}

#[test]
fn test_l_of_one_releases_homogeneous_class() {
    let released = engine().anonymize_with_diversity(&cohort(), 3, 1).unwrap();
    assert!(released.iter().any(|r| r.sensitive_value == "diabetes"));
    assert_eq!(released.len(), 9);
}

#[test]
fn test_empty_input_and_invalid_parameters() {
    assert!(engine().anonymize_with_k_anonymity(&[], 3).unwrap().is_empty());

    assert!(matches!(
        engine().anonymize_with_k_anonymity(&cohort(), 0),
        Err(AegisError::InvalidParameter(_))
    ));
    assert!(matches!(
        engine().anonymize_with_diversity(&cohort(), 3, 0),
        Err(AegisError::InvalidParameter(_))
    ));
}

#[test]
fn test_short_zip_and_decade_boundaries() {
    let records = vec![
        PersonalData::new(9, "X", "1", "a"),
        PersonalData::new(0, "X", "1", "b"),
    ];
    let released = engine().anonymize_with_diversity(&records, 2, 2).unwrap();
    assert_eq!(released.len(), 2);
    assert_eq!(released[0].generalized_attributes["age"], "0-9");
    assert_eq!(released[0].generalized_attributes["zip"], "1**");
}
