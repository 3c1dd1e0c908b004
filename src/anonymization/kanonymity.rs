//! k-anonymity grouping with l-diversity suppression
//!
//! Quasi-identifiers are generalized (age to a 10-year bucket, zip code to a
//! 3-character prefix, gender unchanged) and records sharing a generalized key
//! form an equivalence class. Classes smaller than `k`, or with fewer than `l`
//! distinct sensitive values, are suppressed whole. There is no second,
//! coarser generalization pass.

use crate::domain::{AegisError, AnonymizedData, PersonalData, Result};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// Generalized quasi-identifiers of a record
///
/// Ordering is (age bucket, gender, zip prefix) and defines group numbering.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GeneralizedKey {
    /// Lower bound of the 10-year age bucket
    pub age_floor: u32,
    pub gender: String,
    /// First 3 characters of the zip code
    pub zip_prefix: String,
}

impl GeneralizedKey {
    pub fn from_record(record: &PersonalData) -> Self {
        Self {
            age_floor: (record.age / 10) * 10,
            gender: record.gender.clone(),
            zip_prefix: record.zip_code.chars().take(3).collect(),
        }
    }

    /// Age bucket rendered as `"30-39"`
    pub fn age_range(&self) -> String {
        format!("{}-{}", self.age_floor, self.age_floor.saturating_add(9))
    }

    /// Zip prefix rendered as `"280**"`
    pub fn masked_zip(&self) -> String {
        format!("{}**", self.zip_prefix)
    }

    /// Attribute mapping attached to every released member of the class
    pub fn attributes(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("age".to_string(), self.age_range()),
            ("gender".to_string(), self.gender.clone()),
            ("zip".to_string(), self.masked_zip()),
        ])
    }
}

/// Outcome counters of one grouping run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KAnonymityReport {
    pub classes_total: usize,
    pub classes_released: usize,
    pub records_released: usize,
    pub records_suppressed: usize,
    /// Classes rejected because they had fewer than `k` members
    pub suppressed_by_size: usize,
    /// Classes with enough members but fewer than `l` distinct sensitive values
    pub suppressed_by_diversity: usize,
}

/// Group `records` into k-anonymous, l-diverse equivalence classes
///
/// Returns one [`AnonymizedData`] per released record. Classes are numbered
/// from 1 in ascending [`GeneralizedKey`] order; members keep input order.
///
/// # Errors
///
/// [`AegisError::InvalidParameter`] if `k` or `l` is zero.
pub fn k_anonymize(
    records: &[PersonalData],
    k: usize,
    l: usize,
) -> Result<(Vec<AnonymizedData>, KAnonymityReport)> {
    if k < 1 {
        return Err(AegisError::InvalidParameter(format!(
            "k must be >= 1, got {k}"
        )));
    }
    if l < 1 {
        return Err(AegisError::InvalidParameter(format!(
            "l must be >= 1, got {l}"
        )));
    }

    let mut classes: BTreeMap<GeneralizedKey, Vec<&PersonalData>> = BTreeMap::new();
    for record in records {
        classes
            .entry(GeneralizedKey::from_record(record))
            .or_default()
            .push(record);
    }

    let mut report = KAnonymityReport {
        classes_total: classes.len(),
        ..Default::default()
    };
    let mut released = Vec::new();
    let mut group_id = 1u32;

    for (key, members) in &classes {
        if members.len() < k {
            report.suppressed_by_size += 1;
            report.records_suppressed += members.len();
            continue;
        }
        if !has_l_diversity(members, l) {
            report.suppressed_by_diversity += 1;
            report.records_suppressed += members.len();
            continue;
        }

        let attributes = key.attributes();
        released.extend(members.iter().map(|record| AnonymizedData {
            group_id,
            generalized_attributes: attributes.clone(),
            sensitive_value: record.disease.clone(),
        }));

        report.classes_released += 1;
        report.records_released += members.len();
        group_id += 1;
    }

    Ok((released, report))
}

fn has_l_diversity(members: &[&PersonalData], l: usize) -> bool {
    let distinct: HashSet<&str> = members.iter().map(|r| r.disease.as_str()).collect();
    distinct.len() >= l
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(age: u32, gender: &str, zip: &str, disease: &str) -> PersonalData {
        PersonalData::new(age, gender, zip, disease)
    }

    #[test]
    fn test_generalized_key() {
        let key = GeneralizedKey::from_record(&record(37, "M", "28013", "flu"));
        assert_eq!(key.age_range(), "30-39");
        assert_eq!(key.masked_zip(), "280**");
        assert_eq!(key.attributes()["gender"], "M");
    }

    #[test]
    fn test_short_zip_is_kept_whole() {
        let key = GeneralizedKey::from_record(&record(5, "F", "12", "flu"));
        assert_eq!(key.age_range(), "0-9");
        assert_eq!(key.masked_zip(), "12**");
    }

    #[test]
    fn test_release_and_suppression() {
        let records = vec![
            record(31, "F", "28013", "flu"),
            record(35, "F", "28044", "asthma"),
            record(38, "F", "28099", "flu"),
            // single-member class: suppressed by size
            record(62, "M", "08001", "diabetes"),
            // two members, one disease: suppressed by diversity
            record(44, "M", "41001", "flu"),
            record(47, "M", "41002", "flu"),
        ];

        let (released, report) = k_anonymize(&records, 2, 2).unwrap();
        assert_eq!(released.len(), 3);
        assert!(released.iter().all(|r| r.group_id == 1));
        assert_eq!(report.classes_total, 3);
        assert_eq!(report.classes_released, 1);
        assert_eq!(report.suppressed_by_size, 1);
        assert_eq!(report.suppressed_by_diversity, 1);
        assert_eq!(report.records_suppressed, 3);
    }

    #[test]
    fn test_group_ids_follow_key_order() {
        // Input lists the "M" class first; "F" sorts first and gets id 1
        let records = vec![
            record(22, "M", "10001", "flu"),
            record(25, "M", "10002", "cold"),
            record(21, "F", "10003", "flu"),
            record(29, "F", "10004", "cold"),
        ];

        let (released, _) = k_anonymize(&records, 2, 2).unwrap();
        assert_eq!(released[0].generalized_attributes["gender"], "F");
        assert_eq!(released[0].group_id, 1);
        assert_eq!(released[2].generalized_attributes["gender"], "M");
        assert_eq!(released[2].group_id, 2);
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(matches!(
            k_anonymize(&[], 0, 2),
            Err(AegisError::InvalidParameter(_))
        ));
        assert!(matches!(
            k_anonymize(&[], 2, 0),
            Err(AegisError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_empty_input() {
        let (released, report) = k_anonymize(&[], 3, 2).unwrap();
        assert!(released.is_empty());
        assert_eq!(report, KAnonymityReport::default());
    }
}
