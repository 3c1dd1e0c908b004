//! End-to-end tests of the authenticated protection facade

use aegis::anonymization::retention::MILLIS_PER_DAY;
use aegis::anonymization::{AnonymizationConfig, DataType, MaskingPolicy};
use aegis::audit::{verify_signed_log, AuditConfig};
use aegis::config::secret_string;
use aegis::domain::{AegisError, ManualClock, NumericData, PersonalData};
use aegis::protection::{event_types, DataProtectionManager, OpenGate, PinGate};
use std::sync::Arc;
use tempfile::tempdir;

const START: i64 = 1_700_000_000_000;

fn manager_at(start: i64) -> (DataProtectionManager, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(start));
    let manager = DataProtectionManager::with_clock(
        AnonymizationConfig::default(),
        AuditConfig::default(),
        clock.clone(),
    )
    .unwrap();
    (manager, clock)
}

fn pin_gate(supplied: Option<&str>) -> PinGate {
    PinGate::new(
        secret_string("2468".to_string()),
        supplied.map(|pin| secret_string(pin.to_string())),
    )
}

fn event_types_of(manager: &DataProtectionManager) -> Vec<String> {
    manager
        .ledger()
        .events()
        .into_iter()
        .map(|e| e.event_type)
        .collect()
}

fn patients() -> Vec<PersonalData> {
    vec![
        PersonalData::new(34, "F", "28013", "flu"),
        PersonalData::new(36, "F", "28045", "asthma"),
        PersonalData::new(31, "F", "28001", "flu"),
        PersonalData::new(52, "M", "08012", "diabetes"),
    ]
}

#[test]
fn test_wrong_pin_blocks_access_and_is_audited() {
    let (manager, _clock) = manager_at(START);

    let err = manager.unlock(&pin_gate(Some("0000"))).unwrap_err();
    assert!(matches!(err, AegisError::Authentication(_)));
    assert_eq!(err.exit_code(), 1);

    let events = manager.ledger().events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_type, event_types::AUTH_FAILURE);
    assert_eq!(events[0].details, "Access denied via pin gate: PIN mismatch");
    assert!(!events[0].details.contains("0000"));
    assert!(!events[0].details.contains("2468"));
}

#[test]
fn test_missing_pin_is_denied() {
    let (manager, _clock) = manager_at(START);

    let err = manager.unlock(&pin_gate(None)).unwrap_err();
    assert!(err.to_string().contains("no PIN supplied"));
    assert_eq!(event_types_of(&manager), vec![event_types::AUTH_FAILURE]);
}

#[test]
fn test_repeated_failures_raise_burst_alert() {
    let (manager, clock) = manager_at(START);

    for _ in 0..3 {
        assert!(manager.unlock(&pin_gate(Some("1111"))).is_err());
        clock.advance(500);
    }
    assert_eq!(manager.ledger().alerts_raised(), 1);
}

#[test]
fn test_every_operation_is_audited() {
    let (manager, clock) = manager_at(START);
    let session = manager.unlock(&pin_gate(Some("2468"))).unwrap();

    clock.advance(10_000);
    let view = session.anonymize_for_display(&patients(), 3, 2).unwrap();
    assert_eq!(view.records.len(), 3);
    assert_eq!(view.report.records_suppressed, 1);

    clock.advance(10_000);
    let masked = session
        .mask_field("600123456", &session.default_policy(DataType::Phone))
        .unwrap();
    assert_eq!(masked, "*****3456");

    clock.advance(10_000);
    let noisy = session
        .noisy_statistic(&NumericData::new("admissions", 40.0), Some(0.5))
        .unwrap();
    assert_eq!(noisy.label, "admissions");

    clock.advance(10_000);
    session.store_record("patient-1", r#"{"age":34}"#);

    clock.advance(10_000);
    assert_eq!(session.enforce_retention(None), 0);

    clock.advance(10_000);
    let info = session.data_protection_info();
    assert_eq!(info["k_anonymity"], "k=3, l=2");
    assert_eq!(info["retention"], "30 days");
    assert_eq!(info["records_stored"], "1");

    clock.advance(10_000);
    let logs = session.access_logs();
    assert_eq!(logs.len(), 7);

    assert_eq!(
        event_types_of(&manager),
        vec![
            event_types::AUTH,
            event_types::ANONYMIZATION,
            event_types::MASKING,
            event_types::DIFFERENTIAL_PRIVACY,
            event_types::DATA_STORE,
            event_types::RETENTION,
            event_types::DATA_PROTECTION,
            event_types::DATA_ACCESS,
        ]
    );
    assert_eq!(manager.ledger().alerts_raised(), 0);
}

#[test]
fn test_event_details_never_contain_raw_values() {
    let (manager, _clock) = manager_at(START);
    let session = manager.unlock(&OpenGate).unwrap();

    session
        .mask_field("bob@hospital.org", &MaskingPolicy::new(DataType::Email))
        .unwrap();
    assert!(session
        .mask_field("no-at-sign", &MaskingPolicy::new(DataType::Email))
        .is_err());
    session.store_record("patient-9", "diagnosis: hypertension");

    let details: Vec<_> = manager
        .ledger()
        .events()
        .into_iter()
        .map(|e| e.details)
        .collect();
    assert!(details.contains(&"EMAIL value rejected".to_string()));
    assert!(details
        .iter()
        .all(|d| !d.contains("bob") && !d.contains("no-at-sign") && !d.contains("hypertension")));
}

#[test]
fn test_rejected_anonymization_is_audited() {
    let (manager, _clock) = manager_at(START);
    let session = manager.unlock(&OpenGate).unwrap();

    let err = session.anonymize_for_display(&patients(), 0, 1).unwrap_err();
    assert!(matches!(err, AegisError::InvalidParameter(_)));

    let events = manager.ledger().events();
    assert_eq!(events[1].event_type, event_types::ANONYMIZATION);
    assert!(events[1].details.contains("rejected"));
}

#[test]
fn test_retention_removes_expired_records() {
    let (manager, clock) = manager_at(START);
    let session = manager.unlock(&OpenGate).unwrap();

    session.store_record("old", "a");
    clock.advance(20 * MILLIS_PER_DAY);
    session.store_record("recent", "b");
    clock.advance(10 * MILLIS_PER_DAY + 1);

    assert_eq!(session.enforce_retention(None), 1);
    assert_eq!(manager.store().len(), 1);
    assert_eq!(manager.store().get("recent").as_deref(), Some("b"));
    assert!(manager.store().get("old").is_none());

    assert_eq!(session.enforce_retention(Some(5)), 1);
    assert!(manager.store().is_empty());
}

#[test]
fn test_clear_all_data_leaves_nothing_behind() {
    let (manager, _clock) = manager_at(START);
    let session = manager.unlock(&OpenGate).unwrap();

    session.store_record("patient-1", "x");
    session.store_record("patient-2", "y");

    let summary = session.clear_all_data();
    assert_eq!(summary.records_removed, 2);
    assert_eq!(summary.events_removed, 3);
    assert!(manager.ledger().is_empty());
    assert!(manager.store().is_empty());

    // The read is logged after the snapshot is taken
    assert!(session.access_logs().is_empty());
    assert_eq!(manager.ledger().len(), 1);
}

#[test]
fn test_session_export_verifies() {
    let dir = tempdir().unwrap();
    let log_path = dir.path().join("signed_log.json");
    let key_path = dir.path().join("ledger.pem");

    let (manager, _clock) = manager_at(START);
    let session = manager.unlock(&OpenGate).unwrap();
    session.store_record("patient-1", "x");

    let summary = session.try_export_signed_log(&log_path).unwrap();
    assert_eq!(summary.events, 2);
    session.export_public_key(&key_path).unwrap();

    let document = std::fs::read_to_string(&log_path).unwrap();
    let pem = std::fs::read_to_string(&key_path).unwrap();
    let events = verify_signed_log(&document, &pem).unwrap();
    assert_eq!(events[0].event_type, event_types::AUTH);
    assert_eq!(events[1].event_type, event_types::DATA_STORE);
}
