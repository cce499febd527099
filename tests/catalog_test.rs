// ABOUTME: Tests for the metric catalog and snapshot normalization rules
// ABOUTME: Covers permission de-duplication, extractor selectivity, and absent-value handling
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright (c) 2025 Vitals Context

mod common;

use std::collections::HashSet;
use vitals_context::catalog::{self, keys};
use vitals_context::models::{AccessKind, HealthRecord, HealthSnapshot, RecordKind};

#[test]
fn permission_request_is_deduplicated_by_kind() {
    let request = catalog::permission_request();

    // two blood pressure metrics share one record kind
    assert_eq!(catalog::METRICS.len() + catalog::SESSIONS.len(), 15);
    assert_eq!(request.len(), 14);

    let kinds: HashSet<RecordKind> = request.iter().map(|p| p.record_kind).collect();
    assert_eq!(kinds.len(), request.len());
    assert!(kinds.contains(&RecordKind::BloodPressure));
    assert!(request.iter().all(|p| p.access == AccessKind::Read));
}

#[test]
fn blood_pressure_extractors_pick_their_component() {
    let record = HealthRecord::BloodPressure {
        systolic_mmhg: 120.0,
        diastolic_mmhg: 80.0,
    };

    let systolic = catalog::METRICS
        .iter()
        .find(|m| m.key == keys::BLOOD_PRESSURE_SYSTOLIC)
        .map(|m| (m.extract)(&record));
    let diastolic = catalog::METRICS
        .iter()
        .find(|m| m.key == keys::BLOOD_PRESSURE_DIASTOLIC)
        .map(|m| (m.extract)(&record));

    assert_eq!(systolic, Some(Some(120.0)));
    assert_eq!(diastolic, Some(Some(80.0)));
}

#[test]
fn extractors_ignore_foreign_record_kinds() {
    let record = HealthRecord::Steps { count: 10 };

    for descriptor in catalog::METRICS {
        if descriptor.kind == RecordKind::Steps {
            assert_eq!((descriptor.extract)(&record), Some(10.0));
        } else {
            assert_eq!((descriptor.extract)(&record), None);
        }
    }
}

#[test]
fn snapshot_normalizes_non_positive_and_non_finite_values_to_absent() {
    let mut snapshot = HealthSnapshot::new();
    snapshot.record("zero", Some(0.0));
    snapshot.record("negative", Some(-3.5));
    snapshot.record("nan", Some(f64::NAN));
    snapshot.record("infinite", Some(f64::INFINITY));
    snapshot.record("missing", None);
    snapshot.record("present", Some(0.001));

    assert_eq!(snapshot.get("zero"), None);
    assert_eq!(snapshot.get("negative"), None);
    assert_eq!(snapshot.get("nan"), None);
    assert_eq!(snapshot.get("infinite"), None);
    assert_eq!(snapshot.get("missing"), None);
    assert_eq!(snapshot.get("present"), Some(0.001));
    assert_eq!(snapshot.len(), 1);
}

#[test]
fn snapshot_overwrites_prior_value_with_absent() {
    let mut snapshot = HealthSnapshot::new();
    snapshot.record("steps", Some(500.0));
    snapshot.record("steps", None);

    assert_eq!(snapshot.get("steps"), None);
    assert!(snapshot.is_empty());
}
