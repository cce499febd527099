// ABOUTME: Static declarative catalog of trackable metrics and aggregate sessions
// ABOUTME: Each metric carries an extraction rule reducing raw records to scalar values
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright (c) 2025 Vitals Context

//! # Metric Catalog
//!
//! The catalog is immutable and defined at process start. Metric descriptors
//! extract a numeric field from each raw record; session descriptors count
//! records instead. Two descriptors may share one record kind (blood pressure
//! yields both a systolic and a diastolic metric) — the permission request
//! set is de-duplicated by kind.

use crate::models::{HealthRecord, Permission, RecordKind};
use std::collections::HashSet;

/// Extraction rule turning one raw record into a numeric contribution
pub type MetricExtractor = fn(&HealthRecord) -> Option<f64>;

/// A trackable numeric measurement
#[derive(Debug, Clone, Copy)]
pub struct MetricDescriptor {
    /// Provider record kind to read
    pub kind: RecordKind,
    /// Stable snapshot key
    pub key: &'static str,
    /// Extraction rule applied per record
    pub extract: MetricExtractor,
}

/// A trackable aggregate session, reduced by counting records
#[derive(Debug, Clone, Copy)]
pub struct SessionDescriptor {
    /// Provider record kind to read
    pub kind: RecordKind,
    /// Stable snapshot key
    pub key: &'static str,
}

/// Stable snapshot keys shared by the catalog, categories, and persistence
pub mod keys {
    /// Step count over the window
    pub const STEPS: &str = "steps";
    /// Distance covered in meters
    pub const DISTANCE: &str = "distance";
    /// Active energy burned in kilocalories
    pub const ACTIVE_CALORIES: &str = "activeCalories";
    /// Total energy burned in kilocalories
    pub const TOTAL_CALORIES: &str = "totalCalories";
    /// Summed heart rate samples in bpm
    pub const HEART_RATE: &str = "heartRate";
    /// Body weight in kilograms
    pub const WEIGHT: &str = "weight";
    /// Body height in meters
    pub const HEIGHT: &str = "height";
    /// Fluid intake in liters
    pub const HYDRATION: &str = "hydration";
    /// Systolic blood pressure in mmHg
    pub const BLOOD_PRESSURE_SYSTOLIC: &str = "bloodPressureSystolic";
    /// Diastolic blood pressure in mmHg
    pub const BLOOD_PRESSURE_DIASTOLIC: &str = "bloodPressureDiastolic";
    /// Body temperature in degrees Celsius
    pub const BODY_TEMPERATURE: &str = "bodyTemperature";
    /// Basal metabolic rate in kcal/day
    pub const BASAL_METABOLIC_RATE: &str = "basalMetabolicRate";
    /// Respiratory rate in breaths per minute
    pub const RESPIRATORY_RATE: &str = "respiratoryRate";
    /// Count of recorded workout sessions
    pub const EXERCISE_SESSIONS: &str = "exerciseSessions";
    /// Count of recorded sleep sessions
    pub const SLEEP_SESSIONS: &str = "sleepSessions";
}

fn extract_steps(record: &HealthRecord) -> Option<f64> {
    match record {
        HealthRecord::Steps { count } => Some(*count as f64),
        _ => None,
    }
}

fn extract_distance(record: &HealthRecord) -> Option<f64> {
    match record {
        HealthRecord::Distance { meters } => Some(*meters),
        _ => None,
    }
}

fn extract_active_calories(record: &HealthRecord) -> Option<f64> {
    match record {
        HealthRecord::ActiveCaloriesBurned { kilocalories } => Some(*kilocalories),
        _ => None,
    }
}

fn extract_total_calories(record: &HealthRecord) -> Option<f64> {
    match record {
        HealthRecord::TotalCaloriesBurned { kilocalories } => Some(*kilocalories),
        _ => None,
    }
}

fn extract_heart_rate(record: &HealthRecord) -> Option<f64> {
    match record {
        HealthRecord::HeartRate { beats_per_minute } => Some(*beats_per_minute),
        _ => None,
    }
}

fn extract_weight(record: &HealthRecord) -> Option<f64> {
    match record {
        HealthRecord::Weight { kilograms } => Some(*kilograms),
        _ => None,
    }
}

fn extract_height(record: &HealthRecord) -> Option<f64> {
    match record {
        HealthRecord::Height { meters } => Some(*meters),
        _ => None,
    }
}

fn extract_hydration(record: &HealthRecord) -> Option<f64> {
    match record {
        HealthRecord::Hydration { liters } => Some(*liters),
        _ => None,
    }
}

fn extract_systolic(record: &HealthRecord) -> Option<f64> {
    match record {
        HealthRecord::BloodPressure { systolic_mmhg, .. } => Some(*systolic_mmhg),
        _ => None,
    }
}

fn extract_diastolic(record: &HealthRecord) -> Option<f64> {
    match record {
        HealthRecord::BloodPressure { diastolic_mmhg, .. } => Some(*diastolic_mmhg),
        _ => None,
    }
}

fn extract_body_temperature(record: &HealthRecord) -> Option<f64> {
    match record {
        HealthRecord::BodyTemperature { celsius } => Some(*celsius),
        _ => None,
    }
}

fn extract_basal_metabolic_rate(record: &HealthRecord) -> Option<f64> {
    match record {
        HealthRecord::BasalMetabolicRate {
            kilocalories_per_day,
        } => Some(*kilocalories_per_day),
        _ => None,
    }
}

fn extract_respiratory_rate(record: &HealthRecord) -> Option<f64> {
    match record {
        HealthRecord::RespiratoryRate { breaths_per_minute } => Some(*breaths_per_minute),
        _ => None,
    }
}

/// Numeric metrics to read, in declared batch order
pub const METRICS: &[MetricDescriptor] = &[
    MetricDescriptor {
        kind: RecordKind::Steps,
        key: keys::STEPS,
        extract: extract_steps,
    },
    MetricDescriptor {
        kind: RecordKind::Distance,
        key: keys::DISTANCE,
        extract: extract_distance,
    },
    MetricDescriptor {
        kind: RecordKind::ActiveCaloriesBurned,
        key: keys::ACTIVE_CALORIES,
        extract: extract_active_calories,
    },
    MetricDescriptor {
        kind: RecordKind::TotalCaloriesBurned,
        key: keys::TOTAL_CALORIES,
        extract: extract_total_calories,
    },
    MetricDescriptor {
        kind: RecordKind::HeartRate,
        key: keys::HEART_RATE,
        extract: extract_heart_rate,
    },
    MetricDescriptor {
        kind: RecordKind::Weight,
        key: keys::WEIGHT,
        extract: extract_weight,
    },
    MetricDescriptor {
        kind: RecordKind::Height,
        key: keys::HEIGHT,
        extract: extract_height,
    },
    MetricDescriptor {
        kind: RecordKind::Hydration,
        key: keys::HYDRATION,
        extract: extract_hydration,
    },
    MetricDescriptor {
        kind: RecordKind::BloodPressure,
        key: keys::BLOOD_PRESSURE_SYSTOLIC,
        extract: extract_systolic,
    },
    MetricDescriptor {
        kind: RecordKind::BloodPressure,
        key: keys::BLOOD_PRESSURE_DIASTOLIC,
        extract: extract_diastolic,
    },
    MetricDescriptor {
        kind: RecordKind::BodyTemperature,
        key: keys::BODY_TEMPERATURE,
        extract: extract_body_temperature,
    },
    MetricDescriptor {
        kind: RecordKind::BasalMetabolicRate,
        key: keys::BASAL_METABOLIC_RATE,
        extract: extract_basal_metabolic_rate,
    },
    MetricDescriptor {
        kind: RecordKind::RespiratoryRate,
        key: keys::RESPIRATORY_RATE,
        extract: extract_respiratory_rate,
    },
];

/// Aggregate sessions to count, read after all metrics
pub const SESSIONS: &[SessionDescriptor] = &[
    SessionDescriptor {
        kind: RecordKind::ExerciseSession,
        key: keys::EXERCISE_SESSIONS,
    },
    SessionDescriptor {
        kind: RecordKind::SleepSession,
        key: keys::SLEEP_SESSIONS,
    },
];

/// Unique record kinds across metrics and sessions, in first-seen order
#[must_use]
pub fn unique_record_kinds() -> Vec<RecordKind> {
    let mut seen = HashSet::new();
    let mut kinds = Vec::new();
    for kind in METRICS
        .iter()
        .map(|m| m.kind)
        .chain(SESSIONS.iter().map(|s| s.kind))
    {
        if seen.insert(kind) {
            kinds.push(kind);
        }
    }
    kinds
}

/// Read-permission request set derived from the catalog, de-duplicated by kind
#[must_use]
pub fn permission_request() -> Vec<Permission> {
    unique_record_kinds()
        .into_iter()
        .map(Permission::read)
        .collect()
}
