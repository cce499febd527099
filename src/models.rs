// ABOUTME: Core domain models for the health data pipeline
// ABOUTME: Defines RecordKind, HealthRecord, Permission, and HealthSnapshot types
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright (c) 2025 Vitals Context

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Provider-defined category of health measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    /// Step count samples
    Steps,
    /// Distance covered
    Distance,
    /// Energy burned through activity
    ActiveCaloriesBurned,
    /// Total energy burned
    TotalCaloriesBurned,
    /// Heart rate samples
    HeartRate,
    /// Body weight measurements
    Weight,
    /// Body height measurements
    Height,
    /// Fluid intake
    Hydration,
    /// Blood pressure readings (systolic and diastolic)
    BloodPressure,
    /// Body temperature measurements
    BodyTemperature,
    /// Basal metabolic rate measurements
    BasalMetabolicRate,
    /// Respiratory rate samples
    RespiratoryRate,
    /// Recorded workout sessions
    ExerciseSession,
    /// Recorded sleep sessions
    SleepSession,
}

impl RecordKind {
    /// Stable provider-facing name for this record kind
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Steps => "Steps",
            Self::Distance => "Distance",
            Self::ActiveCaloriesBurned => "ActiveCaloriesBurned",
            Self::TotalCaloriesBurned => "TotalCaloriesBurned",
            Self::HeartRate => "HeartRate",
            Self::Weight => "Weight",
            Self::Height => "Height",
            Self::Hydration => "Hydration",
            Self::BloodPressure => "BloodPressure",
            Self::BodyTemperature => "BodyTemperature",
            Self::BasalMetabolicRate => "BasalMetabolicRate",
            Self::RespiratoryRate => "RespiratoryRate",
            Self::ExerciseSession => "ExerciseSession",
            Self::SleepSession => "SleepSession",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Access mode attached to a permission grant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessKind {
    /// Read-only access to records of a kind
    Read,
}

/// A single (record kind, access mode) grant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Permission {
    /// Record kind the grant applies to
    pub record_kind: RecordKind,
    /// Granted access mode
    pub access: AccessKind,
}

impl Permission {
    /// Create a read permission for the given kind
    #[must_use]
    pub const fn read(record_kind: RecordKind) -> Self {
        Self {
            record_kind,
            access: AccessKind::Read,
        }
    }
}

/// The set of permissions actually granted by the provider
///
/// Computed once during initialization and treated as read-only by all
/// readers for the remainder of the process, unless re-initialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionSet(Vec<Permission>);

impl PermissionSet {
    /// Empty permission set
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Whether read access is granted for the given kind
    #[must_use]
    pub fn has_read(&self, kind: RecordKind) -> bool {
        self.0
            .iter()
            .any(|p| p.record_kind == kind && p.access == AccessKind::Read)
    }

    /// Number of grants in the set
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no permissions were granted
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the grants
    pub fn iter(&self) -> std::slice::Iter<'_, Permission> {
        self.0.iter()
    }
}

impl From<Vec<Permission>> for PermissionSet {
    fn from(grants: Vec<Permission>) -> Self {
        Self(grants)
    }
}

impl<'a> IntoIterator for &'a PermissionSet {
    type Item = &'a Permission;
    type IntoIter = std::slice::Iter<'a, Permission>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Inclusive time window for a record query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRangeFilter {
    /// Window start (inclusive)
    pub start: DateTime<Utc>,
    /// Window end (inclusive)
    pub end: DateTime<Utc>,
}

impl TimeRangeFilter {
    /// Trailing window ending now
    #[must_use]
    pub fn trailing(lookback: std::time::Duration) -> Self {
        let end = Utc::now();
        let span = Duration::from_std(lookback).unwrap_or_else(|_| Duration::days(7));
        Self {
            start: end - span,
            end,
        }
    }
}

/// A single raw record returned by the health provider
///
/// Units mirror the platform provider: meters, kilocalories, beats per
/// minute, kilograms, liters, millimeters of mercury, degrees Celsius,
/// kilocalories per day, and breaths per minute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HealthRecord {
    /// Step count sample
    Steps {
        /// Steps counted in the sample
        count: u64,
    },
    /// Distance sample
    Distance {
        /// Distance in meters
        meters: f64,
    },
    /// Active energy sample
    ActiveCaloriesBurned {
        /// Energy in kilocalories
        kilocalories: f64,
    },
    /// Total energy sample
    TotalCaloriesBurned {
        /// Energy in kilocalories
        kilocalories: f64,
    },
    /// Heart rate sample
    HeartRate {
        /// Beats per minute
        beats_per_minute: f64,
    },
    /// Weight measurement
    Weight {
        /// Weight in kilograms
        kilograms: f64,
    },
    /// Height measurement
    Height {
        /// Height in meters
        meters: f64,
    },
    /// Fluid intake sample
    Hydration {
        /// Volume in liters
        liters: f64,
    },
    /// Blood pressure reading
    BloodPressure {
        /// Systolic pressure in mmHg
        systolic_mmhg: f64,
        /// Diastolic pressure in mmHg
        diastolic_mmhg: f64,
    },
    /// Body temperature measurement
    BodyTemperature {
        /// Temperature in degrees Celsius
        celsius: f64,
    },
    /// Basal metabolic rate measurement
    BasalMetabolicRate {
        /// Energy in kilocalories per day
        kilocalories_per_day: f64,
    },
    /// Respiratory rate sample
    RespiratoryRate {
        /// Breaths per minute
        breaths_per_minute: f64,
    },
    /// Recorded workout session
    ExerciseSession {
        /// Session start
        start: DateTime<Utc>,
        /// Session end
        end: DateTime<Utc>,
    },
    /// Recorded sleep session
    SleepSession {
        /// Session start
        start: DateTime<Utc>,
        /// Session end
        end: DateTime<Utc>,
    },
}

impl HealthRecord {
    /// The record kind this record belongs to
    #[must_use]
    pub const fn kind(&self) -> RecordKind {
        match self {
            Self::Steps { .. } => RecordKind::Steps,
            Self::Distance { .. } => RecordKind::Distance,
            Self::ActiveCaloriesBurned { .. } => RecordKind::ActiveCaloriesBurned,
            Self::TotalCaloriesBurned { .. } => RecordKind::TotalCaloriesBurned,
            Self::HeartRate { .. } => RecordKind::HeartRate,
            Self::Weight { .. } => RecordKind::Weight,
            Self::Height { .. } => RecordKind::Height,
            Self::Hydration { .. } => RecordKind::Hydration,
            Self::BloodPressure { .. } => RecordKind::BloodPressure,
            Self::BodyTemperature { .. } => RecordKind::BodyTemperature,
            Self::BasalMetabolicRate { .. } => RecordKind::BasalMetabolicRate,
            Self::RespiratoryRate { .. } => RecordKind::RespiratoryRate,
            Self::ExerciseSession { .. } => RecordKind::ExerciseSession,
            Self::SleepSession { .. } => RecordKind::SleepSession,
        }
    }
}

/// Aggregated per-fetch mapping of metric key to reduced value
///
/// A key is present only when its value is a finite number strictly greater
/// than zero; everything else is normalized to absent at insertion time.
/// Snapshots replace each other atomically; there is no partial merge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HealthSnapshot(BTreeMap<String, f64>);

impl HealthSnapshot {
    /// Empty snapshot
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Record a reduced value for a key, normalizing absent-like values
    ///
    /// Zero, negative, non-finite, and `None` values all leave the key
    /// absent. An explicit absent overwrites any prior value for the key.
    pub fn record(&mut self, key: impl Into<String>, value: Option<f64>) {
        let key = key.into();
        match value {
            Some(v) if v.is_finite() && v > 0.0 => {
                self.0.insert(key, v);
            }
            _ => {
                self.0.remove(&key);
            }
        }
    }

    /// Raw value for a key, if present
    #[must_use]
    pub fn get(&self, key: &str) -> Option<f64> {
        self.0.get(key).copied()
    }

    /// Number of present metrics
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the snapshot holds no metrics
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over present (key, value) pairs in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}
