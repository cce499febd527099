// ABOUTME: Deterministic synthetic health provider for development and testing
// ABOUTME: Seeded data generation without platform services or permission dialogs
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright (c) 2025 Vitals Context

//! # Synthetic Health Provider
//!
//! Generates a plausible trailing week of health records from a fixed seed,
//! so the full pipeline can run in CI, demos, and integration tests without
//! a platform health service. All data access is guarded by `RwLock`;
//! poisoning is surfaced as a provider error rather than a panic.

use crate::errors::{HealthError, HealthResult};
use crate::models::{HealthRecord, Permission, RecordKind, TimeRangeFilter};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use super::HealthProvider;

/// In-process health provider backed by generated or injected records
pub struct SyntheticHealthProvider {
    records: RwLock<HashMap<RecordKind, Vec<HealthRecord>>>,
    denied: HashSet<RecordKind>,
    available: bool,
}

impl SyntheticHealthProvider {
    /// Provider with no records; useful as a blank slate for injection
    #[must_use]
    pub fn empty() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            denied: HashSet::new(),
            available: true,
        }
    }

    /// Provider pre-loaded with a deterministic week of data
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        let provider = Self::empty();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let now = Utc::now();

        let mut records: HashMap<RecordKind, Vec<HealthRecord>> = HashMap::new();
        for day in 0..7_i64 {
            records
                .entry(RecordKind::Steps)
                .or_default()
                .push(HealthRecord::Steps {
                    count: rng.gen_range(3_000..15_000),
                });
            records
                .entry(RecordKind::Distance)
                .or_default()
                .push(HealthRecord::Distance {
                    meters: rng.gen_range(1_500.0..9_000.0),
                });
            records
                .entry(RecordKind::ActiveCaloriesBurned)
                .or_default()
                .push(HealthRecord::ActiveCaloriesBurned {
                    kilocalories: rng.gen_range(150.0..650.0),
                });
            records
                .entry(RecordKind::TotalCaloriesBurned)
                .or_default()
                .push(HealthRecord::TotalCaloriesBurned {
                    kilocalories: rng.gen_range(1_800.0..2_700.0),
                });
            records
                .entry(RecordKind::Hydration)
                .or_default()
                .push(HealthRecord::Hydration {
                    liters: rng.gen_range(0.8..2.6),
                });

            let bedtime = now - Duration::days(day + 1) + Duration::hours(22);
            records
                .entry(RecordKind::SleepSession)
                .or_default()
                .push(HealthRecord::SleepSession {
                    start: bedtime,
                    end: bedtime + Duration::minutes(rng.gen_range(360..540)),
                });
        }

        for _ in 0..14 {
            records
                .entry(RecordKind::HeartRate)
                .or_default()
                .push(HealthRecord::HeartRate {
                    beats_per_minute: rng.gen_range(52.0..96.0),
                });
        }
        for day in 0..4_i64 {
            let start = now - Duration::days(day * 2) - Duration::hours(rng.gen_range(1..9));
            records
                .entry(RecordKind::ExerciseSession)
                .or_default()
                .push(HealthRecord::ExerciseSession {
                    start,
                    end: start + Duration::minutes(rng.gen_range(25..95)),
                });
        }
        for _ in 0..3 {
            records
                .entry(RecordKind::BloodPressure)
                .or_default()
                .push(HealthRecord::BloodPressure {
                    systolic_mmhg: rng.gen_range(104.0..136.0),
                    diastolic_mmhg: rng.gen_range(64.0..90.0),
                });
        }
        records.insert(
            RecordKind::Weight,
            vec![HealthRecord::Weight {
                kilograms: rng.gen_range(55.0..95.0),
            }],
        );
        records.insert(
            RecordKind::Height,
            vec![HealthRecord::Height {
                meters: rng.gen_range(1.55..1.95),
            }],
        );
        records.insert(
            RecordKind::BodyTemperature,
            vec![HealthRecord::BodyTemperature {
                celsius: rng.gen_range(36.1..37.1),
            }],
        );
        records.insert(
            RecordKind::BasalMetabolicRate,
            vec![HealthRecord::BasalMetabolicRate {
                kilocalories_per_day: rng.gen_range(1_350.0..1_950.0),
            }],
        );
        records.insert(
            RecordKind::RespiratoryRate,
            (0..4)
                .map(|_| HealthRecord::RespiratoryRate {
                    breaths_per_minute: rng.gen_range(12.0..18.0),
                })
                .collect(),
        );

        if let Ok(mut store) = provider.records.write() {
            *store = records;
        }
        provider
    }

    /// Withhold permission for a record kind; requests for it are not granted
    #[must_use]
    pub fn deny(mut self, kind: RecordKind) -> Self {
        self.denied.insert(kind);
        self
    }

    /// Mark the provider as unavailable on this platform
    #[must_use]
    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }

    /// Inject records for a kind, replacing any existing ones
    ///
    /// # Errors
    ///
    /// Returns an error if the record store lock is poisoned.
    pub fn set_records(&self, kind: RecordKind, records: Vec<HealthRecord>) -> HealthResult<()> {
        let mut store = self
            .records
            .write()
            .map_err(|_| HealthError::provider("synthetic record store lock poisoned"))?;
        store.insert(kind, records);
        Ok(())
    }
}

#[async_trait]
impl HealthProvider for SyntheticHealthProvider {
    fn name(&self) -> &'static str {
        "synthetic"
    }

    fn is_available(&self) -> bool {
        self.available
    }

    async fn initialize(&self) -> HealthResult<bool> {
        Ok(true)
    }

    async fn request_permissions(
        &self,
        requested: &[Permission],
    ) -> HealthResult<Vec<Permission>> {
        Ok(requested
            .iter()
            .copied()
            .filter(|p| !self.denied.contains(&p.record_kind))
            .collect())
    }

    async fn read_records(
        &self,
        kind: RecordKind,
        _filter: &TimeRangeFilter,
    ) -> HealthResult<Vec<HealthRecord>> {
        let store = self
            .records
            .read()
            .map_err(|_| HealthError::provider("synthetic record store lock poisoned"))?;
        Ok(store.get(&kind).cloned().unwrap_or_default())
    }
}
