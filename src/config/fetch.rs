// ABOUTME: Acquisition tuning configuration with environment variable overrides
// ABOUTME: Defaults come from constants::limits; tests inject millisecond-scale values
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright (c) 2025 Vitals Context

use crate::constants::limits;
use std::env;
use std::time::Duration;

/// Tuning knobs for the read orchestrator and fetch coordinator
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Deadline for a single record read
    pub read_timeout: Duration,
    /// Concurrent reads per batch
    pub batch_size: usize,
    /// Delay between consecutive batches
    pub batch_pacing: Duration,
    /// Minimum interval between fetch attempts, measured from the last attempt
    pub min_fetch_interval: Duration,
    /// Trailing query window
    pub lookback: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            read_timeout: Duration::from_secs(limits::READ_TIMEOUT_SECS),
            batch_size: limits::READ_BATCH_SIZE,
            batch_pacing: Duration::from_millis(limits::BATCH_PACING_MS),
            min_fetch_interval: Duration::from_millis(limits::MIN_FETCH_INTERVAL_MS),
            lookback: Duration::from_secs(limits::LOOKBACK_DAYS * 24 * 60 * 60),
        }
    }
}

impl FetchConfig {
    /// Build the configuration from environment variables, falling back to
    /// the compiled defaults for anything unset or unparseable
    ///
    /// Recognized variables: `VITALS_READ_TIMEOUT_SECS`, `VITALS_BATCH_SIZE`,
    /// `VITALS_BATCH_PACING_MS`, `VITALS_MIN_FETCH_INTERVAL_MS`,
    /// `VITALS_LOOKBACK_DAYS`.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            read_timeout: env_u64("VITALS_READ_TIMEOUT_SECS")
                .map_or(defaults.read_timeout, Duration::from_secs),
            batch_size: env_u64("VITALS_BATCH_SIZE")
                .map_or(defaults.batch_size, |v| (v as usize).max(1)),
            batch_pacing: env_u64("VITALS_BATCH_PACING_MS")
                .map_or(defaults.batch_pacing, Duration::from_millis),
            min_fetch_interval: env_u64("VITALS_MIN_FETCH_INTERVAL_MS")
                .map_or(defaults.min_fetch_interval, Duration::from_millis),
            lookback: env_u64("VITALS_LOOKBACK_DAYS")
                .map_or(defaults.lookback, |days| {
                    Duration::from_secs(days * 24 * 60 * 60)
                }),
        }
    }
}

fn env_u64(name: &str) -> Option<u64> {
    env::var(name).ok().and_then(|raw| raw.parse().ok())
}
