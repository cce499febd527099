// ABOUTME: Centralized constants for fetch limits, pacing, and durable storage slots
// ABOUTME: Single source of truth; tunable values are overridable via FetchConfig
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright (c) 2025 Vitals Context

/// Acquisition limits and pacing defaults
pub mod limits {
    /// Deadline for a single record read against the provider
    pub const READ_TIMEOUT_SECS: u64 = 10;

    /// Number of concurrent reads per batch; bounds instantaneous provider load
    pub const READ_BATCH_SIZE: usize = 5;

    /// Delay inserted between consecutive batches
    pub const BATCH_PACING_MS: u64 = 100;

    /// Minimum interval between fetch attempts, measured from the last attempt
    pub const MIN_FETCH_INTERVAL_MS: u64 = 2_000;

    /// Trailing query window, inclusive
    pub const LOOKBACK_DAYS: u64 = 7;
}

/// Durable storage identifiers
pub mod storage {
    /// Namespaced slot holding the persisted store state
    pub const HEALTH_METRICS_SLOT: &str = "health-metrics";

    /// Current persisted schema version
    pub const SCHEMA_VERSION: u32 = 1;
}

/// Service identity for structured logging
pub mod service {
    /// Name reported in log output
    pub const SERVICE_NAME: &str = "vitals-context";
}
