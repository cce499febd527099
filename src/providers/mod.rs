// ABOUTME: Health data provider abstraction over platform record stores
// ABOUTME: Treated as fallible and possibly slow; callers apply timeout policy per read
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright (c) 2025 Vitals Context

//! # Health Providers
//!
//! The `HealthProvider` trait is the crate's only gateway to platform health
//! data. Every call site treats it as fallible and possibly slow: reads race
//! a deadline and a cancellation signal in the orchestrator, and the
//! permission handshake happens exactly once per process unless explicitly
//! re-initialized.

use crate::errors::HealthResult;
use crate::models::{HealthRecord, Permission, RecordKind, TimeRangeFilter};
use async_trait::async_trait;

/// Deterministic in-process provider for development and testing
pub mod synthetic;

/// Gateway to a platform health record store
#[async_trait]
pub trait HealthProvider: Send + Sync {
    /// Short provider name used in logs
    fn name(&self) -> &'static str;

    /// Whether the provider can run on this platform at all
    ///
    /// An unavailable provider yields the distinct unsupported state: no
    /// initialization, no fetching, and no error surfaced.
    fn is_available(&self) -> bool {
        true
    }

    /// Perform the provider's one-time setup handshake
    ///
    /// Returns `false` when the platform reports an unsuccessful setup
    /// without raising a transport error.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying platform service cannot be reached.
    async fn initialize(&self) -> HealthResult<bool>;

    /// Request the given permissions, returning the subset actually granted
    ///
    /// Partial grants are expected and valid, not errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the permission dialog or service fails outright.
    async fn request_permissions(
        &self,
        requested: &[Permission],
    ) -> HealthResult<Vec<Permission>>;

    /// Read all records of one kind within the time window
    ///
    /// # Errors
    ///
    /// Returns an error if the platform read fails; callers degrade the
    /// affected item to absent rather than failing the batch.
    async fn read_records(
        &self,
        kind: RecordKind,
        filter: &TimeRangeFilter,
    ) -> HealthResult<Vec<HealthRecord>>;
}
