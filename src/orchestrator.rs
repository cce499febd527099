// ABOUTME: Bounded, timed, cancellable record reads reduced into a health snapshot
// ABOUTME: Fixed-size concurrent batches with pacing delays; item failures degrade to absent
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright (c) 2025 Vitals Context

//! # Read Orchestrator
//!
//! Executes the catalog against a granted-permission set over a trailing
//! time window. Within one fetch, metric batches run strictly before session
//! batches; items inside a batch run concurrently and all settle before the
//! batch completes. A cancellation check before each batch allows an early
//! return with whatever partial snapshot has accumulated — an early stop is
//! not an error.

use crate::catalog::{self, MetricDescriptor, SessionDescriptor};
use crate::config::FetchConfig;
use crate::errors::{HealthError, HealthResult};
use crate::models::{HealthRecord, HealthSnapshot, PermissionSet, RecordKind, TimeRangeFilter};
use crate::providers::HealthProvider;
use futures_util::future::join_all;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Executes catalog reads and reduces raw records into scalar values
pub struct ReadOrchestrator {
    provider: Arc<dyn HealthProvider>,
    config: FetchConfig,
}

impl ReadOrchestrator {
    /// Create an orchestrator over the given provider
    #[must_use]
    pub fn new(provider: Arc<dyn HealthProvider>, config: FetchConfig) -> Self {
        Self { provider, config }
    }

    /// Read every catalog item and assemble a fresh snapshot
    ///
    /// Items whose record kind has no granted read permission resolve to
    /// absent without touching the provider. Per-item timeouts, provider
    /// errors, and cancellations also resolve to absent; a single item never
    /// aborts the batch. Cancellation mid-run returns the partial snapshot
    /// accumulated so far.
    pub async fn fetch_snapshot(
        &self,
        permissions: &PermissionSet,
        cancel: &CancellationToken,
    ) -> HealthSnapshot {
        let filter = TimeRangeFilter::trailing(self.config.lookback);
        let batch_size = self.config.batch_size.max(1);
        let mut snapshot = HealthSnapshot::new();
        let mut first_batch = true;

        // Metrics phase runs strictly before the sessions phase.
        for batch in catalog::METRICS.chunks(batch_size) {
            if !self.pace_batch(&mut first_batch, cancel).await {
                return snapshot;
            }
            let results = join_all(
                batch
                    .iter()
                    .map(|descriptor| self.read_metric(descriptor, &filter, permissions, cancel)),
            )
            .await;
            for (key, value) in results {
                snapshot.record(key, value);
            }
        }

        for batch in catalog::SESSIONS.chunks(batch_size) {
            if !self.pace_batch(&mut first_batch, cancel).await {
                return snapshot;
            }
            let results = join_all(
                batch
                    .iter()
                    .map(|descriptor| self.read_session(descriptor, &filter, permissions, cancel)),
            )
            .await;
            for (key, value) in results {
                snapshot.record(key, value);
            }
        }

        snapshot
    }

    /// Insert the inter-batch pacing delay and run the global cancellation
    /// check; returns `false` when orchestration should stop early
    async fn pace_batch(&self, first_batch: &mut bool, cancel: &CancellationToken) -> bool {
        if *first_batch {
            *first_batch = false;
        } else {
            tokio::select! {
                () = cancel.cancelled() => return false,
                () = tokio::time::sleep(self.config.batch_pacing) => {}
            }
        }
        !cancel.is_cancelled()
    }

    /// Read one numeric metric, reducing its records by summing extracted
    /// values strictly greater than zero
    async fn read_metric(
        &self,
        descriptor: &MetricDescriptor,
        filter: &TimeRangeFilter,
        permissions: &PermissionSet,
        cancel: &CancellationToken,
    ) -> (&'static str, Option<f64>) {
        if !permissions.has_read(descriptor.kind) {
            log_read_failure(
                descriptor.kind,
                &HealthError::PermissionDenied {
                    kind: descriptor.kind,
                },
            );
            return (descriptor.key, None);
        }

        match self.guarded_read(descriptor.kind, filter, cancel).await {
            Ok(records) => {
                let sum: f64 = records
                    .iter()
                    .filter_map(|record| (descriptor.extract)(record))
                    .filter(|value| value.is_finite() && *value > 0.0)
                    .sum();
                (descriptor.key, (sum > 0.0).then_some(sum))
            }
            Err(err) => {
                log_read_failure(descriptor.kind, &err);
                (descriptor.key, None)
            }
        }
    }

    /// Read one aggregate session kind, reducing to a record count
    async fn read_session(
        &self,
        descriptor: &SessionDescriptor,
        filter: &TimeRangeFilter,
        permissions: &PermissionSet,
        cancel: &CancellationToken,
    ) -> (&'static str, Option<f64>) {
        if !permissions.has_read(descriptor.kind) {
            log_read_failure(
                descriptor.kind,
                &HealthError::PermissionDenied {
                    kind: descriptor.kind,
                },
            );
            return (descriptor.key, None);
        }

        match self.guarded_read(descriptor.kind, filter, cancel).await {
            Ok(records) => {
                let count = records.len();
                (descriptor.key, (count > 0).then(|| count as f64))
            }
            Err(err) => {
                log_read_failure(descriptor.kind, &err);
                (descriptor.key, None)
            }
        }
    }

    /// Race the provider read against the per-item deadline and the fetch's
    /// cancellation signal
    async fn guarded_read(
        &self,
        kind: RecordKind,
        filter: &TimeRangeFilter,
        cancel: &CancellationToken,
    ) -> HealthResult<Vec<HealthRecord>> {
        tokio::select! {
            () = cancel.cancelled() => Err(HealthError::Aborted),
            read = tokio::time::timeout(
                self.config.read_timeout,
                self.provider.read_records(kind, filter),
            ) => match read {
                Ok(result) => result,
                Err(_) => Err(HealthError::Timeout {
                    kind,
                    timeout: self.config.read_timeout,
                }),
            },
        }
    }
}

fn log_read_failure(kind: RecordKind, err: &HealthError) {
    match err {
        // expected degradations stay quiet
        HealthError::Aborted | HealthError::PermissionDenied { .. } => {
            debug!(kind = %kind, error = %err, "record read skipped");
        }
        _ => warn!(kind = %kind, error = %err, "record read failed, treating as absent"),
    }
}
