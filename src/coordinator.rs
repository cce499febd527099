// ABOUTME: Fetch scheduling with single-flight semantics, throttling, and supersession
// ABOUTME: Owns cancellation of stale work and propagates results to the metrics store
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright (c) 2025 Vitals Context

//! # Fetch Coordinator
//!
//! De-duplicates concurrent refresh requests and enforces a minimum interval
//! between fetch attempts, measured from the last attempt whether or not it
//! succeeded. Each attempt owns a fresh cancellation token; starting a new
//! attempt cancels whatever still holds the previous one ("latest request
//! wins"). Teardown cancels the active attempt and suppresses all further
//! state writes.

use crate::config::FetchConfig;
use crate::models::{HealthSnapshot, PermissionSet};
use crate::orchestrator::ReadOrchestrator;
use crate::permissions::PermissionManager;
use crate::providers::HealthProvider;
use crate::store::MetricsStore;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{Mutex, RwLock};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};
use uuid::Uuid;

#[derive(Default)]
struct FetchState {
    is_fetching: bool,
    last_attempt: Option<Instant>,
    active: Option<CancellationToken>,
}

/// Schedules acquisition cycles and owns the externally visible fetch state
pub struct FetchCoordinator {
    provider: Arc<dyn HealthProvider>,
    permissions: PermissionManager,
    orchestrator: ReadOrchestrator,
    store: Arc<MetricsStore>,
    config: FetchConfig,
    fetch_state: Mutex<FetchState>,
    data: RwLock<HealthSnapshot>,
    last_updated: RwLock<Option<DateTime<Utc>>>,
    error: RwLock<Option<String>>,
    is_loading: AtomicBool,
    is_refreshing: AtomicBool,
    teardown: CancellationToken,
}

impl FetchCoordinator {
    /// Create a coordinator over the given provider and store
    #[must_use]
    pub fn new(
        provider: Arc<dyn HealthProvider>,
        store: Arc<MetricsStore>,
        config: FetchConfig,
    ) -> Self {
        Self {
            permissions: PermissionManager::new(Arc::clone(&provider)),
            orchestrator: ReadOrchestrator::new(Arc::clone(&provider), config.clone()),
            provider,
            store,
            config,
            fetch_state: Mutex::new(FetchState::default()),
            data: RwLock::new(HealthSnapshot::new()),
            last_updated: RwLock::new(None),
            error: RwLock::new(None),
            is_loading: AtomicBool::new(true),
            is_refreshing: AtomicBool::new(false),
            teardown: CancellationToken::new(),
        }
    }

    /// Run the one-time initialization and first fetch cycle
    ///
    /// `is_loading` remains true until this completes, on every path: granted
    /// permissions lead into a first fetch, an unavailable platform or empty
    /// grant set is a quiet no-op, and an initialization failure surfaces as
    /// retryable error state.
    pub async fn start(&self) {
        if self.teardown.is_cancelled() {
            return;
        }
        if !self.provider.is_available() {
            debug!(
                provider = self.provider.name(),
                "health provider unavailable on this platform"
            );
            self.is_loading.store(false, Ordering::SeqCst);
            return;
        }

        match self.permissions.initialize().await {
            Ok(granted) if !granted.is_empty() => self.fetch_data().await,
            Ok(_) => debug!("no health permissions granted, nothing to fetch"),
            Err(err) => {
                error!(error = %err, "health provider initialization failed");
                self.record_error(err.to_string()).await;
            }
        }
        self.is_loading.store(false, Ordering::SeqCst);
    }

    /// Execute one fetch cycle unless suppressed by the single-flight guard
    /// or the minimum inter-fetch interval
    pub async fn fetch_data(&self) {
        if self.teardown.is_cancelled() {
            return;
        }
        let granted = self.permissions.granted().await;
        if granted.is_empty() {
            self.is_loading.store(false, Ordering::SeqCst);
            self.is_refreshing.store(false, Ordering::SeqCst);
            return;
        }

        let Some(token) = self.begin_attempt().await else {
            self.is_refreshing.store(false, Ordering::SeqCst);
            return;
        };

        self.run_attempt(&granted, &token).await;
        self.finish_attempt().await;
    }

    /// Operator-triggered refresh; a no-op while a fetch is already in flight
    pub async fn refresh_data(&self) {
        if self.teardown.is_cancelled() {
            return;
        }
        if self.fetch_state.lock().await.is_fetching {
            debug!("fetch already in progress, skipping refresh");
            return;
        }
        self.is_refreshing.store(true, Ordering::SeqCst);
        self.fetch_data().await;
    }

    /// Cancel any outstanding attempt and suppress all further state writes
    pub fn shutdown(&self) {
        self.teardown.cancel();
    }

    /// Claim the single-flight slot and mint this attempt's token
    async fn begin_attempt(&self) -> Option<CancellationToken> {
        let mut state = self.fetch_state.lock().await;
        if state.is_fetching {
            debug!("fetch already in progress, skipping");
            return None;
        }
        if let Some(last) = state.last_attempt {
            if last.elapsed() < self.config.min_fetch_interval {
                debug!("fetch attempted too soon after last attempt, throttled");
                return None;
            }
        }
        state.is_fetching = true;
        state.last_attempt = Some(Instant::now());

        // Latest request wins: signal whatever still holds the old token.
        if let Some(previous) = state.active.take() {
            previous.cancel();
        }
        let token = self.teardown.child_token();
        state.active = Some(token.clone());
        Some(token)
    }

    async fn run_attempt(&self, granted: &PermissionSet, token: &CancellationToken) {
        let attempt = Uuid::new_v4();
        debug!(attempt = %attempt, "starting health data fetch");

        let snapshot = self.orchestrator.fetch_snapshot(granted, token).await;

        if token.is_cancelled() {
            debug!(attempt = %attempt, "fetch superseded or torn down, discarding results");
            return;
        }

        let timestamp = Utc::now();
        *self.data.write().await = snapshot.clone();
        *self.last_updated.write().await = Some(timestamp);
        *self.error.write().await = None;
        info!(
            attempt = %attempt,
            metrics = snapshot.len(),
            "health data fetch committed"
        );
        self.store.update_data(snapshot, timestamp).await;
    }

    async fn finish_attempt(&self) {
        let mut state = self.fetch_state.lock().await;
        state.is_fetching = false;
        drop(state);
        self.is_loading.store(false, Ordering::SeqCst);
        self.is_refreshing.store(false, Ordering::SeqCst);
    }

    async fn record_error(&self, message: String) {
        if self.teardown.is_cancelled() {
            return;
        }
        *self.error.write().await = Some(message.clone());
        self.store.set_error(Some(message)).await;
    }

    /// Most recent successfully fetched snapshot
    pub async fn data(&self) -> HealthSnapshot {
        self.data.read().await.clone()
    }

    /// Permission set granted during initialization
    pub async fn permissions(&self) -> PermissionSet {
        self.permissions.granted().await
    }

    /// Timestamp of the last committed fetch
    pub async fn last_updated(&self) -> Option<DateTime<Utc>> {
        *self.last_updated.read().await
    }

    /// Last surfaced pipeline error, if any
    pub async fn error(&self) -> Option<String> {
        self.error.read().await.clone()
    }

    /// True until the first initialization and fetch cycle completes
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.is_loading.load(Ordering::SeqCst)
    }

    /// True only while an operator-triggered refresh is running
    #[must_use]
    pub fn is_refreshing(&self) -> bool {
        self.is_refreshing.load(Ordering::SeqCst)
    }

    /// Whether the underlying provider can run on this platform
    #[must_use]
    pub fn is_supported(&self) -> bool {
        self.provider.is_available()
    }
}
