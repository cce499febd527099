// ABOUTME: Shared test utilities for the vitals-context integration tests
// ABOUTME: Configurable mock provider, counting/failing tokenizers, and store helpers
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright (c) 2025 Vitals Context
#![allow(dead_code)]

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};
use std::time::Duration;
use tokio::sync::Mutex;
use vitals_context::config::FetchConfig;
use vitals_context::errors::{HealthError, HealthResult};
use vitals_context::models::{
    HealthRecord, HealthSnapshot, Permission, PermissionSet, RecordKind, TimeRangeFilter,
};
use vitals_context::providers::HealthProvider;
use vitals_context::store::persistence::MemoryStorage;
use vitals_context::store::MetricsStore;
use vitals_context::tokenizer::{HeuristicTokenizer, Tokenizer};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };
        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Fetch configuration with millisecond-scale durations for fast tests
pub fn test_fetch_config() -> FetchConfig {
    FetchConfig {
        read_timeout: Duration::from_millis(200),
        batch_size: 5,
        batch_pacing: Duration::from_millis(1),
        min_fetch_interval: Duration::ZERO,
        lookback: Duration::from_secs(7 * 24 * 60 * 60),
    }
}

/// Configurable mock health provider with call counting and fault injection
pub struct MockHealthProvider {
    records: HashMap<RecordKind, Vec<HealthRecord>>,
    denied: HashSet<RecordKind>,
    failing_reads: HashSet<RecordKind>,
    init_reports_false: bool,
    init_errors: bool,
    read_delay: Option<Duration>,
    read_calls: Mutex<HashMap<RecordKind, usize>>,
}

impl Default for MockHealthProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockHealthProvider {
    pub fn new() -> Self {
        Self {
            records: HashMap::new(),
            denied: HashSet::new(),
            failing_reads: HashSet::new(),
            init_reports_false: false,
            init_errors: false,
            read_delay: None,
            read_calls: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_records(mut self, kind: RecordKind, records: Vec<HealthRecord>) -> Self {
        self.records.insert(kind, records);
        self
    }

    pub fn deny(mut self, kind: RecordKind) -> Self {
        self.denied.insert(kind);
        self
    }

    pub fn failing_read(mut self, kind: RecordKind) -> Self {
        self.failing_reads.insert(kind);
        self
    }

    pub fn init_reports_false(mut self) -> Self {
        self.init_reports_false = true;
        self
    }

    pub fn init_errors(mut self) -> Self {
        self.init_errors = true;
        self
    }

    pub fn with_read_delay(mut self, delay: Duration) -> Self {
        self.read_delay = Some(delay);
        self
    }

    /// Number of provider reads issued for the given kind
    pub async fn read_count(&self, kind: RecordKind) -> usize {
        *self.read_calls.lock().await.get(&kind).unwrap_or(&0)
    }

    /// Total provider reads issued across all kinds
    pub async fn total_reads(&self) -> usize {
        self.read_calls.lock().await.values().sum()
    }
}

#[async_trait]
impl HealthProvider for MockHealthProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn initialize(&self) -> HealthResult<bool> {
        if self.init_errors {
            return Err(HealthError::provider("mock initialization exploded"));
        }
        Ok(!self.init_reports_false)
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
        {
            let mut calls = self.read_calls.lock().await;
            *calls.entry(kind).or_insert(0) += 1;
        }
        if let Some(delay) = self.read_delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing_reads.contains(&kind) {
            return Err(HealthError::provider("mock read failure"));
        }
        Ok(self.records.get(&kind).cloned().unwrap_or_default())
    }
}

/// Tokenizer that counts how many times it was invoked
#[derive(Default)]
pub struct CountingTokenizer {
    inner: HeuristicTokenizer,
    calls: AtomicUsize,
}

impl CountingTokenizer {
    pub fn new() -> Self {
        Self {
            inner: HeuristicTokenizer::default(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Tokenizer for CountingTokenizer {
    fn count_tokens(&self, text: &str) -> HealthResult<usize> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.count_tokens(text)
    }
}

/// Tokenizer that always fails, for degradation tests
pub struct FailingTokenizer;

impl Tokenizer for FailingTokenizer {
    fn count_tokens(&self, _text: &str) -> HealthResult<usize> {
        Err(HealthError::tokenization("tokenizer unavailable"))
    }
}

/// Store backed by fresh in-memory storage and the heuristic tokenizer
pub async fn memory_store() -> Result<Arc<MetricsStore>> {
    init_test_logging();
    let storage = Arc::new(MemoryStorage::new());
    let tokenizer = Arc::new(HeuristicTokenizer::default());
    Ok(Arc::new(MetricsStore::load(storage, tokenizer).await?))
}

/// Snapshot built from explicit (key, value) pairs
pub fn snapshot_of(entries: &[(&str, f64)]) -> HealthSnapshot {
    let mut snapshot = HealthSnapshot::new();
    for (key, value) in entries {
        snapshot.record(*key, Some(*value));
    }
    snapshot
}

/// Read permissions for every given kind
pub fn read_permissions(kinds: &[RecordKind]) -> PermissionSet {
    PermissionSet::from(kinds.iter().copied().map(Permission::read).collect::<Vec<_>>())
}

/// Fixed timestamp parsed from an RFC 3339 string
pub fn ts(raw: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(raw)?.with_timezone(&Utc))
}
