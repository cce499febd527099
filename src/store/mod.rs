// ABOUTME: Durable, reactive holder of canonical health data and derived context state
// ABOUTME: Single writer of StoreState; mediates between acquisition and formatting
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright (c) 2025 Vitals Context

//! # Metrics Store
//!
//! The store owns `StoreState` exclusively; every mutation goes through one
//! of its operations, each atomic with respect to the async model (state is
//! held under a single write lock for the whole operation). The persisted
//! slot excludes the token cache, which is always recomputed after restart.

use crate::constants::storage;
use crate::errors::{HealthResult, StorageError};
use crate::formatter::{format_summary, FormattedSummary};
use crate::models::HealthSnapshot;
use crate::tokenizer::Tokenizer;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Pluggable persistence backends
pub mod persistence;

use persistence::StateStorage;

/// Memoized token cost of the formatted prompt text
///
/// Valid iff `last_updated` equals the store's current timestamp exactly;
/// any other relationship forces recomputation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenCacheEntry {
    /// Timestamp the count was computed for; absent for the empty entry
    pub last_updated: Option<DateTime<Utc>>,
    /// Token cost of the formatted prompt
    pub token_count: usize,
}

impl TokenCacheEntry {
    /// Zero-cost entry used when no formatted summary exists
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            last_updated: None,
            token_count: 0,
        }
    }
}

#[derive(Debug, Default)]
struct StoreState {
    data: HealthSnapshot,
    formatted: Option<FormattedSummary>,
    token_cache: Option<TokenCacheEntry>,
    last_updated: Option<DateTime<Utc>>,
    enabled: bool,
    error: Option<String>,
}

/// The durably persisted subset of store state; the token cache is always
/// derived fresh after a restart
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedState {
    #[serde(default)]
    data: HealthSnapshot,
    #[serde(default)]
    formatted_data: Option<FormattedSummary>,
    #[serde(default)]
    last_updated: Option<DateTime<Utc>>,
    #[serde(default)]
    is_enabled: bool,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct PersistedEnvelope {
    version: u32,
    state: PersistedState,
}

/// Reactive holder of the canonical raw data, the enable flag, and error state
pub struct MetricsStore {
    state: RwLock<StoreState>,
    storage: Arc<dyn StateStorage>,
    tokenizer: Arc<dyn Tokenizer>,
}

impl MetricsStore {
    /// Load the store from its persisted slot, or start fresh when the slot
    /// is empty
    ///
    /// A malformed slot is logged and treated as empty rather than bricking
    /// the feature; a failing storage backend is surfaced.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend itself cannot be read.
    pub async fn load(
        storage: Arc<dyn StateStorage>,
        tokenizer: Arc<dyn Tokenizer>,
    ) -> HealthResult<Self> {
        let state = match storage.load(storage::HEALTH_METRICS_SLOT).await? {
            Some(value) => Self::restore(value),
            None => StoreState::default(),
        };
        Ok(Self {
            state: RwLock::new(state),
            storage,
            tokenizer,
        })
    }

    fn restore(value: Value) -> StoreState {
        let envelope: PersistedEnvelope = match serde_json::from_value(value) {
            Ok(envelope) => envelope,
            Err(err) => {
                warn!(error = %err, "persisted health state unreadable, starting fresh");
                return StoreState::default();
            }
        };
        let state = Self::migrate(envelope.state, envelope.version);
        StoreState {
            data: state.data,
            formatted: state.formatted_data,
            token_cache: None,
            last_updated: state.last_updated,
            enabled: state.is_enabled,
            error: state.error,
        }
    }

    /// Schema migration hook reserved for future versions; currently a no-op
    fn migrate(state: PersistedState, version: u32) -> PersistedState {
        if version != storage::SCHEMA_VERSION {
            debug!(
                from = version,
                to = storage::SCHEMA_VERSION,
                "persisted health state version differs, passing through"
            );
        }
        state
    }

    /// Enable or disable the feature; disabling synchronously clears all
    /// data, derived state, and error
    pub async fn set_enabled(&self, enabled: bool) {
        let mut state = self.state.write().await;
        debug!(enabled, "health metrics feature toggled");
        state.enabled = enabled;
        if !enabled {
            Self::reset(&mut state);
        }
        self.persist(&state).await;
    }

    /// Accept a fresh snapshot, recompute the formatted summary, and
    /// invalidate the token cache
    ///
    /// A no-op while the feature is disabled. Clears any previous error.
    pub async fn update_data(&self, data: HealthSnapshot, timestamp: DateTime<Utc>) {
        let mut state = self.state.write().await;
        if !state.enabled {
            debug!("health metrics feature disabled, skipping data update");
            return;
        }

        let formatted = format_summary(&data, timestamp);
        debug!(
            metrics = data.len(),
            categories = formatted.categories.len(),
            "health metrics data updated"
        );
        state.data = data;
        state.formatted = Some(formatted);
        state.last_updated = Some(timestamp);
        state.token_cache = None;
        state.error = None;
        self.persist(&state).await;
    }

    /// Reset all data, derived state, and error, independent of the enable flag
    pub async fn clear_data(&self) {
        let mut state = self.state.write().await;
        debug!("clearing health metrics data");
        Self::reset(&mut state);
        self.persist(&state).await;
    }

    /// Set or clear the surfaced pipeline error without touching data
    pub async fn set_error(&self, error: Option<String>) {
        let mut state = self.state.write().await;
        state.error = error;
        self.persist(&state).await;
    }

    /// Return the valid cached token entry, recomputing when stale
    ///
    /// With no formatted summary the zero-cost empty entry is stored and
    /// returned. A tokenizer failure degrades to a zero-cost entry tagged
    /// with the current timestamp; this method never fails.
    pub async fn get_cache(&self) -> TokenCacheEntry {
        let mut state = self.state.write().await;
        if let Some(cache) = &state.token_cache {
            if cache.last_updated == state.last_updated {
                return cache.clone();
            }
        }

        let entry = match (&state.formatted, state.last_updated) {
            (Some(formatted), Some(last_updated)) => {
                match self.tokenizer.count_tokens(&formatted.prompt) {
                    Ok(token_count) => TokenCacheEntry {
                        last_updated: Some(last_updated),
                        token_count,
                    },
                    Err(err) => {
                        warn!(error = %err, "token count failed, caching zero cost");
                        TokenCacheEntry {
                            last_updated: Some(last_updated),
                            token_count: 0,
                        }
                    }
                }
            }
            _ => TokenCacheEntry::empty(),
        };
        state.token_cache = Some(entry.clone());
        entry
    }

    /// Current raw snapshot
    pub async fn data(&self) -> HealthSnapshot {
        self.state.read().await.data.clone()
    }

    /// Current formatted summary, if any
    pub async fn formatted_data(&self) -> Option<FormattedSummary> {
        self.state.read().await.formatted.clone()
    }

    /// Timestamp of the last accepted snapshot
    pub async fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.state.read().await.last_updated
    }

    /// Whether the feature is enabled
    pub async fn is_enabled(&self) -> bool {
        self.state.read().await.enabled
    }

    /// Current surfaced error, if any
    pub async fn error(&self) -> Option<String> {
        self.state.read().await.error.clone()
    }

    fn reset(state: &mut StoreState) {
        state.data = HealthSnapshot::new();
        state.formatted = None;
        state.last_updated = None;
        state.token_cache = None;
        state.error = None;
    }

    /// Persist the partialized state; failures are logged, never propagated,
    /// because the in-memory state stays authoritative
    async fn persist(&self, state: &StoreState) {
        let envelope = PersistedEnvelope {
            version: storage::SCHEMA_VERSION,
            state: PersistedState {
                data: state.data.clone(),
                formatted_data: state.formatted.clone(),
                last_updated: state.last_updated,
                is_enabled: state.enabled,
                error: state.error.clone(),
            },
        };
        let value = match serde_json::to_value(&envelope).map_err(StorageError::from) {
            Ok(value) => value,
            Err(err) => {
                warn!(error = %err, "failed to encode health state for persistence");
                return;
            }
        };
        if let Err(err) = self.storage.save(storage::HEALTH_METRICS_SLOT, &value).await {
            warn!(error = %err, "failed to persist health state");
        }
    }
}
