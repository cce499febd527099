// ABOUTME: Unified error taxonomy for acquisition, caching, and persistence failures
// ABOUTME: Item-level errors degrade to absent data; only pipeline-level errors surface
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright (c) 2025 Vitals Context

//! # Error Handling
//!
//! The pipeline is intentionally partial-failure-tolerant: per-item failures
//! (denied permission, timeout, abort) are absorbed locally and encoded as
//! absent data. Only whole-pipeline failures (provider initialization, storage
//! corruption) propagate to callers and the store's `error` field.

use crate::models::RecordKind;
use std::time::Duration;
use thiserror::Error;

/// Result alias used throughout the crate
pub type HealthResult<T> = Result<T, HealthError>;

/// Unified error type for the acquisition and caching pipeline
#[derive(Debug, Error)]
pub enum HealthError {
    /// Provider setup failed; fetching must not proceed
    #[error("health provider initialization failed: {reason}")]
    Initialization {
        /// Why the handshake failed
        reason: String,
    },

    /// Read permission for a record kind was not granted
    #[error("no read permission for {kind}")]
    PermissionDenied {
        /// The ungranted record kind
        kind: RecordKind,
    },

    /// A single record read exceeded its deadline
    #[error("timed out reading {kind} records after {timeout:?}")]
    Timeout {
        /// The record kind being read
        kind: RecordKind,
        /// The deadline that elapsed
        timeout: Duration,
    },

    /// The fetch attempt was superseded or torn down; expected, never surfaced
    #[error("fetch attempt aborted")]
    Aborted,

    /// Token counting failed; cache entries degrade to zero cost
    #[error("token counting failed: {reason}")]
    Tokenization {
        /// Why the tokenizer failed
        reason: String,
    },

    /// Durable state could not be read or written
    #[error("state storage failure: {0}")]
    Storage(#[from] StorageError),

    /// The provider rejected or failed a read request
    #[error("provider request failed: {reason}")]
    Provider {
        /// Provider-reported failure detail
        reason: String,
    },
}

impl HealthError {
    /// Create an initialization error
    pub fn initialization(reason: impl Into<String>) -> Self {
        Self::Initialization {
            reason: reason.into(),
        }
    }

    /// Create a tokenization error
    pub fn tokenization(reason: impl Into<String>) -> Self {
        Self::Tokenization {
            reason: reason.into(),
        }
    }

    /// Create a provider error
    pub fn provider(reason: impl Into<String>) -> Self {
        Self::Provider {
            reason: reason.into(),
        }
    }

    /// Whether this error is an expected supersession/teardown abort
    #[must_use]
    pub const fn is_abort(&self) -> bool {
        matches!(self, Self::Aborted)
    }
}

/// Errors raised by the durable key-value storage backend
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying filesystem failure
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),

    /// Persisted payload could not be encoded or decoded
    #[error("serialization failure: {0}")]
    Serialization(#[from] serde_json::Error),
}
