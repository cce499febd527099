// ABOUTME: Main library entry point for the vitals-context pipeline
// ABOUTME: Acquires periodic health metrics and prepares a token-budgeted LLM context artifact
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright (c) 2025 Vitals Context

#![deny(unsafe_code)]

//! # Vitals Context
//!
//! A background data-acquisition and context-caching pipeline for health and
//! fitness metrics. The pipeline pulls periodic measurements from a platform
//! health provider, reconciles them into a canonical store, and produces a
//! token-budgeted textual summary suitable for injection into a language-model
//! prompt.
//!
//! ## Architecture
//!
//! The crate follows a modular pipeline, leaves first:
//! - **Catalog**: declarative table of trackable metrics and sessions
//! - **Permissions**: one-time handshake converting record kinds into grants
//! - **Orchestrator**: bounded, timed, cancellable reads in paced batches
//! - **Coordinator**: single-flight fetch scheduling and supersession
//! - **Store**: durable, observable holder of canonical state
//! - **Formatter**: categorized, LLM-readable summary derivation
//! - **Token cache**: memoized token cost, invalidated by data freshness
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use vitals_context::config::FetchConfig;
//! use vitals_context::coordinator::FetchCoordinator;
//! use vitals_context::providers::synthetic::SyntheticHealthProvider;
//! use vitals_context::store::persistence::MemoryStorage;
//! use vitals_context::store::MetricsStore;
//! use vitals_context::tokenizer::HeuristicTokenizer;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let storage = Arc::new(MemoryStorage::new());
//! let tokenizer = Arc::new(HeuristicTokenizer::default());
//! let store = Arc::new(MetricsStore::load(storage, tokenizer).await?);
//! store.set_enabled(true).await;
//!
//! let provider = Arc::new(SyntheticHealthProvider::seeded(42));
//! let coordinator = FetchCoordinator::new(provider, Arc::clone(&store), FetchConfig::default());
//! coordinator.start().await;
//!
//! let cache = store.get_cache().await;
//! println!("context costs {} tokens", cache.token_count);
//! # Ok(())
//! # }
//! ```

/// Declarative table of trackable metrics and aggregate sessions
pub mod catalog;

/// Category, label, and fetch-tuning configuration
pub mod config;

/// Shared constants for limits, pacing, and storage slots
pub mod constants;

/// Fetch scheduling: single-flight semantics, throttling, supersession
pub mod coordinator;

/// Unified error taxonomy for the pipeline
pub mod errors;

/// Snapshot-to-summary derivation for LLM context injection
pub mod formatter;

/// Logging configuration and structured logging setup
pub mod logging;

/// Domain models: record kinds, records, permissions, snapshots
pub mod models;

/// Batched, timed, cancellable record reads
pub mod orchestrator;

/// Permission handshake with the platform health provider
pub mod permissions;

/// Health data provider abstraction and bundled implementations
pub mod providers;

/// Durable, reactive holder of canonical pipeline state
pub mod store;

/// Token counting abstraction for context-budget accounting
pub mod tokenizer;
