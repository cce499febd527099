// ABOUTME: Durable key-value persistence behind a pluggable StateStorage trait
// ABOUTME: File-backed JSON slots with atomic replace, plus an in-memory backend for tests
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright (c) 2025 Vitals Context

use crate::constants::service;
use crate::errors::{HealthResult, StorageError};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::sync::RwLock;

/// Namespaced JSON persistence slots for store state
///
/// The store writes its partialized state on every mutation and loads it
/// once at startup. Backends only move bytes; schema versioning and
/// migration live with the store.
#[async_trait]
pub trait StateStorage: Send + Sync {
    /// Load the value persisted under `slot`, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read or the payload is not
    /// valid JSON.
    async fn load(&self, slot: &str) -> HealthResult<Option<Value>>;

    /// Persist `value` under `slot`, replacing any previous value
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    async fn save(&self, slot: &str, value: &Value) -> HealthResult<()>;
}

/// JSON file per slot under a data directory, written atomically
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Storage rooted at the given directory
    #[must_use]
    pub const fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Storage rooted at the platform data directory, falling back to the
    /// current directory when none is known
    #[must_use]
    pub fn in_data_dir() -> Self {
        let dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(service::SERVICE_NAME);
        Self::new(dir)
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.dir.join(format!("{slot}.json"))
    }
}

#[async_trait]
impl StateStorage for FileStorage {
    async fn load(&self, slot: &str) -> HealthResult<Option<Value>> {
        let path = self.slot_path(slot);
        let raw = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(StorageError::from(err).into()),
        };
        let value = serde_json::from_slice(&raw).map_err(StorageError::from)?;
        Ok(Some(value))
    }

    async fn save(&self, slot: &str, value: &Value) -> HealthResult<()> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(StorageError::from)?;
        let payload = serde_json::to_vec(value).map_err(StorageError::from)?;

        // Write-then-rename so a crash mid-write never leaves a torn slot.
        let path = self.slot_path(slot);
        let tmp = self.dir.join(format!("{slot}.json.tmp"));
        tokio::fs::write(&tmp, &payload)
            .await
            .map_err(StorageError::from)?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(StorageError::from)?;
        Ok(())
    }
}

/// In-memory slots for tests and ephemeral runs
#[derive(Default)]
pub struct MemoryStorage {
    slots: RwLock<HashMap<String, Value>>,
}

impl MemoryStorage {
    /// Empty in-memory storage
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StateStorage for MemoryStorage {
    async fn load(&self, slot: &str) -> HealthResult<Option<Value>> {
        Ok(self.slots.read().await.get(slot).cloned())
    }

    async fn save(&self, slot: &str, value: &Value) -> HealthResult<()> {
        self.slots
            .write()
            .await
            .insert(slot.to_owned(), value.clone());
        Ok(())
    }
}
