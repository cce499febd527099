// ABOUTME: One-time permission handshake with the platform health provider
// ABOUTME: Idempotent, re-entrancy-safe initialization guarded by an in-progress flag
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright (c) 2025 Vitals Context

use crate::catalog;
use crate::errors::{HealthError, HealthResult};
use crate::models::PermissionSet;
use crate::providers::HealthProvider;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Converts the catalog's desired record kinds into granted read permissions
///
/// The request set is the de-duplicated union of all catalog record kinds;
/// partial grants are stored verbatim. Once computed, the grant set is
/// read-only for the rest of the process unless `initialize` is called again.
pub struct PermissionManager {
    provider: Arc<dyn HealthProvider>,
    granted: RwLock<PermissionSet>,
    in_progress: AtomicBool,
}

impl PermissionManager {
    /// Create a manager with an empty grant set
    #[must_use]
    pub fn new(provider: Arc<dyn HealthProvider>) -> Self {
        Self {
            provider,
            granted: RwLock::new(PermissionSet::new()),
            in_progress: AtomicBool::new(false),
        }
    }

    /// Perform the provider handshake and store whatever subset was granted
    ///
    /// Re-entrancy-safe: a call while another is in flight is a no-op that
    /// returns the current grant set without side effects.
    ///
    /// # Errors
    ///
    /// Returns [`HealthError::Initialization`] when the provider fails its
    /// setup or the permission request itself errors; the grant set is left
    /// empty in that case.
    pub async fn initialize(&self) -> HealthResult<PermissionSet> {
        if self
            .in_progress
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("initialization already in flight, returning current grants");
            return Ok(self.granted.read().await.clone());
        }

        let result = self.initialize_inner().await;
        if result.is_err() {
            // A failed handshake always leaves the grant set empty.
            *self.granted.write().await = PermissionSet::new();
        }
        self.in_progress.store(false, Ordering::SeqCst);
        result
    }

    async fn initialize_inner(&self) -> HealthResult<PermissionSet> {
        let initialized = self
            .provider
            .initialize()
            .await
            .map_err(|err| HealthError::initialization(err.to_string()))?;
        if !initialized {
            return Err(HealthError::initialization(
                "provider reported unsuccessful setup",
            ));
        }

        let requested = catalog::permission_request();
        let grants = self
            .provider
            .request_permissions(&requested)
            .await
            .map_err(|err| HealthError::initialization(err.to_string()))?;
        info!(
            provider = self.provider.name(),
            requested = requested.len(),
            granted = grants.len(),
            "health permissions granted"
        );

        let set = PermissionSet::from(grants);
        *self.granted.write().await = set.clone();
        Ok(set)
    }

    /// Current grant set
    pub async fn granted(&self) -> PermissionSet {
        self.granted.read().await.clone()
    }
}
