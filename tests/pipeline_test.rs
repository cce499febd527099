// ABOUTME: End-to-end pipeline tests against the synthetic provider
// ABOUTME: Initialization through fetch, store commit, formatting, and token costing
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright (c) 2025 Vitals Context

mod common;

use anyhow::Result;
use common::{memory_store, test_fetch_config};
use std::sync::Arc;
use vitals_context::coordinator::FetchCoordinator;
use vitals_context::models::RecordKind;
use vitals_context::providers::synthetic::SyntheticHealthProvider;

#[tokio::test]
async fn synthetic_pipeline_produces_prompt_and_token_cost() -> Result<()> {
    let store = memory_store().await?;
    store.set_enabled(true).await;
    let provider = Arc::new(SyntheticHealthProvider::seeded(42));
    let coordinator =
        FetchCoordinator::new(provider, Arc::clone(&store), test_fetch_config());

    coordinator.start().await;

    assert!(coordinator.error().await.is_none());
    assert_eq!(coordinator.permissions().await.len(), 14);

    let snapshot = store.data().await;
    assert!(snapshot.get("steps").is_some());
    assert!(snapshot.get("sleepSessions").is_some());

    let formatted = store
        .formatted_data()
        .await
        .ok_or_else(|| anyhow::anyhow!("no formatted summary"))?;
    assert!(formatted
        .prompt
        .contains("User Health Metrics Last Week (Last Updated:"));
    assert!(formatted.prompt.contains("**Activity**"));

    let cache = store.get_cache().await;
    assert!(cache.token_count > 0);
    assert_eq!(cache.last_updated, store.last_updated().await);

    coordinator.shutdown();
    Ok(())
}

#[tokio::test]
async fn seeded_provider_is_deterministic_across_runs() -> Result<()> {
    let run = |seed: u64| async move {
        let store = memory_store().await?;
        store.set_enabled(true).await;
        let provider = Arc::new(SyntheticHealthProvider::seeded(seed));
        let coordinator =
            FetchCoordinator::new(provider, Arc::clone(&store), test_fetch_config());
        coordinator.start().await;
        anyhow::Ok(store.data().await)
    };

    let first = run(7).await?;
    let second = run(7).await?;

    assert_eq!(first.get("steps"), second.get("steps"));
    assert_eq!(first.get("weight"), second.get("weight"));
    Ok(())
}

#[tokio::test]
async fn ungranted_category_disappears_from_the_prompt() -> Result<()> {
    let store = memory_store().await?;
    store.set_enabled(true).await;
    let provider = Arc::new(SyntheticHealthProvider::seeded(42).deny(RecordKind::Hydration));
    let coordinator =
        FetchCoordinator::new(provider, Arc::clone(&store), test_fetch_config());

    coordinator.start().await;

    let formatted = store
        .formatted_data()
        .await
        .ok_or_else(|| anyhow::anyhow!("no formatted summary"))?;
    // hydration is Nutrition's only member, so the whole category is omitted
    assert!(!formatted.prompt.contains("**Nutrition**"));
    assert!(formatted.categories.iter().all(|c| c.name != "Nutrition"));
    Ok(())
}
