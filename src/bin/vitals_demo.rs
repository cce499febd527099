// ABOUTME: Demo binary driving the full pipeline against the synthetic provider
// ABOUTME: Seeds a week of data, fetches, formats, and prints the prompt with its token cost
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright (c) 2025 Vitals Context

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use vitals_context::config::FetchConfig;
use vitals_context::coordinator::FetchCoordinator;
use vitals_context::logging::{init_logging, LoggingConfig};
use vitals_context::providers::synthetic::SyntheticHealthProvider;
use vitals_context::store::persistence::{FileStorage, MemoryStorage, StateStorage};
use vitals_context::store::MetricsStore;
use vitals_context::tokenizer::HeuristicTokenizer;

/// Run one acquisition cycle against synthetic data and print the resulting
/// LLM context artifact.
#[derive(Parser)]
#[command(name = "vitals-demo", about, version)]
struct Args {
    /// Seed for the synthetic data generator
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Persist state to this directory instead of the platform data dir
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Keep state in memory only; nothing is written to disk
    #[arg(long)]
    ephemeral: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging(&LoggingConfig::from_env())?;
    let args = Args::parse();

    let storage: Arc<dyn StateStorage> = if args.ephemeral {
        Arc::new(MemoryStorage::new())
    } else {
        match args.data_dir {
            Some(dir) => Arc::new(FileStorage::new(dir)),
            None => Arc::new(FileStorage::in_data_dir()),
        }
    };
    let tokenizer = Arc::new(HeuristicTokenizer::default());
    let store = Arc::new(MetricsStore::load(storage, tokenizer).await?);
    store.set_enabled(true).await;

    let provider = Arc::new(SyntheticHealthProvider::seeded(args.seed));
    let coordinator =
        FetchCoordinator::new(provider, Arc::clone(&store), FetchConfig::from_env());
    coordinator.start().await;

    if let Some(error) = coordinator.error().await {
        eprintln!("fetch failed: {error}");
        coordinator.shutdown();
        return Ok(());
    }

    match store.formatted_data().await {
        Some(formatted) => println!("{}", formatted.prompt),
        None => println!("no formatted summary available"),
    }

    let cache = store.get_cache().await;
    println!("\n[context cost: {} tokens]", cache.token_count);

    coordinator.shutdown();
    Ok(())
}
