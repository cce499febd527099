// ABOUTME: Configuration layer for display categories and fetch tuning
// ABOUTME: Static category tables plus environment-driven acquisition knobs
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright (c) 2025 Vitals Context

/// Display categories, labels, and units for formatted summaries
pub mod categories;

/// Acquisition tuning knobs (timeouts, batching, throttling)
pub mod fetch;

pub use fetch::FetchConfig;
