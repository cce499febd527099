// ABOUTME: Unit tests for the context formatter
// ABOUTME: Covers category ordering, omission rules, sentinel prompt, and text layout
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright (c) 2025 Vitals Context

mod common;

use anyhow::Result;
use common::{snapshot_of, ts};
use vitals_context::formatter::{format_summary, NO_DATA_PROMPT, USAGE_HINT};
use vitals_context::models::HealthSnapshot;

#[test]
fn zero_valued_metric_is_omitted_from_its_category() -> Result<()> {
    // distance never makes it into the snapshot; steps and heart rate do
    let mut snapshot = snapshot_of(&[("steps", 8_000.0), ("heartRate", 72.0)]);
    snapshot.record("distance", Some(0.0));

    let summary = format_summary(&snapshot, ts("2025-08-01T12:00:00Z")?);

    assert_eq!(summary.categories.len(), 2);
    let activity = &summary.categories[0];
    assert_eq!(activity.name, "Activity");
    assert_eq!(activity.metrics.len(), 1);
    assert_eq!(activity.metrics[0].name, "Steps");
    assert_eq!(activity.metrics[0].value, "8000.00");

    let vitals = &summary.categories[1];
    assert_eq!(vitals.name, "Vitals");
    assert_eq!(vitals.metrics.len(), 1);
    assert_eq!(vitals.metrics[0].name, "Heart Rate");
    assert_eq!(vitals.metrics[0].value, "72.00");
    assert_eq!(vitals.metrics[0].unit, "bpm");
    Ok(())
}

#[test]
fn empty_snapshot_yields_sentinel_prompt() -> Result<()> {
    let summary = format_summary(&HealthSnapshot::new(), ts("2025-08-01T12:00:00Z")?);

    assert_eq!(summary.prompt, NO_DATA_PROMPT);
    assert!(summary.categories.is_empty());
    Ok(())
}

#[test]
fn category_with_no_contributing_metrics_is_absent_from_prompt() -> Result<()> {
    let snapshot = snapshot_of(&[("steps", 100.0)]);

    let summary = format_summary(&snapshot, ts("2025-08-01T12:00:00Z")?);

    assert!(!summary.prompt.contains("**Vitals**"));
    assert!(!summary.prompt.contains("**Sleep**"));
    assert!(summary.prompt.contains("**Activity**"));
    assert!(summary.categories.iter().all(|c| c.name == "Activity"));
    Ok(())
}

#[test]
fn prompt_layout_has_header_bullets_and_usage_hint() -> Result<()> {
    let snapshot = snapshot_of(&[("steps", 8_000.0), ("heartRate", 72.0), ("weight", 70.5)]);

    let summary = format_summary(&snapshot, ts("2025-08-01T12:00:00Z")?);

    assert!(summary
        .prompt
        .starts_with("\n\nUser Health Metrics Last Week (Last Updated: 2025-08-01)\n\n"));
    // dimensionless metrics carry no unit suffix
    assert!(summary.prompt.contains("**Activity**:\n- Steps: 8000.00\n"));
    assert!(summary.prompt.contains("- Heart Rate: 72.00 bpm\n"));
    assert!(summary.prompt.contains("- Weight: 70.50 kg\n"));
    assert!(summary.prompt.ends_with(USAGE_HINT));
    Ok(())
}

#[test]
fn values_format_to_two_decimal_places() -> Result<()> {
    let snapshot = snapshot_of(&[("distance", 1234.5678)]);

    let summary = format_summary(&snapshot, ts("2025-08-01T12:00:00Z")?);

    assert_eq!(summary.categories[0].metrics[0].value, "1234.57");
    assert_eq!(summary.categories[0].metrics[0].unit, "m");
    Ok(())
}

#[test]
fn metric_order_within_category_follows_declared_order() -> Result<()> {
    let snapshot = snapshot_of(&[
        ("totalCalories", 2_100.0),
        ("steps", 9_000.0),
        ("distance", 4_200.0),
    ]);

    let summary = format_summary(&snapshot, ts("2025-08-01T12:00:00Z")?);

    let names: Vec<&str> = summary.categories[0]
        .metrics
        .iter()
        .map(|m| m.name.as_str())
        .collect();
    assert_eq!(names, vec!["Steps", "Distance", "Total Calories"]);
    Ok(())
}
