// ABOUTME: Pure derivation of a categorized, LLM-readable summary from a snapshot
// ABOUTME: Category and metric order follow the static display configuration
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright (c) 2025 Vitals Context

use crate::config::categories::{self, CATEGORIES};
use crate::models::HealthSnapshot;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sentinel prompt when no category has any contributing metric
pub const NO_DATA_PROMPT: &str = "No health metrics data available.";

/// Trailing hint instructing contextual, not unconditional, use of the data
pub const USAGE_HINT: &str = "Note: Use this health data contextually when relevant to user queries about health, fitness, or wellness.";

/// One formatted metric line within a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedMetric {
    /// Human-readable label
    pub name: String,
    /// Value formatted to two decimal places
    pub value: String,
    /// Display unit; empty for dimensionless counts
    pub unit: String,
}

/// One included display category with its contributing metrics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedCategory {
    /// Display heading
    pub name: String,
    /// Contributing metrics in declared order
    pub metrics: Vec<FormattedMetric>,
}

/// Derived, never mutated in place; recomputed whenever the snapshot or its
/// timestamp changes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedSummary {
    /// Prompt text ready for LLM context injection
    pub prompt: String,
    /// Timestamp the summary was derived for
    pub last_updated: DateTime<Utc>,
    /// Included categories in declared order
    pub categories: Vec<FormattedCategory>,
}

/// Turn raw per-metric values into a categorized summary
///
/// Iterates categories in declared order, and each category's metrics in
/// declared order. A metric contributes only when its snapshot value is
/// present and positive; a category with no contributing metric is omitted
/// from both the structure and the prompt text.
#[must_use]
pub fn format_summary(snapshot: &HealthSnapshot, last_updated: DateTime<Utc>) -> FormattedSummary {
    let mut included = Vec::new();
    for category in CATEGORIES {
        let mut metrics = Vec::new();
        for key in category.metrics {
            if let Some(value) = snapshot.get(key).filter(|v| *v > 0.0) {
                metrics.push(FormattedMetric {
                    name: categories::label(key).to_owned(),
                    value: format!("{value:.2}"),
                    unit: categories::unit(key).to_owned(),
                });
            }
        }
        if !metrics.is_empty() {
            included.push(FormattedCategory {
                name: category.name.to_owned(),
                metrics,
            });
        }
    }

    if included.is_empty() {
        return FormattedSummary {
            prompt: NO_DATA_PROMPT.to_owned(),
            last_updated,
            categories: included,
        };
    }

    let mut prompt = format!(
        "\n\nUser Health Metrics Last Week (Last Updated: {})\n\n",
        last_updated.format("%Y-%m-%d")
    );
    for category in &included {
        prompt.push_str(&format!("**{}**:\n", category.name));
        for metric in &category.metrics {
            if metric.unit.is_empty() {
                prompt.push_str(&format!("- {}: {}\n", metric.name, metric.value));
            } else {
                prompt.push_str(&format!("- {}: {} {}\n", metric.name, metric.value, metric.unit));
            }
        }
        prompt.push('\n');
    }
    prompt.push_str(USAGE_HINT);

    FormattedSummary {
        prompt,
        last_updated,
        categories: included,
    }
}
