// ABOUTME: Static display configuration mapping metric keys to categories, labels, and units
// ABOUTME: Declared order drives both summary structure and prompt text ordering
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright (c) 2025 Vitals Context

use crate::catalog::keys;

/// A display grouping of related metric keys under one heading
#[derive(Debug, Clone, Copy)]
pub struct CategoryConfig {
    /// Stable category key
    pub key: &'static str,
    /// Human-readable heading
    pub name: &'static str,
    /// Member metric keys, in display order
    pub metrics: &'static [&'static str],
}

/// Categories in declared display order
pub const CATEGORIES: &[CategoryConfig] = &[
    CategoryConfig {
        key: "activity",
        name: "Activity",
        metrics: &[
            keys::STEPS,
            keys::DISTANCE,
            keys::ACTIVE_CALORIES,
            keys::TOTAL_CALORIES,
            keys::EXERCISE_SESSIONS,
        ],
    },
    CategoryConfig {
        key: "vitals",
        name: "Vitals",
        metrics: &[
            keys::HEART_RATE,
            keys::BLOOD_PRESSURE_SYSTOLIC,
            keys::BLOOD_PRESSURE_DIASTOLIC,
            keys::BODY_TEMPERATURE,
            keys::RESPIRATORY_RATE,
        ],
    },
    CategoryConfig {
        key: "body",
        name: "Body Measurements",
        metrics: &[keys::WEIGHT, keys::HEIGHT, keys::BASAL_METABOLIC_RATE],
    },
    CategoryConfig {
        key: "nutrition",
        name: "Nutrition",
        metrics: &[keys::HYDRATION],
    },
    CategoryConfig {
        key: "sleep",
        name: "Sleep",
        metrics: &[keys::SLEEP_SESSIONS],
    },
];

/// Human-readable label for a metric key; falls back to the key itself
#[must_use]
pub fn label(key: &str) -> &str {
    match key {
        keys::STEPS => "Steps",
        keys::DISTANCE => "Distance",
        keys::ACTIVE_CALORIES => "Active Calories",
        keys::TOTAL_CALORIES => "Total Calories",
        keys::HEART_RATE => "Heart Rate",
        keys::WEIGHT => "Weight",
        keys::HEIGHT => "Height",
        keys::HYDRATION => "Hydration",
        keys::BLOOD_PRESSURE_SYSTOLIC => "Blood Pressure (Systolic)",
        keys::BLOOD_PRESSURE_DIASTOLIC => "Blood Pressure (Diastolic)",
        keys::BODY_TEMPERATURE => "Body Temperature",
        keys::BASAL_METABOLIC_RATE => "Basal Metabolic Rate",
        keys::RESPIRATORY_RATE => "Respiratory Rate",
        keys::EXERCISE_SESSIONS => "Exercise Sessions",
        keys::SLEEP_SESSIONS => "Sleep Sessions",
        other => other,
    }
}

/// Display unit for a metric key; empty for dimensionless counts
#[must_use]
pub fn unit(key: &str) -> &'static str {
    match key {
        keys::DISTANCE | keys::HEIGHT => "m",
        keys::ACTIVE_CALORIES | keys::TOTAL_CALORIES => "kcal",
        keys::HEART_RATE => "bpm",
        keys::WEIGHT => "kg",
        keys::HYDRATION => "L",
        keys::BLOOD_PRESSURE_SYSTOLIC | keys::BLOOD_PRESSURE_DIASTOLIC => "mmHg",
        keys::BODY_TEMPERATURE => "\u{b0}C",
        keys::BASAL_METABOLIC_RATE => "kcal/day",
        keys::RESPIRATORY_RATE => "breaths/min",
        keys::EXERCISE_SESSIONS | keys::SLEEP_SESSIONS => "sessions",
        _ => "",
    }
}
