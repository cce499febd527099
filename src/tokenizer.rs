// ABOUTME: Token counting abstraction for context-budget accounting
// ABOUTME: Ships a character-ratio estimator; assumed synchronous and pure for caching
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright (c) 2025 Vitals Context

use crate::errors::HealthResult;

/// Converts text into a language-model token count
///
/// Implementations must be pure: the same text always yields the same count,
/// which is what makes the store's token cache sound.
pub trait Tokenizer: Send + Sync {
    /// Count the tokens the given text would consume
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying tokenizer fails; callers degrade
    /// the cache entry to zero cost rather than propagating.
    fn count_tokens(&self, text: &str) -> HealthResult<usize>;
}

/// Heuristic counter using character-based estimation (tokens ≈ chars / 4)
#[derive(Debug, Clone)]
pub struct HeuristicTokenizer {
    chars_per_token: f64,
}

impl HeuristicTokenizer {
    /// Create an estimator with a custom character-per-token ratio
    #[must_use]
    pub fn new(chars_per_token: f64) -> Self {
        Self {
            chars_per_token: if chars_per_token > 0.0 {
                chars_per_token
            } else {
                4.0
            },
        }
    }
}

impl Default for HeuristicTokenizer {
    fn default() -> Self {
        Self::new(4.0)
    }
}

impl Tokenizer for HeuristicTokenizer {
    fn count_tokens(&self, text: &str) -> HealthResult<usize> {
        let chars = text.chars().count();
        Ok(((chars as f64) / self.chars_per_token).ceil() as usize)
    }
}
