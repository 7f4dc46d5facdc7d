// Copyright (c) 2024-2025 Jesse Morgan
// Licensed under the MIT License. See LICENSE file for details.

//! The prediction engine: knowledge-base lookup, filtering, and ranking.
//!
//! `predict` consults the cache first, derives the raw candidate set from
//! the knowledge base on a miss and stores it, then filters by the word
//! under the cursor and ranks the survivors. The cache stores the raw,
//! word-agnostic set, so the cache key ignores `current_word` and one entry
//! serves every keystroke within the same word.
//!
//! This path never errors: unknown commands and degenerate contexts resolve
//! to empty or unfiltered candidate lists.

use crate::cache::{SuggestionCache, DEFAULT_TTL_SECS};
use crate::context::CommandContext;
use crate::knowledge;

/// Prediction engine owning its suggestion cache.
///
/// The cache is injected at construction rather than reached through a
/// global, so tests can run against an in-memory instance.
pub struct PredictionEngine {
    cache: SuggestionCache,
}

impl PredictionEngine {
    pub fn new(cache: SuggestionCache) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &SuggestionCache {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut SuggestionCache {
        &mut self.cache
    }

    /// Produce the ordered completion candidates for a context.
    ///
    /// Order of operations is part of the contract: cache lookup, raw-set
    /// derivation and store on a miss, then filtering, then ranking. A hit
    /// never re-stores: `get` already refreshed recency and the hit counter,
    /// and the entry's age keeps counting from its original creation.
    pub fn predict(&mut self, context: &CommandContext) -> Vec<String> {
        let key = cache_key(context);

        let raw = match self.cache.get(&key) {
            Some(cached) => {
                tracing::debug!("PREDICT_CACHE_HIT | key={}", key);
                cached
            }
            None => {
                let derived = self.raw_candidates(context);
                self.cache.put(&key, derived.clone(), DEFAULT_TTL_SECS);
                derived
            }
        };

        rank(
            filter_by_word(raw, &context.current_word),
            &context.current_word,
        )
    }

    /// Derive the raw candidate set from the knowledge base.
    fn raw_candidates(&self, context: &CommandContext) -> Vec<String> {
        let Some(command) = context.command.as_deref() else {
            // Nothing typed yet: every known command is a candidate.
            return knowledge::command_names().map(str::to_string).collect();
        };

        let normalized = knowledge::normalize_command(command);
        let Some(spec) = knowledge::lookup(&normalized) else {
            // Knowledge gap, not an error.
            return Vec::new();
        };

        let mut suggestions: Vec<String> = Vec::new();
        match context.subcommand.as_deref() {
            None => {
                suggestions.extend(spec.subcommands.iter().map(|s| s.to_string()));
                suggestions.extend(spec.global_flags().iter().map(|f| f.to_string()));
            }
            Some(subcommand) => {
                // Case-sensitive prefix match against the declared subcommands.
                let matching: Vec<&str> = spec
                    .subcommands
                    .iter()
                    .copied()
                    .filter(|s| s.starts_with(subcommand))
                    .collect();

                if matching.is_empty() {
                    // Exact or unknown subcommand: its own flags, if any.
                    suggestions.extend(spec.flags_for(subcommand).iter().map(|f| f.to_string()));
                } else {
                    suggestions.extend(matching.iter().map(|s| s.to_string()));
                    for name in &matching {
                        suggestions.extend(spec.flags_for(name).iter().map(|f| f.to_string()));
                    }
                }
                suggestions.extend(spec.global_flags().iter().map(|f| f.to_string()));
            }
        }
        suggestions
    }
}

/// Deterministic context fingerprint from command, subcommand, and args.
///
/// Parts are joined with `|`; any `\` or `|` inside a token is escaped so
/// the separator can never occur unescaped within a part, and distinct
/// contexts can never collide. `current_word` is deliberately excluded.
pub fn cache_key(context: &CommandContext) -> String {
    let mut parts = vec![
        escape_key_part(context.command.as_deref().unwrap_or("")),
        escape_key_part(context.subcommand.as_deref().unwrap_or("")),
    ];
    parts.extend(context.args.iter().map(|arg| escape_key_part(arg)));
    parts.join("|")
}

fn escape_key_part(part: &str) -> String {
    part.replace('\\', "\\\\").replace('|', "\\|")
}

/// Keep only suggestions whose lowercased text starts with the lowercased
/// in-progress word. An empty word keeps everything.
fn filter_by_word(suggestions: Vec<String>, current_word: &str) -> Vec<String> {
    if current_word.is_empty() {
        return suggestions;
    }
    let needle = current_word.to_lowercase();
    suggestions
        .into_iter()
        .filter(|s| s.to_lowercase().starts_with(&needle))
        .collect()
}

/// Stable three-bucket ranking: case-insensitive exact matches, then prefix
/// matches, then the rest, each bucket preserving original relative order.
/// A no-op for an empty in-progress word.
fn rank(suggestions: Vec<String>, current_word: &str) -> Vec<String> {
    if current_word.is_empty() || suggestions.is_empty() {
        return suggestions;
    }
    let needle = current_word.to_lowercase();

    let mut exact = Vec::new();
    let mut prefix = Vec::new();
    let mut rest = Vec::new();
    for suggestion in suggestions {
        let lower = suggestion.to_lowercase();
        if lower == needle {
            exact.push(suggestion);
        } else if lower.starts_with(&needle) {
            prefix.push(suggestion);
        } else {
            rest.push(suggestion);
        }
    }

    exact.extend(prefix);
    exact.extend(rest);
    exact
}
