// Copyright (c) 2024-2025 Jesse Morgan
// Licensed under the MIT License. See LICENSE file for details.

//! tabwise - Context-aware shell completion engine library
//!
//! Given a partially typed command line and a cursor offset, tabwise
//! produces an ordered list of completion candidates and renders them in
//! shell-specific syntax. The pipeline:
//!
//! **Tokenize** -> **Extract context** -> **Cache lookup** -> **Predict** -> **Format**
//!
//! # Core Modules
//!
//! - [`tokenizer`] - Quote-aware word splitting of the line prefix
//! - [`context`] - Structured command context at the cursor
//! - [`knowledge`] - Embedded command/subcommand/flag knowledge base
//! - [`predict`] - Candidate derivation, filtering, ranking, cache use
//! - [`cache`] - TTL + size-bounded suggestion cache with JSON persistence
//! - [`format`] - Shell-specific output rendering
//! - [`error`] - Consistent error formatting utilities

pub mod cache;
pub mod context;
pub mod error;
pub mod format;
pub mod knowledge;
pub mod predict;
pub mod tokenizer;

// Re-export commonly used types
pub use cache::{CacheEntry, CacheStats, SuggestionCache, DEFAULT_MAX_ENTRIES, DEFAULT_TTL_SECS};
pub use context::{extract_context, CommandContext};
pub use format::{format_suggestions, sanitize_suggestion, ShellKind};
pub use knowledge::{command_names, is_valid_command, lookup, normalize_command, CommandSpec};
pub use predict::{cache_key, PredictionEngine};
pub use tokenizer::tokenize;

// Re-export error utilities
pub use error::{format_error, GITHUB_ISSUES_URL};
