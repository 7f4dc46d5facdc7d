// Copyright (c) 2024-2025 Jesse Morgan
// Licensed under the MIT License. See LICENSE file for details.

//! Command context extraction.
//!
//! Turns a raw line plus cursor offset into a structured [`CommandContext`]:
//! which command and subcommand the user is in, the trailing arguments, and
//! the word under the cursor. Word boundaries are recomputed from the raw
//! line rather than reused from tokenization, because the in-progress word
//! may be incomplete and therefore absent from the token list.
//!
//! All offsets are *character* offsets, not byte offsets, so multi-byte
//! input never panics on a slice boundary.

use crate::tokenizer::tokenize;

/// Structured view of a command line at a cursor position.
///
/// Invariants: `word_start <= cursor <= word_end` and `current_word` equals
/// the characters of the raw line between `word_start` and `word_end`
/// (except when the end-of-line rule below forces it empty).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandContext {
    /// First token, or `None` for an empty line.
    pub command: Option<String>,
    /// Second token, if any.
    pub subcommand: Option<String>,
    /// Tokens from index 2 onward.
    pub args: Vec<String>,
    /// The word under the cursor, possibly forced empty (see module docs).
    pub current_word: String,
    /// Character offset where the word under the cursor starts.
    pub word_start: usize,
    /// Character offset just past the word under the cursor.
    pub word_end: usize,
    /// Full token sequence of the line prefix up to the cursor.
    pub tokens: Vec<String>,
}

impl CommandContext {
    /// The degenerate context: all fields empty, offsets zero.
    pub fn empty() -> Self {
        Self {
            command: None,
            subcommand: None,
            args: Vec::new(),
            current_word: String::new(),
            word_start: 0,
            word_end: 0,
            tokens: Vec::new(),
        }
    }
}

/// Extract a [`CommandContext`] from a line and cursor offset.
///
/// Never fails: an empty line yields the empty context, and a cursor past
/// the end of the line is clamped to the line length. (Negative cursors are
/// rejected at the CLI boundary before this is reached.)
///
/// When the cursor sits exactly at end-of-line and the preceding character
/// is not whitespace, the just-typed word is treated as complete and
/// `current_word` is forced empty. This gives "suggest what comes next"
/// instead of "filter on the word just typed" semantics when the shell
/// reports the cursor at the very end of a finished token. UX policy, not a
/// parsing necessity; tunable if product feedback says otherwise.
pub fn extract_context(line: &str, cursor: usize) -> CommandContext {
    let chars: Vec<char> = line.chars().collect();
    if chars.is_empty() {
        return CommandContext::empty();
    }
    let cursor = cursor.min(chars.len());

    // Walk backward from cursor-1 to the first whitespace.
    let mut word_start = 0;
    for i in (0..cursor).rev() {
        if chars[i].is_whitespace() {
            word_start = i + 1;
            break;
        }
    }

    // Walk forward from the cursor to the first whitespace.
    let mut word_end = chars.len();
    for (i, ch) in chars.iter().enumerate().skip(cursor) {
        if ch.is_whitespace() {
            word_end = i;
            break;
        }
    }

    let mut current_word: String = chars[word_start..word_end].iter().collect();
    if cursor == chars.len() && cursor > 0 && !chars[cursor - 1].is_whitespace() {
        // Just-typed word at end-of-line counts as complete.
        current_word = String::new();
    }

    let prefix: String = chars[..cursor].iter().collect();
    let tokens = tokenize(&prefix);
    let command = tokens.first().cloned();
    let subcommand = tokens.get(1).cloned();
    let args = tokens.get(2..).map(<[String]>::to_vec).unwrap_or_default();

    CommandContext {
        command,
        subcommand,
        args,
        current_word,
        word_start,
        word_end,
        tokens,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_line_yields_empty_context() {
        let ctx = extract_context("", 0);
        assert_eq!(ctx, CommandContext::empty());
    }

    #[test]
    fn test_command_and_subcommand_split() {
        let ctx = extract_context("git commit -m", 12);
        assert_eq!(ctx.command.as_deref(), Some("git"));
        assert_eq!(ctx.subcommand.as_deref(), Some("commit"));
        assert_eq!(ctx.current_word, "-m");
        assert_eq!(ctx.tokens, vec!["git", "commit", "-"]);
    }

    #[test]
    fn test_word_boundaries_mid_line() {
        // cursor inside "comm", line continues afterwards
        let ctx = extract_context("git comm -a", 6);
        assert_eq!(ctx.word_start, 4);
        assert_eq!(ctx.word_end, 8);
        assert_eq!(ctx.current_word, "comm");
        assert!(ctx.word_start <= 6 && 6 <= ctx.word_end);
    }

    #[test]
    fn test_end_of_line_word_counts_as_complete() {
        let ctx = extract_context("git", 3);
        assert_eq!(ctx.command.as_deref(), Some("git"));
        assert_eq!(ctx.subcommand, None);
        assert_eq!(ctx.current_word, "");
        assert_eq!(ctx.word_start, 0);
        assert_eq!(ctx.word_end, 3);
    }

    #[test]
    fn test_trailing_space_keeps_word_empty() {
        let ctx = extract_context("git ", 4);
        assert_eq!(ctx.current_word, "");
        assert_eq!(ctx.word_start, 4);
        assert_eq!(ctx.word_end, 4);
    }

    #[test]
    fn test_in_progress_word_before_trailing_space() {
        // Cursor is at the end of "comm" but the line has a trailing space,
        // so the end-of-line rule does not fire and the word survives.
        let ctx = extract_context("git comm ", 8);
        assert_eq!(ctx.current_word, "comm");
        assert_eq!(ctx.subcommand.as_deref(), Some("comm"));
    }

    #[test]
    fn test_cursor_past_end_is_clamped() {
        let ctx = extract_context("git", 99);
        assert_eq!(ctx.command.as_deref(), Some("git"));
        assert_eq!(ctx.current_word, "");
        assert_eq!(ctx.word_end, 3);
    }

    #[test]
    fn test_cursor_inside_unclosed_quote() {
        let ctx = extract_context("git commit -m \"wip", 18);
        assert_eq!(ctx.command.as_deref(), Some("git"));
        assert_eq!(ctx.tokens.last().map(String::as_str), Some("wip"));
    }

    #[test]
    fn test_multibyte_input_does_not_panic() {
        let ctx = extract_context("git commit -m über", 18);
        assert_eq!(ctx.command.as_deref(), Some("git"));
        assert_eq!(ctx.word_end, 18);
    }

    #[test]
    fn test_first_word_no_preceding_whitespace() {
        let ctx = extract_context("git status", 2);
        assert_eq!(ctx.word_start, 0);
        assert_eq!(ctx.word_end, 3);
        assert_eq!(ctx.current_word, "git");
        assert_eq!(ctx.tokens, vec!["gi"]);
    }
}
