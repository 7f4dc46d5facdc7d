// Copyright (c) 2024-2025 Jesse Morgan
// Licensed under the MIT License. See LICENSE file for details.

//! Shell-specific rendering of the ranked candidate list.
//!
//! This sits outside the prediction core: it consumes the ordered list and
//! joins it with the separator the target shell's completion protocol
//! expects. Bash and zsh take newline-separated words, fish takes
//! tab-separated. No semantic transformation happens here beyond
//! sanitizing each candidate for safe shell output.

use std::env;

/// Target shell dialect for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellKind {
    Bash,
    Zsh,
    Fish,
}

impl ShellKind {
    /// Sniff a shell kind from a name like `zsh`, `/usr/bin/fish`, or
    /// `bash`. Anything unrecognized defaults to bash.
    pub fn from_name(name: &str) -> Self {
        let name = name.to_lowercase();
        if name.contains("zsh") {
            ShellKind::Zsh
        } else if name.contains("fish") {
            ShellKind::Fish
        } else {
            ShellKind::Bash
        }
    }

    /// Resolve the target shell from the `SHELL_TYPE` environment variable,
    /// defaulting to bash when unset.
    pub fn from_env() -> Self {
        match env::var("SHELL_TYPE") {
            Ok(value) => Self::from_name(&value),
            Err(_) => ShellKind::Bash,
        }
    }

    fn separator(self) -> &'static str {
        match self {
            ShellKind::Bash | ShellKind::Zsh => "\n",
            ShellKind::Fish => "\t",
        }
    }
}

/// Render the candidate list for the given shell. An empty list renders as
/// an empty string (the CLI prints nothing and exits zero).
pub fn format_suggestions(suggestions: &[String], shell: ShellKind) -> String {
    if suggestions.is_empty() {
        return String::new();
    }
    let sanitized: Vec<String> = suggestions
        .iter()
        .map(|s| sanitize_suggestion(s))
        .collect();
    sanitized.join(shell.separator())
}

/// Strip control characters and escape backslashes and quotes so a
/// candidate can be echoed back into a shell completion list safely.
pub fn sanitize_suggestion(suggestion: &str) -> String {
    let mut out = String::with_capacity(suggestion.len());
    for ch in suggestion.chars() {
        match ch {
            c if c.is_control() => {}
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\'' => out.push_str("\\'"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates() -> Vec<String> {
        vec!["add".to_string(), "commit".to_string(), "push".to_string()]
    }

    #[test]
    fn test_bash_and_zsh_join_with_newlines() {
        assert_eq!(
            format_suggestions(&candidates(), ShellKind::Bash),
            "add\ncommit\npush"
        );
        assert_eq!(
            format_suggestions(&candidates(), ShellKind::Zsh),
            "add\ncommit\npush"
        );
    }

    #[test]
    fn test_fish_joins_with_tabs() {
        assert_eq!(
            format_suggestions(&candidates(), ShellKind::Fish),
            "add\tcommit\tpush"
        );
    }

    #[test]
    fn test_empty_list_renders_empty() {
        assert_eq!(format_suggestions(&[], ShellKind::Bash), "");
    }

    #[test]
    fn test_from_name() {
        assert_eq!(ShellKind::from_name("bash"), ShellKind::Bash);
        assert_eq!(ShellKind::from_name("/usr/bin/zsh"), ShellKind::Zsh);
        assert_eq!(ShellKind::from_name("FISH"), ShellKind::Fish);
        assert_eq!(ShellKind::from_name("powershell"), ShellKind::Bash);
    }

    #[test]
    fn test_sanitize_strips_control_chars() {
        assert_eq!(sanitize_suggestion("a\x00b\x1fc\x7fd"), "abcd");
    }

    #[test]
    fn test_sanitize_escapes_quotes_and_backslashes() {
        assert_eq!(sanitize_suggestion("a\\b"), "a\\\\b");
        assert_eq!(sanitize_suggestion("say \"hi\""), "say \\\"hi\\\"");
        assert_eq!(sanitize_suggestion("it's"), "it\\'s");
    }
}
