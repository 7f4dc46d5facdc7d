// Copyright (c) 2024-2025 Jesse Morgan
// Licensed under the MIT License. See LICENSE file for details.

//! Consistent error formatting for tabwise.
//!
//! Errors here are for the human running the tool by hand; during normal
//! completion the shell swallows stderr, so these only matter for
//! debugging and misconfigured integrations.

/// GitHub issues URL for support.
pub const GITHUB_ISSUES_URL: &str = "https://github.com/tabwise/tabwise/issues";

/// Formats an error message with title, causes, and suggested fixes.
///
/// # Example
///
/// ```
/// use tabwise::error::format_error;
///
/// let error = format_error(
///     "Invalid cursor offset",
///     &["COMP_POINT was not a non-negative integer"],
///     &["Usage: tabwise '<COMP_LINE>' <COMP_POINT>"],
/// );
/// eprintln!("{}", error);
/// ```
pub fn format_error(title: &str, causes: &[&str], fixes: &[&str]) -> String {
    let mut output = String::new();

    output.push_str(&format!("[✗] {}\n\n", title));

    if !causes.is_empty() {
        output.push_str("Possible causes:\n");
        for cause in causes {
            output.push_str(&format!("  - {}\n", cause));
        }
        output.push('\n');
    }

    if !fixes.is_empty() {
        output.push_str("Try these fixes:\n");
        for (i, fix) in fixes.iter().enumerate() {
            output.push_str(&format!("  {}. {}\n", i + 1, fix));
        }
        output.push('\n');
    }

    output.push_str(&format!("Need help? {}", GITHUB_ISSUES_URL));

    output
}
