// Copyright (c) 2024-2025 Jesse Morgan
// Licensed under the MIT License. See LICENSE file for details.

//! Quote-aware word splitting for command-line prefixes.
//!
//! This is deliberately a shell *heuristic*, not a shell grammar: it knows
//! about paired `"` and `'` quotes and nothing else. There is no backslash
//! escaping, no variable expansion, and no globbing. An unclosed quote never
//! fails; the partial token is returned as typed.

/// Split a command-line prefix into words, respecting single and double quotes.
///
/// Whitespace inside an open quote is literal. A quote character of the
/// *other* kind inside an open quote is also literal (no nesting semantics).
/// End of input flushes any non-empty buffer, even if a quote is still open.
pub fn tokenize(prefix: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;

    for ch in prefix.chars() {
        match ch {
            '"' | '\'' => match quote {
                None => quote = Some(ch),
                Some(open) if open == ch => quote = None,
                // A different quote kind inside a quoted run is literal.
                Some(_) => current.push(ch),
            },
            c if c.is_whitespace() && quote.is_none() => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_split() {
        assert_eq!(tokenize("git commit -m"), vec!["git", "commit", "-m"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn test_collapses_repeated_whitespace() {
        assert_eq!(tokenize("git   status"), vec!["git", "status"]);
        assert_eq!(tokenize("  git status "), vec!["git", "status"]);
    }

    #[test]
    fn test_quoted_whitespace_is_literal() {
        assert_eq!(
            tokenize("git commit -m \"fix the bug\""),
            vec!["git", "commit", "-m", "fix the bug"]
        );
        assert_eq!(tokenize("echo 'a b c'"), vec!["echo", "a b c"]);
    }

    #[test]
    fn test_other_quote_kind_is_literal_inside_quotes() {
        assert_eq!(tokenize("echo \"it's fine\""), vec!["echo", "it's fine"]);
        assert_eq!(tokenize("echo 'say \"hi\"'"), vec!["echo", "say \"hi\""]);
    }

    #[test]
    fn test_unclosed_quote_degrades_gracefully() {
        assert_eq!(
            tokenize("git commit -m \"work in prog"),
            vec!["git", "commit", "-m", "work in prog"]
        );
        assert_eq!(tokenize("'"), Vec::<String>::new());
        assert_eq!(tokenize("'abc"), vec!["abc"]);
    }

    #[test]
    fn test_adjacent_quotes_join_one_token() {
        assert_eq!(tokenize("a\"b c\"d"), vec!["ab cd"]);
    }
}
