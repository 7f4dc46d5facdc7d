// Copyright (c) 2024-2025 Jesse Morgan
// Licensed under the MIT License. See LICENSE file for details.

//! The embedded command knowledge base.
//!
//! A static, read-only table mapping command names to their known
//! subcommands and flags. It is compiled into the binary (no external file
//! to parse at startup) and never mutated after construction. Commands that
//! are not listed here simply contribute no suggestions; an unknown command
//! is a knowledge gap, not an error.

use indexmap::IndexMap;
use once_cell::sync::Lazy;

/// Knowledge-base entry for one command.
///
/// `flags` maps a subcommand name to its flags; the empty-string key holds
/// command-level (global) flags for commands without subcommands.
#[derive(Debug, Clone, Copy)]
pub struct CommandSpec {
    pub name: &'static str,
    pub subcommands: &'static [&'static str],
    flags: &'static [(&'static str, &'static [&'static str])],
}

impl CommandSpec {
    /// Flags registered for a given subcommand, empty if none.
    pub fn flags_for(&self, subcommand: &str) -> &'static [&'static str] {
        self.flags
            .iter()
            .find(|(name, _)| *name == subcommand)
            .map(|(_, flags)| *flags)
            .unwrap_or(&[])
    }

    /// Command-level flags (the empty-string key).
    pub fn global_flags(&self) -> &'static [&'static str] {
        self.flags_for("")
    }
}

static COMMANDS: Lazy<IndexMap<&'static str, CommandSpec>> = Lazy::new(|| {
    let specs = [
        CommandSpec {
            name: "git",
            subcommands: &[
                "add", "commit", "push", "pull", "status", "checkout", "branch", "merge",
                "log", "diff",
            ],
            flags: &[
                ("add", &["-A", "--all", "-p", "--patch", "-u", "--update"]),
                ("commit", &["-m", "--message", "--amend", "--signoff", "-a", "--all"]),
                ("push", &["-u", "--set-upstream", "--force", "-f", "--delete"]),
                ("pull", &["--rebase", "--ff-only", "--no-ff"]),
                ("status", &["-s", "--short", "-b", "--branch", "--porcelain"]),
                ("checkout", &["-b", "--branch", "-f", "--force", "--track"]),
                ("branch", &["-d", "--delete", "-m", "--move", "-r", "--remote"]),
                ("log", &["--oneline", "--graph", "--decorate", "-n", "--max-count"]),
                ("diff", &["--cached", "--staged", "-w", "--ignore-all-space"]),
            ],
        },
        CommandSpec {
            name: "docker",
            subcommands: &[
                "run", "build", "pull", "push", "exec", "ps", "images", "logs", "stop", "rm",
            ],
            flags: &[
                ("run", &["-d", "--detach", "--rm", "-it", "--interactive", "--tty", "-p", "--publish"]),
                ("build", &["-t", "--tag", "-f", "--file", "--no-cache", "--pull"]),
                ("pull", &["-a", "--all-tags", "--platform"]),
                ("push", &["-a", "--all-tags"]),
                ("exec", &["-it", "--interactive", "--tty", "-u", "--user"]),
                ("ps", &["-a", "--all", "-q", "--quiet", "--format"]),
                ("images", &["-a", "--all", "-q", "--quiet", "--filter"]),
                ("logs", &["-f", "--follow", "-t", "--timestamps", "--tail"]),
                ("stop", &["-t", "--time"]),
                ("rm", &["-f", "--force", "-v", "--volumes"]),
            ],
        },
        CommandSpec {
            name: "ls",
            subcommands: &[],
            flags: &[("", &["-l", "--long", "-a", "--all", "-h", "--human-readable", "--color", "-R", "--recursive"])],
        },
        CommandSpec {
            name: "cd",
            subcommands: &[],
            flags: &[("", &["-", "-L", "-P"])],
        },
        CommandSpec {
            name: "cp",
            subcommands: &[],
            flags: &[("", &["-r", "--recursive", "-v", "--verbose", "-f", "--force", "-i", "--interactive"])],
        },
        CommandSpec {
            name: "mv",
            subcommands: &[],
            flags: &[("", &["-v", "--verbose", "-f", "--force", "-i", "--interactive", "-n", "--no-clobber"])],
        },
        CommandSpec {
            name: "rm",
            subcommands: &[],
            flags: &[("", &["-r", "--recursive", "-f", "--force", "-i", "--interactive", "-v", "--verbose"])],
        },
    ];

    specs.into_iter().map(|spec| (spec.name, spec)).collect()
});

/// Look up a command by exact name. `None` means "no structured knowledge".
pub fn lookup(command: &str) -> Option<&'static CommandSpec> {
    COMMANDS.get(command)
}

/// All known command names, in declared order.
pub fn command_names() -> impl Iterator<Item = &'static str> {
    COMMANDS.keys().copied()
}

/// Normalize a command name before knowledge-base lookup: lowercase, trim,
/// strip a leading `sudo` and collapse internal whitespace.
pub fn normalize_command(command: &str) -> String {
    let normalized = command.trim().to_lowercase();
    let mut words: Vec<&str> = normalized.split_whitespace().collect();
    if words.len() > 1 && words[0] == "sudo" {
        words.remove(0);
    }
    words.join(" ")
}

/// A valid command name is ASCII alphanumerics plus `_` and `-`.
pub fn is_valid_command(command: &str) -> bool {
    !command.is_empty()
        && command
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
