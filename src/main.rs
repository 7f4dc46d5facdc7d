// Copyright (c) 2024-2025 Jesse Morgan
// Licensed under the MIT License. See LICENSE file for details.

use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use tabwise::cache::SuggestionCache;
use tabwise::context::extract_context;
use tabwise::error::format_error;
use tabwise::format::{format_suggestions, ShellKind};
use tabwise::knowledge;
use tabwise::predict::PredictionEngine;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes following sysexits.h conventions
/// These provide meaningful exit status to the invoking shell integration
mod exit_codes {
    /// Success - completion computed (possibly empty)
    pub const SUCCESS: i32 = 0;
    /// Usage error - invalid command line arguments
    pub const USAGE: i32 = 64;
}

use exit_codes::*;

/// tabwise - Context-aware shell completion engine.
#[derive(Parser)]
#[command(name = "tabwise")]
#[command(version = VERSION)]
#[command(about = "Context-aware shell completion engine for bash, zsh, and fish.")]
#[command(long_about = "tabwise - Context-aware shell completion engine\n\n\
    Complete a line:     tabwise 'git comm' 8\n\
    Pick the dialect:    tabwise 'git comm' 8 --shell fish\n\
    Known commands:      tabwise commands\n\
    Cache maintenance:   tabwise cache stats|clear|prune\n\n\
    Wire it to bash:     complete -C 'tabwise' git docker\n\
    The shell passes COMP_LINE and COMP_POINT; candidates come back on stdout.")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// The command line being completed (bash $COMP_LINE)
    #[arg(allow_hyphen_values = true)]
    line: Option<String>,

    /// Cursor offset into the line (bash $COMP_POINT)
    #[arg(allow_hyphen_values = true)]
    point: Option<String>,

    /// Target shell syntax: bash, zsh, or fish (defaults to $SHELL_TYPE)
    #[arg(long, global = true)]
    shell: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Cache operations
    ///
    /// Examples:
    ///   tabwise cache         (shows stats)
    ///   tabwise cache stats
    ///   tabwise cache clear
    ///   tabwise cache prune
    Cache {
        #[command(subcommand)]
        command: Option<CacheCommands>,
    },

    /// List the commands in the embedded knowledge base
    ///
    /// Examples:
    ///   tabwise commands
    Commands,
}

#[derive(Subcommand)]
enum CacheCommands {
    /// Show cache statistics
    ///
    /// Example:
    ///   tabwise cache stats
    Stats,

    /// Clear the cache
    ///
    /// Example:
    ///   tabwise cache clear
    Clear,

    /// Remove expired entries from the cache
    ///
    /// Example:
    ///   tabwise cache prune
    Prune,
}

fn main() {
    // Diagnostics go to stderr; stdout is reserved for candidates.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let code = match cli.command {
        Some(Commands::Cache { command }) => {
            handle_cache(command.unwrap_or(CacheCommands::Stats))
        }
        Some(Commands::Commands) => {
            list_commands();
            SUCCESS
        }
        None => run_complete(cli.line, cli.point, cli.shell.as_deref()),
    };

    std::process::exit(code);
}

/// The completion path: parse the cursor offset, extract context, predict,
/// and print the rendered candidates. No candidates means no output and a
/// zero exit status.
fn run_complete(line: Option<String>, point: Option<String>, shell: Option<&str>) -> i32 {
    let (Some(line), Some(point)) = (line, point) else {
        eprintln!(
            "{}",
            usage_error(
                "Missing arguments",
                "The shell integration did not pass COMP_LINE and COMP_POINT",
            )
        );
        return USAGE;
    };

    // Parse signed so a negative offset is reported as bad input instead of
    // silently wrapping.
    let cursor: i64 = match point.parse() {
        Ok(value) => value,
        Err(_) => {
            eprintln!(
                "{}",
                usage_error(
                    "Cursor offset is not an integer",
                    &format!("COMP_POINT was {:?}, expected a non-negative integer", point),
                )
            );
            return USAGE;
        }
    };
    if cursor < 0 {
        eprintln!(
            "{}",
            usage_error(
                "Cursor offset is negative",
                &format!("COMP_POINT was {}, but offsets into the line start at 0", cursor),
            )
        );
        return USAGE;
    }

    let shell = shell
        .map(ShellKind::from_name)
        .unwrap_or_else(ShellKind::from_env);

    let context = extract_context(&line, cursor as usize);
    tracing::debug!(
        "CONTEXT | command={:?} subcommand={:?} word=\"{}\"",
        context.command,
        context.subcommand,
        context.current_word
    );

    let mut engine = PredictionEngine::new(SuggestionCache::open_default());
    let suggestions = engine.predict(&context);
    tracing::debug!("PREDICTED | candidates={}", suggestions.len());

    let output = format_suggestions(&suggestions, shell);
    if !output.is_empty() {
        println!("{}", output);
    }
    SUCCESS
}

fn usage_error(title: &str, cause: &str) -> String {
    format_error(
        title,
        &[cause],
        &[
            "Usage: tabwise '<COMP_LINE>' <COMP_POINT> [--shell bash|zsh|fish]",
            "Check the integration snippet: tabwise --help",
        ],
    )
}

fn handle_cache(command: CacheCommands) -> i32 {
    let mut cache = SuggestionCache::open_default();
    match command {
        CacheCommands::Stats => {
            let stats = cache.stats();
            println!();
            println!("  {}", "Completion Cache".bold());
            println!("  {}", "-".repeat(40));
            println!(
                "  Entries:  {} / {}",
                stats.total_entries.to_string().bright_white(),
                stats.max_entries
            );
            println!("  Hits:     {}", stats.total_hits.to_string().green());
            println!(
                "  Expired:  {}",
                stats.expired_entries.to_string().yellow()
            );
            println!();
        }
        CacheCommands::Clear => {
            cache.clear();
            println!("Cache cleared.");
        }
        CacheCommands::Prune => {
            let removed = cache.prune_expired();
            println!("Pruned {} expired entries.", removed);
        }
    }
    SUCCESS
}

fn list_commands() {
    println!();
    println!("  {}", "Known commands".bold());
    println!("  {}", "-".repeat(40));
    for name in knowledge::command_names() {
        let spec = match knowledge::lookup(name) {
            Some(spec) => spec,
            None => continue,
        };
        if spec.subcommands.is_empty() {
            println!(
                "  {:<10} {} flags",
                name.cyan(),
                spec.global_flags().len()
            );
        } else {
            println!(
                "  {:<10} {} subcommands",
                name.cyan(),
                spec.subcommands.len()
            );
        }
    }
    println!();
}
