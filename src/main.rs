//! Binary entry point for quotes.
//!
//! This binary provides the CLI interface for the quotes manager.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow needless_pass_by_value for command functions
#![allow(clippy::needless_pass_by_value)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use quotes::cli::{
    self, AddArgs, DailyArgs, GOODBYE, ListArgs, Session, ShellContext, Terminal, build_ai_assistant,
};
use quotes::config::{QuotesConfig, resolve_theme, theme_from_env};
use quotes::models::ThemeName;
use quotes::observability;
use quotes::rendering::Theme;
use quotes::services::QuoteService;
use quotes::storage::JsonFileStore;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

/// Quotes - save, browse and reflect on the quotes that matter to you.
///
/// Run without a command for the interactive menu.
#[derive(Parser)]
#[command(name = "quotes")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(long, global = true, env = "QUOTES_CONFIG_PATH")]
    config: Option<PathBuf>,

    /// Color theme: auto, dark, light, high-contrast, none.
    #[arg(long, global = true)]
    theme: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Add a new quote.
    Add {
        /// Quote text (skips the interactive prompts).
        #[arg(short, long)]
        text: Option<String>,

        /// Author.
        #[arg(short, long)]
        author: Option<String>,

        /// Where you found it.
        #[arg(short, long)]
        source: Option<String>,

        /// Why it resonated with you.
        #[arg(short, long)]
        note: Option<String>,

        /// Categories (comma-separated).
        #[arg(short, long)]
        categories: Option<String>,

        /// Skip AI features.
        #[arg(long)]
        skip_ai: bool,
    },

    /// List quotes.
    List {
        /// Filter by category.
        #[arg(short, long)]
        category: Option<String>,

        /// Filter by author.
        #[arg(short, long)]
        author: Option<String>,

        /// Maximum quotes to display.
        #[arg(short, long, default_value = "10")]
        limit: usize,

        /// Show all quotes.
        #[arg(long)]
        all: bool,
    },

    /// Search quotes by keyword.
    Search {
        /// Text to look for.
        query: String,

        /// Match case exactly.
        #[arg(long)]
        case_sensitive: bool,
    },

    /// View a quote in detail.
    View {
        /// Quote ID (full or prefix).
        id: String,

        /// Show the AI explanation immediately.
        #[arg(short, long)]
        explain: bool,
    },

    /// Edit a quote.
    Edit {
        /// Quote ID (full or prefix).
        id: String,
    },

    /// Delete a quote.
    Delete {
        /// Quote ID (full or prefix).
        id: String,

        /// Skip the confirmation prompt.
        #[arg(short, long)]
        force: bool,
    },

    /// Show today's quote.
    Daily {
        /// Minimal output for shell startup.
        #[arg(short, long)]
        quiet: bool,

        /// Pick a new quote even if one was shown today.
        #[arg(short, long)]
        force: bool,
    },

    /// Show how to print the daily quote when a shell starts.
    Setup,

    /// Change the color theme.
    Theme {
        /// Theme name; omit to choose interactively.
        name: Option<String>,
    },
}

/// Main entry point.
fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = match QuotesConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        },
    };

    if let Err(e) = observability::init_from_settings(&config.logging, cli.verbose) {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    match run(cli, &config) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        },
    }
}

/// Opens the store, builds the session and runs the selected command.
fn run(cli: Cli, config: &QuotesConfig) -> anyhow::Result<ExitCode> {
    let flag_theme = cli
        .theme
        .as_deref()
        .map(|name| {
            ThemeName::parse(name).ok_or_else(|| {
                anyhow::anyhow!("unknown theme '{name}'. Available themes: {}", ThemeName::available())
            })
        })
        .transpose()?;

    let store = JsonFileStore::new(&config.data_dir);
    let quotes = QuoteService::open(store).context("could not open the quote collection")?;
    let theme = resolve_theme(
        flag_theme,
        theme_from_env(),
        quotes.settings().preferences.theme,
        config.theme,
    );

    let ai = build_ai_assistant(config);
    let term = Terminal::new(io::stdin().lock(), io::stdout());
    let mut session = Session::new(quotes, ai, Theme::new(theme), term);

    let shell = std::env::var("SHELL").ok();
    let home = directories::BaseDirs::new()
        .map_or_else(|| PathBuf::from("."), |dirs| dirs.home_dir().to_path_buf());
    let shell = ShellContext {
        shell: shell.as_deref(),
        home: &home,
    };

    let result = match cli.command {
        None => {
            ctrlc::set_handler(|| {
                println!("\n\n{GOODBYE}\n");
                std::process::exit(0);
            })
            .context("could not install the Ctrl-C handler")?;
            cli::menu::run(&mut session, shell)
        },
        Some(command) => run_command(&mut session, command, shell),
    };

    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            tracing::debug!(error = %e, "Command failed");
            cli::report_error(&mut session, &e)?;
            Ok(ExitCode::FAILURE)
        },
    }
}

/// Runs one subcommand.
fn run_command<R, W>(
    session: &mut Session<JsonFileStore, R, W>,
    command: Commands,
    shell: ShellContext<'_>,
) -> quotes::Result<()>
where
    R: io::BufRead,
    W: io::Write,
{
    match command {
        Commands::Add {
            text,
            author,
            source,
            note,
            categories,
            skip_ai,
        } => cli::add::run(
            session,
            AddArgs {
                text,
                author,
                source,
                note,
                categories,
                skip_ai,
            },
        ),

        Commands::List {
            category,
            author,
            limit,
            all,
        } => cli::list::run(
            session,
            &ListArgs {
                category,
                author,
                limit,
                all,
            },
        ),

        Commands::Search {
            query,
            case_sensitive,
        } => cli::list::search(session, &query, case_sensitive),

        Commands::View { id, explain } => cli::view::run(session, &id, explain),

        Commands::Edit { id } => cli::edit::run(session, &id).map(|_| ()),

        Commands::Delete { id, force } => cli::delete::run(session, &id, force).map(|_| ()),

        Commands::Daily { quiet, force } => cli::daily::run(
            session,
            DailyArgs { quiet, force },
            Utc::now(),
            &mut rand::rng(),
        ),

        Commands::Setup => cli::setup::run(session, shell.shell, shell.home),

        Commands::Theme { name } => cli::theme::run(session, name.as_deref()).map(|_| ()),
    }
}
