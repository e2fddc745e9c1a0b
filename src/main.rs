//! microskill - micro-learning progress tracker
//!
//! CLI entry point with global panic handler.

use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use microskill::cli::profile::{ProfileOptions, ThemeChange};
use microskill::cli::{
    AccessCommand, AwardCommand, LessonsCommand, OutputOptions, ProfileCommand, QuizCommand,
    StatusCommand, UpgradeCommand,
};
use microskill::config::{microskill_home, Config};
use microskill::error::exit_codes;
use microskill::{
    Catalog, FileKeyValueStore, KeyValueStore, MemoryKeyValueStore, ProfileStore, ProgressStore,
    SystemClock, Theme,
};

type Store = ProgressStore<Arc<dyn KeyValueStore>, SystemClock>;
type CliResult = Result<ExitCode, Box<dyn std::error::Error>>;

// =============================================================================
// CLI Definition
// =============================================================================

/// microskill - bite-sized lessons, quizzes and daily streaks
#[derive(Parser)]
#[command(name = "microskill")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output as JSON
    #[arg(long, short, global = true)]
    json: bool,
    /// Suppress output
    #[arg(long, short, global = true)]
    quiet: bool,
    /// Keep progress in memory only (nothing is written to disk)
    #[arg(long, global = true)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show score, level, streak and today's lesson
    Status,

    /// Open today's lesson
    Today,

    /// List lessons
    Lessons {
        /// Only show lessons you can open
        #[arg(long)]
        unlocked: bool,
    },

    /// Open a lesson
    Show {
        /// Lesson id
        id: String,
    },

    /// Answer a lesson's quiz
    Quiz {
        /// Lesson id
        id: String,
        /// Comma-separated option numbers, e.g. 0,2,1
        #[arg(long, short, default_value = "")]
        answers: String,
    },

    /// Add points, optionally marking a lesson completed
    Award {
        /// Points earned
        points: u32,
        /// Lesson id to mark completed
        #[arg(long)]
        skill: Option<String>,
    },

    /// Unlock premium lessons
    Upgrade,

    /// Check whether a lesson can be opened
    Access {
        /// Lesson id
        id: String,
    },

    /// Show or update your profile
    Profile {
        /// Set your name (empty to clear)
        #[arg(long)]
        name: Option<String>,
        /// Set the theme
        #[arg(long, value_enum)]
        theme: Option<ThemeArg>,
    },

    /// Print the effective configuration
    Config {
        /// Write the effective configuration to the user config file
        #[arg(long)]
        write: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ThemeArg {
    Light,
    Dark,
    Toggle,
}

impl From<ThemeArg> for ThemeChange {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Light => ThemeChange::Set(Theme::Light),
            ThemeArg::Dark => ThemeChange::Set(Theme::Dark),
            ThemeArg::Toggle => ThemeChange::Toggle,
        }
    }
}

// =============================================================================
// Main Entry Point
// =============================================================================

fn main() -> ExitCode {
    setup_logging();
    setup_panic_handler();

    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("microskill error: {}", e);
            exit_code(exit_codes::ERROR)
        }
    }
}

fn setup_logging() {
    let filter = EnvFilter::try_from_env("MICROSKILL_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|info| {
        eprintln!("microskill panic: {}", info);

        if let Some(home) = microskill_home() {
            let crash_log = home.join("crash.log");
            if let Ok(mut file) = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&crash_log)
            {
                let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
                let _ = writeln!(file, "[{}] {}", timestamp, info);
            }
        }

        std::process::exit(exit_codes::ERROR);
    }));
}

fn run() -> CliResult {
    let cli = Cli::parse();
    let options = OutputOptions {
        json: cli.json,
        quiet: cli.quiet,
    };
    let config = Config::load();

    if let Commands::Config { write } = cli.command {
        return run_config(&config, write, &options);
    }

    let kv = open_key_value_store(&config, cli.ephemeral)?;
    let catalog = Catalog::load_or_builtin(config.catalog.path.as_deref());
    let progress: Store = ProgressStore::initialize(Arc::clone(&kv), catalog, SystemClock);

    match cli.command {
        Commands::Status => run_status(&progress, kv, &options),
        Commands::Today => {
            let cmd = LessonsCommand::new(&progress);
            let output = cmd.today();
            print(cmd.format_lesson(&output, &options));
            Ok(exit_code(exit_codes::for_outcome(output.success, output.locked)))
        }
        Commands::Lessons { unlocked } => {
            let cmd = LessonsCommand::new(&progress);
            let output = cmd.list(unlocked);
            print(cmd.format_list(&output, &options));
            Ok(exit_code(exit_codes::for_success(output.success)))
        }
        Commands::Show { id } => {
            let cmd = LessonsCommand::new(&progress);
            let output = cmd.show(&id);
            print(cmd.format_lesson(&output, &options));
            Ok(exit_code(exit_codes::for_outcome(output.success, output.locked)))
        }
        Commands::Quiz { id, answers } => {
            let cmd = QuizCommand::new(&progress, config.quiz.points_per_correct);
            let output = cmd.run(&id, &answers);
            print(cmd.format_output(&output, &options));
            Ok(exit_code(exit_codes::for_outcome(output.success, output.locked)))
        }
        Commands::Award { points, skill } => {
            let cmd = AwardCommand::new(&progress);
            let output = cmd.run(points, skill.as_deref());
            print(cmd.format_output(&output, &options));
            Ok(exit_code(exit_codes::for_success(output.success)))
        }
        Commands::Upgrade => {
            let cmd = UpgradeCommand::new(&progress);
            let output = cmd.run();
            print(cmd.format_output(&output, &options));
            Ok(exit_code(exit_codes::for_success(output.success)))
        }
        Commands::Access { id } => {
            let cmd = AccessCommand::new(&progress);
            let output = cmd.run(&id);
            print(cmd.format_output(&output, &options));
            Ok(exit_code(exit_codes::for_outcome(output.allowed, true)))
        }
        Commands::Profile { name, theme } => {
            let profile = ProfileStore::initialize(kv);
            let cmd = ProfileCommand::new(&profile);
            let output = cmd.run(&ProfileOptions {
                name,
                theme: theme.map(ThemeChange::from),
            });
            print(cmd.format_output(&output, &options));
            Ok(exit_code(exit_codes::for_success(output.success)))
        }
        Commands::Config { .. } => unreachable!("handled before the store is opened"),
    }
}

// =============================================================================
// Command Implementations
// =============================================================================

fn open_key_value_store(
    config: &Config,
    ephemeral: bool,
) -> Result<Arc<dyn KeyValueStore>, Box<dyn std::error::Error>> {
    if ephemeral {
        return Ok(Arc::new(MemoryKeyValueStore::new()));
    }

    let store = match config.resolved_data_dir() {
        Some(dir) => FileKeyValueStore::with_dir(dir)?,
        None => FileKeyValueStore::new()?,
    };
    tracing::debug!(dir = %store.dir().display(), "using file storage");
    Ok(Arc::new(store))
}

fn run_status(progress: &Store, kv: Arc<dyn KeyValueStore>, options: &OutputOptions) -> CliResult {
    let profile = ProfileStore::initialize(kv).profile();
    let cmd = StatusCommand::new(progress, profile);
    let output = cmd.run();
    print(cmd.format_output(&output, options));
    Ok(exit_code(exit_codes::for_success(output.success)))
}

fn run_config(config: &Config, write: bool, options: &OutputOptions) -> CliResult {
    if write {
        let home = microskill_home().ok_or("could not determine microskill home directory")?;
        config.save(&home)?;
        if !options.quiet {
            eprintln!("Wrote {}", home.join("config.toml").display());
        }
    }

    if options.quiet {
        return Ok(exit_code(exit_codes::SUCCESS));
    }

    let rendered = if options.json {
        serde_json::to_string_pretty(config)?
    } else {
        toml::to_string_pretty(config)?
    };
    println!("{}", rendered.trim_end());
    Ok(exit_code(exit_codes::SUCCESS))
}

fn print(formatted: String) {
    if !formatted.is_empty() {
        println!("{}", formatted.trim_end());
    }
}

fn exit_code(code: i32) -> ExitCode {
    ExitCode::from(code as u8)
}
