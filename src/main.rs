// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow, Context};
use log::{LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::{Path, PathBuf};
use std::io::Write;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use ttml_scenes::app_config::{self, Config};
use ttml_scenes::app_controller::Controller;
use ttml_scenes::file_utils::FileManager;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Split TTML documents into timed scenes (default command)
    Parse(ParseArgs),

    /// Generate shell completions for ttml-scenes
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug, Clone)]
struct ParseArgs {
    /// Input TTML document or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Directory for output files (defaults to each input file's directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Media container begin in milliseconds
    #[arg(long)]
    container_begin_ms: Option<u64>,

    /// Media container duration in milliseconds
    #[arg(long)]
    container_duration_ms: Option<u64>,

    /// Print scenes to stdout instead of writing a file
    #[arg(long)]
    stdout: bool,

    /// Configuration file path
    #[arg(short, long = "config", default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// ttml-scenes - TTML timeline segmentation
///
/// Reads TTML / EBU-TT-D subtitle documents and splits their timeline into
/// non-overlapping scenes with fully resolved styling.
#[derive(Parser, Debug)]
#[command(name = "ttml-scenes")]
#[command(version)]
#[command(about = "Split TTML subtitle documents into timed, styled scenes")]
#[command(long_about = "ttml-scenes parses TTML / EBU-TT-D documents and writes the resulting scenes as JSON.

EXAMPLES:
    ttml-scenes subs.ttml                         # Write subs.scenes.json next to the input
    ttml-scenes -f subs.ttml                      # Force overwrite existing output
    ttml-scenes --stdout subs.ttml                # Print scenes instead of writing a file
    ttml-scenes -o out/ /subtitles/               # Process a directory, mirroring it under out/
    ttml-scenes completions bash > ttml.bash      # Generate bash completions

CONFIGURATION:
    Configuration is read from conf.json by default. You can specify a different
    config file with --config. Defaults are used when the file is missing.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input TTML document or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Directory for output files (defaults to each input file's directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Media container begin in milliseconds
    #[arg(long)]
    container_begin_ms: Option<u64>,

    /// Media container duration in milliseconds
    #[arg(long)]
    container_duration_ms: Option<u64>,

    /// Print scenes to stdout instead of writing a file
    #[arg(long)]
    stdout: bool,

    /// Configuration file path
    #[arg(short, long = "config", default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

fn main() -> Result<()> {
    // Trace is the ceiling; the effective level is narrowed once options are known
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "ttml-scenes", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Parse(args)) => run_parse(args),
        None => {
            // Default behavior: top-level args act as the parse command
            let input_path = cli.input_path.ok_or_else(|| {
                anyhow!("INPUT_PATH is required when no subcommand is specified")
            })?;

            run_parse(ParseArgs {
                input_path,
                force_overwrite: cli.force_overwrite,
                output_dir: cli.output_dir,
                container_begin_ms: cli.container_begin_ms,
                container_duration_ms: cli.container_duration_ms,
                stdout: cli.stdout,
                config_path: cli.config_path,
                log_level: cli.log_level,
            })
        }
    }
}

fn run_parse(options: ParseArgs) -> Result<()> {
    if let Some(cmd_log_level) = &options.log_level {
        log::set_max_level(level_filter(&cmd_log_level.clone().into()));
    }

    let mut config = Config::load_or_default(&options.config_path)
        .context("Configuration loading failed")?;

    if let Some(begin) = options.container_begin_ms {
        config.parser.container_begin_ms = begin;
    }
    if let Some(duration) = options.container_duration_ms {
        config.parser.container_duration_ms = duration;
    }
    match &options.log_level {
        Some(log_level) => config.log_level = log_level.clone().into(),
        None => log::set_max_level(level_filter(&config.log_level)),
    }

    config.validate().context("Configuration validation failed")?;
    let controller = Controller::with_config(config)?;

    if options.stdout {
        if !options.input_path.is_file() {
            return Err(anyhow!("--stdout needs a single input file: {:?}", options.input_path));
        }
        let content = FileManager::read_to_string(&options.input_path)?;
        let scenes = controller.process_document(&content)?;
        println!("{}", controller.render_json(&scenes)?);
        return Ok(());
    }

    if options.input_path.is_file() {
        let output_dir = options.output_dir.clone().unwrap_or_else(|| {
            options
                .input_path
                .parent()
                .unwrap_or(Path::new("."))
                .to_path_buf()
        });
        controller.run(options.input_path.clone(), output_dir, options.force_overwrite)?;
    } else if options.input_path.is_dir() {
        let summary = controller.run_folder(
            options.input_path.clone(),
            options.output_dir.clone(),
            options.force_overwrite,
        )?;
        if summary.error_count > 0 {
            return Err(anyhow!("{} documents failed to process", summary.error_count));
        }
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", options.input_path));
    }

    Ok(())
}
