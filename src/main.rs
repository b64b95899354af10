// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, LevelFilter, Level, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use video2script::app_config::{self, Config, ProcessingMode};
use video2script::Controller;

/// CLI Wrapper for ProcessingMode to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliProcessingMode {
    Remote,
    Passthrough,
    Mock,
}

impl From<CliProcessingMode> for ProcessingMode {
    fn from(cli_mode: CliProcessingMode) -> Self {
        match cli_mode {
            CliProcessingMode::Remote => ProcessingMode::Remote,
            CliProcessingMode::Passthrough => ProcessingMode::Passthrough,
            CliProcessingMode::Mock => ProcessingMode::Mock,
        }
    }
}

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
    /// Generate a training script from a video, audio or transcript (default command)
    #[command(alias = "generate")]
    Process(ProcessArgs),

    /// Generate shell completions for video2script
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct ProcessArgs {
    /// Input file (video, audio or .txt transcript) or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Processing mode
    #[arg(long, value_enum)]
    mode: Option<CliProcessingMode>,

    /// Model name to use for text optimization
    #[arg(short, long)]
    model: Option<String>,

    /// Directory receiving the generated files
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Word template to base the document on
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// Segment size bound in characters
    #[arg(long)]
    max_text_length: Option<usize>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Print the structured script as JSON instead of writing documents
    #[arg(short, long)]
    structure_only: bool,
}

/// video2script - Training scripts from recorded courses
///
/// Transcribes a training video, optionally polishes the transcript with a
/// language model, and lays it out as a chaptered Word document.
#[derive(Parser, Debug)]
#[command(name = "video2script")]
#[command(version = "1.0.0")]
#[command(about = "Turn training videos into structured training scripts")]
#[command(long_about = "video2script transcribes training videos and turns the transcript into a chaptered training script.

EXAMPLES:
    video2script course.mp4                      # Generate using default config
    video2script -f course.mp4                   # Force overwrite existing files
    video2script --mode passthrough notes.txt    # Structure a transcript without rewriting
    video2script -s notes.txt                    # Print the structure as JSON
    video2script -o scripts/ /videos/            # Process an entire directory
    video2script completions bash > v2s.bash     # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.

MODES:
    remote      - Rewrite through the configured chat model (requires API key)
    passthrough - Structure the raw transcript as is
    mock        - No network, canned transcript and script")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input file (video, audio or .txt transcript) or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Processing mode
    #[arg(long, value_enum)]
    mode: Option<CliProcessingMode>,

    /// Model name to use for text optimization
    #[arg(short, long)]
    model: Option<String>,

    /// Directory receiving the generated files
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Word template to base the document on
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// Segment size bound in characters
    #[arg(long)]
    max_text_length: Option<usize>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Print the structured script as JSON instead of writing documents
    #[arg(short, long)]
    structure_only: bool,
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

    // @returns: ANSI color and marker for a level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("1;31", "❌"),
            Level::Warn => ("1;33", "🚧"),
            Level::Info => ("1;32", ""),
            Level::Debug => ("1;36", "🔍"),
            Level::Trace => ("1;35", "📋"),
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
            let (color, marker) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "\x1B[{}m{} {} {}\x1B[0m", color, now, marker, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Trace everything the logger sees; the effective level is set later with set_max_level
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "video2script", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Process(args)) => run_process(args).await,
        None => {
            // Default behavior - use top-level args
            let input_path = cli.input_path.ok_or_else(|| {
                anyhow!("INPUT_PATH is required when no subcommand is specified")
            })?;

            let process_args = ProcessArgs {
                input_path,
                force_overwrite: cli.force_overwrite,
                mode: cli.mode,
                model: cli.model,
                output_dir: cli.output_dir,
                template: cli.template,
                max_text_length: cli.max_text_length,
                config_path: cli.config_path,
                log_level: cli.log_level,
                structure_only: cli.structure_only,
            };
            run_process(process_args).await
        }
    }
}

/// Apply command line overrides on top of the loaded configuration
fn apply_overrides(config: &mut Config, options: &ProcessArgs) {
    if let Some(mode) = &options.mode {
        config.optimizer.mode = mode.clone().into();
    }
    if let Some(model) = &options.model {
        config.optimizer.model = model.clone();
    }
    if let Some(output_dir) = &options.output_dir {
        config.output.output_dir = output_dir.clone();
    }
    if let Some(template) = &options.template {
        config.output.template_path = Some(template.clone());
    }
    if let Some(max_text_length) = options.max_text_length {
        config.segmentation.max_text_length = max_text_length;
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }
}

async fn run_process(options: ProcessArgs) -> Result<()> {
    // Apply the command line level before anything is logged
    if let Some(cmd_log_level) = &options.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = Config::load_or_create(&options.config_path)?;
    apply_overrides(&mut config, &options);
    log::set_max_level(config.log_level.to_level_filter());

    let controller = Controller::with_config(config)?;
    let input_path = &options.input_path;

    if options.structure_only {
        if !input_path.is_file() {
            return Err(anyhow!("--structure-only expects a single input file: {:?}", input_path));
        }
        let document = controller.build_script(input_path).await?;
        println!("{}", document.to_json()?);
        return Ok(());
    }

    if input_path.is_file() {
        if let Some(output) = controller.run(input_path, options.force_overwrite).await? {
            if let Some(docx_path) = output.docx_path {
                info!("Success: {:?}", docx_path);
            }
        }
    } else if input_path.is_dir() {
        let summary = controller.run_folder(input_path, options.force_overwrite).await?;
        if summary.failed > 0 {
            return Err(anyhow!("{} file(s) failed to process", summary.failed));
        }
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", input_path));
    }

    Ok(())
}
