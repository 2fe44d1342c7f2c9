// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::dispatcher::SubtitleParser;
use crate::file_utils::FileManager;
use crate::formats::SubtitleFormat;
use crate::parse_options::{ParseOptions, TextEncoding, TimecodeMode};
use crate::writer::{SrtWriter, WriteOptions};

mod block_splitter;
mod cue;
mod dispatcher;
mod errors;
mod file_utils;
mod formats;
mod parse_options;
mod timecode;
mod writer;

/// CLI Wrapper for TimecodeMode to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTimecodeMode {
    Required,
    Optional,
    None,
}

impl From<CliTimecodeMode> for TimecodeMode {
    fn from(cli_mode: CliTimecodeMode) -> Self {
        match cli_mode {
            CliTimecodeMode::Required => TimecodeMode::Required,
            CliTimecodeMode::Optional => TimecodeMode::Optional,
            CliTimecodeMode::None => TimecodeMode::None,
        }
    }
}

/// CLI Wrapper for TextEncoding to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTextEncoding {
    Utf8,
    Utf8Lossy,
    Latin1,
}

impl From<CliTextEncoding> for TextEncoding {
    fn from(cli_encoding: CliTextEncoding) -> Self {
        match cli_encoding {
            CliTextEncoding::Utf8 => TextEncoding::Utf8,
            CliTextEncoding::Utf8Lossy => TextEncoding::Utf8Lossy,
            CliTextEncoding::Latin1 => TextEncoding::Latin1,
        }
    }
}

/// CLI Wrapper for SubtitleFormat to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliSubtitleFormat {
    Srt,
    Ssa,
    Vtt,
}

impl From<CliSubtitleFormat> for SubtitleFormat {
    fn from(cli_format: CliSubtitleFormat) -> Self {
        match cli_format {
            CliSubtitleFormat::Srt => SubtitleFormat::Srt,
            CliSubtitleFormat::Ssa => SubtitleFormat::Ssa,
            CliSubtitleFormat::Vtt => SubtitleFormat::Vtt,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert subtitle files to SRT (default command)
    #[command(alias = "conv")]
    Convert(ConvertArgs),

    /// Generate shell completions for subfmt
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct ConvertArgs {
    /// Input subtitle file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Output file (single input) or directory; defaults next to the input
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Text encoding used to decode input bytes
    #[arg(short, long, value_enum)]
    encoding: Option<CliTextEncoding>,

    /// Timecode handling mode
    #[arg(short, long, value_enum)]
    mode: Option<CliTimecodeMode>,

    /// Format tried first by the dispatcher
    #[arg(short, long, value_enum)]
    prioritize: Option<CliSubtitleFormat>,

    /// Strip inline formatting markup from the output
    #[arg(long)]
    strip_formatting: bool,

    /// Omit timing lines from the output
    #[arg(long)]
    no_timecodes: bool,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// CLI Wrapper for log levels to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LevelFilter {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LevelFilter::Error,
            CliLogLevel::Warn => LevelFilter::Warn,
            CliLogLevel::Info => LevelFilter::Info,
            CliLogLevel::Debug => LevelFilter::Debug,
            CliLogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// subfmt - multi-format subtitle converter
///
/// Parses SRT, SSA and VTT subtitle files into a unified representation and
/// writes them back out as SRT.
#[derive(Parser, Debug)]
#[command(name = "subfmt")]
#[command(version = "1.0.0")]
#[command(about = "Multi-format subtitle parsing and conversion tool")]
#[command(long_about = "subfmt parses SubRip, SubStation Alpha and WebVTT subtitle files into a
unified representation and writes them back out as SRT.

EXAMPLES:
    subfmt episode.vtt                        # Convert to episode.srt
    subfmt -o out.srt episode.ssa             # Convert to an explicit path
    subfmt -m optional damaged.srt            # Substitute dummy timecodes
    subfmt -p vtt captions.txt                # Try WebVTT first
    subfmt --strip-formatting episode.srt     # Drop inline markup
    subfmt /media/subs/                       # Convert a whole directory
    subfmt completions bash > subfmt.bash     # Generate bash completions")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input subtitle file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Output file (single input) or directory; defaults next to the input
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Text encoding used to decode input bytes
    #[arg(short, long, value_enum)]
    encoding: Option<CliTextEncoding>,

    /// Timecode handling mode
    #[arg(short, long, value_enum)]
    mode: Option<CliTimecodeMode>,

    /// Format tried first by the dispatcher
    #[arg(short, long, value_enum)]
    prioritize: Option<CliSubtitleFormat>,

    /// Strip inline formatting markup from the output
    #[arg(long)]
    strip_formatting: bool,

    /// Omit timing lines from the output
    #[arg(long)]
    no_timecodes: bool,

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
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} [{}] {}\x1B[0m",
                color,
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

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "subfmt", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Convert(args)) => run_convert(args).await,
        None => {
            // Default behavior - use top-level args for backwards compatibility
            let input_path = cli
                .input_path
                .ok_or_else(|| anyhow!("INPUT_PATH is required when no subcommand is specified"))?;

            let convert_args = ConvertArgs {
                input_path,
                output: cli.output,
                force_overwrite: cli.force_overwrite,
                encoding: cli.encoding,
                mode: cli.mode,
                prioritize: cli.prioritize,
                strip_formatting: cli.strip_formatting,
                no_timecodes: cli.no_timecodes,
                log_level: cli.log_level,
            };
            run_convert(convert_args).await
        }
    }
}

async fn run_convert(args: ConvertArgs) -> Result<()> {
    if let Some(cmd_log_level) = &args.log_level {
        log::set_max_level(cmd_log_level.clone().into());
    }

    let mut parse_options = ParseOptions::default();
    if let Some(encoding) = &args.encoding {
        parse_options.encoding = encoding.clone().into();
    }
    if let Some(mode) = &args.mode {
        parse_options.timecode_mode = mode.clone().into();
    }
    if let Some(prioritize) = &args.prioritize {
        parse_options.prioritized_format = Some(prioritize.clone().into());
    }

    let write_options = WriteOptions {
        include_formatting: !args.strip_formatting,
        include_timecode: !args.no_timecodes,
        ..Default::default()
    };

    if args.input_path.is_file() {
        let output = match &args.output {
            Some(path) => path.clone(),
            None => FileManager::generate_output_path(
                &args.input_path,
                args.input_path.parent().unwrap_or(Path::new(".")),
                SubtitleFormat::Srt.extension(),
            ),
        };
        convert_file(
            &args.input_path,
            &output,
            &parse_options,
            &write_options,
            args.force_overwrite,
        )
        .await
    } else if args.input_path.is_dir() {
        convert_folder(&args, &parse_options, &write_options).await
    } else {
        Err(anyhow!("Input path does not exist: {:?}", args.input_path))
    }
}

async fn convert_file(
    input: &Path,
    output: &Path,
    parse_options: &ParseOptions,
    write_options: &WriteOptions,
    force_overwrite: bool,
) -> Result<()> {
    if output.exists() && !force_overwrite {
        warn!(
            "Output file already exists: {:?}. Use -f to force overwrite.",
            output
        );
        return Ok(());
    }

    if let Some(format) = SubtitleParser::detect_format(input) {
        debug!("Detected {} from file extension", format.name());
    }

    let file = tokio::fs::File::open(input)
        .await
        .with_context(|| format!("Failed to open input file: {:?}", input))?;

    let parser = SubtitleParser::new();
    let cues = parser
        .parse_async(file, parse_options)
        .await
        .with_context(|| format!("Failed to parse subtitle file: {:?}", input))?;

    SrtWriter::new().write_to_file(output, &cues, write_options)?;

    info!("Wrote {} cues to {:?}", cues.len(), output);
    Ok(())
}

async fn convert_folder(
    args: &ConvertArgs,
    parse_options: &ParseOptions,
    write_options: &WriteOptions,
) -> Result<()> {
    let files = FileManager::find_subtitle_files(&args.input_path)?;
    if files.is_empty() {
        warn!("No subtitle files found in {:?}", args.input_path);
        return Ok(());
    }

    info!("Converting {} subtitle files", files.len());

    let progress = ProgressBar::new(files.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let mut converted = 0;
    for file in &files {
        progress.set_message(
            file.file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
        );

        let output_dir = args
            .output
            .clone()
            .unwrap_or_else(|| file.parent().unwrap_or(Path::new(".")).to_path_buf());
        let output = FileManager::generate_output_path(
            file,
            &output_dir,
            SubtitleFormat::Srt.extension(),
        );

        // Skip files that are already the conversion target
        if output == *file {
            progress.inc(1);
            continue;
        }

        match convert_file(
            file,
            &output,
            parse_options,
            write_options,
            args.force_overwrite,
        )
        .await
        {
            Ok(()) => converted += 1,
            Err(e) => error!("Error converting {:?}: {}", file, e),
        }
        progress.inc(1);
    }

    progress.finish_and_clear();
    info!("Finished converting {} of {} files", converted, files.len());
    Ok(())
}
