// gridmon CLI - load a grid, derive neighbor statistics, print the report

mod exit_codes;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use gridmon_config::settings::{MAX_PRECISION, MAX_WIDTH};
use gridmon_config::{OutputFormat, Settings};
use gridmon_engine::{GridMonitor, ReportStyle};
use gridmon_io::{LoadError, SourceFormat};

use exit_codes::{
    load_exit_code, EXIT_CONFIG, EXIT_ERROR, EXIT_IO, EXIT_SUCCESS, EXIT_USAGE,
};

#[derive(Parser)]
#[command(name = "gridmon")]
#[command(about = "Flag grid cells that stray outside their neighborhood average")]
#[command(long_version = long_version())]
#[command(version)]
#[command(subcommand_required = false)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every grid (base, sum, average, delta, danger)
    #[command(after_help = "\
Examples:
  gridmon report sample.txt
  gridmon report readings.csv --summary
  gridmon report sample.txt -t json
  cat sample.txt | gridmon report -")]
    Report {
        /// Input file, or - for stdin
        input: PathBuf,

        /// Input format (inferred from the extension when omitted)
        #[arg(long, short = 'f')]
        from: Option<Format>,

        /// Output format (default from settings, else text)
        #[arg(long, short = 't')]
        to: Option<Output>,

        /// Minimum field width for numbers
        #[arg(long)]
        width: Option<usize>,

        /// Digits after the decimal point
        #[arg(long)]
        precision: Option<usize>,

        /// Append a danger summary section
        #[arg(long)]
        summary: bool,

        /// Settings file (default: platform config dir)
        #[arg(long, env = "GRIDMON_CONFIG")]
        config: Option<PathBuf>,
    },

    /// List only the cells in danger, one `row,col` per line
    Danger {
        /// Input file, or - for stdin
        input: PathBuf,

        /// Input format (inferred from the extension when omitted)
        #[arg(long, short = 'f')]
        from: Option<Format>,

        /// Emit a JSON array with values and band limits
        #[arg(long)]
        json: bool,
    },

    /// Settings file helpers
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the settings file path
    Path,

    /// Write the default settings template
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,

        /// Target path (default: platform config dir)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Csv,
    Tsv,
    Json,
}

impl From<Format> for SourceFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Text => SourceFormat::Text,
            Format::Csv => SourceFormat::Csv,
            Format::Tsv => SourceFormat::Tsv,
            Format::Json => SourceFormat::Json,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Output {
    Text,
    Json,
}

fn long_version() -> &'static str {
    if cfg!(debug_assertions) {
        concat!(
            env!("CARGO_PKG_VERSION"),
            " (", env!("GIT_COMMIT_HASH"), ")",
            "\nengine:  gridmon-engine ", env!("CARGO_PKG_VERSION"),
            "\nbuild:   debug",
            "\ntarget:  ", env!("TARGET"),
        )
    } else {
        concat!(
            env!("CARGO_PKG_VERSION"),
            " (", env!("GIT_COMMIT_HASH"), ")",
            "\nengine:  gridmon-engine ", env!("CARGO_PKG_VERSION"),
            "\nbuild:   release",
            "\ntarget:  ", env!("TARGET"),
        )
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        None => {
            // No subcommand = show usage
            eprintln!("Usage: gridmon <command> [options]");
            eprintln!("       gridmon --help for more information");
            Ok(())
        }
        Some(Commands::Report { input, from, to, width, precision, summary, config }) => {
            cmd_report(input, from, to, width, precision, summary, config)
        }
        Some(Commands::Danger { input, from, json }) => cmd_danger(input, from, json),
        Some(Commands::Config(config_cmd)) => match config_cmd {
            ConfigCommands::Path => cmd_config_path(),
            ConfigCommands::Init { force, path } => cmd_config_init(force, path),
        },
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_IO, message: msg.into(), hint: None }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self { code: EXIT_CONFIG, message: msg.into(), hint: None }
    }

    pub fn output(err: io::Error) -> Self {
        Self { code: EXIT_ERROR, message: format!("cannot write output: {err}"), hint: None }
    }

    /// Output could not be rendered (serialization).
    pub fn render(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: format!("cannot render output: {}", msg.into()), hint: None }
    }

    /// Create error from a load error with its exit code.
    pub fn load(err: LoadError) -> Self {
        let hint = match &err {
            LoadError::Malformed { .. } => {
                Some("text input starts with '<rows> <cols>' then one line per row".to_string())
            }
            _ => None,
        };
        Self { code: load_exit_code(&err), message: err.to_string(), hint }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

// ============================================================================
// input
// ============================================================================

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn resolve_format(input: &Path, from: Option<Format>) -> Result<SourceFormat, CliError> {
    if let Some(f) = from {
        return Ok(f.into()); // --from overrides extension
    }
    if is_stdin(input) {
        return Ok(SourceFormat::Text);
    }
    SourceFormat::infer(input).ok_or_else(|| {
        let ext = input.extension().and_then(|e| e.to_str()).unwrap_or("(none)");
        CliError::args(format!("cannot infer format from extension {:?}", ext))
            .with_hint("use --from with one of: text, csv, tsv, json")
    })
}

fn load_monitor(input: &Path, from: Option<Format>) -> Result<GridMonitor, CliError> {
    let format = resolve_format(input, from)?;

    if is_stdin(input) {
        let content = gridmon_io::encoding::read_as_utf8(io::stdin().lock())
            .map_err(CliError::load)?;
        let grid = gridmon_io::parse_grid(&content, format).map_err(CliError::load)?;
        log::debug!("read {} grid {}x{} from stdin", format, grid.rows(), grid.cols());
        return Ok(GridMonitor::from_grid(grid));
    }

    gridmon_io::load_monitor(input, format).map_err(CliError::load)
}

// ============================================================================
// report
// ============================================================================

fn load_settings(config: Option<PathBuf>) -> Result<Settings, CliError> {
    match config {
        Some(path) => Settings::load_from(&path).map_err(CliError::config),
        None => Ok(Settings::load()),
    }
}

/// Flags win over settings; settings win over built-in defaults.
fn report_style(
    settings: &Settings,
    width: Option<usize>,
    precision: Option<usize>,
    summary: bool,
) -> Result<ReportStyle, CliError> {
    let width = width.unwrap_or(settings.report_width);
    let precision = precision.unwrap_or(settings.report_precision);

    if width > MAX_WIDTH {
        return Err(CliError::args(format!("--width must be at most {MAX_WIDTH}")));
    }
    if precision > MAX_PRECISION {
        return Err(CliError::args(format!("--precision must be at most {MAX_PRECISION}")));
    }

    Ok(ReportStyle {
        width,
        precision,
        show_summary: summary || settings.report_show_summary,
    })
}

fn cmd_report(
    input: PathBuf,
    from: Option<Format>,
    to: Option<Output>,
    width: Option<usize>,
    precision: Option<usize>,
    summary: bool,
    config: Option<PathBuf>,
) -> Result<(), CliError> {
    let settings = load_settings(config)?;
    let style = report_style(&settings, width, precision, summary)?;
    let output = match to {
        Some(Output::Text) => OutputFormat::Text,
        Some(Output::Json) => OutputFormat::Json,
        None => settings.output_format,
    };

    let monitor = load_monitor(&input, from)?;

    let rendered = match output {
        OutputFormat::Text => monitor.report(&style),
        OutputFormat::Json => {
            let mut json = gridmon_io::json::snapshot_to_string(&monitor).map_err(CliError::render)?;
            json.push('\n');
            json
        }
    };

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    handle.write_all(rendered.as_bytes()).map_err(CliError::output)?;
    handle.flush().map_err(CliError::output)
}

// ============================================================================
// danger
// ============================================================================

fn cmd_danger(input: PathBuf, from: Option<Format>, json: bool) -> Result<(), CliError> {
    let monitor = load_monitor(&input, from)?;
    let cells = monitor.danger_cells();

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    if json {
        let out = serde_json::to_string_pretty(&cells).map_err(|e| CliError::render(e.to_string()))?;
        writeln!(handle, "{}", out).map_err(CliError::output)?;
    } else {
        for cell in &cells {
            writeln!(handle, "{},{}", cell.row, cell.col).map_err(CliError::output)?;
        }
    }

    Ok(())
}

// ============================================================================
// config
// ============================================================================

fn cmd_config_path() -> Result<(), CliError> {
    println!("{}", Settings::config_path_display());
    Ok(())
}

fn cmd_config_init(force: bool, path: Option<PathBuf>) -> Result<(), CliError> {
    let path = path.unwrap_or_else(Settings::config_path);

    if path.exists() && !force {
        return Err(CliError::args(format!("{} already exists", path.display()))
            .with_hint("pass --force to overwrite"));
    }

    Settings::write_default(&path).map_err(CliError::io)?;
    println!("{}", path.display());
    Ok(())
}
