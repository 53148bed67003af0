use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use fxpreset_core::{FxpError, InterfaceFamily, MemoryInstrument, PresetError, PresetKind};
use glob::glob;
use tracing_subscriber::EnvFilter;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (commit ",
    env!("FXPRESET_BUILD_COMMIT"),
    ", ",
    env!("FXPRESET_BUILD_DATE"),
    ")"
);

const EXAMPLES: &str = "Examples:\n  fxpreset inspect lead.fxp --unique-id Vita -o report.json\n  fxpreset inspect lead.fxp --unique-id 0x56697461 --plugin-version 10105 --stdout --pretty";

#[derive(Parser, Debug)]
#[command(name = "fxpreset")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Load fxp instrument presets and report what they apply.",
    long_about = None,
    after_help = EXAMPLES
)]
struct Cli {
    /// Log decoder details to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Load a preset into an in-memory instrument and write a JSON report.
    #[command(alias = "show")]
    #[command(after_help = EXAMPLES)]
    Inspect(InspectArgs),
}

#[derive(Args, Debug)]
struct InspectArgs {
    /// Path to a .fxp preset file
    input: PathBuf,

    /// Instrument unique id: decimal, 0x-prefixed hex, or a four-character code
    #[arg(long, value_parser = parse_unique_id)]
    unique_id: u32,

    /// Instrument version the preset is checked against
    #[arg(long, default_value_t = 0)]
    plugin_version: u32,

    /// Instrument name used in diagnostics
    #[arg(long, default_value = "instrument")]
    name: String,

    /// Interface family of the instrument
    #[arg(long, value_enum, default_value_t = Family::Chunk)]
    family: Family,

    /// Output report path (JSON)
    #[arg(short = 'o', long, required_unless_present = "stdout")]
    report: Option<PathBuf>,

    /// Write JSON report to stdout
    #[arg(long, conflicts_with = "report")]
    stdout: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Suppress non-error output
    #[arg(long)]
    quiet: bool,

    /// Exit with a non-zero code if the preset loaded with warnings
    #[arg(long)]
    strict: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Family {
    Chunk,
    Other,
}

impl From<Family> for InterfaceFamily {
    fn from(value: Family) -> Self {
        match value {
            Family::Chunk => InterfaceFamily::ChunkCapable,
            Family::Other => InterfaceFamily::Other,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Inspect(args) => cmd_inspect(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: bool) {
    // Library events stay silent by default; failures and warnings are
    // reported once through `error:` / `warning:` lines.
    let default = if verbose { "debug" } else { "off" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        let hint = err.downcast_ref::<PresetError>().and_then(hint_for);
        CliError::new(format!("{err:#}"), hint)
    }
}

fn hint_for(err: &PresetError) -> Option<String> {
    let hint = match err {
        PresetError::Open { .. } => "check the path and file permissions",
        PresetError::IncompatibleFamily { .. } => "fxp presets need --family chunk",
        PresetError::Decode(FxpError::IncompatiblePreset { .. }) => {
            "pass the --unique-id of the instrument the preset was saved from"
        }
        PresetError::Decode(FxpError::TruncatedRead { .. }) => "the preset file is incomplete",
        PresetError::Decode(FxpError::BadMagic { .. } | FxpError::BadPayloadTag { .. }) => {
            "the file is not an fxp program preset"
        }
        PresetError::Decode(FxpError::UnsupportedTargetKind { .. }) => {
            "chunk presets need --family chunk"
        }
        _ => return None,
    };
    Some(hint.to_string())
}

fn cmd_inspect(args: InspectArgs) -> Result<(), CliError> {
    let resolved_input = resolve_input_path(&args.input)?;
    validate_input_file(&resolved_input)?;
    let input_abs = fs::canonicalize(&resolved_input)
        .with_context(|| format!("Failed to resolve input path: {}", resolved_input.display()))?;
    let report = if args.stdout {
        None
    } else {
        Some(args.report.ok_or_else(|| {
            CliError::new(
                "missing output path",
                Some("use -o/--report or --stdout".to_string()),
            )
        })?)
    };

    if let Some(report_path) = report.as_ref() {
        ensure_distinct_output(report_path, &input_abs)?;
    }

    let mut instrument = MemoryInstrument::new(args.name, args.unique_id, args.plugin_version)
        .with_family(args.family.into());
    let rep = fxpreset_core::load_preset_file(&resolved_input, &mut instrument)
        .context("preset load failed")?;
    let json = serialize_report(&rep, args.pretty)?;

    match report {
        None => print!("{}", json),
        Some(report) => {
            if let Some(parent) = report.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create output directory: {}", parent.display())
                    })?;
                }
            }
            fs::write(&report, json)
                .with_context(|| format!("Failed to write report: {}", report.display()))?;
            if !args.quiet {
                eprintln!("OK: report written -> {}", report.display());
            }
        }
    }

    if !args.quiet {
        for warning in &rep.warnings {
            eprintln!("warning: {}", warning);
        }
    }
    if args.strict && !rep.warnings.is_empty() {
        return Err(CliError::new(
            format!("preset loaded with warnings: {}", rep.warnings.join("; ")),
            Some("drop --strict to accept version mismatches".to_string()),
        ));
    }
    Ok(())
}

/// A report that does not exist yet cannot be the (existing) input.
fn ensure_distinct_output(report_path: &Path, input_abs: &Path) -> Result<(), CliError> {
    match fs::canonicalize(report_path) {
        Ok(report_abs) if report_abs == input_abs => Err(CliError::new(
            format!(
                "report path must differ from input: {}",
                report_path.display()
            ),
            Some("choose a different output path".to_string()),
        )),
        _ => Ok(()),
    }
}

fn serialize_report(rep: &fxpreset_core::PresetReport, pretty: bool) -> Result<String, CliError> {
    let json = if pretty {
        serde_json::to_string_pretty(rep)
    } else {
        serde_json::to_string(rep)
    };
    json.context("JSON serialization failed").map_err(Into::into)
}

fn parse_unique_id(value: &str) -> Result<u32, String> {
    if let Some(hex) = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
    {
        return u32::from_str_radix(hex, 16).map_err(|err| format!("invalid hex id: {err}"));
    }
    if let Ok(id) = value.parse::<u32>() {
        return Ok(id);
    }
    let bytes: [u8; 4] = value
        .as_bytes()
        .try_into()
        .map_err(|_| format!("expected a number or a four-character code, got '{value}'"))?;
    if !bytes.iter().all(|b| b.is_ascii_graphic() || *b == b' ') {
        return Err(format!("four-character code must be printable ASCII: '{value}'"));
    }
    Ok(u32::from_be_bytes(bytes))
}

fn validate_input_file(input: &Path) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("use a .fxp preset file".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("use a .fxp preset file".to_string()),
        ));
    }
    if PresetKind::from_path(input).is_none() {
        return Err(CliError::new(
            format!("unsupported input format '{}'", input.display()),
            Some("expected a .fxp file".to_string()),
        ));
    }
    Ok(())
}

/// Expand a glob to the single preset file it names.
///
/// Only files with a known preset extension count as matches, so a pattern
/// like `patches/*` may sit next to reports and other data.
fn resolve_input_path(input: &Path) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.to_path_buf());
    }

    let bad_pattern = |detail: String| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", detail)),
        )
    };
    let candidates = glob(&pattern)
        .map_err(|err| bad_pattern(err.msg.to_string()))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| bad_pattern(err.to_string()))?;
    let mut presets: Vec<PathBuf> = candidates
        .into_iter()
        .filter(|path| path.is_file() && PresetKind::from_path(path).is_some())
        .collect();

    match presets.len() {
        0 => Err(CliError::new(
            format!("no preset files match '{}'", pattern),
            Some("check the path or quote the pattern; expected .fxp files".to_string()),
        )),
        1 => Ok(presets.remove(0)),
        count => {
            presets.sort();
            let names = presets
                .iter()
                .filter_map(|p| p.file_name())
                .map(|name| name.to_string_lossy())
                .collect::<Vec<_>>()
                .join(", ");
            Err(CliError::new(
                format!("pattern '{}' matches {} presets: {}", pattern, count, names),
                Some("inspect one preset per run".to_string()),
            ))
        }
    }
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
