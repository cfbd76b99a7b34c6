use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use eqds_core::{CaptureSummary, DecodeOptions, DumpOptions, print_packet};
use glob::glob;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("EQDSDUMP_BUILD_COMMIT"),
    " ",
    env!("EQDSDUMP_BUILD_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "eqdsdump")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Print EQDS control and data headers from captures or raw bytes.",
    long_about = None,
    after_help = "Examples:\n  eqdsdump read capture.pcapng -p 9100\n  eqdsdump read 'captures/*.pcap' -p 9100 -v --summary summary.json\n  eqdsdump decode '00 01 fc 00 00 05 00 0a'"
)]
struct Cli {
    /// Emit debug diagnostics on stderr (overrides RUST_LOG)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print every EQDS datagram found in a .pcap or .pcapng file.
    Read {
        /// Path (or glob matching exactly one file) to a .pcap or .pcapng file
        input: PathBuf,

        /// UDP port carrying EQDS; repeat for several ports
        #[arg(short = 'p', long = "port", required = true)]
        ports: Vec<u16>,

        /// Include window size, path id and reserved fields
        #[arg(short, long)]
        verbose: bool,

        /// Write a JSON capture summary to this path
        #[arg(long)]
        summary: Option<PathBuf>,

        /// Pretty-print the JSON summary
        #[arg(long, requires = "summary")]
        pretty: bool,

        /// Suppress non-error status output
        #[arg(long)]
        quiet: bool,
    },
    /// Decode one EQDS header given as hex bytes.
    Decode {
        /// Header bytes in hex; spaces, ':' and a leading 0x are ignored
        hex: String,

        /// Declared datagram length (defaults to the number of bytes given)
        #[arg(short = 'l', long)]
        length: Option<usize>,

        /// Include window size, path id and reserved fields
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let result = match cli.command {
        Commands::Read {
            input,
            ports,
            verbose,
            summary,
            pretty,
            quiet,
        } => cmd_read(input, ports, verbose, summary, pretty, quiet),
        Commands::Decode {
            hex,
            length,
            verbose,
        } => cmd_decode(&hex, length, verbose),
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

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
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
        CliError::new(format!("{err:#}"), None)
    }
}

fn cmd_read(
    input: PathBuf,
    ports: Vec<u16>,
    verbose: bool,
    summary_path: Option<PathBuf>,
    pretty: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let resolved_input = resolve_input_path(&input)?;
    validate_input_file(&resolved_input)?;
    if let Some(summary_path) = summary_path.as_ref() {
        ensure_distinct_output(&resolved_input, summary_path)?;
    }

    let options = DumpOptions {
        ports,
        decode: DecodeOptions { verbose },
    };
    tracing::debug!(input = %resolved_input.display(), ports = ?options.ports, "reading capture");

    let mut stdout = io::stdout().lock();
    let mut write_error = None;
    let summary = eqds_core::dump_pcap_file(&resolved_input, &options, |line| {
        if write_error.is_none() {
            if let Err(err) = writeln!(stdout, "{line}") {
                write_error = Some(err);
            }
        }
    })
    .context("capture decoding failed")?;
    if let Some(err) = write_error {
        return Err(anyhow::Error::from(err)
            .context("failed to write to stdout")
            .into());
    }
    stdout.flush().context("failed to write to stdout")?;

    if let Some(summary_path) = summary_path {
        write_summary(&summary, &summary_path, pretty)?;
        if !quiet {
            eprintln!("OK: summary written -> {}", summary_path.display());
        }
    }
    if !quiet && summary.eqds_packets == 0 {
        eprintln!(
            "note: no EQDS packets found ({} packets, {} UDP)",
            summary.packets_total, summary.udp_packets
        );
    }
    Ok(())
}

fn cmd_decode(hex: &str, length: Option<usize>, verbose: bool) -> Result<(), CliError> {
    let bytes = parse_hex(hex)?;
    let declared_len = length.unwrap_or(bytes.len());
    let (line, outcome) = print_packet(&bytes, declared_len, DecodeOptions { verbose });
    tracing::debug!(?outcome, "decoded");
    println!("{line}");
    Ok(())
}

fn write_summary(summary: &CaptureSummary, path: &Path, pretty: bool) -> Result<(), CliError> {
    let json = if pretty {
        serde_json::to_string_pretty(summary)
    } else {
        serde_json::to_string(summary)
    }
    .context("JSON serialization failed")?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }
    fs::write(path, json)
        .with_context(|| format!("Failed to write summary: {}", path.display()))?;
    Ok(())
}

fn ensure_distinct_output(input: &Path, output: &Path) -> Result<(), CliError> {
    let input_abs = fs::canonicalize(input)
        .with_context(|| format!("Failed to resolve input path: {}", input.display()))?;
    let same = fs::canonicalize(output)
        .map(|output_abs| output_abs == input_abs)
        .unwrap_or(false);
    if same {
        return Err(CliError::new(
            format!("summary path must differ from input: {}", output.display()),
            Some("choose a different output path".to_string()),
        ));
    }
    Ok(())
}

fn parse_hex(text: &str) -> Result<Vec<u8>, CliError> {
    let trimmed = text.trim();
    let trimmed = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let digits: Vec<char> = trimmed
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ':')
        .collect();

    if digits.len() % 2 != 0 {
        return Err(CliError::new(
            format!("odd number of hex digits ({})", digits.len()),
            Some("write each byte as two digits, e.g. 08 or 0a".to_string()),
        ));
    }

    digits
        .chunks(2)
        .map(|pair| {
            let hi = pair[0].to_digit(16);
            let lo = pair[1].to_digit(16);
            match (hi, lo) {
                (Some(hi), Some(lo)) => Ok((hi * 16 + lo) as u8),
                _ => Err(CliError::new(
                    format!("invalid hex byte '{}{}'", pair[0], pair[1]),
                    Some("use digits 0-9 and a-f".to_string()),
                )),
            }
        })
        .collect()
}

fn validate_input_file(input: &Path) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("use a .pcap or .pcapng file".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("use a .pcap or .pcapng file".to_string()),
        ));
    }
    let ext = input
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    if ext != "pcap" && ext != "pcapng" {
        return Err(CliError::new(
            format!("unsupported input format '{}'", input.display()),
            Some("expected a .pcap or .pcapng file".to_string()),
        ));
    }
    Ok(())
}

fn resolve_input_path(input: &Path) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.to_path_buf());
    }

    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    let mut matches = Vec::new();
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    match matches.len() {
        0 => Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern; expected .pcap or .pcapng".to_string()),
        )),
        1 => Ok(matches.remove(0)),
        count => {
            let listed = matches
                .iter()
                .take(3)
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", ");
            let more = if count > 3 { ", ..." } else { "" };
            Err(CliError::new(
                format!(
                    "multiple files match pattern '{}' ({} matches); matches: {}{}",
                    pattern, count, listed, more
                ),
                Some("pass a single capture file, or run once per file".to_string()),
            ))
        }
    }
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
