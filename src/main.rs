//! CLI entry point for cstitch.
//!
//! Resolves a C# file against the document symbols a language server reported
//! for it, prints the result, or checks that it reassembles to the source.

use anyhow::Context;
use clap::{
    Parser, Subcommand,
    builder::styling::{AnsiColor, Effects, Styles},
};
use cstitch::config::OutputFormat;
use cstitch::display::{THEME, render_outline};
use cstitch::{AnalysisError, ErrorContext, ParsedFile, Settings, analyze_file, verify_round_trip};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;

fn clap_cargo_style() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}

/// C# declaration boundary resolution
#[derive(Parser)]
#[command(
    name = "cstitch",
    version = env!("CARGO_PKG_VERSION"),
    about = "Resolve exact C# declaration boundaries from language server document symbols",
    next_line_help = true,
    styles = clap_cargo_style(),
    after_help = "Examples:\n  cstitch parse Widget.cs --symbols Widget.symbols.json\n  cstitch parse Widget.cs --symbols Widget.symbols.json --format outline\n  cstitch check Widget.cs --symbols Widget.symbols.json\n  cstitch init"
)]
struct Cli {
    /// Path to custom settings.toml file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
enum Commands {
    /// Print the resolved symbol tree
    Parse {
        /// C# source file
        file: PathBuf,

        /// JSON result of textDocument/documentSymbol for the file
        #[arg(short, long)]
        symbols: PathBuf,

        /// Output format, overriding the settings file
        #[arg(short, long, value_parser = ["json", "outline"])]
        format: Option<String>,
    },

    /// Verify that the resolved symbols reassemble to the source
    Check {
        /// C# source file
        file: PathBuf,

        /// JSON result of textDocument/documentSymbol for the file
        #[arg(short, long)]
        symbols: PathBuf,
    },

    /// Set up .cstitch directory with default configuration
    Init {
        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut settings = match load_settings(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{}", THEME.error_with_icon(&e.to_string()));
            return ExitCode::FAILURE;
        }
    };
    settings.debug |= cli.debug;
    init_logging(settings.debug);

    let result = match cli.command {
        Commands::Parse {
            file,
            symbols,
            format,
        } => {
            if let Some(format) = format.as_deref() {
                settings.output.format = match format {
                    "outline" => OutputFormat::Outline,
                    _ => OutputFormat::Json,
                };
            }
            run_parse(&file, &symbols, &settings)
        }
        Commands::Check { file, symbols } => run_check(&file, &symbols, &settings),
        Commands::Init { force } => run_init(force),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            report(&e);
            ExitCode::FAILURE
        }
    }
}

fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    let settings = match path {
        Some(path) => Settings::load_from(path)
            .map_err(|e| AnalysisError::ConfigError { reason: e.to_string() })
            .with_context(|| format!("loading {}", path.display()))?,
        None => Settings::load().map_err(|e| AnalysisError::ConfigError { reason: e.to_string() })?,
    };
    Ok(settings)
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_logging(debug: bool) {
    let level = if debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}

fn report(error: &anyhow::Error) {
    eprintln!("{}", THEME.error_with_icon(&format!("{error:#}")));
    if let Some(analysis) = error.downcast_ref::<AnalysisError>() {
        for suggestion in analysis.recovery_suggestions() {
            eprintln!("  {suggestion}");
        }
    }
}

/// JSON shape printed by `parse` when text output is disabled.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SymbolSummary<'a> {
    symbol_type: cstitch::SymbolType,
    name: &'a str,
    depth: usize,
    access_modifier: cstitch::AccessModifier,
    keywords: &'a [String],
    return_type: Option<&'a str>,
    selection_range: cstitch::Range,
    body_range: Option<cstitch::Range>,
}

fn run_parse(file: &Path, symbols: &Path, settings: &Settings) -> anyhow::Result<ExitCode> {
    let (_, parsed) = analyze_file(file, symbols, settings)?;
    debug!("printing {} as {:?}", file.display(), settings.output.format);

    let output = match settings.output.format {
        OutputFormat::Outline => render_outline(&parsed, &THEME),
        OutputFormat::Json => to_json(&parsed, settings).with_path(file)?,
    };
    print!("{output}");
    if settings.output.format == OutputFormat::Json {
        println!();
    }
    Ok(ExitCode::SUCCESS)
}

fn to_json(parsed: &ParsedFile, settings: &Settings) -> serde_json::Result<String> {
    let json = if settings.output.include_text {
        serde_json::to_value(parsed)?
    } else {
        let summaries: Vec<SymbolSummary> = parsed
            .symbols()
            .into_iter()
            .map(|symbol| SymbolSummary {
                symbol_type: symbol.symbol_type,
                name: &symbol.name,
                depth: symbol.depth,
                access_modifier: symbol.access_modifier,
                keywords: &symbol.keywords,
                return_type: symbol.return_type.as_deref(),
                selection_range: symbol.selection_range,
                body_range: symbol.body.range,
            })
            .collect();
        serde_json::to_value(summaries)?
    };

    let text = if settings.output.pretty {
        serde_json::to_string_pretty(&json)?
    } else {
        serde_json::to_string(&json)?
    };
    Ok(text)
}

fn run_check(file: &Path, symbols: &Path, settings: &Settings) -> anyhow::Result<ExitCode> {
    let (doc, parsed) = analyze_file(file, symbols, settings)?;
    verify_round_trip(file, doc.as_str(), &parsed)?;

    let message = format!(
        "{} reassembles exactly ({} symbols)",
        THEME.apply(&THEME.path, file.display()),
        parsed.symbols().len()
    );
    println!("{}", THEME.success_with_icon(&message));
    Ok(ExitCode::SUCCESS)
}

fn run_init(force: bool) -> anyhow::Result<ExitCode> {
    let path = Settings::init_config_file(force)
        .map_err(|e| anyhow::anyhow!("writing default configuration: {e}"))?;
    let verb = if force { "Wrote" } else { "Created" };
    println!(
        "{}",
        THEME.success_with_icon(&format!("{verb} default configuration at: {}", path.display()))
    );
    Ok(ExitCode::SUCCESS)
}
