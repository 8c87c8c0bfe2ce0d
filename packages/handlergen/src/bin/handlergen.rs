//! handlergen CLI
//!
//! Scans a Go source tree for `@Handler(...)` directives and writes one
//! `gen_<channel>_api_handler.go` registration file per package and channel.
//!
//! # Usage
//!
//! ```bash
//! handlergen --dir ./server
//! handlergen --dir ./server --pkg api --dry-run
//! handlergen --dir ./server --config handlergen.yaml --formatter gofmt -v
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use handlergen::config::{FormatterKind, GeneratorConfig};
use handlergen::GenerationPipeline;

#[derive(Parser)]
#[command(name = "handlergen")]
#[command(about = "Generate handler registration code from @Handler directives", long_about = None)]
struct Cli {
    /// Root directory of the Go sources
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Only generate for packages with this name
    #[arg(short, long)]
    pkg: Option<String>,

    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Formatter for generated sources (builtin | gofmt)
    #[arg(long)]
    formatter: Option<FormatterKind>,

    /// Render and format, but do not write
    #[arg(long)]
    dry_run: bool,

    /// Print the linked declaration model as JSON and exit
    #[arg(long)]
    dump_model: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn print_error_chain(err: &dyn std::error::Error) {
    eprintln!("error: {}", err);
    let mut source = err.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {}", cause);
        source = cause.source();
    }
}

/// Usage text, as printed when `--dir` is missing
fn write_usage(out: &mut impl std::io::Write) -> std::io::Result<()> {
    Cli::command().write_help(out)?;
    writeln!(out)
}

fn load_config(cli: &Cli) -> Result<GeneratorConfig, handlergen::HandlergenError> {
    let mut config = match cli.config {
        Some(ref path) => GeneratorConfig::from_yaml(path)?,
        None => GeneratorConfig::default(),
    };
    if let Some(ref pkg) = cli.pkg {
        config = config.with_package(pkg.clone());
    }
    if let Some(formatter) = cli.formatter {
        config = config.with_formatter(formatter);
    }
    Ok(config)
}

fn run(cli: &Cli, dir: &Path) -> Result<(), handlergen::HandlergenError> {
    let config = load_config(cli)?.validate()?;
    let pipeline = GenerationPipeline::new(config).with_dry_run(cli.dry_run);

    if cli.dump_model {
        let (sources, _) = pipeline.extract(dir)?;
        println!("{}", serde_json::to_string_pretty(&sources)?);
        return Ok(());
    }

    let result = pipeline.run(dir)?;
    if result.dry_run {
        for path in result.file_paths() {
            println!("{}", path.display());
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let Some(dir) = cli.dir.clone() else {
        // A failed usage print changes nothing about the exit code
        let _ = write_usage(&mut std::io::stderr());
        return ExitCode::FAILURE;
    };

    init_tracing(cli.verbose);

    match run(&cli, &dir) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            print_error_chain(&err);
            ExitCode::FAILURE
        }
    }
}
