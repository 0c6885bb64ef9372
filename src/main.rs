// Mooshak Tools
// Command line front end for the file and shell helpers

// MODULES ------------------>>

mod cli;

//--------------------------------------------------------<<
// IMPORTS ------------------>>

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use mooshak_tools::core::app_config::depth_limit;
use mooshak_tools::core::{AppConfig, EffectiveSettings, ToolsConfig, TOOLS_CONFIG_NAME};
use mooshak_tools::operations::{self, SearchOptions};
use mooshak_tools::utilities::{RegexMatcher, WildcardMatcher};

//--------------------------------------------------------<<

/// Files compared equal, or the query held
const EXIT_OK: u8 = 0;
/// Files differ, or the query did not hold
const EXIT_DIFFERENT: u8 = 1;
/// Any failure
const EXIT_ERROR: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn run(cli: Cli) -> Result<u8> {
    let settings = load_settings(cli.config.as_ref())?;
    init_logging(&settings.log_level, cli.verbose);

    debug!(?settings, "resolved settings");

    match cli.command {
        Command::Cat(args) => {
            let content = operations::read(&args.path)?;
            emit(&content)?;
            Ok(EXIT_OK)
        }
        Command::Copy(args) => {
            operations::copy(&args.src, &args.dst)?;
            Ok(EXIT_OK)
        }
        Command::Cmpsize(args) => report_bool(operations::cmpsize(&args.left, &args.right)?),
        Command::Cmpbin(args) => report_bool(operations::cmpbin(&args.left, &args.right)?),
        Command::Cmptext(args) => report_text(operations::cmptext(&args.left, &args.right)?),
        Command::Test(args) => {
            let report = match (&args.actual, &args.text) {
                (_, Some(text)) => operations::teststr(&args.expected, text)?,
                (Some(actual), None) => operations::test(&args.expected, actual)?,
                (None, None) => anyhow::bail!("either an actual file or --text is required"),
            };
            report_text(report)
        }
        Command::Search(args) => {
            let max_depth = match args.depth {
                Some(depth) => depth_limit(depth),
                None => settings.search.max_depth,
            };
            let options = SearchOptions {
                max_depth,
                sorted: settings.search.sorted && !args.unsorted,
            };

            let paths = if args.glob {
                let matcher = WildcardMatcher::new(&args.pattern)?;
                operations::search(&args.root, &matcher, options)?
            } else {
                let matcher = RegexMatcher::new(&args.pattern)?;
                operations::search(&args.root, &matcher, options)?
            };

            emit(operations::join_paths(&paths).as_bytes())?;
            Ok(EXIT_OK)
        }
        Command::IsZip(args) => report_bool(operations::is_zip(&args.path)?),
        Command::Exec(args) => {
            let output = operations::execute(&args.cmd)?;
            emit(output.stdout.as_bytes())?;

            // Signals and out-of-range codes collapse to a plain failure
            let code = output
                .exit_code()
                .and_then(|c| u8::try_from(c).ok())
                .unwrap_or(EXIT_DIFFERENT);
            Ok(code)
        }
    }
}

/// Merge the optional config file over the compiled defaults
fn load_settings(path: Option<&PathBuf>) -> Result<EffectiveSettings> {
    let config = match path {
        Some(path) => ToolsConfig::load(path)?,
        None => ToolsConfig::load_or_default(&PathBuf::from(TOOLS_CONFIG_NAME))
            .context("Failed to load default tools config")?,
    };

    Ok(config.resolve(&AppConfig::default()))
}

/// Install the stderr subscriber; RUST_LOG wins over everything else
fn init_logging(level: &str, verbose: bool) {
    let level = if verbose { "debug" } else { level };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn emit(bytes: &[u8]) -> Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(bytes).context("Failed to write to stdout")?;
    stdout.flush().context("Failed to flush stdout")?;
    Ok(())
}

fn report_bool(value: bool) -> Result<u8> {
    emit(format!("{}\n", value).as_bytes())?;
    Ok(if value { EXIT_OK } else { EXIT_DIFFERENT })
}

fn report_text(report: String) -> Result<u8> {
    emit(report.as_bytes())?;
    Ok(if report.is_empty() { EXIT_OK } else { EXIT_DIFFERENT })
}
