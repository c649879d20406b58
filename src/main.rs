// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! esgrove - parse ECMAScript into ESTree from the command line
//!
//! ## Features
//!
//! - Interactive parse REPL with highlighting and history
//! - Concurrent file parsing with tokio
//! - Colored diagnostics with a code frame

mod repl;
mod report;

use clap::Parser;
use esgrove_parser::{AsyncParser, PARSER_STACK_SIZE, ParseOptions, parse};
use owo_colors::OwoColorize;
use report::OutputFormat;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "esgrove",
    about = "Parse ECMAScript source into an ESTree syntax tree",
    version,
    author = "Pegasus Heavy Industries"
)]
struct Cli {
    /// Files to parse; with none, start the REPL
    files: Vec<PathBuf>,

    /// Parse code given on the command line
    #[arg(short = 'e', long = "eval")]
    eval: Option<String>,

    /// Use the module goal
    #[arg(short, long)]
    module: bool,

    /// Treat scripts as strict mode code
    #[arg(short, long)]
    strict: bool,

    /// Attach line/column locations to every node
    #[arg(long)]
    loc: bool,

    /// Disable the legacy web-compatibility leniencies
    #[arg(long)]
    no_web_compat: bool,

    /// Maximum nesting depth
    #[arg(long)]
    max_depth: Option<usize>,

    /// JSON file with parse options (camelCase keys)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Options from the config file, overridden by flags.
    fn options(&self) -> Result<ParseOptions, String> {
        let mut options = match &self.config {
            Some(path) => load_config(path)?,
            None => ParseOptions::default(),
        };
        if self.module {
            options.module = true;
        }
        if self.strict {
            options.strict_by_default = true;
        }
        if self.loc {
            options.track_source_locations = true;
        }
        if self.no_web_compat {
            options.web_compat_disabled = true;
        }
        if let Some(depth) = self.max_depth {
            options.max_depth = depth;
        }
        Ok(options)
    }
}

fn load_config(path: &Path) -> Result<ParseOptions, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    serde_json::from_str(&text).map_err(|e| format!("Invalid config {}: {}", path.display(), e))
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("ESGROVE_LOG").unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("esgrove=debug,esgrove_parser=debug")
        } else {
            EnvFilter::new("warn")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let options = match cli.options() {
        Ok(options) => options,
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            return ExitCode::FAILURE;
        }
    };
    debug!(?options, "resolved parse options");

    if cli.eval.is_none() && cli.files.is_empty() {
        return run_repl(options);
    }

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .thread_stack_size(PARSER_STACK_SIZE)
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("{}: failed to start runtime: {}", "Error".red().bold(), e);
            return ExitCode::FAILURE;
        }
    };
    runtime.block_on(run(cli, options))
}

async fn run(cli: Cli, options: ParseOptions) -> ExitCode {
    let mut ok = true;

    if let Some(code) = &cli.eval {
        let code = code.clone();
        let format = cli.format;
        // Parse on a worker thread for its larger stack.
        let handle = tokio::task::spawn_blocking(move || parse_and_print("<eval>", &code, options, format));
        ok &= handle.await.unwrap_or(false);
    }

    if !cli.files.is_empty() {
        ok &= run_files(&cli.files, options, cli.format).await;
    }

    if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

fn parse_and_print(name: &str, source: &str, options: ParseOptions, format: OutputFormat) -> bool {
    match parse(source, options) {
        Ok(program) => {
            println!("{}", report::render_program(name, &program, format));
            true
        }
        Err(e) => {
            report::print_error(name, source, &e);
            false
        }
    }
}

/// Parses every file concurrently and prints results in argument order.
async fn run_files(files: &[PathBuf], options: ParseOptions, format: OutputFormat) -> bool {
    let parser = AsyncParser::new(options);
    let results = parser.parse_files(files).await;

    let mut ok = true;
    for (path, result) in files.iter().zip(results) {
        let name = path.display().to_string();
        match result {
            Ok(program) => println!("{}", report::render_program(&name, &program, format)),
            Err(e) => {
                ok = false;
                // Re-read for the code frame; the parse already consumed its copy.
                let source = tokio::fs::read_to_string(path).await.unwrap_or_default();
                report::print_error(&name, &source, &e);
            }
        }
    }
    ok
}

/// Start the interactive REPL
fn run_repl(options: ParseOptions) -> ExitCode {
    match repl::Repl::new(options) {
        Ok(mut repl) => {
            if let Err(e) = repl.run() {
                eprintln!("{}: {:?}", "REPL Error".red().bold(), e);
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!(
                "{}: Failed to initialize REPL: {:?}",
                "Error".red().bold(),
                e
            );
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from(["esgrove", "--module", "--loc", "--max-depth", "64", "a.js"]);
        let options = cli.options().unwrap();
        assert!(options.module);
        assert!(options.track_source_locations);
        assert!(!options.web_compat_disabled);
        assert_eq!(options.max_depth, 64);
        assert_eq!(cli.files, vec![PathBuf::from("a.js")]);
    }

    #[test]
    fn test_config_file_then_flags() {
        let path = std::env::temp_dir().join(format!("esgrove-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "strictByDefault": true, "maxDepth": 10 }"#).unwrap();

        let config = path.to_string_lossy().to_string();
        let cli = Cli::parse_from(["esgrove", "--config", config.as_str(), "--max-depth", "20", "-e", "1"]);
        let options = cli.options().unwrap();
        assert!(options.strict_by_default);
        assert_eq!(options.max_depth, 20);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_bad_config_is_reported() {
        let cli = Cli::parse_from(["esgrove", "--config", "/no/such/config.json"]);
        assert!(cli.options().is_err());
    }

    #[test]
    fn test_format_flag() {
        let cli = Cli::parse_from(["esgrove", "-f", "summary", "-e", "a"]);
        assert_eq!(cli.format, OutputFormat::Summary);
    }
}
