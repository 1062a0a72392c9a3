// Copyright 2024 OctoFHIR Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Simple CLI for template interpolation
//!
//! Renders `~{expr}` templates and JSON documents against a JSON context.

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand, ValueEnum};
use octofhir_interpolate::diagnostics::{DiagnosticFormatter, Format};
use octofhir_interpolate::{CollectingSink, Interpolator};
use serde_json::{Value as JsonValue, from_str as parse_json};
use std::fs;
use std::io::{self, Read, Write};
use std::process;

#[derive(Parser)]
#[command(name = "octofhir-interpolate")]
#[command(about = "Render ~{expr} templates against a JSON context")]
#[command(version)]
#[command(author = "OctoFHIR Team <funyloony@gmail.com>")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interpolate a single template string
    Render {
        /// Template containing ~{expr} placeholders
        template: String,
        /// JSON file holding the context (empty context if not provided)
        #[arg(short, long)]
        context: Option<String>,
    },
    /// Interpolate every string in a JSON document
    Deep {
        /// JSON document to interpolate (reads from stdin if not provided)
        #[arg(short, long)]
        file: Option<String>,
        /// JSON file holding the context (empty context if not provided)
        #[arg(short, long)]
        context: Option<String>,
        /// Pretty-print JSON output
        #[arg(short, long)]
        pretty: bool,
    },
    /// Report every placeholder that fails to evaluate
    Check {
        /// Template containing ~{expr} placeholders
        template: String,
        /// JSON file holding the context (empty context if not provided)
        #[arg(short, long)]
        context: Option<String>,
        /// Diagnostic output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Compact,
}

impl From<OutputFormat> for Format {
    fn from(value: OutputFormat) -> Self {
        match value {
            OutputFormat::Text => Format::Text,
            OutputFormat::Json => Format::Json,
            OutputFormat::Compact => Format::Compact,
        }
    }
}

fn main() {
    // Setup human-panic for better error messages
    human_panic::setup_panic!();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli.command, &mut io::stdout().lock()) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

/// Run a subcommand, writing its output to `out`; returns the exit code
fn run<W: Write>(command: Commands, out: &mut W) -> Result<i32> {
    match command {
        Commands::Render { template, context } => {
            let context = load_context(context.as_deref())?;
            writeln!(out, "{}", Interpolator::new().interpolate(&template, &context))?;
            Ok(0)
        }
        Commands::Deep {
            file,
            context,
            pretty,
        } => handle_deep(file.as_deref(), context.as_deref(), pretty, out),
        Commands::Check {
            template,
            context,
            format,
        } => handle_check(&template, context.as_deref(), format.into(), out),
    }
}

fn handle_deep<W: Write>(
    file: Option<&str>,
    context: Option<&str>,
    pretty: bool,
    out: &mut W,
) -> Result<i32> {
    let document_data = match file {
        Some(filename) => fs::read_to_string(filename)
            .with_context(|| format!("reading document '{filename}'"))?,
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("reading document from stdin")?;
            buffer
        }
    };
    let document: JsonValue = parse_json(&document_data).context("parsing JSON document")?;
    let context = load_context(context)?;

    let result = Interpolator::new().interpolate_json(&document, &context);
    let output = if pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    writeln!(out, "{output}")?;
    Ok(0)
}

fn handle_check<W: Write>(
    template: &str,
    context: Option<&str>,
    format: Format,
    out: &mut W,
) -> Result<i32> {
    let context = load_context(context)?;
    let interpolator = Interpolator::with_sink(CollectingSink::new());
    let rendered = interpolator.interpolate(template, &context);
    let diagnostics = interpolator.into_sink().take();

    log::debug!("rendered: {rendered}");
    if diagnostics.is_empty() {
        writeln!(out, "OK")?;
        return Ok(0);
    }

    writeln!(out, "{}", DiagnosticFormatter::new(format).format_all(&diagnostics))?;
    Ok(1)
}

fn load_context(path: Option<&str>) -> Result<JsonValue> {
    let Some(path) = path else {
        return Ok(JsonValue::Object(Default::default()));
    };

    let data = fs::read_to_string(path).with_context(|| format!("reading context '{path}'"))?;
    let context: JsonValue =
        parse_json(&data).with_context(|| format!("parsing context '{path}'"))?;
    if !context.is_object() {
        log::warn!("context '{path}' is not a JSON object; every path will resolve to nothing");
    }
    Ok(context)
}
