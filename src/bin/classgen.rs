//! Class Generator CLI
//!
//! Compiles data models and writes resolved models (JSON) or C# source.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use dotnet_classgen::codegen::csharp;
use dotnet_classgen::config::OutputFormat;
use dotnet_classgen::{loader, ClassgenConfig, CompilationReport, Compiler, EnumDef, Schema};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "classgen")]
#[command(about = "Compile data models into .NET classes")]
struct Cli {
    /// Config file (defaults to classgen.toml lookup)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Data model root, overriding the configured path
    #[arg(short, long, global = true)]
    schema: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve every model and write the result
    Compile {
        /// Output format (defaults to the configured one)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Render C# source for local enums and every model
    Render {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Report diagnostics without writing output
    Check,

    /// Write the effective configuration to a file
    Init {
        /// Destination file
        #[arg(default_value = "classgen.toml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(clap::Args)]
struct OutputArgs {
    /// Output file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Stop at the first model that fails to compile
    #[arg(long)]
    fail_fast: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Returns whether every model compiled
fn run(cli: Cli) -> anyhow::Result<bool> {
    let mut config = ClassgenConfig::load_from(cli.config.as_deref())
        .context("Failed to load configuration")?;
    if let Some(schema) = cli.schema {
        config.schema.path = schema;
    }

    if let Commands::Init { path, force } = &cli.command {
        if path.exists() && !*force {
            bail!("{} already exists (use --force to overwrite)", path.display());
        }
        config.save(path)?;
        println!("Wrote {}", path.display());
        return Ok(true);
    }

    let schema = loader::load_schema(&config)?;
    let vocabulary = loader::load_vocabulary(&config)?;
    let compiler = Compiler::new(&schema, vocabulary);

    match cli.command {
        Commands::Compile { format, output } => {
            let format = format.unwrap_or(config.output.format);
            let fail_fast = output.fail_fast || config.output.fail_fast;
            let report = compile(&compiler, &schema, fail_fast)?;

            let content = match format {
                OutputFormat::Json => serde_json::to_string_pretty(&report.models)?,
                OutputFormat::CSharp => render(&compiler, &schema, &report, &config),
            };
            write_output(output.output.as_ref(), &content)?;
            Ok(finish(&report))
        }

        Commands::Render { output } => {
            let fail_fast = output.fail_fast || config.output.fail_fast;
            let report = compile(&compiler, &schema, fail_fast)?;

            let content = render(&compiler, &schema, &report, &config);
            write_output(output.output.as_ref(), &content)?;
            Ok(finish(&report))
        }

        Commands::Check => {
            let report = compiler.compile_all(&schema.models);
            println!("{} model(s) compiled, {} failed", report.models.len(), report.failures.len());
            if !report.diagnostics.is_empty() {
                println!();
                print!("{}", report.diagnostics.format_all());
            }
            Ok(report.is_success())
        }

        Commands::Init { .. } => Ok(true),
    }
}

fn compile(compiler: &Compiler, schema: &Schema, fail_fast: bool) -> anyhow::Result<CompilationReport> {
    if fail_fast {
        let models = compiler.compile_strict(&schema.models)?;
        Ok(CompilationReport {
            models,
            ..CompilationReport::default()
        })
    } else {
        Ok(compiler.compile_all(&schema.models))
    }
}

fn render(
    compiler: &Compiler,
    schema: &Schema,
    report: &CompilationReport,
    config: &ClassgenConfig,
) -> String {
    // foundation enums already exist in the foundation library
    let local_enums: Vec<&EnumDef> = schema
        .enums
        .iter()
        .filter(|def| !compiler.vocabulary().contains(&def.namespace))
        .collect();

    csharp::emit_file(&local_enums, &report.models, &config.target)
}

fn write_output(path: Option<&PathBuf>, content: &str) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            fs::write(path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), "Wrote output");
        }
        None => println!("{}", content),
    }
    Ok(())
}

/// Print diagnostics to stderr and report overall success
fn finish(report: &CompilationReport) -> bool {
    for item in report.diagnostics.warnings() {
        warn!("{}", item);
    }
    if report.diagnostics.has_errors() {
        eprint!("{}", report.diagnostics.format_all());
    }
    if !report.is_success() && report.models.is_empty() {
        eprintln!("No models compiled");
    }
    report.is_success()
}
