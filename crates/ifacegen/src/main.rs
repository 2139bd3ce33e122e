//! # ifacegen CLI entry point
//!
//! Parses command-line arguments and dispatches to the generator.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ifacegen::config::{CONFIG_FILE, GeneratorConfig};
use ifacegen::driver;
use ifacegen_emit::EmitOptions;

/// Generate C and C++ headers from one API schema.
#[derive(Parser, Debug)]
#[command(name = "ifacegen", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render every configured target and write it.
    Generate {
        /// Path to the configuration file.
        #[arg(long, default_value = CONFIG_FILE)]
        config: PathBuf,

        /// Only render targets of this syntax. Repeatable.
        #[arg(long)]
        syntax: Vec<String>,
    },

    /// Render one syntax to stdout.
    Print {
        #[arg(long)]
        schema: PathBuf,

        #[arg(long)]
        syntax: String,

        /// Library prefix for macro names and the bool alias.
        #[arg(long, default_value = "lib")]
        prefix: String,
    },

    /// Load and validate a schema, then report declaration counts.
    Check {
        #[arg(long)]
        schema: PathBuf,
    },

    /// List registered syntaxes.
    Syntaxes,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Generate { config, syntax } => {
            let config = GeneratorConfig::load(&config)?;
            let written = driver::generate(&config, &syntax)?;
            println!("wrote {written} header(s)");
        }
        Commands::Print {
            schema,
            syntax,
            prefix,
        } => {
            let schema = driver::load_schema(&schema)?;
            let out = ifacegen_emit::generate(&schema, &syntax, &EmitOptions::for_prefix(&prefix))
                .with_context(|| format!("failed to render `{syntax}`"))?;
            print!("{out}");
        }
        Commands::Check { schema } => {
            let path = schema;
            let schema = driver::load_schema(&path)?;
            println!(
                "{}: ok (version {}, {} layout entries)",
                path.display(),
                schema.version(),
                schema.layout().len()
            );
            for (kind, count) in schema.counts() {
                println!("  {kind:<10} {count}");
            }
        }
        Commands::Syntaxes => {
            for syntax in ifacegen_emit::syntaxes() {
                println!("{:<6} .{}", syntax.name(), syntax.extension());
            }
        }
    }
    Ok(())
}
