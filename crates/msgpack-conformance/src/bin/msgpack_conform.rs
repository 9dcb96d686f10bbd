use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use msgpack_conformance::{
    generate, reference_corpus, ConformanceError, FixtureFormat, GeneratorConfig, Harness,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[derive(Parser)]
#[command(
    name = "msgpack-conform",
    version,
    about = "Check the MessagePack codec against reference fixtures"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Verify the reference corpus, then write the fixture file
    Generate {
        /// TOML file with generator settings
        #[arg(long)]
        config: Option<PathBuf>,
        /// Header file placed before the generated test groups.
        /// Defaults to tests/python-ref-header.scm when that file exists
        #[arg(long)]
        header: Option<PathBuf>,
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long, value_enum)]
        format: Option<FixtureFormat>,
        #[arg(long)]
        fail_fast: bool,
    },
    /// Run the pack/unpack assertions and print a summary
    Verify {
        #[arg(long)]
        fail_fast: bool,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(filter),
        )
        .init();
}

fn main() -> Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Generate {
            config,
            header,
            output,
            format,
            fail_fast,
        } => {
            let mut cfg = match &config {
                Some(path) => GeneratorConfig::load(path)?,
                None => GeneratorConfig::default(),
            };
            if header.is_some() {
                cfg.header = header;
            }
            cfg.resolve_default_header(Path::new("."));
            if let Some(output) = output {
                cfg.output = output;
            }
            if let Some(format) = format {
                cfg.format = format;
            }
            cfg.fail_fast |= fail_fast;

            match generate(&cfg, &reference_corpus()) {
                Ok(report) => {
                    println!("{report}");
                    Ok(ExitCode::SUCCESS)
                }
                Err(ConformanceError::Verification(report)) => {
                    println!("{report}");
                    eprintln!("nothing written to {}", cfg.output.display());
                    Ok(ExitCode::FAILURE)
                }
                Err(err) => Err(err).context("fixture generation failed"),
            }
        }
        Command::Verify { fail_fast } => {
            let report = Harness::new()
                .fail_fast(fail_fast)
                .verify_corpus(&reference_corpus());
            println!("{report}");
            Ok(if report.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}
