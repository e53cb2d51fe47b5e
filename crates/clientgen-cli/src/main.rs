//! clientgen CLI entrypoint
//! Parses command-line arguments and runs the core generator against a host project.

// Internal imports (std, crate)
use std::path::PathBuf;
use std::process::ExitCode;

// External imports (alphabetized)
use anyhow::Context;
use clap::Parser;
use clientgen_core::{Generator, GeneratorConfig, ProcessRunner};

mod logging;
mod prompter;

use prompter::DialoguerPrompter;

#[derive(Parser, Debug)]
#[command(name = "clientgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Skip all prompts and regenerate every stored API client
    #[arg(long)]
    regen: bool,

    /// Root of the JHipster project receiving the clients
    #[arg(long, default_value = ".")]
    project_dir: PathBuf,

    /// Configuration file (default: <project>/.clientgen.yaml, then ~/.clientgen/config.yaml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Path to the swagger-codegen CLI jar
    #[arg(long, env = "CLIENTGEN_JAR")]
    jar: Option<PathBuf>,

    /// Java executable used to run the generator
    #[arg(long, env = "CLIENTGEN_JAVA")]
    java: Option<String>,

    /// Log debug output
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.quiet)?;

    let mut config = GeneratorConfig::load(cli.config.as_deref(), &cli.project_dir)
        .await
        .context("Failed to load clientgen configuration")?;
    if let Some(jar) = cli.jar {
        config.jar = jar;
    }
    if let Some(java) = cli.java {
        config.java = java;
    }
    tracing::debug!(?config, "Resolved configuration");

    let generator = Generator::new(config, &cli.project_dir);
    let mut prompter = DialoguerPrompter::new();
    let report = generator
        .run(cli.regen, &mut prompter, &ProcessRunner)
        .await
        .with_context(|| {
            format!(
                "Failed to generate API clients in {}",
                cli.project_dir.display()
            )
        })?;

    print!("{report}");
    if report.has_failures() {
        tracing::error!("Some API clients could not be generated");
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
