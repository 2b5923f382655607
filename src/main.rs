use anyhow::Context;
use autobiographer::cli::{Cli, Command, read_book_spec};
use autobiographer::config::Overrides;
use autobiographer::server::{self, AppState};
use autobiographer::{Config, OutputFormat, Pipeline, Provider};
use clap::Parser;
use std::io;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    // Initialize tracing on stderr; stdout carries only the result line
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let overrides = Overrides {
        provider: cli.provider,
        chunk_size: cli.chunk_size,
        format: cli.format,
    };
    let config = Config::from_env(&overrides).context("failed to load configuration")?;

    // Fails on a missing credential before anything is asked
    let generator = Provider::from_config(&config)?;
    tracing::info!(provider = %config.provider, model = %config.model, "Model client ready");

    match cli.command.unwrap_or(Command::Write { output: None }) {
        Command::Write { output } => {
            let output = output.unwrap_or_else(|| match config.format {
                OutputFormat::Epub if config.output.extension().is_some_and(|e| e == "txt") => {
                    config.output.with_extension("epub")
                }
                _ => config.output.clone(),
            });
            let pipeline = Pipeline::new(generator, output)
                .with_chunk_size(config.chunk_size)
                .with_format(config.format);

            let spec = read_book_spec(&mut io::stdin().lock(), &mut io::stdout())?;
            let report = pipeline.run(&spec).await?;
            println!("{}", report.message);
        }
        Command::Serve { addr, output_dir } => {
            let pipeline = Pipeline::new(generator, output_dir.join(&config.output))
                .with_chunk_size(config.chunk_size)
                .with_format(config.format);
            server::serve(addr, AppState::new(pipeline, output_dir)).await?;
        }
    }

    Ok(())
}
