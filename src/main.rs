//! mdd-screener - Main CLI Entry Point

use anyhow::{Context, Result};
use clap::Parser;
use mdd_screener::{
    cli::{Args, Commands, Verbosity},
    criteria::MDD_CRITERIA,
    display, server,
    server::request::AnalyzeRequest,
    AssessmentPipeline, Config,
};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let verbosity = args.verbosity();
    let mut config = Config::load(args.config.clone())?;
    init_tracing(verbosity, &config.logging.level);

    match args.command {
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            server::serve(&config).await?;
        }
        Commands::Analyze { text, file, json } => {
            let text = read_input(text, file)?;
            run_analyze(&config, &text, json, verbosity).await?;
        }
        Commands::Health { json } => {
            let pipeline = AssessmentPipeline::from_config(&config)?;
            let report = pipeline.health().await;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                display::print_health(&report);
            }
            if !report.is_healthy() {
                std::process::exit(1);
            }
        }
        Commands::Criteria => display::print_criteria(&MDD_CRITERIA),
        Commands::Config => display::print_config(&config),
    }

    Ok(())
}

fn init_tracing(verbosity: Verbosity, configured_level: &str) {
    tracing_subscriber::registry()
        .with(verbosity.env_filter(configured_level, std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn read_input(text: Option<String>, file: Option<PathBuf>) -> Result<String> {
    match (text, file) {
        (Some(text), _) => Ok(text),
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display())),
        (None, None) => anyhow::bail!("provide narrative TEXT or --file PATH"),
    }
}

async fn run_analyze(config: &Config, text: &str, json: bool, verbosity: Verbosity) -> Result<()> {
    let request = AnalyzeRequest {
        text: Some(text.to_string()),
        ..AnalyzeRequest::default()
    }
    .validate()
    .map_err(|problems| anyhow::anyhow!(problems.join("; ")))?;
    let pipeline = AssessmentPipeline::from_config(config)?;

    let pb = (verbosity.show_progress() && !json).then(|| display::spinner("Analyzing narrative..."));
    let outcome = pipeline.assess(&request.text, None).await;
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    match outcome {
        Ok(report) if json => println!("{}", serde_json::to_string_pretty(&report)?),
        Ok(report) => display::print_report(&report),
        Err(e) => {
            display::print_error(&e.to_string());
            return Err(e.into());
        }
    }
    Ok(())
}
