use anyhow::{ Context, Result };
use clap::Parser;
use log::{ debug, info };

use mathsnap::{
    ClassifiedError,
    GraphRange,
    HttpConnectivityCheck,
    JsonHistoryStore,
    MathSnapConfig,
    MathSolver,
    OpenAiClient,
};
mod cli;
use cli::{ Commands, MathSnapCli, OutputFormat };

#[tokio::main]
async fn main() {
    // Parse the command line arguments
    let cli = MathSnapCli::parse();

    // Setup logging
    setup_logging(&cli.log_level);

    if let Err(e) = run(cli).await {
        match e.downcast_ref::<ClassifiedError>() {
            Some(classified) => cli::ui::print_classified_error(classified),
            None => cli::ui::print_error(&format!("{:#}", e)),
        }
        std::process::exit(1);
    }
}

async fn run(cli: MathSnapCli) -> Result<()> {
    match dotenv::dotenv() {
        Ok(path) => debug!("Loaded environment from {}", path.display()),
        Err(_) => debug!("No .env file found"),
    }

    let config = MathSnapConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let format = OutputFormat::parse(&cli.output_format);
    let history = JsonHistoryStore::new(config.history_path.clone());
    debug!("History file: {}", history.path().display());

    match &cli.command {
        Commands::Solve { image, equation, no_history } => {
            let solver = build_solver(&config)?;
            cli::commands::solve::execute(
                &solver,
                &history,
                image.as_deref(),
                equation.as_deref(),
                !*no_history,
                format
            ).await?;
        }

        Commands::Extract { image } => {
            let solver = build_solver(&config)?;
            cli::commands::extract::execute(&solver, image, format).await?;
        }

        Commands::Graph { image, equation, min, max } => {
            let solver = build_solver(&config)?;
            cli::commands::graph::execute(
                &solver,
                image.as_deref(),
                equation.as_deref(),
                GraphRange { min: *min, max: *max },
                format
            ).await?;
        }

        Commands::History { action } => {
            cli::commands::history::execute(&history, action, format)?;
        }
    }

    Ok(())
}

fn build_solver(config: &MathSnapConfig) -> Result<MathSolver<OpenAiClient, HttpConnectivityCheck>> {
    let client = OpenAiClient::new(config.client.clone()).context("Failed to create API client")?;
    let connectivity = HttpConnectivityCheck::new(&config.connectivity).context(
        "Failed to create connectivity check"
    )?;
    info!(
        "Using vision model {} and solution model {}",
        client.config().vision_model,
        client.config().solution_model
    );
    Ok(MathSolver::new(client, connectivity))
}

fn setup_logging(log_level: &str) {
    // Set up the logger based on the log level
    let level = match log_level.to_lowercase().as_str() {
        "trace" => log::LevelFilter::Trace,
        "debug" => log::LevelFilter::Debug,
        "info" => log::LevelFilter::Info,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        _ => log::LevelFilter::Warn,
    };

    env_logger::Builder::new().filter_level(level).init();

    info!("Logger initialized with level: {}", log_level);
}
