use clap::Parser;
use tracing_subscriber::EnvFilter;

use houndsploit::cli::{self, Commands};
use houndsploit::config;
use houndsploit::errors::{ErrorKind, HoundError};

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    // Initialize logging
    let log_level = match (cli.quiet, cli.verbose) {
        (true, _) => "warn",
        (false, 0) => "info",
        (false, 1) => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_ansi(!cli.no_color);
    if cli.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    if cli.no_color {
        console::set_colors_enabled(false);
    }

    let result = run(cli).await;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(exit_code(&e));
    }
}

async fn run(cli: cli::Cli) -> Result<(), HoundError> {
    if let Commands::Validate(args) = &cli.command {
        return handle_validate(&args.config).await;
    }

    let settings = cli::load_settings(cli.config.as_deref(), cli.db.as_deref()).await?;
    match cli.command {
        Commands::Serve(args) => cli::serve::handle_serve(args, settings).await,
        Commands::Search(args) => cli::search::handle_search(args, settings).await,
        Commands::Suggestions(args) => cli::suggestions::handle_suggestions(args, settings).await,
        Commands::Import(args) => cli::import::handle_import(args, settings).await,
        Commands::Validate(_) => Ok(()),
    }
}

fn exit_code(e: &HoundError) -> i32 {
    match e {
        HoundError::Config(_) => 2,
        _ => match e.classify().kind {
            ErrorKind::Validation => 3,
            ErrorKind::NotFound => 4,
            _ => 1,
        },
    }
}

async fn handle_validate(path: &str) -> Result<(), HoundError> {
    let _config = config::parse_config(std::path::Path::new(path)).await?;
    println!("Configuration is valid: {}", path);
    Ok(())
}
