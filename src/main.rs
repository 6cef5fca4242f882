//! carreview CLI entry point.

use clap::Parser;

use carreview_rag::cli::{commands, handle_error, Cli, Commands};
use carreview_rag::infrastructure::config::ConfigLoader;
use carreview_rag::infrastructure::logging::LoggerImpl;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json = cli.json;

    let config = match ConfigLoader::resolve(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => handle_error(err, json),
    };

    let _logger = match LoggerImpl::init(&config.logging) {
        Ok(logger) => logger,
        Err(err) => handle_error(err, json),
    };

    let result = match cli.command {
        Commands::Corpus => commands::corpus::execute(&config, json),
        Commands::Index => commands::index::execute(&config, json).await,
        Commands::Ingest => commands::ingest::execute(&config, json).await,
        Commands::Query(args) => commands::query::execute(args, &config, json).await,
        Commands::Entities(args) => commands::entities::execute(args, &config, json),
    };

    if let Err(err) = result {
        handle_error(err, json);
    }
}
