use clap::Parser;
use green_audit::{Analyzer, server};

mod args;
use args::Args;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    let args = Args::parse();

    let config = match args.load_config() {
        Ok(config) => config,
        Err(e) => {
            ::log::error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    ::log::debug!("Using configuration: {:?}", config);

    ::log::info!(
        "Audits use WebDriver at {} and lighthouse at {}",
        config.audit.webdriver_url,
        config.audit.lighthouse_path
    );

    // Shared collaborators are built once and handed to every request
    let analyzer = match Analyzer::from_config(&config) {
        Ok(analyzer) => analyzer,
        Err(e) => {
            ::log::error!("Failed to build the green hosting client: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server::serve(&config, analyzer).await {
        ::log::error!("Failed to start server on port {}: {}", config.port, e);
        std::process::exit(1);
    }
}
