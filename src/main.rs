use clap::Parser;
use signup_backend::api::server;
use signup_backend::cli::Cli;
use signup_backend::logging::init_logging;
use signup_backend::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;

    init_logging(&config.logging);

    server::run(config, cli.frontends()).await
}
