use anyhow::anyhow;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::args::Cli;
use crate::cli::output::OutputStyle;
use crate::cli::repl;
use crate::core::preview::PreviewStore;
use crate::core::status::AnalysisStatus;
use crate::orchestrator::session::Session;
use crate::service::client::HttpAnalysisClient;
use crate::utils::config::Config;

pub mod cli;
pub mod core;
pub mod orchestrator;
pub mod service;
pub mod utils;

// Build the session from resolved configuration
fn init_session(config: &Config) -> Session<HttpAnalysisClient> {
    let client = HttpAnalysisClient::new(config.api_url.clone());
    Session::new(client, PreviewStore::new(), config.prompt.clone())
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();
    let config = Config::resolve(&cli)?;

    // logs go to stderr so rendered results on stdout stay clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let style = OutputStyle::new(config.use_colors);
    let mut session = init_session(&config);
    tracing::info!(api_url = %config.api_url, "session started");

    if !cli.images.is_empty() {
        repl::upload(&mut session, &cli.images, &style).await;
    }

    if cli.once {
        repl::analyze(&mut session, &style, false).await;
        return match session.state().status() {
            AnalysisStatus::Success => Ok(()),
            AnalysisStatus::Error => Err(anyhow!(
                "{}",
                session.state().error().unwrap_or("analysis failed")
            )),
            _ => Err(anyhow!("no images to analyze")),
        };
    }

    repl::run(&mut session, &style).await?;

    let released = session.clear_all();
    tracing::debug!(released, "session closed");
    Ok(())
}
