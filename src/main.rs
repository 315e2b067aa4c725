use anyhow::Context;
use catalog_api::{CatalogApiClient, CatalogApiConfig};
use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use scan_relocate::cli::Cli;
use scan_relocate::{credentials, driver, manifest};

fn init_tracing(log_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    init_tracing(&args.log_level);

    // Manifest validation failures are the one defined non-zero exit status.
    let manifest = match manifest::load(&args.manifest) {
        Ok(manifest) => manifest,
        Err(error) => {
            eprintln!("{error}");
            std::process::exit(1);
        }
    };

    let credentials = credentials::load(&args.credentials)?;
    let config = CatalogApiConfig::new(
        credentials.hostname,
        credentials.client_id,
        credentials.client_secret,
    )
    .with_local_bearer(args.local_bearer);

    let client = CatalogApiClient::new(config)?;
    let token = client
        .request_access_token()
        .await
        .context("requesting access token")?;
    let mut session = client
        .connect(&token)
        .await
        .context("connecting to the catalog channel")?;

    let run_result = driver::run(&mut session, manifest.strategy, &manifest.records).await;
    // The session is released exactly once, on both exit paths.
    if let Err(error) = session.close().await {
        tracing::warn!(%error, "catalog session did not close cleanly");
    }

    let summary = run_result?;
    println!("{summary}");
    Ok(())
}
