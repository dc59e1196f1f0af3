use std::net::TcpListener;

use anyhow::Context;
use env_logger::Env;
use harvest::{
    configuration::get_configuration,
    services::resolve_credentials,
    startup::{build_crawler, run},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let configuration = get_configuration().context("Failed to read configuration.")?;
    let credentials =
        resolve_credentials(&configuration.linkedin).context("Failed to resolve credentials.")?;

    let address = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener =
        TcpListener::bind(&address).with_context(|| format!("Failed to bind {}", address))?;
    log::info!("Listening on {}", address);

    let crawler = build_crawler(&configuration, credentials);

    run(listener, crawler, configuration.export.clone())?.await?;
    Ok(())
}
