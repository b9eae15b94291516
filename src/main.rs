use std::{net::TcpListener, sync::Arc};

use anyhow::Context;
use env_logger::Env;
use lookout::{configuration::get_configuration, services::DuckDuckGoClient, startup::run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let configuration = get_configuration().context("Failed to read configuration.")?;

    let address = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener =
        TcpListener::bind(&address).with_context(|| format!("Failed to bind {}", address))?;
    log::info!(
        "Listening on {} | search settings: {:?}",
        address,
        configuration.search
    );

    let search_client = Arc::new(DuckDuckGoClient::new(&configuration.search));

    run(listener, search_client, configuration.search)?.await?;

    Ok(())
}
