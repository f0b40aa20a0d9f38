use anyhow::{Context, Result};
use fritzbox_client::{logger, Client, Config};
use log::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    logger::init(config.log_level).context("couldn't initialize logger")?;

    let client = Client::from_config(&config).await?;
    let session = client.login(&config.username, &config.password).await?;

    client.disconnect(&session).await?;
    info!("disconnected, the FRITZ!Box reconnects on its own");

    Ok(())
}
