use anyhow::{Context, Result};
use fritzbox_client::data::LogCategory;
use fritzbox_client::{logger, Client, Config};
use log::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    logger::init(config.log_level).context("couldn't initialize logger")?;

    let category = match std::env::args().nth(1) {
        None => LogCategory::All,
        Some(arg) => arg
            .parse::<i64>()
            .ok()
            .and_then(LogCategory::from_id)
            .with_context(|| format!("unknown log category {arg:?}, expected 0 to 5"))?,
    };

    let client = Client::from_config(&config).await?;
    let session = client.login(&config.username, &config.password).await?;

    let logs = client.logs(&session).await?;
    let logs = logs.filter_category(category);
    info!("fetched {} log(s) in {:?}", logs.len(), category);

    // oldest first
    for entry in logs.iter().rev() {
        println!("{}", entry);
    }

    client.logout(session).await?;
    Ok(())
}
