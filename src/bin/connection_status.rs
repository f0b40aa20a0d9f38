use anyhow::{Context, Result};
use fritzbox_client::{logger, Client, Config};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    logger::init(config.log_level).context("couldn't initialize logger")?;

    let client = Client::from_config(&config).await?;
    let session = client.login(&config.username, &config.password).await?;

    let status = client.status(&session).await?;
    let internet = status
        .internet
        .context("overview has no internet connection")?;

    println!("online:     {}", internet.online);
    println!("provider:   {}", internet.provider);
    match internet.connection_time {
        Some(time) => println!("connected:  {}", time),
        None => println!("connected:  -"),
    }
    println!("download:   {} B/s", internet.download);
    println!("upload:     {} B/s", internet.upload);

    let stats = client.traffic_stats(&session).await?;
    println!(
        "traffic:    {} down / {} up",
        stats.downstream_total[0], stats.upstream_total[0]
    );

    client.logout(session).await?;
    Ok(())
}
