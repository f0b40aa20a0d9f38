use anyhow::{Context, Result};
use dialoguer::theme::ColorfulTheme;
use fritzbox_client::{logger, Client};
use log::LevelFilter;

async fn prompt_endpoint() -> Result<String> {
    tokio::task::spawn_blocking(|| {
        dialoguer::Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt("Endpoint")
            .default(fritzbox_client::config::defaults::ENDPOINT.to_string())
            .report(false)
            .interact_text()
    })
    .await?
    .context("couldn't ask for endpoint")
}

async fn prompt_username(usernames: Vec<String>) -> Result<String> {
    if usernames.is_empty() {
        return Ok(String::new());
    }

    tokio::task::spawn_blocking(move || -> Result<String> {
        let index = dialoguer::Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Select a user")
            .clear(true)
            .default(0)
            .items(&usernames)
            .report(false)
            .interact()?;
        Ok(usernames.into_iter().nth(index).unwrap_or_default())
    })
    .await?
}

async fn prompt_password(username: &str) -> Result<String> {
    let prompt = format!("Enter password for `{username}`");
    tokio::task::spawn_blocking(move || {
        dialoguer::Password::with_theme(&ColorfulTheme::default())
            .with_prompt(&prompt)
            .allow_empty_password(false)
            .report(false)
            .interact()
    })
    .await?
    .context("couldn't ask for password")
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    logger::init(LevelFilter::Info).context("couldn't initialize logger")?;

    let endpoint = prompt_endpoint().await?;
    let client = Client::new(endpoint)?;

    let challenge = client.login_challenge().await?;
    let username = prompt_username(challenge.users).await?;
    let password = prompt_password(&username).await?;

    let session = client.login(&username, &password).await?;
    println!("{}", session);

    Ok(())
}
