use anyhow::Result;
use dialoguer::theme::ColorfulTheme;
use fritzbox_client::Challenge;

fn ask_challenge() -> Result<Challenge> {
    let input: String = dialoguer::Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Challenge")
        .report(false)
        .allow_empty(false)
        .interact_text()?;
    Ok(Challenge::new(input.trim()))
}

fn ask_password() -> Result<String> {
    Ok(dialoguer::Password::with_theme(&ColorfulTheme::default())
        .with_prompt("Password")
        .allow_empty_password(false)
        .report(false)
        .interact()?)
}

fn main() -> Result<()> {
    let challenge = ask_challenge()?;
    let password = ask_password()?;
    println!("{}", challenge.make_response(&password));
    Ok(())
}
