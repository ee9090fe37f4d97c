//! Session commands: login, logout, session state.

use secrecy::SecretString;

use ecollect_core::SessionState;

use crate::cli::{GlobalOpts, LoginArgs};
use crate::commands::Ctx;
use crate::error::CliError;

pub async fn login(ctx: &Ctx, args: LoginArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let username = match args.username {
        Some(username) => username,
        None => dialoguer::Input::new()
            .with_prompt("Username")
            .interact_text()
            .map_err(|e| CliError::Io(std::io::Error::other(e)))?,
    };

    let password = match args.password {
        Some(password) => SecretString::from(password),
        None => SecretString::from(
            rpassword::prompt_password("Password: ").map_err(CliError::Io)?,
        ),
    };

    ctx.client
        .login(&username, &password)
        .await
        .map_err(ecollect_core::CoreError::from)?;

    if !global.quiet {
        eprintln!("Signed in as {username}.");
    }
    Ok(())
}

pub fn logout(ctx: &Ctx, global: &GlobalOpts) -> Result<(), CliError> {
    ctx.client.session().logout();
    if !global.quiet {
        eprintln!("Signed out.");
    }
    Ok(())
}

pub fn session(ctx: &Ctx) -> Result<(), CliError> {
    match ctx.client.session().state() {
        SessionState::Authenticated => println!("authenticated"),
        SessionState::Anonymous => println!("anonymous"),
    }
    Ok(())
}
