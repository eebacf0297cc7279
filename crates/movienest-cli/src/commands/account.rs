use std::io::{self, IsTerminal};

use anyhow::anyhow;
use movienest_client::auth;

use crate::cli::{LoginArgs, RegisterArgs};
use crate::client::{AppContext, CliError, CliResult};

pub(crate) async fn handle_register(ctx: &AppContext, args: RegisterArgs) -> CliResult<()> {
    let password = resolve_password(args.password, "Password: ")?;
    let user = auth::register(
        &ctx.api,
        &args.username,
        &password,
        &args.email,
        &args.birth_date,
    )
    .await?;
    println!(
        "Registration successful. Log in with `movienest login --username {}`.",
        user.username
    );
    Ok(())
}

pub(crate) async fn handle_login(ctx: &mut AppContext, args: LoginArgs) -> CliResult<()> {
    let password = resolve_password(args.password, "Password: ")?;
    let user = auth::sign_in(&ctx.api, &mut ctx.session, &args.username, &password).await?;
    println!("Logged in as {}.", user.username);
    Ok(())
}

pub(crate) fn handle_logout(ctx: &mut AppContext) -> CliResult<()> {
    auth::sign_out(&mut ctx.session)?;
    println!("Logged out.");
    Ok(())
}

/// Password from the flag, or prompted for on an interactive terminal.
pub(crate) fn resolve_password(value: Option<String>, prompt: &str) -> CliResult<String> {
    if let Some(value) = value {
        if value.is_empty() {
            return Err(CliError::validation("password cannot be empty"));
        }
        return Ok(value);
    }

    if io::stdin().is_terminal() {
        let pass = rpassword::prompt_password(prompt).map_err(|err| {
            CliError::failure(anyhow!("failed to read password from stdin: {err}"))
        })?;
        if pass.is_empty() {
            return Err(CliError::validation("password cannot be empty"));
        }
        Ok(pass)
    } else {
        Err(CliError::validation(
            "password required; supply via --password when running non-interactively",
        ))
    }
}
