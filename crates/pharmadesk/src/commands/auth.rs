//! Login / logout handlers.

use dialoguer::Input;
use pharmadesk_core::Route;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::cli::{GlobalOpts, LoginArgs};
use crate::config::TokenLocation;
use crate::error::CliError;
use crate::output;

use super::{Context, util};

pub async fn login(ctx: &Context, args: LoginArgs, global: &GlobalOpts) -> Result<(), CliError> {
    ctx.console.open(Route::Login)?;

    let remembered = ctx.profile.as_ref().and_then(|p| p.email.clone());
    let email = match args.email.or(remembered) {
        Some(email) => email,
        None => Input::<String>::new()
            .with_prompt("E-mail")
            .interact_text()
            .map_err(util::prompt_err)?,
    };

    let password = match args.password {
        Some(password) => SecretString::from(password),
        None => SecretString::from(
            rpassword::prompt_password("Password: ").map_err(util::prompt_err)?,
        ),
    };

    if email.trim().is_empty() || password.expose_secret().is_empty() {
        return Err(CliError::MissingFields {
            fields: "e-mail, password".into(),
        });
    }

    let pb = util::spinner("Logging in", global);
    let result = ctx.console.login(email.trim(), &password).await;
    pb.finish_and_clear();
    let route = result?;

    let token = ctx
        .console
        .session()
        .token()
        .ok_or_else(|| CliError::Internal("login succeeded without a token".into()))?;
    let location = ctx.tokens.store(&token)?;
    debug!(?route, ?location, profile = %ctx.profile_name, "session stored");

    output::success(
        &format!("Logged in as {} ({})", email.trim(), describe(&location)),
        global,
    );
    Ok(())
}

pub fn logout(ctx: &Context, global: &GlobalOpts) -> Result<(), CliError> {
    ctx.console.logout();
    ctx.tokens.delete()?;
    output::success("Logged out", global);
    Ok(())
}

fn describe(location: &TokenLocation) -> String {
    match location {
        TokenLocation::Keyring => "token saved in the system keyring".into(),
        TokenLocation::File(path) => format!("token saved to {}", path.display()),
    }
}
