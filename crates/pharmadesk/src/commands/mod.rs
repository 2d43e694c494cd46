//! Command dispatch: CLI args -> guarded core calls -> output formatting.

pub mod auth;
pub mod config_cmd;
pub mod owners;
pub mod pharmacies;
pub mod references;
pub mod shifts;
pub mod users;
pub mod util;

use pharmadesk_core::{Console, Route};
use secrecy::SecretString;

use crate::cli::{Command, GlobalOpts};
use crate::config::{Profile, TokenStore};
use crate::error::CliError;

/// Everything a handler needs besides its own arguments.
pub struct Context {
    pub console: Console,
    pub tokens: TokenStore,
    pub profile_name: String,
    pub profile: Option<Profile>,
}

impl Context {
    /// Adopt `--token` or the stored token, if any.
    fn restore_session(&self, global: &GlobalOpts) -> Result<(), CliError> {
        let token = match global.token {
            Some(ref token) => Some(SecretString::from(token.clone())),
            None => self.tokens.load()?,
        };
        self.console.restore(token);
        Ok(())
    }
}

/// Screen each command belongs to, for the login guard.
fn route_for(cmd: &Command) -> Route {
    match cmd {
        Command::Owners(_) => Route::Owners,
        Command::Pharmacies(_) | Command::References(_) => Route::Pharmacies,
        Command::Users(_) => Route::Users,
        Command::Shifts(_) => Route::Shifts,
        Command::Login(_) => Route::Login,
        Command::Logout | Command::Config(_) | Command::Completions(_) => Route::Home,
    }
}

/// Dispatch a backend-bound command to its handler.
pub async fn dispatch(cmd: Command, ctx: &Context, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Login(args) => return auth::login(ctx, args, global).await,
        Command::Logout => return auth::logout(ctx, global),
        _ => {}
    }

    ctx.restore_session(global)?;
    ctx.console.open(route_for(&cmd))?;

    let result = match cmd {
        Command::Owners(args) => owners::handle(ctx, args, global).await,
        Command::Pharmacies(args) => pharmacies::handle(ctx, args, global).await,
        Command::Users(args) => users::handle(ctx, args, global).await,
        Command::References(args) => references::handle(ctx, args, global).await,
        Command::Shifts(args) => shifts::handle(ctx, args, global).await,
        // Handled above or before dispatch
        Command::Login(_) | Command::Logout | Command::Config(_) | Command::Completions(_) => {
            Ok(())
        }
    };

    if let Err(CliError::SessionExpired { .. }) = result {
        ctx.console.logout();
        if global.token.is_none() {
            ctx.tokens.delete()?;
        }
    }
    result
}
