//! Command handlers.

pub mod auth;
pub mod config_cmd;
pub mod dashboard;
pub mod kiosks;
pub mod ledger;
pub mod util;

use std::sync::Arc;

use ecollect_core::{AdminClient, ConsoleConfig};

use crate::cli::{Command, GlobalOpts, OutputFormat};
use crate::error::CliError;

/// Everything a connected command needs.
pub struct Ctx {
    pub client: Arc<AdminClient>,
    pub config: ConsoleConfig,
    pub output: OutputFormat,
}

impl Ctx {
    /// View-entry guard: protected commands are reachable only with an
    /// active session. Pure check -- no network call.
    pub fn require_session(&self) -> Result<(), CliError> {
        if self.client.session().is_authenticated() {
            Ok(())
        } else {
            Err(CliError::NotSignedIn)
        }
    }
}

/// Route a connected command to its handler.
pub async fn dispatch(cmd: Command, ctx: &Ctx, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Login(args) => auth::login(ctx, args, global).await,
        Command::Logout => auth::logout(ctx, global),
        Command::Session => auth::session(ctx),

        Command::Dashboard(args) => {
            ctx.require_session()?;
            dashboard::handle(ctx, args, global).await
        }
        Command::Kiosks(args) => {
            ctx.require_session()?;
            kiosks::handle(ctx, args.command, global).await
        }
        Command::Users(args) => {
            ctx.require_session()?;
            ledger::users(ctx, args).await
        }
        Command::Ewaste(args) => {
            ctx.require_session()?;
            ledger::ewaste(ctx, args).await
        }

        // Handled before a context exists.
        Command::Config(_) | Command::Completions(_) => unreachable!("dispatched in main"),
    }
}
