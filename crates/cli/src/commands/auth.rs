//! Sign-in, registration and profile commands.

use inventory_panel_client::views::{LoginView, RegisterView, logout as end_session};
use inventory_panel_core::routes::Route;
use inventory_panel_core::types::Role;
use tracing::info;

use super::{CliError, Context, finish};
use crate::output;

/// Log in and persist the session.
///
/// # Errors
///
/// Returns an error if the input is invalid or the server rejects it.
pub async fn login(ctx: &mut Context, email: String, password: String) -> Result<(), CliError> {
    let mut view = LoginView::new(ctx.api.clone());
    view.form.draft.email = email;
    view.form.draft.password = password;
    view.form.mark_all_touched();
    if !view.form.is_valid() {
        return Err(view.form.visible_errors().into());
    }

    let effects = view.submit(&mut ctx.store).await;
    finish(effects)?;
    if let Some(user) = view.session().and_then(|s| s.user()) {
        output::user(user);
    }
    Ok(())
}

/// Create an account and sign in as it.
///
/// # Errors
///
/// Returns an error if the input is invalid or the server rejects it.
pub async fn register(
    ctx: &mut Context,
    username: String,
    email: String,
    password: String,
    role: Option<Role>,
) -> Result<(), CliError> {
    let mut view = RegisterView::new(ctx.api.clone());
    view.form.draft.username = username;
    view.form.draft.email = email;
    view.form.draft.password = password;
    view.form.draft.role = role;
    view.form.mark_all_touched();
    if !view.is_valid() {
        return Err(view.form.visible_errors().into());
    }

    let effects = view.submit(&mut ctx.store).await;
    finish(effects)?;
    if let Some(user) = view.session().and_then(|s| s.user()) {
        output::user(user);
    }
    Ok(())
}

/// Forget the stored session.
///
/// # Errors
///
/// Returns an error if the session file cannot be written.
pub fn logout(ctx: &mut Context) -> Result<(), CliError> {
    finish(end_session(&mut ctx.store)?)?;
    output::line("Signed out");
    Ok(())
}

/// Fetch the profile, refresh the stored copy and print it.
///
/// # Errors
///
/// Returns an error if not signed in or the request fails.
pub async fn whoami(ctx: &mut Context) -> Result<(), CliError> {
    let session = ctx.open(Route::HOME)?;
    let user = ctx.api.profile(&session).await?;
    ctx.store.update_user(&user)?;
    if let Some(started) = ctx.store.started_at()? {
        info!(%started, "Session start");
    }
    output::user(&user);
    Ok(())
}
