//! Dashboard command.

use inventory_panel_client::views::DashboardView;
use inventory_panel_core::routes::Route;

use super::{CliError, Context, finish};
use crate::output;

/// Load and print the dashboard.
///
/// # Errors
///
/// Returns an error if not signed in or any of the dashboard reads fails.
pub async fn show(ctx: &Context) -> Result<(), CliError> {
    let mut view = DashboardView::new(ctx.api.clone(), ctx.open(Route::Dashboard)?);
    finish(view.init().await)?;

    if let Some(snapshot) = view.snapshot() {
        output::dashboard(snapshot, &view.movement_chart(), &view.ranking_chart());
    }
    Ok(())
}
