//! Stock movement commands.

use inventory_panel_client::views::{MovementFormView, MovementListView};
use inventory_panel_core::filter::MovementFilter;
use inventory_panel_core::models::MovementKind;
use inventory_panel_core::routes::Route;
use inventory_panel_core::types::{MovementId, ProductId};

use super::{CliError, Context, finish};
use crate::output;

/// List movements, optionally of one kind.
///
/// # Errors
///
/// Returns an error if not signed in.
pub async fn list(ctx: &Context, filter: MovementFilter) -> Result<(), CliError> {
    let mut view = MovementListView::new(ctx.api.clone(), ctx.open(Route::Movements)?);
    finish(view.init().await)?;
    view.set_filter(filter);
    output::movements(&view.visible());
    Ok(())
}

/// Record a movement and print the product's resulting stock.
///
/// # Errors
///
/// Returns an error if the input is invalid or the server rejects it,
/// e.g. for an outbound quantity above the current stock.
pub async fn create(
    ctx: &Context,
    product_id: ProductId,
    kind: MovementKind,
    quantity: i64,
    description: Option<String>,
) -> Result<(), CliError> {
    let mut view = MovementFormView::new(ctx.api.clone(), ctx.open(Route::NewMovement)?);
    view.form.draft.product_id = Some(product_id);
    view.form.draft.kind = Some(kind);
    view.form.draft.quantity = Some(quantity);
    view.form.draft.description = description.unwrap_or_default();

    view.form.mark_all_touched();
    if !view.form.is_valid() {
        return Err(view.form.visible_errors().into());
    }
    finish(view.submit().await)?;

    if let Some(stock) = view.new_stock() {
        output::line(&format!("New stock for product {product_id}: {stock}"));
    }
    Ok(())
}

/// Delete a movement record. The product's stock is left as is.
///
/// # Errors
///
/// Returns an error if the caller is not an admin or the server refuses.
pub async fn delete(ctx: &Context, id: MovementId) -> Result<(), CliError> {
    let session = ctx.open_admin(Route::Movements)?;
    let deleted = ctx.api.delete_movement(&session, id).await?;
    output::line(if deleted.message.is_empty() {
        "Movement deleted"
    } else {
        &deleted.message
    });
    if let Some(warning) = &deleted.warning {
        output::line(warning);
    }
    Ok(())
}
