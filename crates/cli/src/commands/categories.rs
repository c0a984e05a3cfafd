//! Category commands.

use inventory_panel_client::views::CategoryListView;
use inventory_panel_core::routes::Route;
use inventory_panel_core::types::CategoryId;

use super::{CliError, Context, finish};
use crate::output;

/// List categories.
///
/// # Errors
///
/// Returns an error if not signed in or the list cannot be loaded.
pub async fn list(ctx: &Context) -> Result<(), CliError> {
    let mut view = CategoryListView::new(ctx.api.clone(), ctx.open(Route::Categories)?);
    finish(view.init().await)?;
    output::categories(view.categories());
    Ok(())
}

/// Create a category.
///
/// # Errors
///
/// Returns an error if the name is blank or the server rejects it.
pub async fn create(ctx: &Context, name: String, description: String) -> Result<(), CliError> {
    let mut view = CategoryListView::new(ctx.api.clone(), ctx.open(Route::Categories)?);
    view.form.draft.name = name;
    view.form.draft.description = description;
    submit(&mut view).await
}

/// Change a category's name and/or description.
///
/// # Errors
///
/// Returns an error if the category does not exist, the result is invalid
/// or the server rejects it.
pub async fn update(
    ctx: &Context,
    id: CategoryId,
    name: Option<String>,
    description: Option<String>,
) -> Result<(), CliError> {
    let mut view = CategoryListView::new(ctx.api.clone(), ctx.open(Route::Categories)?);
    finish(view.init().await)?;

    let category = view
        .categories()
        .iter()
        .find(|c| c.id == id)
        .cloned()
        .ok_or_else(|| CliError::Rejected(format!("Category {id} not found")))?;
    view.start_edit(&category);
    if let Some(name) = name {
        view.form.draft.name = name;
    }
    if let Some(description) = description {
        view.form.draft.description = description;
    }
    submit(&mut view).await
}

async fn submit(view: &mut CategoryListView) -> Result<(), CliError> {
    view.form.mark_all_touched();
    if !view.form.is_valid() {
        return Err(view.form.visible_errors().into());
    }
    finish(view.submit().await)
}

/// Delete a category.
///
/// # Errors
///
/// Returns an error if the server refuses, e.g. while products still use it.
pub async fn delete(ctx: &Context, id: CategoryId) -> Result<(), CliError> {
    let mut view = CategoryListView::new(ctx.api.clone(), ctx.open(Route::Categories)?);
    finish(view.delete(id).await)
}
