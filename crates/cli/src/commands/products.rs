//! Product commands.

use inventory_panel_client::views::{FormMode, ProductDetailView, ProductFormView, ProductListView};
use inventory_panel_core::filter::{CategoryFilter, StockFilter};
use inventory_panel_core::routes::Route;
use inventory_panel_core::types::ProductId;
use inventory_panel_core::validation::ProductDraft;

use super::{CliError, Context, ProductFields, finish};
use crate::output;

/// List products narrowed by the three panel filters.
///
/// # Errors
///
/// Returns an error if not signed in.
pub async fn list(
    ctx: &Context,
    search: String,
    category: CategoryFilter,
    stock: StockFilter,
) -> Result<(), CliError> {
    let mut view = ProductListView::new(ctx.api.clone(), ctx.open(Route::Products)?);
    finish(view.init().await)?;

    view.set_search(search);
    view.set_category(category);
    view.set_stock(stock);

    let visible = view.visible();
    output::products(&visible);
    output::line(&format!("{} of {} products", visible.len(), view.products().len()));
    Ok(())
}

/// Show a product and its latest movements.
///
/// # Errors
///
/// Returns an error if not signed in or the product cannot be loaded.
pub async fn show(ctx: &Context, id: ProductId) -> Result<(), CliError> {
    let mut view = ProductDetailView::new(ctx.api.clone(), ctx.open(Route::ProductDetail(id))?, id);
    finish(view.init().await)?;

    if let Some(product) = view.product() {
        output::product(product);
    }
    output::movements(view.recent_movements());
    Ok(())
}

/// Create a product from the given fields.
///
/// # Errors
///
/// Returns an error if the caller is not an admin, the fields are invalid
/// or the server rejects them.
pub async fn create(ctx: &Context, fields: ProductFields) -> Result<(), CliError> {
    let view = ProductFormView::new(ctx.api.clone(), ctx.open(Route::NewProduct)?, FormMode::Create);
    save(view, fields).await
}

/// Apply the given fields on top of an existing product.
///
/// # Errors
///
/// Returns an error if not signed in, the product cannot be
/// loaded, the result is invalid or the server rejects it.
pub async fn update(ctx: &Context, id: ProductId, fields: ProductFields) -> Result<(), CliError> {
    let view = ProductFormView::new(
        ctx.api.clone(),
        ctx.open(Route::EditProduct(id))?,
        FormMode::Edit(id),
    );
    save(view, fields).await
}

async fn save(mut view: ProductFormView, fields: ProductFields) -> Result<(), CliError> {
    finish(view.init().await)?;
    apply(&mut view.form.draft, fields);

    view.form.mark_all_touched();
    if !view.form.is_valid() {
        return Err(view.form.visible_errors().into());
    }
    finish(view.submit().await)
}

fn apply(draft: &mut ProductDraft, fields: ProductFields) {
    if let Some(name) = fields.name {
        draft.name = name;
    }
    if let Some(description) = fields.description {
        draft.description = description;
    }
    if let Some(category_id) = fields.category_id {
        draft.category_id = Some(category_id);
    }
    if let Some(price) = fields.price {
        draft.price = Some(price);
    }
    if let Some(stock) = fields.stock {
        draft.stock = Some(stock);
    }
    if let Some(image_url) = fields.image_url {
        draft.image_url = image_url;
    }
}

/// Delete a product.
///
/// # Errors
///
/// Returns an error if not signed in or the server refuses.
pub async fn delete(ctx: &Context, id: ProductId) -> Result<(), CliError> {
    let mut view = ProductListView::new(ctx.api.clone(), ctx.open(Route::Products)?);
    finish(view.delete(id).await)?;
    output::line(&format!("Product {id} deleted"));
    Ok(())
}
