//! Single product screen.

use inventory_panel_core::models::{Movement, Product};
use inventory_panel_core::routes::Route;
use inventory_panel_core::types::ProductId;
use tracing::{error, instrument};

use super::{DisposeHandle, Effects, Lifecycle};
use crate::api::ApiClient;
use crate::notice::Notice;
use crate::session::SessionContext;

/// How many of the product's movements the detail screen lists.
pub const RECENT_MOVEMENTS_LIMIT: usize = 10;

/// One product plus its latest movements.
#[derive(Debug)]
pub struct ProductDetailView {
    api: ApiClient,
    session: SessionContext,
    lifecycle: Lifecycle,
    id: ProductId,
    loading: bool,
    product: Option<Product>,
    recent_movements: Vec<Movement>,
}

impl ProductDetailView {
    #[must_use]
    pub fn new(api: ApiClient, session: SessionContext, id: ProductId) -> Self {
        Self {
            api,
            session,
            lifecycle: Lifecycle::default(),
            id,
            loading: true,
            product: None,
            recent_movements: Vec::new(),
        }
    }

    /// Load the product and its movement history concurrently.
    ///
    /// A failed product load sends the user back to the list; a failed
    /// history load is only logged.
    #[instrument(skip(self), fields(product_id = %self.id))]
    pub async fn init(&mut self) -> Effects {
        let (product, movements) = tokio::join!(
            self.api.get_product(&self.session, self.id),
            self.api.movements_by_product(&self.session, self.id),
        );
        if self.lifecycle.is_disposed() {
            return Effects::none();
        }

        match movements {
            Ok(mut movements) => {
                movements.truncate(RECENT_MOVEMENTS_LIMIT);
                self.recent_movements = movements;
            }
            Err(e) => error!(error = %e, "Failed to load product movements"),
        }

        match product {
            Ok(product) => {
                self.product = Some(product);
                self.loading = false;
                Effects::none()
            }
            Err(e) => {
                error!(error = %e, "Failed to load product");
                Effects::notice(Notice::error("Error loading product")).then(Route::Products)
            }
        }
    }

    /// Delete the product and return to the list.
    #[instrument(skip(self), fields(product_id = %self.id))]
    pub async fn delete(&mut self) -> Effects {
        if self.product.is_none() {
            return Effects::none();
        }
        let result = self.api.delete_product(&self.session, self.id).await;
        if self.lifecycle.is_disposed() {
            return Effects::none();
        }
        match result {
            Ok(_) => Effects::notice(Notice::success("Product deleted")).then(Route::Products),
            Err(e) => {
                error!(error = %e, "Failed to delete product");
                Effects::notice(Notice::from_api_error(&e, "Error deleting product"))
            }
        }
    }

    /// Route of the edit form, once the product is loaded.
    #[must_use]
    pub fn edit_route(&self) -> Option<Route> {
        self.product.as_ref().map(|p| Route::EditProduct(p.id))
    }

    #[must_use]
    pub const fn product(&self) -> Option<&Product> {
        self.product.as_ref()
    }

    /// Up to [`RECENT_MOVEMENTS_LIMIT`] movements, in server order.
    #[must_use]
    pub fn recent_movements(&self) -> &[Movement] {
        &self.recent_movements
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn dispose_handle(&self) -> DisposeHandle {
        self.lifecycle.handle()
    }

    pub fn dispose(&self) {
        self.lifecycle.dispose();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use inventory_panel_core::types::Role;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, ResponseTemplate};

    use super::*;
    use crate::views::testing::{movement_json, product_json, session, setup};

    #[tokio::test]
    async fn test_keeps_ten_most_recent_movements() {
        let (server, api) = setup().await;
        Mock::given(method("GET"))
            .and(path("/api/products/2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "product": product_json(2, "Tornillo", Some(1), 40)
            })))
            .mount(&server)
            .await;
        let movements: Vec<_> = (1..=12).map(|i| movement_json(i, 2, "entrada", 1)).collect();
        Mock::given(method("GET"))
            .and(path("/api/movements/product/2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "movements": movements,
                "total": 12
            })))
            .mount(&server)
            .await;

        let mut view = ProductDetailView::new(api, session(Role::Employee), ProductId::new(2));
        assert!(view.init().await.is_empty());
        assert_eq!(view.product().unwrap().name, "Tornillo");
        assert_eq!(view.recent_movements().len(), RECENT_MOVEMENTS_LIMIT);
        assert_eq!(view.recent_movements()[0].id.as_u64(), 1);
        assert_eq!(view.edit_route(), Some(Route::EditProduct(ProductId::new(2))));
    }

    #[tokio::test]
    async fn test_missing_product_redirects() {
        let (server, api) = setup().await;
        Mock::given(method("GET"))
            .and(path("/api/products/5"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/movements/product/5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"movements": []})))
            .mount(&server)
            .await;

        let mut view = ProductDetailView::new(api, session(Role::Employee), ProductId::new(5));
        let effects = view.init().await;
        assert_eq!(effects.redirect, Some(Route::Products));
        assert!(view.product().is_none());
    }

    #[tokio::test]
    async fn test_delete_returns_to_list() {
        let (server, api) = setup().await;
        Mock::given(method("GET"))
            .and(path("/api/products/2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "product": product_json(2, "Tornillo", None, 40)
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/movements/product/2"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/products/2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
            .expect(1)
            .mount(&server)
            .await;

        let mut view = ProductDetailView::new(api, session(Role::Admin), ProductId::new(2));
        view.init().await;
        assert!(view.recent_movements().is_empty());

        let effects = view.delete().await;
        assert_eq!(effects.redirect, Some(Route::Products));
    }
}
