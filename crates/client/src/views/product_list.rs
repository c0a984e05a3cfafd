//! Product catalogue screen.

use inventory_panel_core::filter::{CategoryFilter, ProductFilter, StockFilter};
use inventory_panel_core::models::{Category, Product};
use inventory_panel_core::routes::Route;
use inventory_panel_core::types::ProductId;
use tracing::{debug, error, instrument};

use super::{DisposeHandle, Effects, Lifecycle};
use crate::api::ApiClient;
use crate::error::ApiError;
use crate::notice::Notice;
use crate::session::SessionContext;

/// Product list with local search, category and stock filters.
///
/// Products are fetched once per load; filtering never hits the server.
#[derive(Debug)]
pub struct ProductListView {
    api: ApiClient,
    session: SessionContext,
    lifecycle: Lifecycle,
    loading: bool,
    products: Vec<Product>,
    categories: Vec<Category>,
    filter: ProductFilter,
}

impl ProductListView {
    #[must_use]
    pub fn new(api: ApiClient, session: SessionContext) -> Self {
        Self {
            api,
            session,
            lifecycle: Lifecycle::default(),
            loading: true,
            products: Vec::new(),
            categories: Vec::new(),
            filter: ProductFilter::default(),
        }
    }

    /// Load products and categories.
    ///
    /// The two loads are independent. A failed product load yields an error
    /// notice; a failed category load only leaves the selector empty.
    #[instrument(skip(self))]
    pub async fn init(&mut self) -> Effects {
        let (products, categories) = tokio::join!(
            self.api.list_products(&self.session),
            self.api.list_categories(&self.session),
        );
        if self.lifecycle.is_disposed() {
            debug!("Product list disposed; discarding load");
            return Effects::none();
        }

        match categories {
            Ok(categories) => self.categories = categories,
            Err(e) => error!(error = %e, "Failed to load categories"),
        }
        self.apply_products(products)
    }

    /// Refetch the products, keeping the current filter.
    pub async fn reload(&mut self) -> Effects {
        self.loading = true;
        let products = self.api.list_products(&self.session).await;
        if self.lifecycle.is_disposed() {
            return Effects::none();
        }
        self.apply_products(products)
    }

    fn apply_products(&mut self, products: Result<Vec<Product>, ApiError>) -> Effects {
        self.loading = false;
        match products {
            Ok(products) => {
                self.products = products;
                Effects::none()
            }
            Err(e) => {
                error!(error = %e, "Failed to load products");
                Effects::notice(Notice::from_api_error(&e, "Error loading products"))
            }
        }
    }

    /// Delete a product, then reload the list.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete(&mut self, id: ProductId) -> Effects {
        let result = self.api.delete_product(&self.session, id).await;
        if self.lifecycle.is_disposed() {
            return Effects::none();
        }
        match result {
            Ok(message) => {
                debug!(%message, "Product deleted");
                self.reload().await
            }
            Err(e) => {
                error!(error = %e, "Failed to delete product");
                Effects::notice(Notice::from_api_error(&e, "Error deleting product"))
            }
        }
    }

    /// Products passing the current filter, in server order.
    #[must_use]
    pub fn visible(&self) -> Vec<Product> {
        self.filter.apply(&self.products)
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.filter.search = term.into();
    }

    pub const fn set_category(&mut self, category: CategoryFilter) {
        self.filter.category = category;
    }

    pub const fn set_stock(&mut self, stock: StockFilter) {
        self.filter.stock = stock;
    }

    /// Reset every selector to match everything.
    pub fn clear_filters(&mut self) {
        self.filter.clear();
    }

    #[must_use]
    pub const fn filter(&self) -> &ProductFilter {
        &self.filter
    }

    /// Every loaded product, unfiltered.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Categories for the category selector.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether create, edit and delete actions should be offered.
    #[must_use]
    pub fn can_manage(&self) -> bool {
        self.session.is_admin()
    }

    #[must_use]
    pub const fn detail_route(id: ProductId) -> Route {
        Route::ProductDetail(id)
    }

    #[must_use]
    pub const fn edit_route(id: ProductId) -> Route {
        Route::EditProduct(id)
    }

    #[must_use]
    pub fn dispose_handle(&self) -> DisposeHandle {
        self.lifecycle.handle()
    }

    pub fn dispose(&self) {
        self.lifecycle.dispose();
    }
}
