//! Product create/edit screen.

use inventory_panel_core::models::Category;
use inventory_panel_core::routes::Route;
use inventory_panel_core::types::ProductId;
use inventory_panel_core::validation::{FormState, ProductDraft};
use tracing::{error, instrument};

use super::{DisposeHandle, Effects, Lifecycle};
use crate::api::ApiClient;
use crate::notice::Notice;
use crate::session::SessionContext;

/// Whether the form creates a new product or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(ProductId),
}

/// Product form.
#[derive(Debug)]
pub struct ProductFormView {
    api: ApiClient,
    session: SessionContext,
    lifecycle: Lifecycle,
    mode: FormMode,
    loading: bool,
    submitting: bool,
    categories: Vec<Category>,
    pub form: FormState<ProductDraft>,
}

impl ProductFormView {
    #[must_use]
    pub fn new(api: ApiClient, session: SessionContext, mode: FormMode) -> Self {
        Self {
            api,
            session,
            lifecycle: Lifecycle::default(),
            mode,
            loading: true,
            submitting: false,
            categories: Vec::new(),
            form: FormState::new(ProductDraft::default()),
        }
    }

    /// Load categories and, in edit mode, the product being edited.
    ///
    /// A product that cannot be loaded sends the user back to the list.
    #[instrument(skip(self), fields(mode = ?self.mode))]
    pub async fn init(&mut self) -> Effects {
        let (api, session, mode) = (&self.api, &self.session, self.mode);
        let product = async move {
            match mode {
                FormMode::Edit(id) => Some(api.get_product(session, id).await),
                FormMode::Create => None,
            }
        };
        let (categories, product) = tokio::join!(api.list_categories(session), product);
        if self.lifecycle.is_disposed() {
            return Effects::none();
        }

        match categories {
            Ok(categories) => self.categories = categories,
            Err(e) => error!(error = %e, "Failed to load categories"),
        }

        match product {
            None => {
                self.loading = false;
                Effects::none()
            }
            Some(Ok(product)) => {
                self.form.draft = ProductDraft::from_product(&product);
                self.loading = false;
                Effects::none()
            }
            Some(Err(e)) => {
                error!(error = %e, "Failed to load product");
                Effects::notice(Notice::error("Error loading product")).then(Route::Products)
            }
        }
    }

    /// Validate and save.
    ///
    /// An invalid draft is not sent; every field is marked touched instead.
    #[instrument(skip(self), fields(mode = ?self.mode))]
    pub async fn submit(&mut self) -> Effects {
        let Ok(request) = self.form.submit() else {
            return Effects::none();
        };

        self.submitting = true;
        let result = match self.mode {
            FormMode::Create => self.api.create_product(&self.session, &request).await,
            FormMode::Edit(id) => self.api.update_product(&self.session, id, &request).await,
        };
        if self.lifecycle.is_disposed() {
            return Effects::none();
        }

        match result {
            Ok(_) => {
                let text = match self.mode {
                    FormMode::Create => "Product created successfully",
                    FormMode::Edit(_) => "Product updated successfully",
                };
                Effects::notice(Notice::success(text)).then(Route::Products)
            }
            Err(e) => {
                error!(error = %e, "Failed to save product");
                self.submitting = false;
                Effects::notice(Notice::from_api_error(&e, "Error saving product"))
            }
        }
    }

    /// Leave without saving.
    #[must_use]
    pub const fn cancel(&self) -> Effects {
        Effects {
            notice: None,
            redirect: Some(Route::Products),
        }
    }

    #[must_use]
    pub const fn mode(&self) -> FormMode {
        self.mode
    }

    #[must_use]
    pub const fn is_edit(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_))
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Categories offered in the category selector.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
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
#[allow(clippy::unwrap_used)]
mod tests {
    use inventory_panel_core::types::Role;
    use rust_decimal::Decimal;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, ResponseTemplate};

    use super::*;
    use crate::notice::NoticeLevel;
    use crate::views::testing::{product_json, session, setup};

    async fn mount_categories(server: &wiremock::MockServer) {
        Mock::given(method("GET"))
            .and(path("/api/categories"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"categories": []})))
            .mount(server)
            .await;
    }

    fn fill(view: &mut ProductFormView) {
        view.form.draft = ProductDraft {
            name: "Sierra".to_owned(),
            description: "Circular".to_owned(),
            category_id: None,
            price: Some(Decimal::new(2500, 2)),
            stock: Some(3),
            image_url: String::new(),
        };
    }

    #[tokio::test]
    async fn test_invalid_draft_is_never_sent() {
        let (server, api) = setup().await;
        mount_categories(&server).await;
        Mock::given(method("POST"))
            .and(path("/api/products"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let mut view = ProductFormView::new(api, session(Role::Admin), FormMode::Create);
        view.init().await;
        assert!(!view.is_loading());

        let effects = view.submit().await;
        assert!(effects.is_empty());
        assert!(view.form.is_touched("name"));
        assert!(view.form.visible_errors().has("description"));
    }

    #[tokio::test]
    async fn test_create_navigates_to_list() {
        let (server, api) = setup().await;
        mount_categories(&server).await;
        Mock::given(method("POST"))
            .and(path("/api/products"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "message": "Producto creado",
                "product": product_json(9, "Sierra", None, 3)
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut view = ProductFormView::new(api, session(Role::Admin), FormMode::Create);
        view.init().await;
        fill(&mut view);

        let effects = view.submit().await;
        assert_eq!(effects.redirect, Some(Route::Products));
        assert_eq!(effects.notice.unwrap().level, NoticeLevel::Success);
    }

    #[tokio::test]
    async fn test_failed_save_stays_on_form_with_server_message() {
        let (server, api) = setup().await;
        mount_categories(&server).await;
        Mock::given(method("PUT"))
            .and(path("/api/products/9"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({"error": "Solo administradores"})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/products/9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "product": product_json(9, "Sierra", None, 3)
            })))
            .mount(&server)
            .await;

        let mut view =
            ProductFormView::new(api, session(Role::Employee), FormMode::Edit(ProductId::new(9)));
        view.init().await;
        assert_eq!(view.form.draft.name, "Sierra");

        let effects = view.submit().await;
        assert_eq!(effects.redirect, None);
        assert_eq!(effects.notice.unwrap().text, "Solo administradores");
        assert!(!view.is_submitting());
    }

    #[tokio::test]
    async fn test_failed_load_redirects_to_list() {
        let (server, api) = setup().await;
        mount_categories(&server).await;
        Mock::given(method("GET"))
            .and(path("/api/products/404"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let mut view =
            ProductFormView::new(api, session(Role::Admin), FormMode::Edit(ProductId::new(404)));
        let effects = view.init().await;
        assert_eq!(effects.redirect, Some(Route::Products));
        assert!(effects.notice.unwrap().is_error());
    }
}
