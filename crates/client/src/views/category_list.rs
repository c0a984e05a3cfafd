//! Category management screen.

use inventory_panel_core::models::Category;
use inventory_panel_core::types::CategoryId;
use inventory_panel_core::validation::{CategoryDraft, FormState};
use tracing::{error, instrument};

use super::{DisposeHandle, Effects, Lifecycle};
use crate::api::ApiClient;
use crate::notice::Notice;
use crate::session::SessionContext;

/// Category list with an inline create/edit form.
#[derive(Debug)]
pub struct CategoryListView {
    api: ApiClient,
    session: SessionContext,
    lifecycle: Lifecycle,
    loading: bool,
    categories: Vec<Category>,
    editing: Option<CategoryId>,
    pub form: FormState<CategoryDraft>,
}

impl CategoryListView {
    #[must_use]
    pub fn new(api: ApiClient, session: SessionContext) -> Self {
        Self {
            api,
            session,
            lifecycle: Lifecycle::default(),
            loading: true,
            categories: Vec::new(),
            editing: None,
            form: FormState::default(),
        }
    }

    #[instrument(skip(self))]
    pub async fn init(&mut self) -> Effects {
        self.reload().await
    }

    /// Refetch the categories.
    pub async fn reload(&mut self) -> Effects {
        self.loading = true;
        let result = self.api.list_categories(&self.session).await;
        if self.lifecycle.is_disposed() {
            return Effects::none();
        }
        self.loading = false;
        match result {
            Ok(categories) => {
                self.categories = categories;
                Effects::none()
            }
            Err(e) => {
                error!(error = %e, "Failed to load categories");
                Effects::notice(Notice::from_api_error(&e, "Error loading categories"))
            }
        }
    }

    /// Load `category` into the form for editing.
    pub fn start_edit(&mut self, category: &Category) {
        self.editing = Some(category.id);
        self.form = FormState::new(CategoryDraft {
            name: category.name.clone(),
            description: category.description.clone(),
        });
    }

    /// Discard the form and return to create mode.
    pub fn reset_form(&mut self) {
        self.editing = None;
        self.form = FormState::default();
    }

    /// Create or update from the form, then reload.
    #[instrument(skip(self), fields(editing = ?self.editing))]
    pub async fn submit(&mut self) -> Effects {
        let Ok(request) = self.form.submit() else {
            return Effects::none();
        };

        let result = match self.editing {
            Some(id) => self.api.update_category(&self.session, id, &request).await,
            None => self.api.create_category(&self.session, &request).await,
        };
        if self.lifecycle.is_disposed() {
            return Effects::none();
        }

        match result {
            Ok(saved) => {
                let fallback = if self.editing.is_some() {
                    "Category updated"
                } else {
                    "Category created"
                };
                self.reset_form();
                let mut effects = self.reload().await;
                effects
                    .notice
                    .get_or_insert_with(|| Notice::server_success(&saved.message, fallback));
                effects
            }
            Err(e) => {
                error!(error = %e, "Failed to save category");
                Effects::notice(Notice::from_api_error(&e, "Error saving category"))
            }
        }
    }

    /// Delete a category, then reload.
    #[instrument(skip(self), fields(category_id = %id))]
    pub async fn delete(&mut self, id: CategoryId) -> Effects {
        let result = self.api.delete_category(&self.session, id).await;
        if self.lifecycle.is_disposed() {
            return Effects::none();
        }
        match result {
            Ok(message) => {
                if self.editing == Some(id) {
                    self.reset_form();
                }
                let mut effects = self.reload().await;
                effects
                    .notice
                    .get_or_insert_with(|| Notice::server_success(&message, "Category deleted"));
                effects
            }
            Err(e) => {
                error!(error = %e, "Failed to delete category");
                Effects::notice(Notice::from_api_error(&e, "Error deleting category"))
            }
        }
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Category currently loaded in the form, if editing.
    #[must_use]
    pub const fn editing(&self) -> Option<CategoryId> {
        self.editing
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
