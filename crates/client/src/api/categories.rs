//! Category endpoints.

use inventory_panel_core::models::{Category, CategoryRequest};
use inventory_panel_core::types::CategoryId;
use tracing::{debug, instrument};

use super::{ApiClient, CategoryList, CategoryResponse, CategorySaved, MessageResponse};
use crate::error::ApiError;
use crate::session::SessionContext;

impl ApiClient {
    /// List every category.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self, session))]
    pub async fn list_categories(
        &self,
        session: &SessionContext,
    ) -> Result<Vec<Category>, ApiError> {
        let list: CategoryList = self.get(session, "/categories").await?;
        Ok(list.categories)
    }

    /// Get a single category.
    ///
    /// # Errors
    ///
    /// Returns error if the category does not exist or the request fails.
    #[instrument(skip(self, session), fields(category_id = %id))]
    pub async fn get_category(
        &self,
        session: &SessionContext,
        id: CategoryId,
    ) -> Result<Category, ApiError> {
        let response: CategoryResponse = self.get(session, &format!("/categories/{id}")).await?;
        Ok(response.category)
    }

    /// Create a category.
    ///
    /// # Errors
    ///
    /// Returns error if the name is taken or the request fails.
    #[instrument(skip(self, session, request), fields(name = %request.name))]
    pub async fn create_category(
        &self,
        session: &SessionContext,
        request: &CategoryRequest,
    ) -> Result<CategorySaved, ApiError> {
        let saved: CategorySaved = self.post(session, "/categories", request).await?;
        debug!(category_id = %saved.category.id, "Created category");
        Ok(saved)
    }

    /// Replace a category's fields.
    ///
    /// # Errors
    ///
    /// Returns error if the category does not exist or the request fails.
    #[instrument(skip(self, session, request), fields(category_id = %id))]
    pub async fn update_category(
        &self,
        session: &SessionContext,
        id: CategoryId,
        request: &CategoryRequest,
    ) -> Result<CategorySaved, ApiError> {
        self.put(session, &format!("/categories/{id}"), request)
            .await
    }

    /// Delete a category.
    ///
    /// # Errors
    ///
    /// Returns error if the category does not exist, still has products, or
    /// the request fails.
    #[instrument(skip(self, session), fields(category_id = %id))]
    pub async fn delete_category(
        &self,
        session: &SessionContext,
        id: CategoryId,
    ) -> Result<String, ApiError> {
        let response: MessageResponse = self
            .delete(session, &format!("/categories/{id}"))
            .await?;
        Ok(response.message)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::ClientConfig;

    async fn setup() -> (MockServer, ApiClient) {
        let server = MockServer::start().await;
        let config = ClientConfig::default()
            .with_api_url(&format!("{}/api", server.uri()))
            .unwrap();
        (server, ApiClient::new(&config).unwrap())
    }

    #[tokio::test]
    async fn test_create_and_update_category() {
        let (server, client) = setup().await;
        Mock::given(method("POST"))
            .and(path("/api/categories"))
            .and(body_json(json!({"name": "Herramientas", "description": ""})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "message": "Categoría creada",
                "category": {"id": 4, "name": "Herramientas", "description": ""}
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/api/categories/4"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "Categoría actualizada",
                "category": {"id": 4, "name": "Ferretería", "description": "Todo"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let session = SessionContext::new("t", None);
        let created = client
            .create_category(
                &session,
                &CategoryRequest {
                    name: "Herramientas".to_owned(),
                    description: String::new(),
                },
            )
            .await
            .unwrap();
        assert_eq!(created.category.id, CategoryId::new(4));

        let updated = client
            .update_category(
                &session,
                CategoryId::new(4),
                &CategoryRequest {
                    name: "Ferretería".to_owned(),
                    description: "Todo".to_owned(),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.category.name, "Ferretería");
    }

    #[tokio::test]
    async fn test_delete_category_conflict_surfaces_message() {
        let (server, client) = setup().await;
        Mock::given(method("DELETE"))
            .and(path("/api/categories/2"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": "No se puede eliminar una categoría con productos"
            })))
            .mount(&server)
            .await;

        let error = client
            .delete_category(&SessionContext::new("t", None), CategoryId::new(2))
            .await
            .unwrap_err();
        assert_eq!(error.status(), Some(400));
        assert!(error.server_message().unwrap().contains("productos"));
    }
}
