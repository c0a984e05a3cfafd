//! Product endpoints.

use inventory_panel_core::models::{Product, ProductRequest};
use inventory_panel_core::types::{CategoryId, ProductId};
use tracing::{debug, instrument};

use super::{ApiClient, MessageResponse, ProductList, ProductResponse, ProductSaved};
use crate::error::ApiError;
use crate::session::SessionContext;

impl ApiClient {
    /// List every product.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self, session))]
    pub async fn list_products(&self, session: &SessionContext) -> Result<Vec<Product>, ApiError> {
        let list: ProductList = self.get(session, "/products").await?;
        debug!(count = list.products.len(), "Fetched products");
        Ok(list.products)
    }

    /// Get a single product.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if no product has this id, or another
    /// error if the request fails.
    #[instrument(skip(self, session), fields(product_id = %id))]
    pub async fn get_product(
        &self,
        session: &SessionContext,
        id: ProductId,
    ) -> Result<Product, ApiError> {
        let response: ProductResponse = self.get(session, &format!("/products/{id}")).await?;
        Ok(response.product)
    }

    /// Products the server considers low on stock.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self, session))]
    pub async fn low_stock_products(
        &self,
        session: &SessionContext,
    ) -> Result<Vec<Product>, ApiError> {
        let list: ProductList = self.get(session, "/products/low-stock").await?;
        Ok(list.products)
    }

    /// Products in one category.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self, session), fields(category_id = %category))]
    pub async fn products_by_category(
        &self,
        session: &SessionContext,
        category: CategoryId,
    ) -> Result<Vec<Product>, ApiError> {
        let list: ProductList = self
            .get(session, &format!("/products/category/{category}"))
            .await?;
        Ok(list.products)
    }

    /// Create a product. Admin only.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Forbidden`] for non-admins, or another error if the
    /// payload is rejected or the request fails.
    #[instrument(skip(self, session, request), fields(name = %request.name))]
    pub async fn create_product(
        &self,
        session: &SessionContext,
        request: &ProductRequest,
    ) -> Result<ProductSaved, ApiError> {
        let saved: ProductSaved = self.post(session, "/products", request).await?;
        debug!(product_id = %saved.product.id, "Created product");
        Ok(saved)
    }

    /// Replace a product's fields. Admin only.
    ///
    /// # Errors
    ///
    /// Returns error if the product does not exist, the caller is not an
    /// admin, or the request fails.
    #[instrument(skip(self, session, request), fields(product_id = %id))]
    pub async fn update_product(
        &self,
        session: &SessionContext,
        id: ProductId,
        request: &ProductRequest,
    ) -> Result<ProductSaved, ApiError> {
        self.put(session, &format!("/products/{id}"), request).await
    }

    /// Delete a product. Admin only.
    ///
    /// # Errors
    ///
    /// Returns error if the product does not exist, the caller is not an
    /// admin, or the request fails.
    #[instrument(skip(self, session), fields(product_id = %id))]
    pub async fn delete_product(
        &self,
        session: &SessionContext,
        id: ProductId,
    ) -> Result<String, ApiError> {
        let response: MessageResponse = self.delete(session, &format!("/products/{id}")).await?;
        debug!("Deleted product");
        Ok(response.message)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use inventory_panel_core::types::Price;
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

    fn product_json(id: u64, stock: u32) -> serde_json::Value {
        json!({
            "id": id,
            "name": format!("Producto {id}"),
            "description": "desc",
            "category_id": 1,
            "price": 12.5,
            "stock": stock,
            "image_url": ""
        })
    }

    #[tokio::test]
    async fn test_list_products_unwraps_envelope() {
        let (server, client) = setup().await;
        Mock::given(method("GET"))
            .and(path("/api/products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "products": [product_json(1, 0), product_json(2, 15)],
                "total": 2
            })))
            .mount(&server)
            .await;

        let products = client
            .list_products(&SessionContext::anonymous())
            .await
            .unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[1].price, Price::from_cents(1250));
        assert_eq!(products[0].image(), None);
    }

    #[tokio::test]
    async fn test_get_missing_product_is_not_found() {
        let (server, client) = setup().await;
        Mock::given(method("GET"))
            .and(path("/api/products/99"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"error": "Producto no encontrado"})),
            )
            .mount(&server)
            .await;

        let error = client
            .get_product(&SessionContext::anonymous(), ProductId::new(99))
            .await
            .unwrap_err();
        assert!(matches!(error, ApiError::NotFound(Some(_))));
    }

    #[tokio::test]
    async fn test_create_product_sends_numeric_price() {
        let (server, client) = setup().await;
        Mock::given(method("POST"))
            .and(path("/api/products"))
            .and(body_json(json!({
                "name": "Martillo",
                "description": "Acero",
                "category_id": 1,
                "price": 9.99,
                "stock": 4
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "message": "Producto creado",
                "product": product_json(5, 4)
            })))
            .expect(1)
            .mount(&server)
            .await;

        let request = ProductRequest {
            name: "Martillo".to_owned(),
            description: "Acero".to_owned(),
            category_id: Some(CategoryId::new(1)),
            price: Price::from_cents(999),
            stock: 4,
            image_url: None,
        };
        let saved = client
            .create_product(&SessionContext::new("t", None), &request)
            .await
            .unwrap();
        assert_eq!(saved.product.id, ProductId::new(5));
        assert_eq!(saved.message, "Producto creado");
    }

    #[tokio::test]
    async fn test_by_category_and_low_stock_paths() {
        let (server, client) = setup().await;
        Mock::given(method("GET"))
            .and(path("/api/products/category/3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"products": [], "total": 0})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/products/low-stock"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "products": [product_json(8, 2)],
                "total": 1
            })))
            .expect(1)
            .mount(&server)
            .await;

        let session = SessionContext::anonymous();
        assert!(
            client
                .products_by_category(&session, CategoryId::new(3))
                .await
                .unwrap()
                .is_empty()
        );
        assert_eq!(client.low_stock_products(&session).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_product_returns_message() {
        let (server, client) = setup().await;
        Mock::given(method("DELETE"))
            .and(path("/api/products/4"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"message": "Producto eliminado"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let message = client
            .delete_product(&SessionContext::new("t", None), ProductId::new(4))
            .await
            .unwrap();
        assert_eq!(message, "Producto eliminado");
    }
}
