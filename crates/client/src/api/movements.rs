//! Stock movement endpoints.

use inventory_panel_core::models::{Movement, MovementKind, MovementRequest};
use inventory_panel_core::types::{MovementId, ProductId};
use tracing::{debug, instrument, warn};

use super::{ApiClient, MovementCreated, MovementDeleted, MovementList, MovementResponse};
use crate::error::ApiError;
use crate::session::SessionContext;

impl ApiClient {
    /// List every movement, newest first as ordered by the server.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self, session))]
    pub async fn list_movements(
        &self,
        session: &SessionContext,
    ) -> Result<Vec<Movement>, ApiError> {
        let list: MovementList = self.get(session, "/movements").await?;
        debug!(count = list.movements.len(), "Fetched movements");
        Ok(list.movements)
    }

    /// Get a single movement.
    ///
    /// # Errors
    ///
    /// Returns error if the movement does not exist or the request fails.
    #[instrument(skip(self, session), fields(movement_id = %id))]
    pub async fn get_movement(
        &self,
        session: &SessionContext,
        id: MovementId,
    ) -> Result<Movement, ApiError> {
        let response: MovementResponse = self.get(session, &format!("/movements/{id}")).await?;
        Ok(response.movement)
    }

    /// Movements of one kind.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self, session), fields(kind = %kind))]
    pub async fn movements_by_kind(
        &self,
        session: &SessionContext,
        kind: MovementKind,
    ) -> Result<Vec<Movement>, ApiError> {
        let list: MovementList = self
            .get(session, &format!("/movements/type/{}", kind.wire_name()))
            .await?;
        Ok(list.movements)
    }

    /// Movements of one product.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self, session), fields(product_id = %product))]
    pub async fn movements_by_product(
        &self,
        session: &SessionContext,
        product: ProductId,
    ) -> Result<Vec<Movement>, ApiError> {
        let list: MovementList = self
            .get(session, &format!("/movements/product/{product}"))
            .await?;
        Ok(list.movements)
    }

    /// Record a movement. The server adjusts the product's stock.
    ///
    /// # Errors
    ///
    /// Returns error if the product does not exist, an outbound quantity
    /// exceeds the stock, or the request fails.
    #[instrument(
        skip(self, session, request),
        fields(product_id = %request.product_id, kind = %request.kind, quantity = request.quantity)
    )]
    pub async fn create_movement(
        &self,
        session: &SessionContext,
        request: &MovementRequest,
    ) -> Result<MovementCreated, ApiError> {
        let created: MovementCreated = self.post(session, "/movements", request).await?;
        debug!(
            movement_id = %created.movement.id,
            new_stock = created.new_stock,
            "Recorded movement"
        );
        Ok(created)
    }

    /// Delete a movement record. Admin only; stock is not reverted.
    ///
    /// # Errors
    ///
    /// Returns error if the movement does not exist, the caller is not an
    /// admin, or the request fails.
    #[instrument(skip(self, session), fields(movement_id = %id))]
    pub async fn delete_movement(
        &self,
        session: &SessionContext,
        id: MovementId,
    ) -> Result<MovementDeleted, ApiError> {
        let deleted: MovementDeleted = self.delete(session, &format!("/movements/{id}")).await?;
        if let Some(warning) = &deleted.warning {
            warn!(%warning, "Movement deleted");
        }
        Ok(deleted)
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

    fn movement_json(id: u64, kind: &str) -> serde_json::Value {
        json!({
            "id": id,
            "product_id": 2,
            "user_id": 1,
            "type": kind,
            "quantity": 5,
            "description": null,
            "movement_date": "2026-02-10T12:00:00Z"
        })
    }

    #[tokio::test]
    async fn test_create_movement_reports_new_stock() {
        let (server, client) = setup().await;
        Mock::given(method("POST"))
            .and(path("/api/movements"))
            .and(body_json(json!({"product_id": 2, "type": "salida", "quantity": 5})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "message": "Movimiento registrado",
                "movement": movement_json(9, "salida"),
                "nuevo_stock": 10
            })))
            .expect(1)
            .mount(&server)
            .await;

        let request = MovementRequest {
            product_id: ProductId::new(2),
            kind: MovementKind::Out,
            quantity: 5,
            description: None,
        };
        let created = client
            .create_movement(&SessionContext::new("t", None), &request)
            .await
            .unwrap();
        assert_eq!(created.new_stock, 10);
        assert_eq!(created.movement.kind, MovementKind::Out);
    }

    #[tokio::test]
    async fn test_insufficient_stock_is_rejected_by_server() {
        let (server, client) = setup().await;
        Mock::given(method("POST"))
            .and(path("/api/movements"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({"error": "Stock insuficiente"})),
            )
            .mount(&server)
            .await;

        let request = MovementRequest {
            product_id: ProductId::new(2),
            kind: MovementKind::Out,
            quantity: 500,
            description: None,
        };
        let error = client
            .create_movement(&SessionContext::new("t", None), &request)
            .await
            .unwrap_err();
        assert_eq!(error.server_message(), Some("Stock insuficiente"));
    }

    #[tokio::test]
    async fn test_by_kind_uses_wire_name() {
        let (server, client) = setup().await;
        Mock::given(method("GET"))
            .and(path("/api/movements/type/entrada"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "movements": [movement_json(1, "entrada")],
                "total": 1,
                "type": "entrada"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let movements = client
            .movements_by_kind(&SessionContext::anonymous(), MovementKind::In)
            .await
            .unwrap();
        assert_eq!(movements.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_movement_keeps_warning() {
        let (server, client) = setup().await;
        Mock::given(method("DELETE"))
            .and(path("/api/movements/9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "Movimiento eliminado",
                "warning": "El stock del producto no fue revertido"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let deleted = client
            .delete_movement(&SessionContext::new("t", None), MovementId::new(9))
            .await
            .unwrap();
        assert!(deleted.warning.is_some());
    }
}
