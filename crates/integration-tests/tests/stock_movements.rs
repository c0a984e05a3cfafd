//! Recording, browsing and deleting stock movements.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use inventory_panel_client::error::ApiError;
use inventory_panel_client::views::{MovementFormView, MovementListView, ProductDetailView, RECENT_MOVEMENTS_LIMIT};
use inventory_panel_core::filter::MovementFilter;
use inventory_panel_core::models::MovementKind;
use inventory_panel_core::routes::Route;
use inventory_panel_core::types::{MovementId, ProductId, Role};
use inventory_panel_integration_tests::{TestContext, movement_json, product_json};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

const BRUSH: (u64, &str) = (2, "Brocha");
const SANDPAPER: (u64, &str) = (4, "Lija");

#[tokio::test]
async fn test_kind_filter_is_local_and_reversible() {
    let ctx = TestContext::new().await;
    Mock::given(method("GET"))
        .and(path("/api/movements"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "movements": [
                movement_json(10, BRUSH, "entrada", 20),
                movement_json(11, BRUSH, "salida", 5),
                movement_json(12, SANDPAPER, "entrada", 8)
            ],
            "total": 3
        })))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let mut view = MovementListView::new(ctx.api.clone(), ctx.sign_in(Role::Employee));
    view.init().await;

    view.set_filter(MovementFilter::Kind(MovementKind::In));
    let visible = view.visible();
    assert_eq!(visible.len(), 2);
    assert!(visible.iter().all(|m| m.kind == MovementKind::In));

    view.set_filter(MovementFilter::Kind(MovementKind::Out));
    assert_eq!(view.visible()[0].id, MovementId::new(11));
    assert_eq!(view.visible()[0].product_label(), "Brocha");

    view.set_filter(MovementFilter::All);
    assert_eq!(view.visible().len(), 3);
}

#[tokio::test]
async fn test_record_outbound_reports_new_stock() {
    let ctx = TestContext::new().await;
    ctx.mount(
        "GET",
        "/products",
        200,
        json!({"products": [product_json(BRUSH.0, BRUSH.1, None, 15)], "total": 1}),
    )
    .await;
    Mock::given(method("POST"))
        .and(path("/api/movements"))
        .and(body_json(json!({
            "product_id": 2,
            "type": "salida",
            "quantity": 6,
            "description": "Venta mostrador"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "message": "Movimiento registrado exitosamente",
            "movement": movement_json(13, BRUSH, "salida", 6),
            "nuevo_stock": 9
        })))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let mut view = MovementFormView::new(ctx.api.clone(), ctx.sign_in(Role::Employee));
    view.init().await;
    view.form.draft.product_id = Some(ProductId::new(BRUSH.0));
    view.form.draft.kind = Some(MovementKind::Out);
    view.form.draft.quantity = Some(6);
    view.form.draft.description = "Venta mostrador".to_owned();

    let effects = view.submit().await;
    assert_eq!(effects.redirect, Some(Route::Movements));
    assert_eq!(view.new_stock(), Some(9));
}

#[tokio::test]
async fn test_zero_quantity_never_reaches_server() {
    let ctx = TestContext::new().await;
    Mock::given(method("POST"))
        .and(path("/api/movements"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&ctx.server)
        .await;

    let mut view = MovementFormView::new(ctx.api.clone(), ctx.sign_in(Role::Employee));
    view.form.draft.product_id = Some(ProductId::new(BRUSH.0));
    view.form.draft.quantity = Some(0);

    assert!(view.submit().await.is_empty());
    assert!(view.form.visible_errors().has("quantity"));
}

#[tokio::test]
async fn test_detail_keeps_latest_movements_only() {
    let ctx = TestContext::new().await;
    let history: Vec<_> = (1..=15)
        .map(|i| movement_json(100 + i, BRUSH, "entrada", 1))
        .collect();
    ctx.mount("GET", "/products/2", 200, json!({"product": product_json(BRUSH.0, BRUSH.1, None, 15)}))
        .await;
    ctx.mount("GET", "/movements/product/2", 200, json!({"movements": history, "total": 15}))
        .await;

    let mut view = ProductDetailView::new(ctx.api.clone(), ctx.sign_in(Role::Admin), ProductId::new(BRUSH.0));
    assert!(view.init().await.is_empty());

    assert_eq!(view.product().unwrap().stock, 15);
    assert_eq!(view.recent_movements().len(), RECENT_MOVEMENTS_LIMIT);
    assert_eq!(view.recent_movements()[0].id, MovementId::new(101));
    assert_eq!(view.edit_route(), Some(Route::EditProduct(ProductId::new(BRUSH.0))));
}

#[tokio::test]
async fn test_delete_by_employee_is_forbidden() {
    let ctx = TestContext::new().await;
    ctx.mount(
        "DELETE",
        "/movements/11",
        403,
        json!({"error": "Acceso denegado: se requiere rol de administrador"}),
    )
    .await;

    let session = ctx.sign_in(Role::Employee);
    let err = ctx.api.delete_movement(&session, MovementId::new(11)).await.unwrap_err();

    assert!(matches!(err, ApiError::Forbidden(_)));
    assert_eq!(
        err.server_message(),
        Some("Acceso denegado: se requiere rol de administrador")
    );
}

#[tokio::test]
async fn test_delete_carries_stock_warning() {
    let ctx = TestContext::new().await;
    ctx.mount(
        "DELETE",
        "/movements/11",
        200,
        json!({
            "message": "Movimiento eliminado",
            "warning": "El stock del producto no fue revertido"
        }),
    )
    .await;

    let session = ctx.sign_in(Role::Admin);
    let deleted = ctx.api.delete_movement(&session, MovementId::new(11)).await.unwrap();

    assert_eq!(deleted.message, "Movimiento eliminado");
    assert!(deleted.warning.is_some());
}
