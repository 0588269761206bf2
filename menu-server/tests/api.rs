//! HTTP API integration tests (in-memory database, oneshot requests)

use axum::Router;
use axum::body::{Body, to_bytes};
use http::{Method, Request, StatusCode};
use menu_server::api::build_app;
use menu_server::{Config, ServerState};
use serde_json::{Value, json};
use tower::ServiceExt;

async fn app() -> (ServerState, Router) {
    let state = ServerState::in_memory(Config::default()).await.unwrap();
    let app = build_app(&state);
    (state, app)
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create_category(app: &Router, tenant: &str, body: Value) -> Value {
    let (status, resp) = call(
        app,
        Method::POST,
        &format!("/api/tenants/{tenant}/categories"),
        Some(body),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{resp}");
    resp["data"].clone()
}

async fn create_item(app: &Router, tenant: &str, body: Value) -> Value {
    let (status, resp) = call(
        app,
        Method::POST,
        &format!("/api/tenants/{tenant}/menu-items"),
        Some(body),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{resp}");
    resp["data"].clone()
}

#[tokio::test]
async fn health_reports_tenants() {
    let (_, app) = app().await;
    let (status, body) = call(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["tenants"], 2);

    let (status, body) = call(&app, Method::GET, "/health/detailed", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["checks"]["database"]["status"], "ok");
}

#[tokio::test]
async fn unknown_tenant_is_not_found_but_theme_falls_back() {
    let (_, app) = app().await;
    let (status, body) = call(&app, Method::GET, "/api/tenants/nowhere/categories", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 3002);

    let (status, body) = call(&app, Method::GET, "/api/tenants/nowhere/theme", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["isDefault"], true);

    let (_, body) = call(&app, Method::GET, "/api/tenants/Parrilla/theme", None).await;
    assert_eq!(body["data"]["tenantId"], "parrilla");
    assert_eq!(body["data"]["isDefault"], false);
}

#[tokio::test]
async fn category_order_and_nesting_rules() {
    let (_, app) = app().await;
    let entradas = create_category(&app, "demo", json!({"name": "Entradas"})).await;
    let carnes = create_category(&app, "demo", json!({"name": "Carnes"})).await;
    assert_eq!(entradas["order"], 0);
    assert_eq!(entradas["isVisible"], true);
    assert_eq!(carnes["order"], 1);

    let vacuno = create_category(
        &app,
        "demo",
        json!({"name": "Vacuno", "parentCategoryId": carnes["id"]}),
    )
    .await;
    assert_eq!(vacuno["parentCategoryId"], carnes["id"]);

    // grandchild rejected
    let (status, body) = call(
        &app,
        Method::POST,
        "/api/tenants/demo/categories",
        Some(json!({"name": "Bife", "parentCategoryId": vacuno["id"]})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 6103);

    // parent with children cannot be deleted
    let uri = format!("/api/tenants/demo/categories/{}", carnes["id"]);
    let (status, body) = call(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 6102);

    // tenants are isolated
    let (_, body) = call(&app, Method::GET, "/api/tenants/parrilla/categories", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
    let (status, _) = call(&app, Method::GET, &uri.replace("demo", "parrilla"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn menu_item_validation_and_public_view() {
    let (_, app) = app().await;
    let parrilla = create_category(&app, "demo", json!({"name": "Parrilla"})).await;

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/tenants/demo/menu-items",
        Some(json!({"name": "Bife", "price": 10.0})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 7);

    let (status, _) = call(
        &app,
        Method::POST,
        "/api/tenants/demo/menu-items",
        Some(json!({"name": "Bife", "price": -1.0, "categoryId": parrilla["id"]})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    create_item(
        &app,
        "demo",
        json!({
            "name": "Bife de Chorizo",
            "price": 18.5,
            "categoryId": parrilla["id"],
            "searchKeywords": ["Carne"],
        }),
    )
    .await;
    let hidden = create_item(
        &app,
        "demo",
        json!({
            "name": "Entraña",
            "price": 16.0,
            "categoryId": parrilla["id"],
            "isVisible": false,
        }),
    )
    .await;
    create_item(
        &app,
        "demo",
        json!({"name": "Morcilla", "price": 6.0, "categoryId": parrilla["id"], "inStock": false}),
    )
    .await;

    let (status, body) = call(&app, Method::GET, "/api/tenants/demo/menu", None).await;
    assert_eq!(status, StatusCode::OK);
    let sections = body["data"]["sections"].as_array().unwrap();
    assert_eq!(sections.len(), 1);
    let names: Vec<&str> = sections[0]["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Bife de Chorizo"]);
    assert_eq!(body["data"]["settings"]["currency"], "EUR");

    // keyword search, hidden item never public
    let (_, body) = call(&app, Method::GET, "/api/tenants/demo/menu?search=CARNE", None).await;
    assert_eq!(body["data"]["totalItems"], 1);
    let (_, body) = call(&app, Method::GET, "/api/tenants/demo/menu?search=entrana", None).await;
    assert_eq!(body["data"]["totalItems"], 0);

    // admin view ignores stock
    let (_, body) = call(&app, Method::GET, "/api/tenants/demo/admin/catalog", None).await;
    assert_eq!(body["data"]["totalItems"], 2);
    let (_, body) = call(
        &app,
        Method::GET,
        "/api/tenants/demo/admin/catalog?includeHidden=true&search=entrana",
        None,
    )
    .await;
    assert_eq!(body["data"]["sections"][0]["items"][0]["id"], hidden["id"]);
}

#[tokio::test]
async fn drag_reorder_stays_within_category() {
    let (_, app) = app().await;
    let a = create_category(&app, "demo", json!({"name": "A"})).await;
    let b = create_category(&app, "demo", json!({"name": "B"})).await;
    let milanesa = create_item(
        &app,
        "demo",
        json!({"name": "Milanesa", "categoryId": a["id"], "order": 0}),
    )
    .await;
    let ensalada = create_item(
        &app,
        "demo",
        json!({"name": "Ensalada", "categoryId": a["id"], "order": 1}),
    )
    .await;
    let cerveza = create_item(
        &app,
        "demo",
        json!({"name": "Cerveza", "categoryId": b["id"], "order": 0}),
    )
    .await;

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/tenants/demo/menu-items/reorder",
        Some(json!({"sourceId": ensalada["id"], "targetId": milanesa["id"]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let seq = body["data"].as_array().unwrap();
    assert_eq!(seq[0]["name"], "Ensalada");
    assert_eq!(seq[0]["order"], 0);
    assert_eq!(seq[1]["name"], "Milanesa");
    assert_eq!(seq[1]["order"], 1);

    let uri = format!("/api/tenants/demo/menu-items/{}", cerveza["id"]);
    let (_, body) = call(&app, Method::GET, &uri, None).await;
    assert_eq!(body["data"]["order"], 0);

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/tenants/demo/menu-items/reorder",
        Some(json!({"sourceId": cerveza["id"], "targetId": milanesa["id"]})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 6201);
}

#[tokio::test]
async fn batch_sort_order_and_change_stream() {
    let (state, app) = app().await;
    let mut rx = state.bus.subscribe();

    let first = create_category(&app, "demo", json!({"name": "Postres"})).await;
    let second = create_category(&app, "demo", json!({"name": "Bebidas"})).await;
    let created = rx.recv().await.unwrap();
    assert_eq!(created.resource, "category");
    assert_eq!(created.version, 1);
    let _ = rx.recv().await.unwrap();

    let (status, _) = call(
        &app,
        Method::PUT,
        "/api/tenants/demo/categories/sort-order",
        Some(json!({"items": [{"id": first["id"], "order": 1}, {"id": second["id"], "order": 0}]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let reordered = rx.recv().await.unwrap();
    assert_eq!(reordered.version, 3);
    assert_eq!(reordered.tenant, "demo");

    let (_, body) = call(&app, Method::GET, "/api/tenants/demo/categories", None).await;
    assert_eq!(body["data"][0]["name"], "Bebidas");
}

#[tokio::test]
async fn keyword_failure_never_blocks_creation() {
    let (_, app) = app().await;
    let (status, body) = call(
        &app,
        Method::POST,
        "/api/tenants/demo/keywords",
        Some(json!({"name": "Bife de Chorizo", "category": "Parrilla"})),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], 9007);

    let parrilla = create_category(&app, "demo", json!({"name": "Parrilla"})).await;
    let item = create_item(
        &app,
        "demo",
        json!({
            "name": "Bife de Chorizo",
            "price": 18.5,
            "categoryId": parrilla["id"],
            "generateKeywords": true,
        }),
    )
    .await;
    assert_eq!(item["searchKeywords"], json!([]));
}

#[tokio::test]
async fn settings_are_tenant_scoped() {
    let (_, app) = app().await;
    let (status, body) = call(
        &app,
        Method::PUT,
        "/api/tenants/demo/settings",
        Some(json!({"name": "Demo", "currency": "usd"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["name"], "Demo");

    let (_, body) = call(&app, Method::GET, "/api/tenants/parrilla/settings", None).await;
    assert_eq!(body["data"]["name"], "");
    assert_eq!(body["data"]["currency"], "EUR");
}
