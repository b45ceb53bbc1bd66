//! Main application router.

use crate::{
    controllers::{health_controller, transaction_controller},
    middleware::logging_middleware,
    openapi::ApiDoc,
    state::AppState,
};
use axum::{http::HeaderValue, middleware, routing::get, Router};
use kasir_config::ServerConfig;
use kasir_repository::DatabasePoolInterface;
use kasir_service::TransactionService;
use shaku::{HasComponent, Module};
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Creates the main application router from a Shaku module.
pub fn create_router<M>(module: &M, server_config: &ServerConfig) -> Router
where
    M: Module + HasComponent<dyn TransactionService> + HasComponent<dyn DatabasePoolInterface>,
{
    build_router(AppState::from_module(module), server_config)
}

/// Creates the main application router around an explicit state.
///
/// Transaction routes live under `server_config.base_path`; health checks,
/// Swagger UI and the OpenAPI document stay at the root.
pub fn build_router(state: AppState, server_config: &ServerConfig) -> Router {
    let base_path = server_config.base_path.trim_end_matches('/');
    let api_router = if base_path.is_empty() {
        transaction_controller::router()
    } else {
        Router::new().nest(base_path, transaction_controller::router())
    };

    let router = Router::new()
        .merge(health_controller::router())
        .merge(api_router)
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/", get(root))
        .layer(TimeoutLayer::new(server_config.request_timeout()))
        .layer(CompressionLayer::new())
        .layer(create_cors_layer(server_config))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(logging_middleware));

    info!(
        "Router created with transaction endpoints at {}/transaction and Swagger UI at /swagger-ui",
        base_path
    );
    router
}

/// Creates a CORS layer based on server configuration.
fn create_cors_layer(server_config: &ServerConfig) -> CorsLayer {
    if !server_config.cors_enabled {
        return CorsLayer::new();
    }
    if server_config.cors_origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = server_config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Root endpoint handler.
async fn root() -> &'static str {
    "Kasir API v1"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{app, app_with, body_json, get_request, post_json, StubPool, StubService};
    use axum::http::StatusCode;
    use serde_json::json;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn create_body() -> serde_json::Value {
        json!({"name": "John Doe", "menu": "Pizza", "price": 10, "qty": 2, "payment": "Cash"})
    }

    #[tokio::test]
    async fn test_create_returns_201_envelope() {
        let response = app()
            .oneshot(post_json("/rekadigital-api/transaction", &create_body()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["code"], 201);
        assert_eq!(body["status"], "Created");
        assert_eq!(body["data"]["name"], "John Doe");
        assert_eq!(body["data"]["total"], 20);
        assert!(body["data"]["id"].is_string());
        assert!(body.get("error").is_none());
    }

    #[tokio::test]
    async fn test_then_list_shows_the_sale() {
        let service = Arc::new(StubService::default());
        let router = app_with(service.clone(), StubPool::healthy());

        router
            .clone()
            .oneshot(post_json("/rekadigital-api/transaction", &create_body()))
            .await
            .unwrap();
        let response = router
            .oneshot(get_request(
                "/rekadigital-api/transaction?limit=1&page=1&query=pizza&customer=john",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "OK");
        assert_eq!(body["data"]["total_rows"], 1);
        assert_eq!(body["data"]["total_pages"], 1);
        assert_eq!(body["data"]["current_page"], 1);
        assert_eq!(body["data"]["rows"][0]["menu"], "Pizza");
    }

    #[tokio::test]
    async fn test_list_tolerates_garbage_paging() {
        let service = Arc::new(StubService::default());
        let response = app_with(service.clone(), StubPool::healthy())
            .oneshot(get_request("/rekadigital-api/transaction?limit=ten&page=x"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let seen = service.last_options().unwrap();
        assert_eq!((seen.limit, seen.page), (0, 0));
    }

    #[tokio::test]
    async fn test_validation_failure_is_400_with_fields() {
        let mut body = create_body();
        body["qty"] = json!(0);
        body["menu"] = json!(" ");

        let response = app()
            .oneshot(post_json("/rekadigital-api/transaction", &body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["code"], 400);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        let fields: Vec<&str> = body["error"]["details"]
            .as_array()
            .unwrap()
            .iter()
            .map(|d| d["field"].as_str().unwrap())
            .collect();
        assert_eq!(fields, vec!["menu", "qty"]);
    }

    #[tokio::test]
    async fn test_malformed_json_is_400() {
        let response = app()
            .oneshot(
                axum::http::Request::post("/rekadigital-api/transaction")
                    .header("content-type", "application/json")
                    .body(axum::body::Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], "INVALID_JSON");
    }

    #[tokio::test]
    async fn test_service_failure_is_500_envelope() {
        let service = Arc::new(StubService::failing());
        let response = app_with(service, StubPool::healthy())
            .oneshot(get_request("/rekadigital-api/transaction"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["code"], 500);
        assert_eq!(body["error"]["code"], "DATABASE_ERROR");
        assert!(body.get("data").is_none());
    }

    #[tokio::test]
    async fn test_routes_outside_base_path_are_404() {
        let response = app().oneshot(get_request("/transaction")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        for path in ["/health", "/live", "/ready"] {
            let response = app().oneshot(get_request(path)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{path}");
        }
    }

    #[tokio::test]
    async fn test_ready_reports_unreachable_database() {
        let response = app_with(Arc::new(StubService::default()), StubPool::unhealthy())
            .oneshot(get_request("/ready"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_openapi_document_lists_transaction_path() {
        let response = app().oneshot(get_request("/api-docs/openapi.json")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let doc = body_json(response).await;
        assert!(doc["paths"]["/transaction"].is_object());
    }
}
