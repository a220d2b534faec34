use axum::{http::HeaderValue, middleware, routing::get, Router};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::{
    app_state::AppState,
    middleware::tracing::observability_middleware,
    modules::documents::routes::document_routes,
    modules::health::routes::health_routes,
    modules::identity::routes::identity_routes,
};

pub fn create_router(state: AppState) -> Router {
    let api_v1 = identity_routes().merge(document_routes());

    let mut router = Router::new()
        .route("/", get(hello))
        .merge(health_routes())
        .nest("/api/v1", api_v1)
        .layer(middleware::from_fn(observability_middleware));

    if !state.env.app.cors_origins.is_empty() {
        let origins: Vec<HeaderValue> = state
            .env
            .app
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        router = router.layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    router.with_state(state)
}

async fn hello() -> &'static str {
    "GDR Backend says hello!\n"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use crate::config::{
        AppConfig, AuthConfig, Config, DatabaseConfig, Environment, ServerConfig,
    };

    fn test_state() -> AppState {
        let config = Config {
            server: ServerConfig {
                host: "127.0.0.1".parse().unwrap(),
                port: 8000,
            },
            database: DatabaseConfig {
                url: "postgres://postgres@127.0.0.1:59999/gdr_test".to_string(),
                max_connections: Some(1),
                min_connections: Some(1),
            },
            auth: AuthConfig {
                secret_key: "test-secret".to_string(),
                access_token_expire_minutes: 30,
            },
            app: AppConfig {
                name: "gdr-backend-test".to_string(),
                environment: Environment::Development,
                cors_origins: vec![],
            },
        };
        // Lazy pool pointed at a closed port: nothing connects until a
        // query runs, and any query fails fast.
        let pool = PgPoolOptions::new()
            .acquire_timeout(std::time::Duration::from_secs(2))
            .connect_lazy(&config.database.url)
            .unwrap();
        AppState::new(pool, config)
    }

    #[tokio::test]
    async fn root_route_responds() {
        let app = create_router(test_state());
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn health_probe_degrades_when_database_is_unreachable() {
        let app = create_router(test_state());
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "DEGRADED");
        assert_eq!(body["service"], "gdr-backend-test");
        assert_eq!(body["dependencies"][0]["name"], "database");
        assert_eq!(body["dependencies"][0]["status"], "ERROR");
    }
}
