//! # Server Setup
//!
//! Router construction, tracing setup, and HTTP server startup.

use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::ServerConfig;

/// Install the global tracing subscriber. `LOG_LEVEL` selects the filter
/// (`trace`, `debug`, `info`, `warn`, `error`); anything else means `info`.
pub fn init_tracing() {
    let log_level = std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase();

    let filter = match log_level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {
            tracing_subscriber::EnvFilter::new(&log_level)
        }
        _ => tracing_subscriber::EnvFilter::new("info"),
    };

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .try_init();

    if installed.is_err() {
        warn!("Tracing subscriber already installed");
    }
}

/// Build the router: `/health`, then static files with an `index.html`
/// fallback so client-side routes resolve to the app.
pub fn create_router(config: &ServerConfig) -> Router {
    let static_files =
        ServeDir::new(&config.dist_dir).fallback(ServeFile::new(config.index_file()));

    Router::new()
        .route("/health", get(health))
        .fallback_service(static_files)
        .layer(cors_layer(&config.allowed_origins))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods([Method::GET, Method::HEAD]);

    if allowed_origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Bind and serve until the process is stopped.
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    if !config.index_file().exists() {
        warn!(
            dist_dir = %config.dist_dir.display(),
            "index.html not found; run `trunk build` in web/ first"
        );
    }

    let app = create_router(&config);
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;

    info!(dist_dir = %config.dist_dir.display(), "Serving static bundle");
    info!("SERVER READY: http://{}", config.bind_address);

    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use std::path::PathBuf;
    use tower::ServiceExt;

    const INDEX: &str = "<!DOCTYPE html><html><body>splitsure</body></html>";

    /// Throwaway dist directory with an index page and a stylesheet, removed on drop.
    struct TestDist(PathBuf);

    impl TestDist {
        fn new(name: &str) -> Self {
            let dir = std::env::temp_dir().join(format!(
                "splitsure-server-{}-{}",
                std::process::id(),
                name
            ));
            std::fs::create_dir_all(&dir).unwrap();
            std::fs::write(dir.join("index.html"), INDEX).unwrap();
            std::fs::write(dir.join("style.css"), "body { margin: 0; }").unwrap();
            Self(dir)
        }
    }

    impl Drop for TestDist {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.0);
        }
    }

    fn test_app(name: &str, allowed_origins: Vec<String>) -> (Router, TestDist) {
        let dist = TestDist::new(name);
        let config = ServerConfig {
            dist_dir: dist.0.clone(),
            allowed_origins,
            ..Default::default()
        };
        (create_router(&config), dist)
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _dist) = test_app("health", vec![]);
        let response = app.oneshot(get("/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_root_serves_index() {
        let (app, _dist) = test_app("root", vec![]);
        let response = app.oneshot(get("/")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, INDEX);
    }

    #[tokio::test]
    async fn test_static_file() {
        let (app, _dist) = test_app("static", vec![]);
        let response = app.oneshot(get("/style.css")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/css"
        );
        assert_eq!(body_text(response).await, "body { margin: 0; }");
    }

    #[tokio::test]
    async fn test_client_route_falls_back_to_index() {
        let (app, _dist) = test_app("fallback", vec![]);
        let response = app.oneshot(get("/groups/42/expenses")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, INDEX);
    }

    #[tokio::test]
    async fn test_cors_any_origin() {
        let request = Request::builder()
            .uri("/health")
            .header(header::ORIGIN, "http://localhost:3000")
            .body(Body::empty())
            .unwrap();

        let (app, _dist) = test_app("cors-any", vec![]);
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "*"
        );
    }

    #[test]
    fn test_dist_removed_on_drop() {
        let dist = TestDist::new("cleanup");
        let dir = dist.0.clone();
        assert!(dir.join("index.html").exists());

        drop(dist);
        assert!(!dir.exists());
    }

    #[tokio::test]
    async fn test_cors_origin_list() {
        let (app, _dist) = test_app(
            "cors-list",
            vec!["https://splitsure.app".to_string(), "not a\norigin".to_string()],
        );

        let allowed = Request::builder()
            .uri("/health")
            .header(header::ORIGIN, "https://splitsure.app")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(allowed).await.unwrap();
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "https://splitsure.app"
        );

        let denied = Request::builder()
            .uri("/health")
            .header(header::ORIGIN, "https://evil.example")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(denied).await.unwrap();
        assert!(response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }
}
