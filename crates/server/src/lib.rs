use axum::{
    http::{header::CONTENT_TYPE, HeaderValue},
    middleware,
    routing::get,
    Router,
};
use shared::api::Object;
use tower::ServiceBuilder;
use tower_http::{
    services::{ServeDir, ServeFile},
    set_header::SetResponseHeaderLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

pub mod cli;
pub use cli::Cli;

pub mod routes;

const MANIFEST_CONTENT_TYPE: &str = "application/manifest+json";

pub fn router(args: &Cli) -> Router {
    Router::new()
        .route(Object::Health.path(), get(routes::health))
        .merge(routes::service_worker::router(args.variant))
        .route_service(
            Object::Manifest.path(),
            ServiceBuilder::new()
                .layer(SetResponseHeaderLayer::overriding(
                    CONTENT_TYPE,
                    HeaderValue::from_static(MANIFEST_CONTENT_TYPE),
                ))
                .service(ServeFile::new(args.assets_dir.join("manifest.json"))),
        )
        .fallback_service(ServeDir::new(&args.assets_dir))
        .layer(middleware::from_fn(routes::redirect_to_https))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

#[cfg(test)]
mod test {
    use std::{fs, path::PathBuf};

    use axum::{
        body::{to_bytes, Body},
        http::{header::LOCATION, Request, StatusCode},
    };
    use shared::Variant;
    use tower::ServiceExt;

    use super::*;
    use crate::routes::service_worker::SERVICE_WORKER_ALLOWED;

    fn assets_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("colegiospro-server-{name}"));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("manifest.json"), r#"{"name":"ColegiosPro"}"#).unwrap();
        fs::write(dir.join("index.html"), "<h1>ColegiosPro</h1>").unwrap();
        dir
    }

    fn cli(name: &str, variant: Variant) -> Cli {
        Cli {
            assets_dir: assets_dir(name),
            variant,
            port: 0,
            bind_addr: "127.0.0.1".to_string(),
        }
    }

    async fn get(app: Router, uri: &str) -> axum::response::Response {
        app.oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_service_worker_has_root_scope() {
        let app = router(&cli("sw", Variant::Landing));

        let response = get(app, "/sw.js").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[SERVICE_WORKER_ALLOWED], "/");
        assert_eq!(response.headers()[CONTENT_TYPE], "application/javascript");
        assert!(body_string(response)
            .await
            .contains("const VARIANT = 'landing';"));
    }

    #[tokio::test]
    async fn test_health() {
        let app = router(&cli("health", Variant::App));

        let response = get(app, "/health").await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body, serde_json::json!({"status": "ok", "app": "colegiospro"}));
    }

    #[tokio::test]
    async fn test_manifest_content_type() {
        let app = router(&cli("manifest", Variant::App));

        let response = get(app, "/manifest.json").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CONTENT_TYPE], MANIFEST_CONTENT_TYPE);
        assert_eq!(body_string(response).await, r#"{"name":"ColegiosPro"}"#);
    }

    #[tokio::test]
    async fn test_static_files() {
        let app = router(&cli("static", Variant::App));

        let response = get(app.clone(), "/").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "<h1>ColegiosPro</h1>");

        let response = get(app, "/static/missing.css").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_plain_http_is_redirected() {
        let app = router(&cli("redirect", Variant::App));

        let response = app
            .oneshot(
                Request::get("/chat")
                    .header("x-forwarded-proto", "http")
                    .header("host", "colegiospro.org.pe")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(response.headers()[LOCATION], "https://colegiospro.org.pe/chat");
    }
}
