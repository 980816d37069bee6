//! The JavaScript registered as the service worker
//!
//! wasm can't be registered directly so a small script loads the
//! wasm-bindgen output and forwards every event to the matching `worker_*`
//! export, keeping the worker alive with the promise it returns.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{
        header::{CACHE_CONTROL, CONTENT_TYPE},
        HeaderName, HeaderValue,
    },
    response::IntoResponse,
    routing::get,
    Router,
};
use shared::{api::Object, Variant};
use tower::ServiceBuilder;
use tower_http::set_header::SetResponseHeaderLayer;

pub const SERVICE_WORKER_ALLOWED: HeaderName = HeaderName::from_static("service-worker-allowed");

static LISTENER_TEMPLATE: &str = "self.addEventListener('NAME', event => LISTENER);\n";

/// `run(...)` waits for the wasm to load. respondWith has to be called
/// synchronously so fetch decides in JS whether to intercept and hands over a
/// promise that waits for the wasm. A worker restarted by a request answers it
/// like any other
static LISTENERS: [(&str, &str); 6] = [
    (
        "install",
        "event.waitUntil(run(() => worker_install(self, VARIANT)))",
    ),
    (
        "activate",
        "event.waitUntil(run(() => worker_activate(self, VARIANT)))",
    ),
    (
        "fetch",
        "intercepts(event.request) && event.respondWith(run(() => worker_fetch(self, VARIANT, event)))",
    ),
    (
        "push",
        "event.waitUntil(run(() => worker_push(self, VARIANT, event)))",
    ),
    (
        "notificationclick",
        "event.waitUntil(run(() => worker_notification_click(self, VARIANT, event)))",
    ),
    (
        "message",
        "event.waitUntil(run(() => worker_message(self, event)))",
    ),
];

pub fn render(variant: Variant) -> String {
    // A json string or null is a valid JS literal
    let marker = serde_json::to_string(&variant.config().live_path_marker)
        .unwrap_or_else(|_| "null".to_string());

    let mut script = format!(
        "importScripts('{bindings}');\n\
         \n\
         const VARIANT = '{variant}';\n\
         const LIVE_PATH_MARKER = {marker};\n\
         const {{ worker_install, worker_activate, worker_fetch, worker_push, \
         worker_notification_click, worker_message }} = wasm_bindgen;\n\
         \n\
         const loading = wasm_bindgen('{wasm}');\n\
         const run = handler => loading.then(handler);\n\
         const intercepts = request => request.method === 'GET' \
         && !(LIVE_PATH_MARKER && request.url.includes(LIVE_PATH_MARKER));\n\
         \n",
        bindings = Object::ServiceWorkerBindings.path(),
        wasm = Object::ServiceWorkerWasm.path(),
    );

    for (name, listener) in LISTENERS {
        script += &LISTENER_TEMPLATE
            .replace("NAME", name)
            .replace("LISTENER", listener);
    }
    script
}

#[derive(Debug, Clone)]
struct Bootstrap(Arc<str>);

async fn handler(State(Bootstrap(script)): State<Bootstrap>) -> impl IntoResponse {
    (
        [
            (CONTENT_TYPE, "application/javascript"),
            // The browser checks for a new worker on every navigation
            (CACHE_CONTROL, "no-cache"),
        ],
        script.to_string(),
    )
}

pub fn router(variant: Variant) -> Router {
    let bootstrap = Bootstrap(render(variant).into());

    Router::new()
        .route(
            Object::ServiceWorker.path(),
            get(handler).layer(
                ServiceBuilder::new()
                    // Allow the worker to control the whole site
                    .layer(SetResponseHeaderLayer::if_not_present(
                        SERVICE_WORKER_ALLOWED,
                        HeaderValue::from_static("/"),
                    )),
            ),
        )
        .with_state(bootstrap)
}
