//! Service worker entry points
//!
//! The JavaScript bootstrap served at `/sw.js` forwards each event to one of
//! the `worker_*` functions below and passes the returned promise to
//! `event.waitUntil` so the browser keeps the worker alive until it settles.

use std::fmt::Display;

use console_error_panic_hook::set_once as set_panic_hook;
use gloo::utils::format::JsValueSerdeExt;
use js_sys::Promise;
use serde_json::Value;
use shared::{
    agent::{self, intercepts, WorkerScope},
    utils::tracing::configure_tracing_once as configure_tracing,
    AgentConfig, Variant,
};
use tracing::{error, warn};
use wasm_bindgen::{prelude::wasm_bindgen, JsValue};
use wasm_bindgen_futures::future_to_promise;
use web_sys::{
    ExtendableMessageEvent, FetchEvent, NotificationEvent, PushEvent, ServiceWorkerGlobalScope,
};

mod error;
pub use error::*;

mod scope;
pub use scope::*;

fn init() {
    set_panic_hook();
    configure_tracing();
}

fn variant_config(variant: &str) -> Result<&'static AgentConfig, JsValue> {
    let variant: Variant = variant
        .parse()
        .map_err(|e| log_error("variant", e))?;
    Ok(variant.config())
}

/// Logs the error and turns it into something a promise can reject with
fn log_error<E: Display>(context: &str, e: E) -> JsValue {
    let message = format!("{context}: {e}");
    error!("{message}");
    JsValue::from(js_sys::Error::new(&message))
}

#[wasm_bindgen]
pub fn worker_install(sw: ServiceWorkerGlobalScope, variant: String) -> Result<Promise, JsValue> {
    init();
    let config = variant_config(&variant)?;
    let scope = WebScope::new(sw);

    Ok(future_to_promise(async move {
        agent::install(&scope, config)
            .await
            .map_err(|e| log_error("install", e))?;
        Ok(JsValue::undefined())
    }))
}

#[wasm_bindgen]
pub fn worker_activate(sw: ServiceWorkerGlobalScope, variant: String) -> Result<Promise, JsValue> {
    init();
    let config = variant_config(&variant)?;
    let scope = WebScope::new(sw);

    Ok(future_to_promise(async move {
        agent::activate(&scope, config)
            .await
            .map_err(|e| log_error("activate", e))?;
        Ok(JsValue::undefined())
    }))
}

/// Resolves with the response for an intercepted request
///
/// The bootstrap decides synchronously whether to intercept and hands this
/// promise to `respondWith` straight away, before the wasm has loaded. The
/// cache write for a fresh response is left running under `waitUntil`
#[wasm_bindgen]
pub fn worker_fetch(
    sw: ServiceWorkerGlobalScope,
    variant: String,
    event: FetchEvent,
) -> Result<Promise, JsValue> {
    init();
    let config = variant_config(&variant)?;
    let request = event.request();
    let method = request.method();
    let url = request.url();
    let scope = WebScope::new(sw);
    let request = WebRequest(request);

    Ok(future_to_promise(async move {
        if !intercepts(config, &method, &url) {
            warn!("Not intercepting {method} {url}, passing it to the network");
            let response = scope
                .fetch(&request)
                .await
                .map_err(|e| log_error("fetch", e))?;
            return Ok(JsValue::from(response.0));
        }

        let fetched = agent::fetch(&scope, config, request)
            .await
            .map_err(|e| log_error("fetch", e))?;

        if let Some(store) = fetched.store {
            let scope = scope.clone();
            event.wait_until(&future_to_promise(async move {
                if let Err(e) = store.write(&scope, config).await {
                    warn!("Failed to cache {url}: {e}");
                }
                Ok(JsValue::undefined())
            }))?;
        }

        Ok(JsValue::from(fetched.response.0))
    }))
}

#[wasm_bindgen]
pub fn worker_push(
    sw: ServiceWorkerGlobalScope,
    variant: String,
    event: PushEvent,
) -> Result<Promise, JsValue> {
    init();
    let config = variant_config(&variant)?;
    let data = event.data().map(|d| d.text());
    let scope = WebScope::new(sw);

    Ok(future_to_promise(async move {
        agent::push(&scope, config, data)
            .await
            .map_err(|e| log_error("push", e))?;
        Ok(JsValue::undefined())
    }))
}

#[wasm_bindgen]
pub fn worker_notification_click(
    sw: ServiceWorkerGlobalScope,
    variant: String,
    event: NotificationEvent,
) -> Result<Promise, JsValue> {
    init();
    let config = variant_config(&variant)?;
    let scope = WebScope::new(sw);
    let clicked = WebNotificationClick(event);

    Ok(future_to_promise(async move {
        agent::notification_click(&scope, config, &clicked)
            .await
            .map_err(|e| log_error("notification_click", e))?;
        Ok(JsValue::undefined())
    }))
}

#[wasm_bindgen]
pub fn worker_message(
    sw: ServiceWorkerGlobalScope,
    event: ExtendableMessageEvent,
) -> Result<Promise, JsValue> {
    init();
    let data = event.data();
    let data: Value = JsValueSerdeExt::into_serde(&data).unwrap_or(Value::Null);
    let scope = WebScope::new(sw);

    Ok(future_to_promise(async move {
        agent::message(&scope, data)
            .await
            .map_err(|e| log_error("message", e))?;
        Ok(JsValue::undefined())
    }))
}
