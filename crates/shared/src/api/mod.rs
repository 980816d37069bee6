use const_format::concatcp;
pub mod payloads;

pub const STATIC_BASE_PATH: &str = "/static/";
pub const WASM_BASE_PATH: &str = "/wasm/";
pub const MANIFEST_PATH: &str = "/manifest.json";

/// Name the application reports from the health probe
pub const APP_NAME: &str = "colegiospro";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Object {
    /// JavaScript bootstrap registered as the service worker
    ServiceWorker,
    /// wasm-bindgen glue loaded by the bootstrap
    ServiceWorkerBindings,
    ServiceWorkerWasm,
    Manifest,
    Health,
}

impl Object {
    pub const fn path(&self) -> &str {
        use Object::*;
        match self {
            ServiceWorker => "/sw.js",
            ServiceWorkerBindings => concatcp!(WASM_BASE_PATH, "service_worker.js"),
            ServiceWorkerWasm => concatcp!(WASM_BASE_PATH, "service_worker_bg.wasm"),
            Manifest => MANIFEST_PATH,
            Health => "/health",
        }
    }
}
