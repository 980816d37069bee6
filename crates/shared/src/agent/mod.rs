//! Event handling for the offline/push agent
//!
//! Each handler is generic over [WorkerScope] so it runs against the browser's
//! `ServiceWorkerGlobalScope` in the worker and against an in-memory scope in
//! tests. Handlers hold no state between events, the cache bucket is the only
//! thing shared between them.

mod error;
pub use error::*;

mod scope;
pub use scope::*;

mod lifecycle;
pub use lifecycle::*;

mod fetch;
pub use fetch::*;

mod notifications;
pub use notifications::*;

#[cfg(test)]
mod memory_scope;
