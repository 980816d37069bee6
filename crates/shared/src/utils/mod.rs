#[cfg(feature = "wasm")]
pub mod tracing;

#[cfg(feature = "backend")]
mod backend;
#[cfg(feature = "backend")]
pub use backend::*;
