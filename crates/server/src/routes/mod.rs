mod health;
pub use health::*;

pub mod service_worker;

mod https_redirect;
pub use https_redirect::*;
