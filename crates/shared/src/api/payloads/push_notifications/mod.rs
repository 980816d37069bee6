mod notification;
pub use notification::*;
