mod push_notifications;
pub use push_notifications::*;

mod messages;
pub use messages::*;
