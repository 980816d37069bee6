use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const SKIP_WAITING: &str = "SKIP_WAITING";

/// Messages a controlled page posts to the worker
#[derive(Debug, Clone, PartialEq)]
pub enum PageMessage {
    SkipWaiting,
    Unknown(Value),
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
enum TaggedPageMessage {
    SkipWaiting,
}

impl From<Value> for PageMessage {
    fn from(value: Value) -> Self {
        // Older pages post the bare string
        if value.as_str() == Some(SKIP_WAITING) {
            return PageMessage::SkipWaiting;
        }

        match TaggedPageMessage::deserialize(&value) {
            Ok(TaggedPageMessage::SkipWaiting) => PageMessage::SkipWaiting,
            Err(_) => PageMessage::Unknown(value),
        }
    }
}

/// Messages the worker posts to a window client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClientMessage {
    OpenChat { message: Value },
}
