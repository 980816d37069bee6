use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::config::AgentConfig;

pub const VIBRATE_PATTERN: [u32; 3] = [200, 100, 200];
pub const ACTION_OPEN: &str = "open";
pub const ACTION_REPLY: &str = "reply";

const CHAT_MESSAGE: &str = "chatMessage";

fn string_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    let value = object.get(key)?;
    match value.as_str() {
        Some(s) => Some(s.to_string()),
        None => {
            if !value.is_null() {
                debug!("Ignoring {key}: expected a string, got {value}");
            }
            None
        }
    }
}

fn chat_message_field(object: &Map<String, Value>) -> Option<Value> {
    object.get(CHAT_MESSAGE).filter(|v| !v.is_null()).cloned()
}

/// Body of a push message as sent by the push service. Every field is optional
/// and read on its own, a field of the wrong type is dropped without losing
/// the others
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PushPayload {
    pub title: Option<String>,
    pub body: Option<String>,
    pub icon: Option<String>,
    pub url: Option<String>,
    pub chat_message: Option<Value>,
}

impl From<&Map<String, Value>> for PushPayload {
    fn from(object: &Map<String, Value>) -> Self {
        Self {
            title: string_field(object, "title"),
            body: string_field(object, "body"),
            icon: string_field(object, "icon"),
            url: string_field(object, "url"),
            chat_message: chat_message_field(object),
        }
    }
}

/// Stored on the notification and read back when it's clicked
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationData {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_message: Option<Value>,
}

impl NotificationData {
    /// Reads back the data stored on a clicked notification. Missing or
    /// mistyped fields fall back to the defaults one at a time
    pub fn from_stored(value: Option<&Value>, config: &AgentConfig) -> Self {
        let object = value.and_then(Value::as_object);
        if object.is_none() && value.is_some_and(|v| !v.is_null()) {
            debug!("Notification data isn't an object, using defaults");
        }

        Self {
            url: object
                .and_then(|o| string_field(o, "url"))
                .unwrap_or_else(|| config.default_url.to_string()),
            chat_message: object.and_then(chat_message_field),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationAction {
    pub action: String,
    pub title: String,
}

impl NotificationAction {
    fn new(action: &str, title: &str) -> Self {
        Self {
            action: action.to_string(),
            title: title.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NotificationPayload {
    pub title: String,
    pub body: String,
    pub icon: String,
    pub badge: String,
    pub vibrate: Vec<u32>,
    pub data: NotificationData,
    pub actions: Vec<NotificationAction>,
}

/// The `NotificationOptions` dictionary passed to `showNotification`
#[derive(Debug, Serialize)]
pub struct NotificationOptions<'a> {
    pub body: &'a str,
    pub icon: &'a str,
    pub badge: &'a str,
    pub vibrate: &'a [u32],
    pub data: &'a NotificationData,
    pub actions: &'a [NotificationAction],
}

impl NotificationPayload {
    pub fn defaults(config: &AgentConfig) -> Self {
        Self {
            title: config.default_title.to_string(),
            body: config.default_body.to_string(),
            icon: config.icon.to_string(),
            badge: config.badge.to_string(),
            vibrate: VIBRATE_PATTERN.to_vec(),
            data: NotificationData {
                url: config.default_url.to_string(),
                chat_message: None,
            },
            actions: vec![
                NotificationAction::new(ACTION_OPEN, "Abrir"),
                NotificationAction::new(ACTION_REPLY, "Responder"),
            ],
        }
    }

    /// Builds the notification for a push message. Never fails: a body that
    /// isn't a json object is shown as plain text and a missing body shows the
    /// defaults
    pub fn from_push_data(data: Option<&str>, config: &AgentConfig) -> Self {
        let mut notification = Self::defaults(config);

        let Some(text) = data else {
            return notification;
        };

        match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(object)) => notification.apply(PushPayload::from(&object)),
            Ok(_) => {
                debug!("Push data is json but not an object, using it as the body");
                notification.body = text.to_string();
            }
            Err(e) => {
                debug!("Push data isn't a json payload ({e}), using it as the body");
                if !text.trim().is_empty() {
                    notification.body = text.to_string();
                }
            }
        }

        notification
    }

    fn apply(&mut self, payload: PushPayload) {
        let PushPayload {
            title,
            body,
            icon,
            url,
            chat_message,
        } = payload;

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(body) = body {
            self.body = body;
        }
        if let Some(icon) = icon {
            self.icon = icon;
        }
        if let Some(url) = url {
            self.data.url = url;
        }
        self.data.chat_message = chat_message;
    }

    pub fn options(&self) -> NotificationOptions<'_> {
        NotificationOptions {
            body: &self.body,
            icon: &self.icon,
            badge: &self.badge,
            vibrate: &self.vibrate,
            data: &self.data,
            actions: &self.actions,
        }
    }
}
