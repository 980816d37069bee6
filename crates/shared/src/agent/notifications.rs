use tracing::{debug, info, instrument};

use super::{AgentError, ClickedNotification, ResultContext, WindowClient, WorkerScope};
use crate::{
    api::payloads::{ClientMessage, NotificationData, NotificationPayload},
    config::AgentConfig,
};

/// What a notification click ended up doing
#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    /// An open tab was focused. `messaged` is true if it was sent OPEN_CHAT
    Focused { url: String, messaged: bool },
    /// No tab was open so a new one was opened at `url`
    Opened { url: String },
}

/// Shows a notification for a push message
///
/// `data` is the push message body as text, if it had one
#[instrument(skip_all)]
pub async fn push<S: WorkerScope>(
    scope: &S,
    config: &AgentConfig,
    data: Option<String>,
) -> Result<NotificationPayload, AgentError<S::Error>> {
    let notification = NotificationPayload::from_push_data(data.as_deref(), config);
    debug!(title = %notification.title, url = %notification.data.url, "Showing notification");

    scope
        .show_notification(&notification)
        .await
        .context("registration::show_notification")?;

    Ok(notification)
}

fn click_data<N: ClickedNotification>(config: &AgentConfig, clicked: &N) -> NotificationData {
    NotificationData::from_stored(clicked.data().as_ref(), config)
}

/// Focuses an open tab for the site (telling it to open the chat if the push
/// carried a chat message) or opens a new one
#[instrument(skip_all)]
pub async fn notification_click<S: WorkerScope, N: ClickedNotification>(
    scope: &S,
    config: &AgentConfig,
    clicked: &N,
) -> Result<ClickOutcome, AgentError<S::Error>> {
    // Chrome doesn't close it by itself
    clicked.close();

    let data = click_data(config, clicked);
    debug!(action = %clicked.action(), url = %data.url, "Notification clicked");

    let origin = scope.origin();
    let clients = scope
        .window_clients()
        .await
        .context("sw::clients::match_all")?;

    if let Some(client) = clients.iter().find(|c| c.url().starts_with(&origin)) {
        let url = client.url();
        info!("Focusing {url}");
        scope.focus(client).await.context("client::focus")?;

        let messaged = match data.chat_message {
            Some(message) => {
                scope
                    .post_message(client, &ClientMessage::OpenChat { message })
                    .context("client::post_message")?;
                true
            }
            None => false,
        };

        return Ok(ClickOutcome::Focused { url, messaged });
    }

    info!("Opening {}", data.url);
    scope
        .open_window(&data.url)
        .await
        .context("sw::clients::open_window")?;

    Ok(ClickOutcome::Opened { url: data.url })
}
