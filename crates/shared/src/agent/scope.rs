use std::fmt::{Debug, Display};

use async_trait::async_trait;
use serde_json::Value;

use crate::api::payloads::{ClientMessage, NotificationPayload};

pub trait AgentRequest {
    fn url(&self) -> String;
}

pub trait AgentResponse {
    /// True for a 2xx status
    fn ok(&self) -> bool;
    fn status(&self) -> u16;
}

pub trait WindowClient {
    fn url(&self) -> String;
}

/// The notification a `notificationclick` event was raised for
pub trait ClickedNotification {
    fn close(&self);
    /// Whatever was stored in the notification's `data` when it was shown
    fn data(&self) -> Option<Value>;
    /// The action button that was clicked, empty for the notification body
    fn action(&self) -> String;
}

/// The platform capabilities the agent needs from its host
///
/// Futures are `?Send` because the browser implementation holds `JsValue`s
#[async_trait(?Send)]
pub trait WorkerScope {
    type Request: AgentRequest;
    type Response: AgentResponse;
    type Cache;
    type Client: WindowClient;
    type Error: Debug + Display;

    /// Origin of the worker's location, e.g. `https://colegiospro.org.pe`
    fn origin(&self) -> String;

    /// A GET request for `url`
    fn new_request(&self, url: &str) -> Result<Self::Request, Self::Error>;

    /// A second handle to the response whose body can be consumed separately
    fn clone_response(&self, response: &Self::Response) -> Result<Self::Response, Self::Error>;

    /// Fetch from the network. Err means no response at all (offline, dns, ...),
    /// an http error status is still Ok
    async fn fetch(&self, request: &Self::Request) -> Result<Self::Response, Self::Error>;

    /// Opens the named bucket, creating it if needed
    async fn open_cache(&self, name: &str) -> Result<Self::Cache, Self::Error>;
    async fn cache_put(
        &self,
        cache: &Self::Cache,
        request: &Self::Request,
        response: Self::Response,
    ) -> Result<(), Self::Error>;
    async fn cache_match(
        &self,
        cache: &Self::Cache,
        request: &Self::Request,
    ) -> Result<Option<Self::Response>, Self::Error>;
    async fn cache_names(&self) -> Result<Vec<String>, Self::Error>;
    /// Returns false if there was no bucket with that name
    async fn delete_cache(&self, name: &str) -> Result<bool, Self::Error>;

    async fn skip_waiting(&self) -> Result<(), Self::Error>;
    async fn claim_clients(&self) -> Result<(), Self::Error>;

    async fn show_notification(&self, notification: &NotificationPayload)
        -> Result<(), Self::Error>;

    /// Every window client, including ones this worker doesn't control yet
    async fn window_clients(&self) -> Result<Vec<Self::Client>, Self::Error>;
    async fn focus(&self, client: &Self::Client) -> Result<(), Self::Error>;
    fn post_message(&self, client: &Self::Client, message: &ClientMessage)
        -> Result<(), Self::Error>;
    async fn open_window(&self, url: &str) -> Result<(), Self::Error>;
}
