//! In-memory [WorkerScope] for driving the handlers in tests

use std::{
    cell::{Cell, RefCell},
    collections::{BTreeMap, HashMap},
};

use async_trait::async_trait;
use serde_json::Value;

use super::{AgentRequest, AgentResponse, ClickedNotification, WindowClient, WorkerScope};
use crate::api::payloads::{ClientMessage, NotificationPayload};

pub const ORIGIN: &str = "https://colegiospro.org.pe";

#[derive(Debug, Clone, PartialEq)]
pub struct MemoryRequest {
    pub url: String,
}

impl MemoryRequest {
    pub fn get(url: &str) -> Self {
        Self {
            url: url.to_string(),
        }
    }
}

impl AgentRequest for MemoryRequest {
    fn url(&self) -> String {
        self.url.clone()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemoryResponse {
    pub status: u16,
    pub body: String,
}

impl AgentResponse for MemoryResponse {
    fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    fn status(&self) -> u16 {
        self.status
    }
}

#[derive(Debug, Clone)]
pub struct MemoryClient {
    url: String,
}

impl WindowClient for MemoryClient {
    fn url(&self) -> String {
        self.url.clone()
    }
}

pub struct MemoryNotification {
    data: Option<Value>,
    closed: Cell<bool>,
}

impl MemoryNotification {
    pub fn new(data: Value) -> Self {
        Self {
            data: Some(data),
            closed: Cell::new(false),
        }
    }

    pub fn without_data() -> Self {
        Self {
            data: None,
            closed: Cell::new(false),
        }
    }

    pub fn closed(&self) -> bool {
        self.closed.get()
    }
}

impl ClickedNotification for MemoryNotification {
    fn close(&self) {
        self.closed.set(true);
    }

    fn data(&self) -> Option<Value> {
        self.data.clone()
    }

    fn action(&self) -> String {
        String::new()
    }
}

/// Urls not registered with [MemoryScope::serve] behave as if offline
#[derive(Default)]
pub struct MemoryScope {
    network: RefCell<HashMap<String, MemoryResponse>>,
    caches: RefCell<BTreeMap<String, HashMap<String, MemoryResponse>>>,
    fail_cache_writes: Cell<bool>,
    clients: RefCell<Vec<MemoryClient>>,
    skipped_waiting: Cell<bool>,
    claimed: Cell<bool>,
    notifications: RefCell<Vec<NotificationPayload>>,
    focused: RefCell<Vec<String>>,
    messages: RefCell<Vec<(String, ClientMessage)>>,
    opened: RefCell<Vec<String>>,
}

impl MemoryScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn serve(&self, url: &str, status: u16, body: &str) {
        self.network.borrow_mut().insert(url.to_string(), MemoryResponse {
            status,
            body: body.to_string(),
        });
    }

    pub fn seed_cache(&self, cache: &str, url: &str, body: &str) {
        self.caches
            .borrow_mut()
            .entry(cache.to_string())
            .or_default()
            .insert(url.to_string(), MemoryResponse {
                status: 200,
                body: body.to_string(),
            });
    }

    pub fn fail_cache_writes(&self) {
        self.fail_cache_writes.set(true);
    }

    pub fn open_client(&self, url: &str) {
        self.clients.borrow_mut().push(MemoryClient {
            url: url.to_string(),
        });
    }

    pub fn cached(&self, cache: &str, url: &str) -> Option<MemoryResponse> {
        self.caches
            .borrow()
            .get(cache)
            .and_then(|entries| entries.get(url).cloned())
    }

    pub fn skipped_waiting(&self) -> bool {
        self.skipped_waiting.get()
    }

    pub fn claimed(&self) -> bool {
        self.claimed.get()
    }

    pub fn notifications(&self) -> Vec<NotificationPayload> {
        self.notifications.borrow().clone()
    }

    pub fn focused(&self) -> Vec<String> {
        self.focused.borrow().clone()
    }

    pub fn messages(&self) -> Vec<(String, ClientMessage)> {
        self.messages.borrow().clone()
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.borrow().clone()
    }
}

#[async_trait(?Send)]
impl WorkerScope for MemoryScope {
    type Request = MemoryRequest;
    type Response = MemoryResponse;
    type Cache = String;
    type Client = MemoryClient;
    type Error = String;

    fn origin(&self) -> String {
        ORIGIN.to_string()
    }

    fn new_request(&self, url: &str) -> Result<Self::Request, Self::Error> {
        Ok(MemoryRequest::get(url))
    }

    fn clone_response(&self, response: &Self::Response) -> Result<Self::Response, Self::Error> {
        Ok(response.clone())
    }

    async fn fetch(&self, request: &Self::Request) -> Result<Self::Response, Self::Error> {
        self.network
            .borrow()
            .get(&request.url)
            .cloned()
            .ok_or_else(|| format!("TypeError: Failed to fetch {}", request.url))
    }

    async fn open_cache(&self, name: &str) -> Result<Self::Cache, Self::Error> {
        self.caches
            .borrow_mut()
            .entry(name.to_string())
            .or_default();
        Ok(name.to_string())
    }

    async fn cache_put(
        &self,
        cache: &Self::Cache,
        request: &Self::Request,
        response: Self::Response,
    ) -> Result<(), Self::Error> {
        if self.fail_cache_writes.get() {
            return Err("QuotaExceededError".to_string());
        }
        self.caches
            .borrow_mut()
            .entry(cache.clone())
            .or_default()
            .insert(request.url.clone(), response);
        Ok(())
    }

    async fn cache_match(
        &self,
        cache: &Self::Cache,
        request: &Self::Request,
    ) -> Result<Option<Self::Response>, Self::Error> {
        Ok(self.cached(cache, &request.url))
    }

    async fn cache_names(&self) -> Result<Vec<String>, Self::Error> {
        Ok(self.caches.borrow().keys().cloned().collect())
    }

    async fn delete_cache(&self, name: &str) -> Result<bool, Self::Error> {
        Ok(self.caches.borrow_mut().remove(name).is_some())
    }

    async fn skip_waiting(&self) -> Result<(), Self::Error> {
        self.skipped_waiting.set(true);
        Ok(())
    }

    async fn claim_clients(&self) -> Result<(), Self::Error> {
        self.claimed.set(true);
        Ok(())
    }

    async fn show_notification(
        &self,
        notification: &NotificationPayload,
    ) -> Result<(), Self::Error> {
        self.notifications.borrow_mut().push(notification.clone());
        Ok(())
    }

    async fn window_clients(&self) -> Result<Vec<Self::Client>, Self::Error> {
        Ok(self.clients.borrow().clone())
    }

    async fn focus(&self, client: &Self::Client) -> Result<(), Self::Error> {
        self.focused.borrow_mut().push(client.url.clone());
        Ok(())
    }

    fn post_message(
        &self,
        client: &Self::Client,
        message: &ClientMessage,
    ) -> Result<(), Self::Error> {
        self.messages
            .borrow_mut()
            .push((client.url.clone(), message.clone()));
        Ok(())
    }

    async fn open_window(&self, url: &str) -> Result<(), Self::Error> {
        self.opened.borrow_mut().push(url.to_string());
        Ok(())
    }
}
