use async_trait::async_trait;
use gloo::utils::format::JsValueSerdeExt;
use js_sys::Array;
use serde_json::Value;
use shared::{
    agent::{AgentRequest, AgentResponse, ClickedNotification, WindowClient, WorkerScope},
    api::payloads::{ClientMessage, NotificationPayload},
};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Cache, ClientQueryOptions, ClientType, NotificationEvent, NotificationOptions, Request,
    Response, ServiceWorkerGlobalScope,
};

use crate::error::JsError;

pub struct WebRequest(pub Request);

impl AgentRequest for WebRequest {
    fn url(&self) -> String {
        self.0.url()
    }
}

pub struct WebResponse(pub Response);

impl AgentResponse for WebResponse {
    fn ok(&self) -> bool {
        self.0.ok()
    }

    fn status(&self) -> u16 {
        self.0.status()
    }
}

pub struct WebClient(pub web_sys::WindowClient);

impl WindowClient for WebClient {
    fn url(&self) -> String {
        self.0.url()
    }
}

// web-sys does not generate a binding for `NotificationEvent.action`
#[wasm_bindgen::prelude::wasm_bindgen]
extern "C" {
    #[wasm_bindgen(extends = NotificationEvent, js_name = NotificationEvent)]
    type NotificationEventWithAction;

    #[wasm_bindgen(method, getter, js_name = action)]
    fn action(this: &NotificationEventWithAction) -> String;
}

pub struct WebNotificationClick(pub NotificationEvent);

impl ClickedNotification for WebNotificationClick {
    fn close(&self) {
        self.0.notification().close();
    }

    fn data(&self) -> Option<Value> {
        let data = self.0.notification().data();
        if data.is_undefined() || data.is_null() {
            return None;
        }
        match JsValueSerdeExt::into_serde::<Value>(&data) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Couldn't read notification data: {e}");
                None
            }
        }
    }

    fn action(&self) -> String {
        self.0.unchecked_ref::<NotificationEventWithAction>().action()
    }
}

/// [WorkerScope] backed by the real `ServiceWorkerGlobalScope`
#[derive(Clone)]
pub struct WebScope {
    sw: ServiceWorkerGlobalScope,
}

impl WebScope {
    pub fn new(sw: ServiceWorkerGlobalScope) -> Self {
        Self { sw }
    }
}

async fn resolve(promise: js_sys::Promise) -> Result<JsValue, JsError> {
    Ok(JsFuture::from(promise).await?)
}

#[async_trait(?Send)]
impl WorkerScope for WebScope {
    type Request = WebRequest;
    type Response = WebResponse;
    type Cache = Cache;
    type Client = WebClient;
    type Error = JsError;

    fn origin(&self) -> String {
        self.sw.origin()
    }

    fn new_request(&self, url: &str) -> Result<Self::Request, Self::Error> {
        Ok(WebRequest(Request::new_with_str(url)?))
    }

    fn clone_response(&self, response: &Self::Response) -> Result<Self::Response, Self::Error> {
        // Response::clone tees the body, JsValue::clone would share it
        Ok(WebResponse(response.0.clone()?))
    }

    async fn fetch(&self, request: &Self::Request) -> Result<Self::Response, Self::Error> {
        let response = resolve(self.sw.fetch_with_request(&request.0)).await?;
        response
            .dyn_into::<Response>()
            .map(WebResponse)
            .map_err(|v| JsError::unexpected("Response", &v))
    }

    async fn open_cache(&self, name: &str) -> Result<Self::Cache, Self::Error> {
        let caches = self.sw.caches()?;
        let cache: Cache = resolve(caches.open(name)).await?.into();
        Ok(cache)
    }

    async fn cache_put(
        &self,
        cache: &Self::Cache,
        request: &Self::Request,
        response: Self::Response,
    ) -> Result<(), Self::Error> {
        resolve(cache.put_with_request(&request.0, &response.0)).await?;
        Ok(())
    }

    async fn cache_match(
        &self,
        cache: &Self::Cache,
        request: &Self::Request,
    ) -> Result<Option<Self::Response>, Self::Error> {
        let cached = resolve(cache.match_with_request(&request.0)).await?;

        if cached.is_undefined() {
            Ok(None)
        } else if cached.is_instance_of::<Response>() {
            Ok(Some(WebResponse(cached.into())))
        } else {
            Err(JsError::unexpected("Response or undefined", &cached))
        }
    }

    async fn cache_names(&self) -> Result<Vec<String>, Self::Error> {
        let caches = self.sw.caches()?;
        let keys: Array = resolve(caches.keys()).await?.into();

        keys.iter()
            .map(|k| k.as_string().ok_or_else(|| JsError::unexpected("string", &k)))
            .collect()
    }

    async fn delete_cache(&self, name: &str) -> Result<bool, Self::Error> {
        let caches = self.sw.caches()?;
        let deleted = resolve(caches.delete(name)).await?;
        Ok(deleted.is_truthy())
    }

    async fn skip_waiting(&self) -> Result<(), Self::Error> {
        resolve(self.sw.skip_waiting()?).await?;
        Ok(())
    }

    async fn claim_clients(&self) -> Result<(), Self::Error> {
        resolve(self.sw.clients().claim()).await?;
        Ok(())
    }

    async fn show_notification(
        &self,
        notification: &NotificationPayload,
    ) -> Result<(), Self::Error> {
        // NotificationOptions has no setter for actions, build the dictionary
        // from the serialized payload instead
        let options: NotificationOptions =
            <JsValue as JsValueSerdeExt>::from_serde(&notification.options())?.unchecked_into();

        resolve(
            self.sw
                .registration()
                .show_notification_with_options(&notification.title, &options)?,
        )
        .await?;
        Ok(())
    }

    async fn window_clients(&self) -> Result<Vec<Self::Client>, Self::Error> {
        let options = ClientQueryOptions::new();
        options.set_type(ClientType::Window);
        options.set_include_uncontrolled(true);

        let clients: Array = resolve(self.sw.clients().match_all_with_options(&options))
            .await?
            .into();

        Ok(clients
            .iter()
            .map(|c| WebClient(c.unchecked_into()))
            .collect())
    }

    async fn focus(&self, client: &Self::Client) -> Result<(), Self::Error> {
        resolve(client.0.focus()?).await?;
        Ok(())
    }

    fn post_message(
        &self,
        client: &Self::Client,
        message: &ClientMessage,
    ) -> Result<(), Self::Error> {
        let value = <JsValue as JsValueSerdeExt>::from_serde(message)?;
        client.0.post_message(&value)?;
        Ok(())
    }

    async fn open_window(&self, url: &str) -> Result<(), Self::Error> {
        // This is broken in firefox android and it doesn't seem to be being worked on
        // <https://bugzilla.mozilla.org/show_bug.cgi?id=1717431>
        resolve(self.sw.clients().open_window(url)).await?;
        Ok(())
    }
}
