use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION},
    Client, RequestBuilder,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::{
    api::types::{ApiError, AuthUser},
    config,
    utils::{
        storage::{browser_store, SharedStore, PI_TOKEN_KEY, SSO_USER_KEY},
        time::now_millis,
    },
};

pub const SSO_USER_HEADER: &str = "x-sso-user";

/// Responses that wrap their payload in a `{success, error}` envelope.
pub trait Envelope {
    fn succeeded(&self) -> bool;
    fn failure_message(&self) -> Option<String>;
}

macro_rules! impl_envelope {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Envelope for $ty {
                fn succeeded(&self) -> bool {
                    self.success
                }

                fn failure_message(&self) -> Option<String> {
                    self.error.clone()
                }
            }
        )*
    };
}

impl_envelope!(
    crate::api::types::UsersAttendanceResponse,
    crate::api::types::HolidaysResponse,
    crate::api::types::FieldTripsResponse,
    crate::api::types::NotificationsResponse,
    crate::api::types::StatusResponse,
    crate::api::types::LoginResponse,
);

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Option<String>,
    store: SharedStore,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: None,
            store: browser_store(),
        }
    }

    pub fn new_with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: Some(base_url.into()),
            store: browser_store(),
        }
    }

    pub fn with_store(mut self, store: SharedStore) -> Self {
        self.store = store;
        self
    }

    pub(crate) fn http_client(&self) -> &Client {
        &self.client
    }

    pub(crate) async fn resolved_base_url(&self) -> String {
        if let Some(base) = &self.base_url {
            base.trim_end_matches('/').to_string()
        } else {
            config::await_api_base_url().await
        }
    }

    pub(crate) async fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.resolved_base_url().await, path)
    }

    /// Bearer token wins over a stored SSO identity; with neither, the
    /// request goes out bare.
    pub(crate) fn auth_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();

        if let Some(token) = self.store.get_item(PI_TOKEN_KEY).filter(|t| !t.is_empty()) {
            match HeaderValue::from_str(&format!("Bearer {}", token)) {
                Ok(value) => {
                    headers.insert(AUTHORIZATION, value);
                }
                Err(_) => log::warn!("Stored PI token is not a valid header value"),
            }
            return headers;
        }

        if let Some(header) = self.sso_header_value() {
            match HeaderValue::from_str(&header) {
                Ok(value) => {
                    headers.insert(SSO_USER_HEADER, value);
                }
                Err(_) => log::warn!("SSO identity cannot be sent as a header"),
            }
        }
        headers
    }

    fn sso_header_value(&self) -> Option<String> {
        let raw = self.store.get_item(SSO_USER_KEY)?;
        let user: AuthUser = serde_json::from_str(&raw).ok()?;
        Some(
            json!({
                "username": user.username,
                "projectCodes": user.projects,
                "timestamp": now_millis(),
            })
            .to_string(),
        )
    }

    pub(crate) async fn send_json<T>(&self, request: RequestBuilder) -> Result<T, ApiError>
    where
        T: DeserializeOwned + Envelope,
    {
        let response = request
            .headers(self.auth_headers())
            .send()
            .await
            .map_err(|e| ApiError::request_failed(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body: Option<Value> = response.json().await.ok();
            return Err(error_from_body(status.as_u16(), body));
        }

        let parsed: T = response
            .json()
            .await
            .map_err(|e| ApiError::unknown(format!("Failed to parse response: {}", e)))?;
        if parsed.succeeded() {
            Ok(parsed)
        } else {
            Err(ApiError::unknown(
                parsed
                    .failure_message()
                    .unwrap_or_else(|| "Request was not successful".to_string()),
            ))
        }
    }
}

fn error_from_body(status: u16, body: Option<Value>) -> ApiError {
    let message = body
        .as_ref()
        .and_then(|b| {
            b.get("error")
                .or_else(|| b.get("message"))
                .and_then(Value::as_str)
        })
        .map(str::to_string)
        .unwrap_or_else(|| format!("Request failed with status {}", status));
    let mut error = ApiError::http_status(status, message);
    if let Some(code) = body
        .as_ref()
        .and_then(|b| b.get("code"))
        .and_then(Value::as_str)
    {
        error.code = code.to_string();
    }
    error.details = body.and_then(|b| b.get("details").cloned());
    error
}
