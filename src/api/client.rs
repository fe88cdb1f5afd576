use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::api::backend::Backend;
use crate::api::models::{RemoteContact, RemoteMessage, SendRequest};
use crate::config::ClientConfig;
use crate::error::{BackendError, ConfigError};

/// HTTP implementation of [`Backend`].
pub struct ApiClient {
    http: HttpClient,
    api_base: Url,
    token: Option<String>,
    password: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            http: HttpClient::new(),
            api_base: Self::base_api(base_url)?,
            token: None,
            password: None,
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ConfigError> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            api_base: Self::base_api(&config.base_url)?,
            token: config.token.clone().filter(|t| !t.is_empty()),
            password: Some(config.password.clone()).filter(|p| !p.is_empty()),
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    fn base_api(base_url: &str) -> Result<Url, url::ParseError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let api = if trimmed.ends_with("/api") { trimmed.to_string() } else { format!("{}/api", trimmed) };
        let url = Url::parse(&api)?;
        if url.cannot_be_a_base() {
            return Err(url::ParseError::RelativeUrlWithCannotBeABaseBase);
        }
        Ok(url)
    }

    /// Appends `segments` to the api base, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.api_base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push("v1").extend(segments);
        }
        url
    }

    fn with_auth(&self, mut req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(t) = &self.token {
            req = req.header("Authorization", format!("Bearer {}", t));
        }
        if let Some(p) = &self.password {
            req = req.header("password", p);
        }
        req
    }

    async fn fetch_list<T: DeserializeOwned>(&self, url: Url, envelope: &str) -> Result<Vec<T>, BackendError> {
        log::debug!("GET {}", url);
        let resp = self.with_auth(self.http.get(url)).send().await?;
        if !resp.status().is_success() {
            return Err(BackendError::Status(resp.status().as_u16()));
        }
        let body = resp.bytes().await?;
        let json: Value = serde_json::from_slice(&body)?;
        let items = unwrap_list(json, envelope)?;
        Ok(serde_json::from_value(Value::Array(items))?)
    }
}

/// Accepts a bare array, `null`, or an object carrying the array under
/// `data` or `envelope`.
fn unwrap_list(json: Value, envelope: &str) -> Result<Vec<Value>, serde_json::Error> {
    match json {
        Value::Array(items) => Ok(items),
        Value::Null => Ok(Vec::new()),
        Value::Object(mut map) => {
            for key in ["data", envelope] {
                match map.remove(key) {
                    Some(Value::Array(items)) => return Ok(items),
                    Some(Value::Null) => return Ok(Vec::new()),
                    _ => {}
                }
            }
            Err(serde::de::Error::custom(format!("no list under \"data\" or \"{}\"", envelope)))
        }
        other => Err(serde::de::Error::custom(format!("expected a list, got {}", other))),
    }
}

#[async_trait]
impl Backend for ApiClient {
    async fn list_contacts(&self) -> Result<Vec<RemoteContact>, BackendError> {
        self.fetch_list(self.endpoint(&["contacts"]), "contacts").await
    }

    async fn list_messages(&self, contact_id: &str, offset: u32) -> Result<Vec<RemoteMessage>, BackendError> {
        let mut url = self.endpoint(&["contacts", contact_id, "messages"]);
        url.query_pairs_mut().append_pair("offset", &offset.to_string());
        self.fetch_list(url, "messages").await
    }

    async fn send_message(&self, contact_id: &str, text: &str) -> Result<(), BackendError> {
        let url = self.endpoint(&["messages"]);
        log::debug!("POST {}", url);
        let body = SendRequest {
            contact_id: contact_id.to_string(),
            text: text.to_string(),
        };
        let resp = self.with_auth(self.http.post(url)).json(&body).send().await?;
        if !resp.status().is_success() {
            return Err(BackendError::Status(resp.status().as_u16()));
        }
        Ok(())
    }
}
