//! Typed wrapper over the `/api` endpoints.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;

use loggy_core::types::{AttachmentId, LogEntryId};
use loggy_entity::{ImageAttachment, LogEntry};

use crate::error::ClientError;

/// Body of `GET /api/whoami`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhoAmI {
    /// Person ID.
    pub id: i32,
    /// Email address.
    pub email: String,
}

#[derive(Deserialize)]
struct TokenBody {
    token: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Exchanges a token for a newer one.
///
/// Split out of [`ApiClient`] so the session manager can run against a
/// scripted refresher in tests.
#[async_trait]
pub trait TokenRefresher: Send + Sync + 'static {
    /// A fresh token for the holder of `token`.
    async fn refresh(&self, token: &str) -> Result<String, ClientError>;
}

/// HTTP client for one Loggy server.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Client for the server at `base_url`, e.g. `http://localhost:8080`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("loggy-client/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_http(http, base_url))
    }

    /// Client reusing an existing `reqwest::Client`.
    pub fn with_http(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// The server root this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    /// `POST /api/login`
    pub async fn login(&self, email: &str, password: &str) -> Result<String, ClientError> {
        let req = self
            .http
            .post(self.url("/login"))
            .json(&json!({ "email": email, "password": password }));
        Ok(send_json::<TokenBody>(req).await?.token)
    }

    /// `POST /api/create-account`
    pub async fn create_account(&self, email: &str, password: &str) -> Result<String, ClientError> {
        let req = self
            .http
            .post(self.url("/create-account"))
            .json(&json!({ "email": email, "password": password }));
        Ok(send_json::<TokenBody>(req).await?.token)
    }

    /// `GET /api/refresh-token`
    pub async fn refresh_token(&self, token: &str) -> Result<String, ClientError> {
        let req = self.authorized(self.http.get(self.url("/refresh-token")), token);
        Ok(send_json::<TokenBody>(req).await?.token)
    }

    /// `GET /api/whoami`
    pub async fn whoami(&self, token: &str) -> Result<WhoAmI, ClientError> {
        let req = self.authorized(self.http.get(self.url("/whoami")), token);
        send_json(req).await
    }

    /// `GET /api/log`
    pub async fn feed(&self, token: &str) -> Result<Vec<LogEntry>, ClientError> {
        let req = self.authorized(self.http.get(self.url("/log")), token);
        send_json(req).await
    }

    /// `POST /api/log`
    pub async fn post_entry(
        &self,
        token: &str,
        text_content: &str,
        longitude: f64,
        latitude: f64,
    ) -> Result<LogEntry, ClientError> {
        let req = self
            .authorized(self.http.post(self.url("/log")), token)
            .json(&json!({
                "textContent": text_content,
                "longitude": longitude,
                "latitude": latitude,
            }));
        send_json(req).await
    }

    /// `POST /api/log/{logEntryId}/attachment`
    pub async fn attach(
        &self,
        token: &str,
        log_entry_id: LogEntryId,
        file_name: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<ImageAttachment, ClientError> {
        let part = Part::bytes(data)
            .file_name(file_name.to_string())
            .mime_str(content_type)?;
        let req = self
            .authorized(
                self.http
                    .post(self.url(&format!("/log/{log_entry_id}/attachment"))),
                token,
            )
            .multipart(Form::new().part("image", part));
        send_json(req).await
    }

    /// `GET /api/attachment/{id}/{width}`; returns the content type and bytes.
    pub async fn image(
        &self,
        id: AttachmentId,
        width: i32,
    ) -> Result<(String, Vec<u8>), ClientError> {
        let response = check(
            self.http
                .get(self.url(&format!("/attachment/{id}/{width}")))
                .send()
                .await?,
        )
        .await?;
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        Ok((content_type, response.bytes().await?.to_vec()))
    }

    fn authorized(&self, req: RequestBuilder, token: &str) -> RequestBuilder {
        req.header(reqwest::header::AUTHORIZATION, token)
    }
}

#[async_trait]
impl TokenRefresher for ApiClient {
    async fn refresh(&self, token: &str) -> Result<String, ClientError> {
        self.refresh_token(token).await
    }
}

async fn send_json<T: DeserializeOwned>(req: RequestBuilder) -> Result<T, ClientError> {
    let response = check(req.send().await?).await?;
    Ok(response.json().await?)
}

async fn check(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let fallback = status.canonical_reason().unwrap_or("error").to_string();
    let error = match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => fallback,
    };
    Err(ClientError::Api {
        status: status.as_u16(),
        error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalized() {
        let client = ApiClient::with_http(reqwest::Client::new(), "http://localhost:8080/");
        assert_eq!(client.base_url(), "http://localhost:8080");
        assert_eq!(client.url("/whoami"), "http://localhost:8080/api/whoami");
    }
}
