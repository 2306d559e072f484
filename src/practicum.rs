//! Client for the homework-review API.
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;
use std::fmt;
use thiserror::Error;
use tracing::debug;

pub const ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to homework API failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("homework API returned non-OK status {0}")]
    BadStatus(StatusCode),
    #[error("homework API returned invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Seam for the poll cycle; the real client talks HTTP, tests script
/// responses.
#[async_trait]
pub trait HomeworkApi: Send + Sync {
    async fn fetch(&self, from_date: i64) -> Result<Value, ApiError>;
}

#[derive(Clone)]
pub struct PracticumClient {
    http: Client,
    base_url: Url,
    token: String,
}

impl fmt::Debug for PracticumClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PracticumClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl PracticumClient {
    pub fn new(token: String) -> Self {
        let base_url = Url::parse(ENDPOINT).expect("valid default endpoint URL");
        Self::with_base_url(token, base_url)
    }

    pub fn with_base_url(token: String, base_url: Url) -> Self {
        let http = Client::builder()
            .user_agent("tg-hwbot/0.1")
            .build()
            .expect("reqwest client");
        Self {
            http,
            base_url,
            token,
        }
    }

    pub fn build_request(&self, from_date: i64) -> Result<reqwest::Request, ApiError> {
        let request = self
            .http
            .get(self.base_url.clone())
            .header("Authorization", format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .build()?;
        Ok(request)
    }
}

#[async_trait]
impl HomeworkApi for PracticumClient {
    async fn fetch(&self, from_date: i64) -> Result<Value, ApiError> {
        let request = self.build_request(from_date)?;
        debug!(url = %request.url(), "polling homework API");
        let res = self.http.execute(request).await?;
        if res.status() != StatusCode::OK {
            return Err(ApiError::BadStatus(res.status()));
        }
        let body = res.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_carries_oauth_header_and_cursor() {
        let client = PracticumClient::new("secret-token".into());
        let request = client.build_request(1549962000).unwrap();

        assert_eq!(
            request.headers()["Authorization"].to_str().unwrap(),
            "OAuth secret-token"
        );
        assert_eq!(request.url().query(), Some("from_date=1549962000"));
        assert_eq!(request.url().path(), "/api/user_api/homework_statuses/");
    }

    #[test]
    fn base_url_is_overridable() {
        let base = Url::parse("http://127.0.0.1:9999/statuses/").unwrap();
        let client = PracticumClient::with_base_url("t".into(), base);
        let request = client.build_request(0).unwrap();
        assert_eq!(request.url().host_str(), Some("127.0.0.1"));
    }
}
