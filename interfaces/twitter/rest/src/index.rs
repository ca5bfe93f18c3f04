use std::fmt;

use reqwest::{header::AUTHORIZATION, Client, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::oauth::{self, percent_encode, SignRequestError};

pub const DEFAULT_BASE_URL: &str = "https://api.twitter.com/1.1";

/// OAuth 1.0a user-context credentials.
#[derive(Clone)]
pub struct Credentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token_key: String,
    pub access_token_secret: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"***")
            .field("access_token_key", &self.access_token_key)
            .field("access_token_secret", &"***")
            .finish()
    }
}

pub struct TwitterApiResult {
    pub body: String,
    pub status: StatusCode,
}

impl TwitterApiResult {
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

#[derive(Debug, Clone)]
pub struct TwitterClient {
    http: Client,
    credentials: Credentials,
    base_url: String,
}

impl TwitterClient {
    pub fn new(credentials: Credentials, base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            credentials,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET {base_url}/{resource}.json?{params}`, e.g. `resource = "search/tweets"`.
    ///
    /// Any non-2xx answer is returned as `UnexpectedStatus`.
    pub async fn get(
        &self,
        resource: &str,
        params: &[(&str, String)],
    ) -> Result<TwitterApiResult, FetchResourceError> {
        let url = format!("{}/{}.json", self.base_url, resource);
        let params: Vec<(String, String)> = params
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();

        let nonce = Uuid::new_v4().simple().to_string();
        let timestamp = chrono::Utc::now().timestamp();
        let authorization =
            oauth::authorization_header(&self.credentials, "GET", &url, &params, &nonce, timestamp)?;

        // Built by hand so the query is encoded exactly as it was signed.
        let query = params
            .iter()
            .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        let request_url = if query.is_empty() { url } else { format!("{url}?{query}") };

        debug!(resource, "GET {}", request_url);

        let response = self
            .http
            .get(&request_url)
            .header(AUTHORIZATION, authorization)
            .header("User-Agent", "rust-client")
            .send()
            .await
            .map_err(|source| FetchResourceError::RequestSend { source })?;

        let status = response.status();

        let body = response
            .text()
            .await
            .map_err(|source| FetchResourceError::ResponseRead { source })?;

        if !status.is_success() {
            return Err(FetchResourceError::UnexpectedStatus { status, body });
        }

        Ok(TwitterApiResult { body, status })
    }
}

#[derive(Debug, Error)]
pub enum FetchResourceError {
    #[error("SignRequest: {source}")]
    SignRequest {
        #[from]
        source: SignRequestError,
    },

    #[error("RequestSend: {source}")]
    RequestSend {
        source: reqwest::Error,
    },

    #[error("ResponseRead: {source}")]
    ResponseRead {
        source: reqwest::Error,
    },

    #[error("UnexpectedStatus: {status}: {body}")]
    UnexpectedStatus {
        status: StatusCode,
        body: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_hides_secrets() {
        let creds = Credentials {
            consumer_key: "ck".to_string(),
            consumer_secret: "cs-secret".to_string(),
            access_token_key: "at".to_string(),
            access_token_secret: "ats-secret".to_string(),
        };
        let printed = format!("{creds:?}");
        assert!(printed.contains("ck"));
        assert!(!printed.contains("cs-secret"));
        assert!(!printed.contains("ats-secret"));
    }

    #[test]
    fn base_url_trailing_slash_is_dropped() {
        let creds = Credentials {
            consumer_key: String::new(),
            consumer_secret: String::new(),
            access_token_key: String::new(),
            access_token_secret: String::new(),
        };
        let client = TwitterClient::new(creds, "http://localhost:9000/1.1/");
        assert_eq!(client.base_url(), "http://localhost:9000/1.1");
    }
}
