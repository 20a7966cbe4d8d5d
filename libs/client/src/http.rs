//! Authenticated request client
//!
//! Central place for the API base URL, default headers, and the bearer
//! credential. Every outbound request carries the credential currently in
//! the user store, or an empty authorization value when logged out; the
//! server is responsible for rejecting unauthorized calls.

use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::stores::UserStore;

/// HTTP client bound to the API base URL and the user store
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    users: UserStore,
}

impl ApiClient {
    pub fn new(config: &ClientConfig, users: UserStore) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout))
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_base_url.clone(),
            users,
        })
    }

    /// Start a request against an API path, with the bearer credential
    /// attached
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);
        self.http
            .request(method, url)
            .header(AUTHORIZATION, self.bearer_value())
    }

    /// Start a request with an explicit credential instead of the stored
    /// one. Used while validating a candidate credential during bootstrap,
    /// before it is committed to the user store.
    pub fn request_with_token(&self, method: Method, path: &str, token: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {} (explicit credential)", method, url);
        self.http
            .request(method, url)
            .header(AUTHORIZATION, format!("Bearer {token}"))
    }

    fn bearer_value(&self) -> String {
        let token = self.users.token();
        if token.is_empty() {
            String::new()
        } else {
            format!("Bearer {token}")
        }
    }
}

/// Fail with a `Status` error unless the response has the expected status
pub(crate) fn expect_status(response: Response, expected: StatusCode) -> ClientResult<Response> {
    let status = response.status();
    if status == expected {
        Ok(response)
    } else {
        Err(ClientError::from_status(status))
    }
}

/// Check the status and parse the JSON body
pub(crate) async fn expect_json<T: DeserializeOwned>(
    response: Response,
    expected: StatusCode,
) -> ClientResult<T> {
    let response = expect_status(response, expected)?;
    Ok(response.json::<T>().await?)
}
