use http::header;
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use url::Url;

use crate::error::{ApiError, Error, Result};

static USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

/// Client is a wrapper around `reqwest::Client` which provides automatically
/// prepending the base url.
#[derive(Debug, Clone)]
pub(crate) struct Client {
    base_url: Url,
    inner: reqwest::Client,
}

#[derive(Clone)]
pub(crate) enum Body {
    Empty,
    Json(serde_json::Value),
}

impl Client {
    /// Creates a new client. The token, if any, is sent as a bearer token
    /// with every request.
    pub(crate) fn new<U, T>(base_url: U, token: T, timeout: Duration) -> Result<Self>
    where
        U: AsRef<str>,
        T: Into<Option<String>>,
    {
        let base_url = Url::parse(base_url.as_ref()).map_err(Error::InvalidUrl)?;

        let mut default_headers = header::HeaderMap::new();
        if let Some(token) = token.into() {
            let token_header_value = header::HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_e| Error::InvalidToken)?;
            default_headers.insert(header::AUTHORIZATION, token_header_value);
        }

        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(default_headers)
            .timeout(timeout)
            .build()
            .map_err(Error::HttpClientSetup)?;

        Ok(Self {
            base_url,
            inner: http_client,
        })
    }

    pub(crate) fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn execute<P>(&self, method: http::Method, path: P, body: Body) -> Result<Response>
    where
        P: AsRef<str>,
    {
        let url = self
            .base_url
            .join(path.as_ref().trim_start_matches('/'))
            .map_err(Error::InvalidUrl)?;

        let mut req = self.inner.request(method.clone(), url);
        match body {
            Body::Empty => {}
            Body::Json(value) => req = req.json(&value),
        }

        // No retries: the first transport failure is the one reported.
        let res = req.send().await.map_err(Error::Http)?;

        Ok(Response::new(res, method, path.as_ref().to_string()))
    }

    pub(crate) async fn get<S>(&self, path: S) -> Result<Response>
    where
        S: AsRef<str>,
    {
        self.execute(http::Method::GET, path, Body::Empty).await
    }

    pub(crate) async fn post<S, P>(&self, path: S, payload: P) -> Result<Response>
    where
        S: AsRef<str>,
        P: Serialize,
    {
        self.execute(
            http::Method::POST,
            path,
            Body::Json(serde_json::to_value(payload).map_err(Error::Serialize)?),
        )
        .await
    }

    pub(crate) async fn patch<S, P>(&self, path: S, payload: P) -> Result<Response>
    where
        S: AsRef<str>,
        P: Serialize,
    {
        self.execute(
            http::Method::PATCH,
            path,
            Body::Json(serde_json::to_value(payload).map_err(Error::Serialize)?),
        )
        .await
    }

    pub(crate) async fn delete<S>(&self, path: S) -> Result<Response>
    where
        S: AsRef<str>,
    {
        self.execute(http::Method::DELETE, path, Body::Empty).await
    }
}

#[derive(Debug)]
pub(crate) struct Response {
    inner: reqwest::Response,
    method: http::Method,
    path: String,
}

impl Response {
    pub(crate) fn new(inner: reqwest::Response, method: http::Method, path: String) -> Self {
        Self {
            inner,
            method,
            path,
        }
    }

    pub(crate) fn status(&self) -> http::StatusCode {
        self.inner.status()
    }

    pub(crate) async fn json<T: DeserializeOwned>(self) -> Result<T> {
        self.check_error()
            .await
            .map_err(Error::Api)?
            .inner
            .json::<T>()
            .await
            .map_err(Error::Deserialize)
    }

    /// Turns a non-success response into an [`ApiError`], keeping the JSON
    /// error body when the server sent one.
    pub(crate) async fn check_error(self) -> std::result::Result<Response, ApiError> {
        let status = self.inner.status();
        if !status.is_success() {
            // Decoding failures still yield an ApiError, just without a body
            let body = self.inner.json::<serde_json::Value>().await.ok();
            return Err(ApiError::new(
                status.as_u16(),
                self.method,
                self.path,
                body,
            ));
        }

        Ok(self)
    }
}
