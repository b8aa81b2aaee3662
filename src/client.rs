//! The top-level client for the GoREST API.
use std::{env, time::Duration};

use crate::{
    error::{Error, Result},
    http, users,
};

/// The public GoREST v2 API.
pub static DEFAULT_URL: &str = "https://gorest.co.in/public/v2/";

/// How long a single request may take before it's abandoned.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// How many pages [`users::Client::fetch_all`] requests at most, the final
/// empty page included.
pub const DEFAULT_MAX_PAGES: u32 = 10_000;

/// The client is the entrypoint of the whole crate.
///
/// You can create it using [`Client::builder`] or [`Client::new`].
///
/// # Examples
/// ```
/// use gorest_reports::{Client, Error};
/// use std::time::Duration;
///
/// fn main() -> Result<(), Error> {
///     // Create a new client, picking up GOREST_URL and GOREST_TOKEN from
///     // the environment if they're set.
///     let client = Client::new()?;
///
///     // Set all available options. Unset options fall back to environment
///     // variables and then to the defaults.
///     let client = Client::builder()
///         .with_token("my-token")
///         .with_timeout(Duration::from_secs(30))
///         .with_max_pages(500)
///         .build()?;
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    url: String,
    pub users: users::Client,
}

impl Client {
    /// Creates a new client. If you want to configure it, use [`Client::builder`].
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Create a new client using a builder.
    pub fn builder() -> Builder {
        Builder::new()
    }

    /// Get the url (cloned).
    pub fn url(&self) -> String {
        self.url.clone()
    }
}

/// This builder is used to create a new client.
pub struct Builder {
    env_fallback: bool,
    url: Option<String>,
    token: Option<String>,
    timeout: Duration,
    max_pages: u32,
    per_page: Option<u32>,
}

impl Builder {
    /// Create a new builder.
    fn new() -> Self {
        Self {
            env_fallback: true,
            url: None,
            token: None,
            timeout: DEFAULT_TIMEOUT,
            max_pages: DEFAULT_MAX_PAGES,
            per_page: None,
        }
    }

    /// Don't fall back to environment variables.
    pub fn no_env(mut self) -> Self {
        self.env_fallback = false;
        self
    }

    /// Add a token to the client. If this is not set, the token will be read
    /// from the environment variable `GOREST_TOKEN`. Without a token requests
    /// are sent anonymously, which is enough for listing users.
    pub fn with_token<S: Into<String>>(mut self, token: S) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the API base URL. If this is not set, it will be read from the
    /// environment variable `GOREST_URL` and default to [`DEFAULT_URL`].
    pub fn with_url<S: Into<String>>(mut self, url: S) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set how many pages a full fetch may request before giving up.
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Ask the server for this many records per page instead of its default.
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<Client> {
        let env_fallback = self.env_fallback;

        if self.max_pages == 0 {
            return Err(Error::InvalidMaxPages);
        }

        let mut token = self.token.unwrap_or_default();
        if token.is_empty() && env_fallback {
            token = env::var("GOREST_TOKEN").unwrap_or_default();
        }
        let token = Some(token).filter(|token| !token.is_empty());

        let mut url = self.url.unwrap_or_default();
        if url.is_empty() && env_fallback {
            url = env::var("GOREST_URL").unwrap_or_default();
        }
        if url.is_empty() {
            url = DEFAULT_URL.to_string();
        }
        // Relative paths are joined onto the base, so it has to look like a
        // directory.
        if !url.ends_with('/') {
            url.push('/');
        }

        let http_client = http::Client::new(&url, token, self.timeout)?;

        Ok(Client {
            url: http_client.base_url().to_string(),
            users: users::Client::new(http_client, self.max_pages, self.per_page),
        })
    }
}
