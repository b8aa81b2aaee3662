use crate::{
    error::{Error, Result},
    http,
    users::model::*,
};
use tracing::{debug, instrument};

/// Provides methods to work with GoREST users.
#[derive(Debug, Clone)]
pub struct Client {
    http_client: http::Client,
    max_pages: u32,
    per_page: Option<u32>,
}

impl Client {
    pub(crate) fn new(http_client: http::Client, max_pages: u32, per_page: Option<u32>) -> Self {
        Self {
            http_client,
            max_pages,
            per_page,
        }
    }

    /// Retrieve a single page of users. Pages start at 1.
    ///
    /// # Errors
    /// [`Error::Fetch`] if the server answers with a non-success status.
    #[instrument(skip(self))]
    pub async fn page(&self, page: u32) -> Result<Vec<User>> {
        let query_string = serde_qs::to_string(&ListOptions {
            page,
            per_page: self.per_page,
        })?;

        self.http_client
            .get(format!("/users?{query_string}"))
            .await?
            .check_error()
            .await
            .map_err(|source| Error::Fetch { page, source })?
            .json()
            .await
    }

    /// Retrieve all users, walking the pages until the server returns an
    /// empty one. Records keep the order the server delivered them in.
    ///
    /// # Errors
    /// The first failing page aborts the walk, nothing collected so far is
    /// returned. [`Error::PageLimitExceeded`] if the configured page limit is
    /// used up before an empty page shows up.
    #[instrument(skip(self))]
    pub async fn fetch_all(&self) -> Result<Vec<User>> {
        let mut users = Vec::new();

        for page in 1..=self.max_pages {
            let batch = self.page(page).await?;
            if batch.is_empty() {
                debug!(page, total = users.len(), "reached empty page");
                return Ok(users);
            }

            debug!(page, count = batch.len(), "fetched page");
            users.extend(batch);
        }

        Err(Error::PageLimitExceeded(self.max_pages))
    }

    /// Create a new user.
    ///
    /// # Errors
    /// [`Error::Api`] with the decoded error body if the server rejects it.
    #[instrument(skip(self))]
    pub async fn create(&self, user: &CreateUser) -> Result<User> {
        self.http_client.post("/users", user).await?.json().await
    }

    /// Update the given fields of a user.
    ///
    /// # Errors
    /// [`Error::Api`] with the decoded error body if the server rejects it.
    #[instrument(skip(self))]
    pub async fn update(&self, id: i64, user: &UpdateUser) -> Result<User> {
        self.http_client
            .patch(format!("/users/{id}"), user)
            .await?
            .json()
            .await
    }

    /// Delete a user. Returns `true` if the server confirmed the deletion
    /// with 200 or 204, `false` for any other success status.
    ///
    /// # Errors
    /// [`Error::Api`] with the decoded error body if the server rejects it.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let res = self
            .http_client
            .delete(format!("/users/{id}"))
            .await?
            .check_error()
            .await
            .map_err(Error::Api)?;

        Ok(matches!(res.status().as_u16(), 200 | 204))
    }
}
