//! Derive CSV reports from the collected users.
//!
//! [`generate`] runs the whole thing: it fetches every user first and only
//! then writes the reports, so a failed fetch never produces a report.
//!
//! # Examples
//! ```no_run
//! use gorest_reports::{reports, Client, Error};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Error> {
//!     let client = Client::new()?;
//!
//!     let summary = reports::generate(&client, ".").await?;
//!     println!("{} users collected", summary.users);
//!
//!     Ok(())
//! }
//! ```
mod active_test_users;
mod domain_counts;
mod writer;

use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use crate::{error::Result, Client};

pub use active_test_users::*;
pub use domain_counts::*;

/// File name of the active `.test` users report.
pub const ACTIVE_TEST_USERS_FILE: &str = "active_test_users.csv";

/// File name of the domain counts report.
pub const DOMAIN_COUNTS_FILE: &str = "email_domain_counts.csv";

/// What a run of [`generate`] produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Number of users collected over all pages.
    pub users: usize,
    /// Rows in the active `.test` users report.
    pub active_test_users: usize,
    /// Rows in the domain counts report.
    pub domains: usize,
    /// Where the active `.test` users report was written.
    pub active_test_users_path: PathBuf,
    /// Where the domain counts report was written.
    pub domain_counts_path: PathBuf,
}

/// Fetches all users and writes both reports into `out_dir`, replacing
/// earlier ones.
///
/// # Errors
/// Any error from [`users::Client::fetch_all`](crate::users::Client::fetch_all)
/// aborts the run before a file is touched. Write errors come back as
/// [`Error::Write`](crate::Error::Write).
#[instrument(skip_all, fields(out_dir = %out_dir.as_ref().display()))]
pub async fn generate(client: &Client, out_dir: impl AsRef<Path>) -> Result<Summary> {
    let users = client.users.fetch_all().await?;
    info!(users = users.len(), "collected users");

    let out_dir = out_dir.as_ref();
    let active_test_users_path = out_dir.join(ACTIVE_TEST_USERS_FILE);
    let domain_counts_path = out_dir.join(DOMAIN_COUNTS_FILE);

    let active_test_users = write_active_test_users(&users, &active_test_users_path)?;
    let domains = write_domain_counts(&users, &domain_counts_path)?;

    Ok(Summary {
        users: users.len(),
        active_test_users,
        domains,
        active_test_users_path,
        domain_counts_path,
    })
}
