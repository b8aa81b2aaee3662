//! Collect GoREST users and derive CSV reports from them.
//!
//! If you're just getting started, take a look at the [`Client`] and
//! [`reports::generate`].
//!
//! # Examples
//! ```no_run
//! use gorest_reports::{reports, Client, Error};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Error> {
//!     let client = Client::builder().with_max_pages(100).build()?;
//!
//!     // Walk all pages of users
//!     let users = client.users.fetch_all().await?;
//!
//!     // Aggregate in memory
//!     let active = reports::active_test_users(&users);
//!     let domains = reports::domain_counts(&users);
//!     dbg!(active.len(), domains);
//!
//!     // Or do the whole run, writing both CSV files into the current directory
//!     reports::generate(&client, ".").await?;
//!
//!     Ok(())
//! }
//! ```
pub mod client;
pub mod error;
mod http;
pub mod reports;
mod serde;
pub mod users;

pub use client::Client;
pub use error::{ApiError, Error};

#[cfg(all(feature = "default-tls", feature = "native-tls"))]
compile_error!("Feature \"default-tls\" and \"native-tls\" cannot be enabled at the same time");

#[cfg(all(feature = "native-tls", feature = "rustls-tls"))]
compile_error!("Feature \"native-tls\" and \"rustls-tls\" cannot be enabled at the same time");

#[cfg(all(feature = "rustls-tls", feature = "default-tls"))]
compile_error!("Feature \"rustls-tls\" and \"default-tls\" cannot be enabled at the same time");
