//! Page through GoREST users and manage single users.
//!
//! You're probably looking for the [`Client`].
//!
//! # Examples
//! ```no_run
//! use gorest_reports::{users::UpdateUser, Client, Error};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Error> {
//!     let client = Client::new()?;
//!
//!     let users = client.users.fetch_all().await?;
//!     println!("{} users", users.len());
//!
//!     client
//!         .users
//!         .update(
//!             users[0].id,
//!             &UpdateUser {
//!                 status: Some("inactive".to_string()),
//!                 ..Default::default()
//!             },
//!         )
//!         .await?;
//!
//!     Ok(())
//! }
//! ```
mod client;
mod model;

pub use client::Client;
pub use model::*;
