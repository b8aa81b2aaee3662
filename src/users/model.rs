use serde::{Deserialize, Serialize};

use crate::serde::deserialize_string_or_none;

/// A GoREST user record.
///
/// Only `id` is required. A field that is missing or not a string (GoREST
/// has been seen sending `null`) is `None`.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct User {
    /// The user's unique identifier.
    pub id: i64,
    #[serde(
        default,
        deserialize_with = "deserialize_string_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    /// The user's email address.
    #[serde(
        default,
        deserialize_with = "deserialize_string_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub email: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_string_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub gender: Option<String>,
    /// Account status, `active` or `inactive`.
    #[serde(
        default,
        deserialize_with = "deserialize_string_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<String>,
}

/// The request to create a user.
#[derive(Serialize, Deserialize, Debug, Eq, PartialEq, Default, Clone)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub gender: String,
    pub status: String,
}

/// The request to update a user. Fields left as `None` are not sent.
#[derive(Serialize, Debug, Eq, PartialEq, Default, Clone)]
pub struct UpdateUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Query parameters for listing one page of users.
#[derive(Serialize, Debug, Default)]
pub(crate) struct ListOptions {
    pub page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}
