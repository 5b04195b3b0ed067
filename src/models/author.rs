//! Author model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Author record from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Author {
    pub id: i32,
    /// Given name
    pub name: String,
    /// Family name
    pub surname: String,
    /// Birth date, free-form text
    pub birthday: String,
}

/// Create or replace author request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AuthorRequest {
    pub name: String,
    pub surname: String,
    pub birthday: String,
}
