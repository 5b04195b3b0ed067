//! Book model and copy accounting

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::CirculationError;

/// Book record from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub description: String,
    /// Author ID
    pub author: i32,
    /// Copies currently available to lend
    pub copies: i32,
}

/// Create or replace book request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct BookRequest {
    pub title: String,
    pub description: String,
    /// Author ID, must reference an existing author
    pub author: i32,
    #[validate(range(min = 0, message = "copies must not be negative"))]
    pub copies: i32,
}

impl Book {
    /// Copies left once one more is lent out.
    ///
    /// A book with no copies on the shelf cannot be lent; a negative count
    /// means the ledger is corrupt and is reported as such.
    pub fn checkout(&self) -> Result<i32, CirculationError> {
        match self.copies.cmp(&0) {
            Ordering::Greater => Ok(self.copies - 1),
            Ordering::Equal => Err(CirculationError::OutOfCopies { book_id: self.id }),
            Ordering::Less => Err(CirculationError::NegativeCopies {
                book_id: self.id,
                copies: self.copies,
            }),
        }
    }

    /// Copies available once a lent copy comes back
    pub fn check_in(&self) -> Result<i32, CirculationError> {
        self.copies
            .checked_add(1)
            .ok_or(CirculationError::CopiesOverflow { book_id: self.id })
    }
}
