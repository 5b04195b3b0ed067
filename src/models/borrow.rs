//! Borrow (circulation ledger) model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::error::CirculationError;

/// Borrow record from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Borrow {
    pub id: i32,
    /// Borrowed book ID
    pub book_id: i32,
    /// Reader's name
    pub name_reader: String,
    /// Issue date
    pub get_date: String,
    /// Return date, absent while the book is still out
    pub return_date: Option<String>,
}

/// Borrow a book request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CreateBorrow {
    pub book_id: i32,
    pub name_reader: String,
    pub get_date: String,
}

/// Query parameters for returning a book
#[derive(Debug, Clone, Deserialize, Validate, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ReturnQuery {
    /// Return date
    #[validate(length(min = 1, message = "return_date must not be empty"))]
    pub return_date: String,
}

impl Borrow {
    /// Whether the book of this borrow is still out
    pub fn is_outstanding(&self) -> bool {
        self.return_date.is_none()
    }

    /// Close the borrow with the given return date.
    ///
    /// A borrow is closed at most once.
    pub fn check_in(&mut self, return_date: &str) -> Result<(), CirculationError> {
        if !self.is_outstanding() {
            return Err(CirculationError::AlreadyReturned { borrow_id: self.id });
        }
        self.return_date = Some(return_date.to_string());
        Ok(())
    }
}
