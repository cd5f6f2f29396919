use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{Email, PersonName, UserId, Username};

/// A registered user.
///
/// The password hash never leaves the persistence layer through
/// serialization so that templates cannot leak it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub name: PersonName,
    pub surname: PersonName,
    pub email: Email,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: NaiveDateTime,
}

/// Data required to insert a new [`User`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub username: Username,
    pub name: PersonName,
    pub surname: PersonName,
    pub email: Email,
    pub password_hash: String,
}
