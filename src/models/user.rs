use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::types::{Email, PersonName, TypeConstraintError, Username};
use crate::domain::user::{NewUser as DomainNewUser, User as DomainUser};

/// Diesel model representing a row in the `users` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct User {
    pub id: i32,
    pub username: String,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: NaiveDateTime,
}

/// Insertable form of [`User`].
#[derive(Insertable)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser<'a> {
    pub username: &'a str,
    pub name: &'a str,
    pub surname: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
}

impl TryFrom<User> for DomainUser {
    type Error = TypeConstraintError;

    fn try_from(user: User) -> Result<Self, Self::Error> {
        Ok(Self {
            id: user.id.try_into()?,
            username: Username::new(user.username)?,
            name: PersonName::new(user.name)?,
            surname: PersonName::new(user.surname)?,
            email: Email::new(user.email)?,
            password_hash: user.password_hash,
            created_at: user.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewUser> for NewUser<'a> {
    fn from(user: &'a DomainNewUser) -> Self {
        Self {
            username: user.username.as_str(),
            name: user.name.as_str(),
            surname: user.surname.as_str(),
            email: user.email.as_str(),
            password_hash: user.password_hash.as_str(),
        }
    }
}
