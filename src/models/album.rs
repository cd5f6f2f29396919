use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::album::{Album as DomainAlbum, NewAlbum as DomainNewAlbum};
use crate::domain::types::{AlbumTitle, TypeConstraintError};

/// Diesel model representing a row in the `albums` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::albums)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Album {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub created_at: NaiveDateTime,
}

/// Insertable form of [`Album`].
#[derive(Insertable)]
#[diesel(table_name = crate::schema::albums)]
pub struct NewAlbum<'a> {
    pub user_id: i32,
    pub title: &'a str,
}

impl TryFrom<Album> for DomainAlbum {
    type Error = TypeConstraintError;

    fn try_from(album: Album) -> Result<Self, Self::Error> {
        Ok(Self {
            id: album.id.try_into()?,
            user_id: album.user_id.try_into()?,
            title: AlbumTitle::new(album.title)?,
            created_at: album.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewAlbum> for NewAlbum<'a> {
    fn from(album: &'a DomainNewAlbum) -> Self {
        Self {
            user_id: album.user_id.get(),
            title: album.title.as_str(),
        }
    }
}
