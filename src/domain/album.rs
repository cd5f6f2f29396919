use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{AlbumId, AlbumTitle, UserId};

/// A named collection of photos owned by one user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Album {
    pub id: AlbumId,
    pub user_id: UserId,
    pub title: AlbumTitle,
    pub created_at: NaiveDateTime,
}

impl Album {
    /// Whether `user_id` owns this album.
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }
}

/// Data required to insert a new [`Album`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewAlbum {
    pub user_id: UserId,
    pub title: AlbumTitle,
}
