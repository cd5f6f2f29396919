use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{AlbumId, CategoryId, MimeType, PhotoFileName, PhotoId};

/// Photo metadata.
///
/// The binary content is deliberately absent: listings, voting and ranking
/// never need it, so it is only loaded through [`PhotoContent`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Photo {
    pub id: PhotoId,
    pub album_id: AlbumId,
    pub category_id: Option<CategoryId>,
    pub mimetype: MimeType,
    pub filename: PhotoFileName,
    pub created_at: NaiveDateTime,
}

/// Stored image bytes together with what is needed to serve them.
#[derive(Debug, Clone)]
pub struct PhotoContent {
    pub mimetype: MimeType,
    pub filename: PhotoFileName,
    pub data: Vec<u8>,
}

/// Data required to insert a new [`Photo`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewPhoto {
    pub album_id: AlbumId,
    pub mimetype: MimeType,
    pub filename: PhotoFileName,
    pub data: Vec<u8>,
}
