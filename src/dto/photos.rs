use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::album::Album;
use crate::domain::category::Category;
use crate::domain::photo::Photo;
use crate::domain::rating::PhotoScore;

/// A photo annotated with its current tallies.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredPhotoDto {
    pub photo: Photo,
    pub score: PhotoScore,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentDto {
    pub id: i32,
    pub text: String,
    pub author: String,
    pub created_at: NaiveDateTime,
    /// Whether the viewer may delete this comment.
    pub can_delete: bool,
}

/// Everything shown on a single photo page.
#[derive(Debug, Clone, Serialize)]
pub struct PhotoPageDto {
    pub photo: Photo,
    pub album: Album,
    pub score: PhotoScore,
    pub comments: Vec<CommentDto>,
    pub categories: Vec<Category>,
    pub is_owner: bool,
}
