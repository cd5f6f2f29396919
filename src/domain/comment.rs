use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{CommentId, CommentText, PhotoId, UserId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub photo_id: PhotoId,
    pub user_id: UserId,
    pub text: CommentText,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewComment {
    pub photo_id: PhotoId,
    pub user_id: UserId,
    pub text: CommentText,
}
