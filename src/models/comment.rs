use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::comment::{Comment as DomainComment, NewComment as DomainNewComment};
use crate::domain::types::{CommentText, TypeConstraintError};

/// Diesel model representing the `comments` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::comments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Comment {
    pub id: i32,
    pub photo_id: i32,
    pub user_id: i32,
    pub text: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::comments)]
pub struct NewComment<'a> {
    pub photo_id: i32,
    pub user_id: i32,
    pub text: &'a str,
}

impl TryFrom<Comment> for DomainComment {
    type Error = TypeConstraintError;

    fn try_from(comment: Comment) -> Result<Self, Self::Error> {
        Ok(Self {
            id: comment.id.try_into()?,
            photo_id: comment.photo_id.try_into()?,
            user_id: comment.user_id.try_into()?,
            text: CommentText::new(comment.text)?,
            created_at: comment.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewComment> for NewComment<'a> {
    fn from(comment: &'a DomainNewComment) -> Self {
        Self {
            photo_id: comment.photo_id.get(),
            user_id: comment.user_id.get(),
            text: comment.text.as_str(),
        }
    }
}
