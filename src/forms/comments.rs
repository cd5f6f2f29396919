use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::comment::NewComment;
use crate::domain::types::{CommentText, PhotoId, TypeConstraintError, UserId};

#[derive(Deserialize, Validate)]
pub struct AddCommentForm {
    #[validate(length(min = 1))]
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddCommentFormPayload {
    pub text: CommentText,
}

impl AddCommentFormPayload {
    pub fn into_new_comment(self, photo_id: PhotoId, user_id: UserId) -> NewComment {
        NewComment {
            photo_id,
            user_id,
            text: self.text,
        }
    }
}

#[derive(Debug, Error)]
pub enum AddCommentFormError {
    #[error("Comment form validation failed: {0}")]
    Validation(String),
    #[error("Comment form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for AddCommentFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for AddCommentFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<AddCommentForm> for AddCommentFormPayload {
    type Error = AddCommentFormError;

    fn try_from(value: AddCommentForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            text: CommentText::new(value.text)?,
        })
    }
}
