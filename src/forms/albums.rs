use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::album::NewAlbum;
use crate::domain::types::{AlbumTitle, TypeConstraintError, UserId};

/// Title form shared by album creation and renaming.
#[derive(Deserialize, Validate)]
pub struct AlbumForm {
    #[validate(length(min = 1))]
    pub title: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlbumFormPayload {
    pub title: AlbumTitle,
}

impl AlbumFormPayload {
    pub fn into_new_album(self, user_id: UserId) -> NewAlbum {
        NewAlbum {
            user_id,
            title: self.title,
        }
    }
}

#[derive(Debug, Error)]
pub enum AlbumFormError {
    #[error("Album form validation failed: {0}")]
    Validation(String),
    #[error("Album form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for AlbumFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for AlbumFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<AlbumForm> for AlbumFormPayload {
    type Error = AlbumFormError;

    fn try_from(value: AlbumForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            title: AlbumTitle::new(value.title)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn album_form_trims_title() {
        let form = AlbumForm {
            title: "  Summer 2024 ".to_string(),
        };
        let payload: AlbumFormPayload = form.try_into().unwrap();
        assert_eq!(payload.title.as_str(), "Summer 2024");
    }

    #[test]
    fn album_form_rejects_whitespace_title() {
        let form = AlbumForm {
            title: "   ".to_string(),
        };
        let payload: Result<AlbumFormPayload, _> = form.try_into();
        assert!(matches!(payload, Err(AlbumFormError::TypeConstraint(_))));
    }
}
