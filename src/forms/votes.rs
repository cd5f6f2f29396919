use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::types::{PhotoId, TypeConstraintError};

/// A voter's choice between the two photos shown on the voting page.
#[derive(Deserialize, Validate)]
pub struct CastVoteForm {
    #[validate(range(min = 1))]
    pub winner_id: i32,
    #[validate(range(min = 1))]
    pub loser_id: i32,
}

/// Equal ids are accepted here; the voting service rejects them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CastVoteFormPayload {
    pub winner_id: PhotoId,
    pub loser_id: PhotoId,
}

#[derive(Debug, Error)]
pub enum CastVoteFormError {
    #[error("Vote form validation failed: {0}")]
    Validation(String),
    #[error("Vote form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for CastVoteFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for CastVoteFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<CastVoteForm> for CastVoteFormPayload {
    type Error = CastVoteFormError;

    fn try_from(value: CastVoteForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            winner_id: PhotoId::new(value.winner_id)?,
            loser_id: PhotoId::new(value.loser_id)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cast_vote_form_validates_ids() {
        let form = CastVoteForm {
            winner_id: 3,
            loser_id: 0,
        };
        let payload: Result<CastVoteFormPayload, _> = form.try_into();
        assert!(payload.is_err());
    }

    #[test]
    fn cast_vote_form_keeps_direction() {
        let form = CastVoteForm {
            winner_id: 3,
            loser_id: 5,
        };
        let payload: CastVoteFormPayload = form.try_into().unwrap();
        assert_eq!(payload.winner_id.get(), 3);
        assert_eq!(payload.loser_id.get(), 5);
    }
}
