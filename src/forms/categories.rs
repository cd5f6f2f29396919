use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::category::NewCategory;
use crate::domain::types::{CategoryTitle, TypeConstraintError};

#[derive(Deserialize, Validate)]
pub struct AddCategoryForm {
    #[validate(length(min = 1))]
    pub title: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddCategoryFormPayload {
    pub title: CategoryTitle,
}

impl AddCategoryFormPayload {
    pub fn into_new_category(self) -> NewCategory {
        NewCategory { title: self.title }
    }
}

#[derive(Debug, Error)]
pub enum AddCategoryFormError {
    #[error("Add category form validation failed: {0}")]
    Validation(String),
    #[error("Add category form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for AddCategoryFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for AddCategoryFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<AddCategoryForm> for AddCategoryFormPayload {
    type Error = AddCategoryFormError;

    fn try_from(value: AddCategoryForm) -> Result<Self, Self::Error> {
        value.validate()?;
        // Collapse inner runs of whitespace so "Sea  views" and "Sea views"
        // cannot coexist as distinct titles.
        let normalized = value.title.split_whitespace().collect::<Vec<_>>().join(" ");

        Ok(Self {
            title: CategoryTitle::new(normalized)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_category_normalizes_whitespace() {
        let form = AddCategoryForm {
            title: "  Sea   views ".to_string(),
        };

        let payload: AddCategoryFormPayload = form.try_into().unwrap();
        assert_eq!(payload.title.as_str(), "Sea views");
    }

    #[test]
    fn add_category_rejects_blank_title() {
        let form = AddCategoryForm {
            title: "   ".to_string(),
        };

        let payload: Result<AddCategoryFormPayload, _> = form.try_into();
        assert!(payload.is_err());
    }
}
