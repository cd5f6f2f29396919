use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::types::{Email, PersonName, TypeConstraintError, Username};

#[derive(Deserialize, Validate)]
pub struct LoginForm {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoginFormPayload {
    pub username: Username,
    pub password: String,
}

#[derive(Debug, Error)]
pub enum LoginFormError {
    #[error("Login form validation failed: {0}")]
    Validation(String),
    #[error("Login form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for LoginFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for LoginFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<LoginForm> for LoginFormPayload {
    type Error = LoginFormError;

    fn try_from(value: LoginForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            username: Username::new(value.username)?,
            password: value.password,
        })
    }
}

#[derive(Deserialize, Validate)]
pub struct RegistrationForm {
    #[validate(length(min = 1, max = 80))]
    pub username: String,
    #[validate(length(min = 1, max = 80))]
    pub name: String,
    #[validate(length(min = 1, max = 80))]
    pub surname: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password1: String,
    pub password2: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationFormPayload {
    pub username: Username,
    pub name: PersonName,
    pub surname: PersonName,
    pub email: Email,
    pub password: String,
}

#[derive(Debug, Error)]
pub enum RegistrationFormError {
    #[error("Registration form validation failed: {0}")]
    Validation(String),
    #[error("Registration form contains invalid data: {0}")]
    TypeConstraint(String),
    #[error("Пароли не совпадают")]
    PasswordMismatch,
}

impl From<ValidationErrors> for RegistrationFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for RegistrationFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<RegistrationForm> for RegistrationFormPayload {
    type Error = RegistrationFormError;

    fn try_from(value: RegistrationForm) -> Result<Self, Self::Error> {
        if value.password1 != value.password2 {
            return Err(RegistrationFormError::PasswordMismatch);
        }
        value.validate()?;

        Ok(Self {
            username: Username::new(value.username)?,
            name: PersonName::new(value.name)?,
            surname: PersonName::new(value.surname)?,
            email: Email::new(value.email)?,
            password: value.password1,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration(password1: &str, password2: &str) -> RegistrationForm {
        RegistrationForm {
            username: " dima ".to_string(),
            name: "Дмитрий".to_string(),
            surname: "Иванов".to_string(),
            email: "dima@example.com".to_string(),
            password1: password1.to_string(),
            password2: password2.to_string(),
        }
    }

    #[test]
    fn registration_trims_username() {
        let payload: RegistrationFormPayload = registration("secret", "secret").try_into().unwrap();
        assert_eq!(payload.username.as_str(), "dima");
        assert_eq!(payload.password, "secret");
    }

    #[test]
    fn registration_rejects_mismatched_passwords() {
        let result: Result<RegistrationFormPayload, _> = registration("secret", "other").try_into();
        assert!(matches!(result, Err(RegistrationFormError::PasswordMismatch)));
    }

    #[test]
    fn registration_rejects_invalid_email() {
        let mut form = registration("secret", "secret");
        form.email = "nope".to_string();
        let result: Result<RegistrationFormPayload, _> = form.try_into();
        assert!(matches!(result, Err(RegistrationFormError::Validation(_))));
    }

    #[test]
    fn login_requires_username() {
        let form = LoginForm {
            username: String::new(),
            password: "secret".to_string(),
        };
        let result: Result<LoginFormPayload, _> = form.try_into();
        assert!(result.is_err());
    }
}
