use crate::domain::user::{NewUser, User};
use crate::forms::auth::{LoginFormPayload, RegistrationFormPayload};
use crate::repository::{RepositoryError, UserReader, UserWriter};
use crate::services::password::{hash_password, verify_password};

use super::{ServiceError, ServiceResult};

const USERNAME_TAKEN: &str = "Пользователь с таким именем уже существует";
const EMAIL_TAKEN: &str = "Пользователь с таким e-mail уже существует";

/// Create an account. Clashing usernames are reported before clashing
/// e-mails.
pub fn register_user<R>(payload: RegistrationFormPayload, repo: &R) -> ServiceResult<User>
where
    R: UserReader + UserWriter,
{
    let existing = repo.get_user_by_username(payload.username.as_str()).map_err(|e| {
        log::error!("Failed to look up username: {e}");
        ServiceError::Internal
    })?;
    if existing.is_some() {
        return Err(ServiceError::Conflict(USERNAME_TAKEN.to_string()));
    }

    let existing = repo.get_user_by_email(payload.email.as_str()).map_err(|e| {
        log::error!("Failed to look up e-mail: {e}");
        ServiceError::Internal
    })?;
    if existing.is_some() {
        return Err(ServiceError::Conflict(EMAIL_TAKEN.to_string()));
    }

    let password_hash = hash_password(&payload.password).map_err(|e| {
        log::error!("Failed to hash password: {e}");
        ServiceError::Internal
    })?;

    let new_user = NewUser {
        username: payload.username,
        name: payload.name,
        surname: payload.surname,
        email: payload.email,
        password_hash,
    };

    match repo.create_user(&new_user) {
        Ok(user) => Ok(user),
        // Lost a race with a concurrent registration.
        Err(RepositoryError::Conflict(_)) => {
            Err(ServiceError::Conflict(USERNAME_TAKEN.to_string()))
        }
        Err(e) => {
            log::error!("Failed to create user: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Check credentials. Unknown users and wrong passwords are indistinguishable.
pub fn authenticate<R>(payload: LoginFormPayload, repo: &R) -> ServiceResult<User>
where
    R: UserReader,
{
    let user = repo.get_user_by_username(payload.username.as_str()).map_err(|e| {
        log::error!("Failed to look up user: {e}");
        ServiceError::Internal
    })?;

    match user {
        Some(user) if verify_password(&payload.password, &user.password_hash) => Ok(user),
        _ => Err(ServiceError::Unauthorized),
    }
}
