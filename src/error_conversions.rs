//! Conversions from domain and form errors into repository and service errors.
//!
//! Kept apart from the domain so that the domain layer does not depend on the
//! error types of the layers above it.

use crate::domain::types::TypeConstraintError;
use crate::repository::RepositoryError;

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

#[cfg(feature = "server")]
mod server {
    use crate::domain::types::TypeConstraintError;
    use crate::forms::albums::AlbumFormError;
    use crate::forms::auth::{LoginFormError, RegistrationFormError};
    use crate::forms::categories::AddCategoryFormError;
    use crate::forms::comments::AddCommentFormError;
    use crate::forms::photos::{SetPhotoCategoryFormError, UploadPhotoFormError};
    use crate::forms::votes::CastVoteFormError;
    use crate::services::errors::ServiceError;

    impl From<TypeConstraintError> for ServiceError {
        fn from(val: TypeConstraintError) -> Self {
            ServiceError::TypeConstraint(val.to_string())
        }
    }

    macro_rules! form_error_into_service_error {
        ($($error:ty),+ $(,)?) => {
            $(
                impl From<$error> for ServiceError {
                    fn from(val: $error) -> Self {
                        ServiceError::Form(val.to_string())
                    }
                }
            )+
        };
    }

    form_error_into_service_error!(
        LoginFormError,
        RegistrationFormError,
        AlbumFormError,
        AddCategoryFormError,
        AddCommentFormError,
        UploadPhotoFormError,
        SetPhotoCategoryFormError,
        CastVoteFormError,
    );
}
