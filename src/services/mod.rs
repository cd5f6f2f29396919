//! Business rules behind the HTTP routes.
//!
//! Services are generic over the repository traits so they can be exercised
//! against the in-memory test repository.

pub mod albums;
pub mod auth;
pub mod categories;
pub mod errors;
pub mod password;
pub mod photos;
pub mod voting;

pub use errors::{ServiceError, ServiceResult};
