//! Request forms and their validated payloads.

pub mod albums;
pub mod auth;
pub mod categories;
pub mod comments;
pub mod photos;
pub mod votes;
