//! Domain entities, value types and the voting/ranking rules.

pub mod album;
pub mod category;
pub mod comment;
pub mod photo;
pub mod rating;
pub mod types;
pub mod user;
pub mod vote;
