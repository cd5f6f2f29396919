//! Diesel row models and their conversions into domain entities.

pub mod album;
pub mod category;
pub mod comment;
pub mod config;
pub mod photo;
pub mod user;
pub mod vote;
