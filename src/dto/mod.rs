//! Template-facing views assembled by the service layer.

pub mod categories;
pub mod photos;
pub mod voting;
