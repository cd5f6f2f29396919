use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{CategoryId, CategoryTitle};

/// Cross-user grouping of photos used as the voting and ranking scope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub title: CategoryTitle,
    pub created_at: NaiveDateTime,
}

/// Data required to insert a new [`Category`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewCategory {
    pub title: CategoryTitle,
}
