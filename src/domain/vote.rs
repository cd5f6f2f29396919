//! Pairwise votes and the rules a vote must satisfy before it is recorded.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::photo::Photo;
use crate::domain::types::{CategoryId, PhotoId, UserId, VoteId};

/// Reasons a vote is rejected before anything is persisted.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum VoteError {
    /// A photo was compared with itself.
    #[error("a photo cannot be voted against itself")]
    InvalidPair,
    /// The photos are in different categories or at least one is uncategorized.
    #[error("both photos must belong to the same category")]
    CategoryMismatch,
}

/// A single user's recorded preference of `winner_id` over `loser_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vote {
    pub id: VoteId,
    pub user_id: UserId,
    pub winner_id: PhotoId,
    pub loser_id: PhotoId,
    pub created_at: NaiveDateTime,
}

impl Vote {
    /// Whether this vote compares exactly the unordered pair `{a, b}`.
    pub fn covers_pair(&self, a: PhotoId, b: PhotoId) -> bool {
        (self.winner_id == a && self.loser_id == b) || (self.winner_id == b && self.loser_id == a)
    }

    /// Whether `photo_id` takes part in this vote on either side.
    pub fn references(&self, photo_id: PhotoId) -> bool {
        self.winner_id == photo_id || self.loser_id == photo_id
    }
}

/// A validated vote ready to be recorded.
///
/// Construction guarantees `winner_id != loser_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewVote {
    user_id: UserId,
    winner_id: PhotoId,
    loser_id: PhotoId,
}

impl NewVote {
    pub fn new(user_id: UserId, winner_id: PhotoId, loser_id: PhotoId) -> Result<Self, VoteError> {
        if winner_id == loser_id {
            return Err(VoteError::InvalidPair);
        }
        Ok(Self {
            user_id,
            winner_id,
            loser_id,
        })
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn winner_id(&self) -> PhotoId {
        self.winner_id
    }

    pub fn loser_id(&self) -> PhotoId {
        self.loser_id
    }
}

/// Returns the category shared by `winner` and `loser`.
///
/// Both photos must be categorized and their categories equal. The check
/// applies at cast time only; later moves are handled by invalidating votes.
pub fn shared_category(winner: &Photo, loser: &Photo) -> Result<CategoryId, VoteError> {
    if winner.id == loser.id {
        return Err(VoteError::InvalidPair);
    }
    match (winner.category_id, loser.category_id) {
        (Some(a), Some(b)) if a == b => Ok(a),
        _ => Err(VoteError::CategoryMismatch),
    }
}
