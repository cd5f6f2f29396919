use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::types::TypeConstraintError;
use crate::domain::vote::{NewVote as DomainNewVote, Vote as DomainVote};

/// Diesel model representing the `votes` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::votes)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Vote {
    pub id: i32,
    pub user_id: i32,
    pub winner_id: i32,
    pub loser_id: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::votes)]
pub struct NewVote {
    pub user_id: i32,
    pub winner_id: i32,
    pub loser_id: i32,
}

impl TryFrom<Vote> for DomainVote {
    type Error = TypeConstraintError;

    fn try_from(vote: Vote) -> Result<Self, Self::Error> {
        Ok(Self {
            id: vote.id.try_into()?,
            user_id: vote.user_id.try_into()?,
            winner_id: vote.winner_id.try_into()?,
            loser_id: vote.loser_id.try_into()?,
            created_at: vote.created_at,
        })
    }
}

impl From<&DomainNewVote> for NewVote {
    fn from(vote: &DomainNewVote) -> Self {
        Self {
            user_id: vote.user_id().get(),
            winner_id: vote.winner_id().get(),
            loser_id: vote.loser_id().get(),
        }
    }
}
