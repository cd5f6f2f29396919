use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::types::{CategoryId, PhotoId, UserId};
use crate::domain::vote::{NewVote, Vote, VoteError};
use crate::models::vote::{NewVote as DbNewVote, Vote as DbVote};
use crate::repository::{
    DieselRepository, RepositoryError, RepositoryResult, VoteReader, VoteWriter,
};

/// Delete every vote in which any of `photo_ids` is the winner or the loser.
///
/// Runs on the caller's connection so it can join a surrounding transaction.
pub(crate) fn delete_votes_referencing(
    conn: &mut SqliteConnection,
    photo_ids: &[i32],
) -> QueryResult<usize> {
    use crate::schema::votes;

    if photo_ids.is_empty() {
        return Ok(0);
    }

    diesel::delete(
        votes::table.filter(
            votes::winner_id
                .eq_any(photo_ids.to_vec())
                .or(votes::loser_id.eq_any(photo_ids.to_vec())),
        ),
    )
    .execute(conn)
}

impl VoteReader for DieselRepository {
    fn list_votes_for_photos(&self, photo_ids: &[PhotoId]) -> RepositoryResult<Vec<Vote>> {
        use crate::schema::votes;

        if photo_ids.is_empty() {
            return Ok(vec![]);
        }

        let mut conn = self.conn()?;
        let ids: Vec<i32> = photo_ids.iter().map(|id| id.get()).collect();

        let items = votes::table
            .filter(
                votes::winner_id
                    .eq_any(ids.clone())
                    .or(votes::loser_id.eq_any(ids)),
            )
            .order(votes::id.asc())
            .select(DbVote::as_select())
            .load::<DbVote>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Vote>, _>>()?;

        Ok(items)
    }

    fn get_user_vote_for_pair(
        &self,
        user_id: UserId,
        a: PhotoId,
        b: PhotoId,
    ) -> RepositoryResult<Option<Vote>> {
        use crate::schema::votes;

        let mut conn = self.conn()?;
        let (a, b) = (a.get(), b.get());

        let vote = votes::table
            .filter(votes::user_id.eq(user_id.get()))
            .filter(
                (votes::winner_id.eq(a).and(votes::loser_id.eq(b)))
                    .or(votes::winner_id.eq(b).and(votes::loser_id.eq(a))),
            )
            .select(DbVote::as_select())
            .first::<DbVote>(&mut conn)
            .optional()?;

        let vote = vote.map(TryInto::try_into).transpose()?;
        Ok(vote)
    }
}

impl VoteWriter for DieselRepository {
    fn cast_vote(&self, vote: &NewVote, category_id: CategoryId) -> RepositoryResult<Vote> {
        use crate::schema::{photos, votes};

        let mut conn = self.conn()?;
        let db_vote: DbNewVote = vote.into();
        let (winner, loser) = (db_vote.winner_id, db_vote.loser_id);

        // IMMEDIATE takes the write lock up front, so neither a concurrent
        // cast nor a category change can slip between the check and the insert.
        let created = conn.immediate_transaction::<_, RepositoryError, _>(|conn| {
            let in_category: i64 = photos::table
                .filter(photos::id.eq_any(vec![winner, loser]))
                .filter(photos::category_id.eq(category_id.get()))
                .count()
                .get_result(conn)?;
            if in_category != 2 {
                return Err(VoteError::CategoryMismatch.into());
            }

            diesel::delete(
                votes::table.filter(votes::user_id.eq(db_vote.user_id)).filter(
                    (votes::winner_id.eq(winner).and(votes::loser_id.eq(loser)))
                        .or(votes::winner_id.eq(loser).and(votes::loser_id.eq(winner))),
                ),
            )
            .execute(conn)?;

            Ok(diesel::insert_into(votes::table)
                .values(&db_vote)
                .returning(DbVote::as_returning())
                .get_result::<DbVote>(conn)?)
        })?;

        Ok(created.try_into()?)
    }

    fn invalidate_votes_for_photo(&self, photo_id: PhotoId) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;

        let affected = conn.transaction::<_, diesel::result::Error, _>(|conn| {
            delete_votes_referencing(conn, &[photo_id.get()])
        })?;

        Ok(affected)
    }
}
