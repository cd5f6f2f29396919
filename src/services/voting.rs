use std::collections::HashMap;

use rand::Rng;

use crate::domain::category::Category;
use crate::domain::photo::Photo;
use crate::domain::rating::{
    DEFAULT_TOP_LIMIT, VotingPair, compute_scores, pick_voting_pair, rank_top,
};
use crate::domain::types::{CategoryId, PhotoId};
use crate::domain::user::User;
use crate::domain::vote::{NewVote, Vote, shared_category};
use crate::dto::photos::ScoredPhotoDto;
use crate::dto::voting::{CategoryLeaderDto, RankedPhotoDto, VotingPageDto};
use crate::forms::votes::CastVoteFormPayload;
use crate::repository::{CategoryReader, PhotoReader, RepositoryError, VoteReader, VoteWriter};
use crate::services::categories::find_category;
use crate::services::photos::find_photo;

use super::{ServiceError, ServiceResult};

/// Record that `user` prefers the winner over the loser.
///
/// The pair is rejected before anything is written when a photo is compared
/// with itself, when either photo is missing, or when the photos do not
/// share a category. The category is checked again inside the write, so a
/// photo moved meanwhile also yields [`ServiceError::CategoryMismatch`].
/// Returns the shared category so the caller can continue voting there.
pub fn cast_vote<R>(payload: CastVoteFormPayload, user: &User, repo: &R) -> ServiceResult<CategoryId>
where
    R: PhotoReader + VoteWriter,
{
    let vote = NewVote::new(user.id, payload.winner_id, payload.loser_id)?;

    let winner = find_photo(repo, vote.winner_id())?;
    let loser = find_photo(repo, vote.loser_id())?;
    let category_id = shared_category(&winner, &loser)?;

    repo.cast_vote(&vote, category_id).map_err(|e| match e {
        RepositoryError::Vote(err) => err.into(),
        e => {
            log::error!("Failed to record vote: {e}");
            ServiceError::Internal
        }
    })?;

    Ok(category_id)
}

/// Draw two photos of a category for the voting page, along with the winner
/// `user` already chose for that pair, if any.
pub fn show_voting_pair<R, G>(
    category_id: CategoryId,
    user: &User,
    repo: &R,
    rng: &mut G,
) -> ServiceResult<VotingPageDto>
where
    R: CategoryReader + PhotoReader + VoteReader,
    G: Rng + ?Sized,
{
    let category = find_category(repo, category_id)?;
    let photos = list_category_photos(repo, category_id)?;
    let pair = pick_voting_pair(&photos, rng);

    let previous_winner = match &pair {
        VotingPair::Pair(first, second) => repo
            .get_user_vote_for_pair(user.id, first.id, second.id)
            .map_err(|e| {
                log::error!("Failed to load vote of user {}: {e}", user.id);
                ServiceError::Internal
            })?
            .map(|vote| vote.winner_id),
        VotingPair::InsufficientPhotos => None,
    };

    Ok(VotingPageDto {
        category,
        pair,
        previous_winner,
    })
}

/// Best photos of a category. A missing or zero `limit` means the default.
pub fn show_top<R>(
    category_id: CategoryId,
    limit: Option<usize>,
    repo: &R,
) -> ServiceResult<(Category, Vec<RankedPhotoDto>)>
where
    R: CategoryReader + PhotoReader + VoteReader,
{
    let category = find_category(repo, category_id)?;
    let limit = limit.filter(|limit| *limit > 0).unwrap_or(DEFAULT_TOP_LIMIT);

    let photos = list_category_photos(repo, category_id)?;
    let ranked = rank_photos(photos, limit, repo)?;

    Ok((category, ranked))
}

/// The leader of every category, in category title order.
pub fn show_rating<R>(repo: &R) -> ServiceResult<Vec<CategoryLeaderDto>>
where
    R: CategoryReader + PhotoReader + VoteReader,
{
    let categories = repo.list_categories().map_err(|e| {
        log::error!("Failed to list categories: {e}");
        ServiceError::Internal
    })?;

    let mut leaders = Vec::with_capacity(categories.len());
    for category in categories {
        let photos = list_category_photos(repo, category.id)?;
        let leader = rank_photos(photos, 1, repo)?.into_iter().next();
        leaders.push(CategoryLeaderDto { category, leader });
    }

    Ok(leaders)
}

/// Annotate `photos` with their tallies, keeping the input order.
pub fn score_photos<R>(photos: Vec<Photo>, repo: &R) -> ServiceResult<Vec<ScoredPhotoDto>>
where
    R: VoteReader,
{
    let ids: Vec<PhotoId> = photos.iter().map(|photo| photo.id).collect();
    let votes = load_votes(repo, &ids)?;
    let scores = compute_scores(&ids, &votes);

    Ok(photos
        .into_iter()
        .map(|photo| ScoredPhotoDto {
            score: scores.get(&photo.id).copied().unwrap_or_default(),
            photo,
        })
        .collect())
}

fn rank_photos<R>(photos: Vec<Photo>, limit: usize, repo: &R) -> ServiceResult<Vec<RankedPhotoDto>>
where
    R: VoteReader,
{
    let ids: Vec<PhotoId> = photos.iter().map(|photo| photo.id).collect();
    let votes = load_votes(repo, &ids)?;
    let scores = compute_scores(&ids, &votes);

    let mut by_id: HashMap<PhotoId, Photo> =
        photos.into_iter().map(|photo| (photo.id, photo)).collect();

    Ok(rank_top(&scores, limit)
        .into_iter()
        .filter_map(|ranked| {
            by_id.remove(&ranked.photo_id).map(|photo| RankedPhotoDto {
                place: ranked.place,
                photo,
                score: ranked.score,
            })
        })
        .collect())
}

fn list_category_photos<R>(repo: &R, category_id: CategoryId) -> ServiceResult<Vec<Photo>>
where
    R: PhotoReader,
{
    repo.list_category_photos(category_id).map_err(|e| {
        log::error!("Failed to list photos of category {category_id}: {e}");
        ServiceError::Internal
    })
}

fn load_votes<R>(repo: &R, photo_ids: &[PhotoId]) -> ServiceResult<Vec<Vote>>
where
    R: VoteReader,
{
    if photo_ids.is_empty() {
        return Ok(Vec::new());
    }
    repo.list_votes_for_photos(photo_ids).map_err(|e| {
        log::error!("Failed to list votes: {e}");
        ServiceError::Internal
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::photo::PhotoContent;
    use crate::domain::types::AlbumId;
    use crate::repository::test::{
        TestRepository, sample_album, sample_category, sample_photo, sample_user, sample_vote,
    };
    use crate::repository::{PhotoWriter, RepositoryResult};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn payload(winner: i32, loser: i32) -> CastVoteFormPayload {
        CastVoteFormPayload {
            winner_id: PhotoId::new(winner).unwrap(),
            loser_id: PhotoId::new(loser).unwrap(),
        }
    }

    /// Photos 1-3 in category 10, photo 4 in category 11, photo 5 uncategorized.
    fn repo() -> TestRepository {
        TestRepository::new()
            .with_users(vec![sample_user(1, "alice"), sample_user(2, "bob")])
            .with_albums(vec![sample_album(1, 1, "Trips")])
            .with_categories(vec![sample_category(10, "Sea"), sample_category(11, "Mountains")])
            .with_photos(vec![
                sample_photo(1, 1, Some(10)),
                sample_photo(2, 1, Some(10)),
                sample_photo(3, 1, Some(10)),
                sample_photo(4, 1, Some(11)),
                sample_photo(5, 1, None),
            ])
            .with_id_offset(100)
    }

    #[test]
    fn cast_vote_records_winner_and_returns_category() {
        let repo = repo();
        let user = sample_user(1, "alice");

        let category = cast_vote(payload(1, 2), &user, &repo).unwrap();

        assert_eq!(category, CategoryId::new(10).unwrap());
        let votes = repo.votes();
        assert_eq!(votes.len(), 1);
        assert_eq!(votes[0].winner_id, PhotoId::new(1).unwrap());
        assert_eq!(votes[0].loser_id, PhotoId::new(2).unwrap());
        assert_eq!(votes[0].user_id, user.id);
    }

    #[test]
    fn reversed_vote_replaces_previous_one() {
        let repo = repo();
        let user = sample_user(1, "alice");

        cast_vote(payload(1, 2), &user, &repo).unwrap();
        cast_vote(payload(2, 1), &user, &repo).unwrap();

        let votes = repo.votes();
        assert_eq!(votes.len(), 1);
        assert_eq!(votes[0].winner_id, PhotoId::new(2).unwrap());
    }

    #[test]
    fn votes_of_other_users_are_kept() {
        let repo = repo();

        cast_vote(payload(1, 2), &sample_user(1, "alice"), &repo).unwrap();
        cast_vote(payload(2, 1), &sample_user(2, "bob"), &repo).unwrap();

        assert_eq!(repo.votes().len(), 2);
    }

    #[test]
    fn self_comparison_is_rejected_without_writes() {
        let repo = repo();
        let result = cast_vote(payload(1, 1), &sample_user(1, "alice"), &repo);

        assert_eq!(result, Err(ServiceError::InvalidPair));
        assert!(repo.votes().is_empty());
    }

    #[test]
    fn mismatched_categories_are_rejected_without_writes() {
        let repo = repo();
        let user = sample_user(1, "alice");

        assert_eq!(
            cast_vote(payload(1, 4), &user, &repo),
            Err(ServiceError::CategoryMismatch)
        );
        assert_eq!(
            cast_vote(payload(5, 1), &user, &repo),
            Err(ServiceError::CategoryMismatch)
        );
        assert!(repo.votes().is_empty());
    }

    #[test]
    fn missing_photo_is_not_found() {
        let repo = repo();
        let result = cast_vote(payload(1, 99), &sample_user(1, "alice"), &repo);

        assert_eq!(result, Err(ServiceError::NotFound));
        assert!(repo.votes().is_empty());
    }

    #[test]
    fn top_ranks_category_photos() {
        let repo = repo().with_votes(vec![
            sample_vote(50, 1, 1, 2),
            sample_vote(51, 1, 1, 3),
            sample_vote(52, 2, 1, 3),
            sample_vote(53, 2, 2, 1),
        ]);

        let (category, top) = show_top(CategoryId::new(10).unwrap(), None, &repo).unwrap();

        assert_eq!(category.title.as_str(), "Sea");
        let order: Vec<(i32, usize, i64)> = top
            .iter()
            .map(|r| (r.photo.id.get(), r.place, r.score.score))
            .collect();
        assert_eq!(order, vec![(1, 1, 2), (2, 2, 0), (3, 3, -2)]);
    }

    #[test]
    fn top_respects_limit() {
        let repo = repo();
        let (_, top) = show_top(CategoryId::new(10).unwrap(), Some(2), &repo).unwrap();

        assert_eq!(top.len(), 2);
        assert_eq!(top[0].photo.id.get(), 1);
        assert_eq!(top[1].place, 2);
    }

    #[test]
    fn top_of_unknown_category_is_not_found() {
        let repo = repo();
        let result = show_top(CategoryId::new(77).unwrap(), None, &repo);
        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn voting_pair_needs_two_photos() {
        let repo = repo();
        let user = sample_user(1, "alice");
        let mut rng = StdRng::seed_from_u64(3);

        let page = show_voting_pair(CategoryId::new(11).unwrap(), &user, &repo, &mut rng).unwrap();
        assert!(matches!(page.pair, VotingPair::InsufficientPhotos));
        assert_eq!(page.previous_winner, None);

        let page = show_voting_pair(CategoryId::new(10).unwrap(), &user, &repo, &mut rng).unwrap();
        match page.pair {
            VotingPair::Pair(a, b) => {
                assert_ne!(a.id, b.id);
                assert_eq!(a.category_id, Some(CategoryId::new(10).unwrap()));
                assert_eq!(b.category_id, Some(CategoryId::new(10).unwrap()));
            }
            VotingPair::InsufficientPhotos => panic!("expected a pair"),
        }
    }

    #[test]
    fn voting_page_shows_the_users_previous_choice() {
        let repo = repo()
            .with_categories(vec![sample_category(12, "Birds")])
            .with_photos(vec![sample_photo(6, 1, Some(12)), sample_photo(7, 1, Some(12))])
            .with_votes(vec![sample_vote(50, 1, 7, 6), sample_vote(51, 2, 6, 7)]);
        let mut rng = StdRng::seed_from_u64(5);
        let category = CategoryId::new(12).unwrap();

        let page = show_voting_pair(category, &sample_user(1, "alice"), &repo, &mut rng).unwrap();
        assert!(matches!(page.pair, VotingPair::Pair(_, _)));
        assert_eq!(page.previous_winner, Some(PhotoId::new(7).unwrap()));

        let page = show_voting_pair(category, &sample_user(2, "bob"), &repo, &mut rng).unwrap();
        assert_eq!(page.previous_winner, Some(PhotoId::new(6).unwrap()));

        let newcomer = sample_user(3, "carol");
        let page = show_voting_pair(category, &newcomer, &repo, &mut rng).unwrap();
        assert_eq!(page.previous_winner, None);
    }

    /// Moves the winner into another category right before the vote is
    /// written, as a concurrent category change would.
    struct MovedBeforeWrite {
        inner: TestRepository,
        target: CategoryId,
    }

    impl PhotoReader for MovedBeforeWrite {
        fn get_photo_by_id(&self, id: PhotoId) -> RepositoryResult<Option<Photo>> {
            self.inner.get_photo_by_id(id)
        }

        fn list_album_photos(&self, album_id: AlbumId) -> RepositoryResult<Vec<Photo>> {
            self.inner.list_album_photos(album_id)
        }

        fn list_category_photos(&self, category_id: CategoryId) -> RepositoryResult<Vec<Photo>> {
            self.inner.list_category_photos(category_id)
        }

        fn count_photos_by_category(&self) -> RepositoryResult<HashMap<CategoryId, usize>> {
            self.inner.count_photos_by_category()
        }

        fn get_photo_content(&self, id: PhotoId) -> RepositoryResult<Option<PhotoContent>> {
            self.inner.get_photo_content(id)
        }
    }

    impl VoteWriter for MovedBeforeWrite {
        fn cast_vote(&self, vote: &NewVote, category_id: CategoryId) -> RepositoryResult<Vote> {
            self.inner
                .set_photo_category(vote.winner_id(), Some(self.target))?;
            self.inner.cast_vote(vote, category_id)
        }

        fn invalidate_votes_for_photo(&self, photo_id: PhotoId) -> RepositoryResult<usize> {
            self.inner.invalidate_votes_for_photo(photo_id)
        }
    }

    #[test]
    fn photo_moved_before_the_write_is_rejected() {
        let repo = MovedBeforeWrite {
            inner: repo(),
            target: CategoryId::new(11).unwrap(),
        };

        let result = cast_vote(payload(1, 2), &sample_user(1, "alice"), &repo);

        assert_eq!(result, Err(ServiceError::CategoryMismatch));
        assert!(repo.inner.votes().is_empty());
        let moved = repo.inner.get_photo_by_id(PhotoId::new(1).unwrap()).unwrap().unwrap();
        assert_eq!(moved.category_id, Some(CategoryId::new(11).unwrap()));
    }

    #[test]
    fn rating_lists_leader_per_category() {
        let repo = repo()
            .with_categories(vec![sample_category(12, "Empty")])
            .with_votes(vec![sample_vote(50, 1, 3, 1), sample_vote(51, 2, 3, 2)]);

        let leaders = show_rating(&repo).unwrap();

        let summary: Vec<(&str, Option<i32>)> = leaders
            .iter()
            .map(|l| (l.category.title.as_str(), l.leader.as_ref().map(|r| r.photo.id.get())))
            .collect();
        assert_eq!(
            summary,
            vec![("Empty", None), ("Mountains", Some(4)), ("Sea", Some(3))]
        );
    }

    #[test]
    fn score_photos_keeps_order_and_counts() {
        let repo = repo().with_votes(vec![sample_vote(50, 1, 2, 1)]);
        let photos = vec![sample_photo(2, 1, Some(10)), sample_photo(1, 1, Some(10))];

        let scored = score_photos(photos, &repo).unwrap();

        assert_eq!(scored[0].photo.id.get(), 2);
        assert_eq!(scored[0].score.good, 1);
        assert_eq!(scored[1].score.bad, 1);
        assert_eq!(scored[1].score.score, -1);
    }
}
