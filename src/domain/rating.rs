//! Score aggregation and ranking over recorded votes.
//!
//! Scores are never stored: every call reduces the vote set it is given, so a
//! ranking can never disagree with the votes it was computed from.

use std::collections::BTreeMap;

use rand::Rng;
use serde::Serialize;

use crate::domain::types::PhotoId;
use crate::domain::vote::Vote;

/// Number of entries shown on a category's top list when no limit is given.
pub const DEFAULT_TOP_LIMIT: usize = 10;

/// Vote tallies of one photo.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PhotoScore {
    /// Votes in which the photo won.
    pub good: usize,
    /// Votes in which the photo lost.
    pub bad: usize,
    /// `good - bad`, with no normalization for the number of votes.
    pub score: i64,
}

impl PhotoScore {
    pub fn from_counts(good: usize, bad: usize) -> Self {
        Self {
            good,
            bad,
            score: good as i64 - bad as i64,
        }
    }
}

/// A photo's position on a top list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RankedPhoto {
    pub photo_id: PhotoId,
    /// 1-based position; equal scores still get distinct places.
    pub place: usize,
    pub score: PhotoScore,
}

/// Outcome of drawing two photos to compare.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VotingPair<T> {
    Pair(T, T),
    /// Fewer than two photos are available. This is an expected state, not a failure.
    InsufficientPhotos,
}

/// Tallies `votes` for every photo in `photo_ids`.
///
/// Photos without votes score zero. Votes naming photos outside the set are
/// ignored for those photos.
pub fn compute_scores<'a, I>(photo_ids: &[PhotoId], votes: I) -> BTreeMap<PhotoId, PhotoScore>
where
    I: IntoIterator<Item = &'a Vote>,
{
    let mut counts: BTreeMap<PhotoId, (usize, usize)> =
        photo_ids.iter().map(|id| (*id, (0, 0))).collect();

    for vote in votes {
        if let Some((good, _)) = counts.get_mut(&vote.winner_id) {
            *good += 1;
        }
        if let Some((_, bad)) = counts.get_mut(&vote.loser_id) {
            *bad += 1;
        }
    }

    counts
        .into_iter()
        .map(|(id, (good, bad))| (id, PhotoScore::from_counts(good, bad)))
        .collect()
}

/// Orders scored photos best-first and keeps at most `limit` of them.
///
/// Sorting is by descending score, ties broken by ascending photo id, so the
/// result is deterministic for unchanged votes.
pub fn rank_top(scores: &BTreeMap<PhotoId, PhotoScore>, limit: usize) -> Vec<RankedPhoto> {
    let mut entries: Vec<(PhotoId, PhotoScore)> =
        scores.iter().map(|(id, score)| (*id, *score)).collect();

    entries.sort_by(|(a_id, a), (b_id, b)| b.score.cmp(&a.score).then_with(|| a_id.cmp(b_id)));

    entries
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(index, (photo_id, score))| RankedPhoto {
            photo_id,
            place: index + 1,
            score,
        })
        .collect()
}

/// Draws two distinct photos to compare.
///
/// The first photo is drawn uniformly, removed, and the second drawn
/// uniformly from what remains. This is not a uniform draw over unordered
/// pairs and is kept that way on purpose.
pub fn pick_voting_pair<T, R>(photos: &[T], rng: &mut R) -> VotingPair<T>
where
    T: Clone,
    R: Rng + ?Sized,
{
    if photos.len() < 2 {
        return VotingPair::InsufficientPhotos;
    }

    let mut remaining: Vec<&T> = photos.iter().collect();
    let first = remaining.remove(rng.gen_range(0..remaining.len()));
    let second = remaining[rng.gen_range(0..remaining.len())];

    VotingPair::Pair(first.clone(), second.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{UserId, VoteId};
    use chrono::DateTime;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn id(value: i32) -> PhotoId {
        PhotoId::new(value).unwrap()
    }

    fn vote(seq: i32, user: i32, winner: i32, loser: i32) -> Vote {
        Vote {
            id: VoteId::new(seq).unwrap(),
            user_id: UserId::new(user).unwrap(),
            winner_id: id(winner),
            loser_id: id(loser),
            created_at: DateTime::from_timestamp(0, 0).unwrap().naive_utc(),
        }
    }

    /// P1:(3,1,+2), P2:(1,1,0), P3:(0,2,-2)
    fn example_votes() -> Vec<Vote> {
        vec![
            vote(1, 1, 1, 2),
            vote(2, 1, 1, 3),
            vote(3, 2, 1, 3),
            vote(4, 2, 2, 1),
        ]
    }

    #[test]
    fn computes_good_bad_and_score() {
        let scores = compute_scores(&[id(1), id(2), id(3)], &example_votes());

        assert_eq!(scores[&id(1)], PhotoScore::from_counts(3, 1));
        assert_eq!(scores[&id(2)], PhotoScore::from_counts(1, 1));
        assert_eq!(scores[&id(3)], PhotoScore::from_counts(0, 2));
        assert_eq!(scores[&id(1)].score, 2);
        assert_eq!(scores[&id(3)].score, -2);
    }

    #[test]
    fn photos_without_votes_score_zero() {
        let scores = compute_scores(&[id(9)], &example_votes());
        assert_eq!(scores[&id(9)], PhotoScore::default());
    }

    #[test]
    fn scores_do_not_depend_on_vote_order() {
        let photos = [id(1), id(2), id(3)];
        let votes = example_votes();
        let mut reversed = votes.clone();
        reversed.reverse();

        assert_eq!(
            compute_scores(&photos, &votes),
            compute_scores(&photos, &reversed)
        );
    }

    #[test]
    fn ranks_example_category() {
        let scores = compute_scores(&[id(3), id(1), id(2)], &example_votes());
        let top = rank_top(&scores, DEFAULT_TOP_LIMIT);

        let order: Vec<(i32, usize)> = top.iter().map(|r| (r.photo_id.get(), r.place)).collect();
        assert_eq!(order, vec![(1, 1), (2, 2), (3, 3)]);
    }

    #[test]
    fn ties_are_broken_by_ascending_id() {
        // P4 is listed first and both P2 and P4 end at zero.
        let votes = vec![vote(1, 1, 4, 2), vote(2, 2, 2, 4)];
        let scores = compute_scores(&[id(4), id(2)], &votes);
        let top = rank_top(&scores, DEFAULT_TOP_LIMIT);

        assert_eq!(top[0].photo_id, id(2));
        assert_eq!(top[1].photo_id, id(4));
        assert_eq!(top[0].place, 1);
        assert_eq!(top[1].place, 2);
    }

    #[test]
    fn single_vote_outranks_many_balanced_votes() {
        let mut votes = vec![vote(1, 1, 1, 3)];
        for seq in 0..50 {
            votes.push(vote(2 + seq * 2, 10 + seq, 2, 3));
            votes.push(vote(3 + seq * 2, 10 + seq, 3, 2));
        }
        let scores = compute_scores(&[id(1), id(2)], &votes);
        let top = rank_top(&scores, DEFAULT_TOP_LIMIT);

        assert_eq!(top[0].photo_id, id(1));
        assert_eq!(top[1].score.good, 50);
    }

    #[test]
    fn truncates_to_limit_with_consecutive_places() {
        let photos: Vec<PhotoId> = (1..=15).map(id).collect();
        let scores = compute_scores(&photos, &[]);
        let top = rank_top(&scores, DEFAULT_TOP_LIMIT);

        assert_eq!(top.len(), DEFAULT_TOP_LIMIT);
        let places: Vec<usize> = top.iter().map(|r| r.place).collect();
        assert_eq!(places, (1..=DEFAULT_TOP_LIMIT).collect::<Vec<_>>());
        assert_eq!(top[0].photo_id, id(1));
    }

    #[test]
    fn ranking_a_single_photo_is_allowed() {
        let scores = compute_scores(&[id(5)], &[]);
        let top = rank_top(&scores, 3);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].place, 1);
    }

    #[test]
    fn one_photo_is_insufficient_for_a_pair() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(
            pick_voting_pair(&[id(1)], &mut rng),
            VotingPair::InsufficientPhotos
        );
        assert_eq!(
            pick_voting_pair::<PhotoId, _>(&[], &mut rng),
            VotingPair::InsufficientPhotos
        );
    }

    #[test]
    fn two_photos_always_yield_both() {
        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            match pick_voting_pair(&[id(1), id(2)], &mut rng) {
                VotingPair::Pair(a, b) => {
                    let mut pair = [a.get(), b.get()];
                    pair.sort();
                    assert_eq!(pair, [1, 2]);
                }
                VotingPair::InsufficientPhotos => panic!("expected a pair"),
            }
        }
    }

    #[test]
    fn pairs_are_always_distinct() {
        let photos: Vec<PhotoId> = (1..=5).map(id).collect();
        for seed in 0..64 {
            let mut rng = StdRng::seed_from_u64(seed);
            match pick_voting_pair(&photos, &mut rng) {
                VotingPair::Pair(a, b) => {
                    assert_ne!(a, b);
                    assert!(photos.contains(&a) && photos.contains(&b));
                }
                VotingPair::InsufficientPhotos => panic!("expected a pair"),
            }
        }
    }
}
