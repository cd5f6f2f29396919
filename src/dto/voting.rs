use serde::Serialize;

use crate::domain::category::Category;
use crate::domain::photo::Photo;
use crate::domain::rating::{PhotoScore, VotingPair};
use crate::domain::types::PhotoId;

/// A photo's entry on a top list.
#[derive(Debug, Clone, Serialize)]
pub struct RankedPhotoDto {
    pub place: usize,
    pub photo: Photo,
    pub score: PhotoScore,
}

/// Voting page of a category.
#[derive(Debug, Clone)]
pub struct VotingPageDto {
    pub category: Category,
    pub pair: VotingPair<Photo>,
    /// Winner the current user already picked for the drawn pair.
    pub previous_winner: Option<PhotoId>,
}

/// The leading photo of a category, if the category has photos.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryLeaderDto {
    pub category: Category,
    pub leader: Option<RankedPhotoDto>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test::{sample_category, sample_photo};

    #[test]
    fn leader_serializes_flat_ids_for_templates() {
        let dto = CategoryLeaderDto {
            category: sample_category(3, "Пейзажи"),
            leader: Some(RankedPhotoDto {
                place: 1,
                photo: sample_photo(7, 1, Some(3)),
                score: PhotoScore::from_counts(2, 1),
            }),
        };

        let value = serde_json::to_value(&dto).unwrap();
        assert_eq!(value["category"]["id"], 3);
        assert_eq!(value["category"]["title"], "Пейзажи");
        assert_eq!(value["leader"]["photo"]["id"], 7);
        assert_eq!(value["leader"]["score"]["score"], 1);
    }

    #[test]
    fn empty_category_has_null_leader() {
        let dto = CategoryLeaderDto {
            category: sample_category(1, "Портреты"),
            leader: None,
        };

        let value = serde_json::to_value(&dto).unwrap();
        assert!(value["leader"].is_null());
    }
}
