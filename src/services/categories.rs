use crate::domain::category::Category;
use crate::domain::types::CategoryId;
use crate::dto::categories::CategoryDto;
use crate::forms::categories::AddCategoryFormPayload;
use crate::repository::{CategoryReader, CategoryWriter, PhotoReader, RepositoryError};

use super::{ServiceError, ServiceResult};

/// Load a category or fail with [`ServiceError::NotFound`].
pub(crate) fn find_category<R>(repo: &R, category_id: CategoryId) -> ServiceResult<Category>
where
    R: CategoryReader,
{
    match repo.get_category_by_id(category_id) {
        Ok(Some(category)) => Ok(category),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get category {category_id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// All categories with the number of photos filed under each.
pub fn show_categories<R>(repo: &R) -> ServiceResult<Vec<CategoryDto>>
where
    R: CategoryReader + PhotoReader,
{
    let categories = repo.list_categories().map_err(|e| {
        log::error!("Failed to list categories: {e}");
        ServiceError::Internal
    })?;

    let counts = repo.count_photos_by_category().map_err(|e| {
        log::error!("Failed to count photos by category: {e}");
        ServiceError::Internal
    })?;

    Ok(categories
        .into_iter()
        .map(|category| {
            let count = counts.get(&category.id).copied().unwrap_or(0);
            CategoryDto::new(category, count)
        })
        .collect())
}

pub fn add_category<R>(payload: AddCategoryFormPayload, repo: &R) -> ServiceResult<Category>
where
    R: CategoryWriter,
{
    let category = payload.into_new_category();
    match repo.create_category(&category) {
        Ok(created) => Ok(created),
        Err(RepositoryError::Conflict(_)) => Err(ServiceError::Conflict(
            "Категория с таким названием уже существует".to_string(),
        )),
        Err(e) => {
            log::error!("Failed to add category: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Delete a category. Its photos stay in their albums without a category
/// and lose every vote cast on them.
pub fn delete_category<R>(category_id: CategoryId, repo: &R) -> ServiceResult<()>
where
    R: CategoryWriter,
{
    match repo.delete_category(category_id) {
        Ok(0) => Err(ServiceError::NotFound),
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to delete category {category_id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::CategoryTitle;
    use crate::repository::test::{
        TestRepository, sample_category, sample_photo, sample_vote,
    };

    fn payload(title: &str) -> AddCategoryFormPayload {
        AddCategoryFormPayload {
            title: CategoryTitle::new(title).unwrap(),
        }
    }

    #[test]
    fn categories_are_listed_with_photo_counts() {
        let repo = TestRepository::new()
            .with_categories(vec![sample_category(1, "Sea"), sample_category(2, "Cats")])
            .with_photos(vec![
                sample_photo(10, 1, Some(1)),
                sample_photo(11, 1, Some(1)),
                sample_photo(12, 1, None),
            ]);

        let categories = show_categories(&repo).unwrap();

        assert_eq!(
            categories,
            vec![
                CategoryDto {
                    id: 2,
                    title: "Cats".to_string(),
                    photo_count: 0,
                },
                CategoryDto {
                    id: 1,
                    title: "Sea".to_string(),
                    photo_count: 2,
                },
            ]
        );
    }

    #[test]
    fn duplicate_title_is_a_conflict() {
        let repo = TestRepository::new().with_categories(vec![sample_category(1, "Sea")]);

        let result = add_category(payload("Sea"), &repo);

        assert!(matches!(result, Err(ServiceError::Conflict(_))));
    }

    #[test]
    fn new_category_is_created() {
        let repo = TestRepository::new().with_id_offset(5);

        let created = add_category(payload("Portraits"), &repo).unwrap();

        assert_eq!(created.id.get(), 6);
        assert_eq!(created.title.as_str(), "Portraits");
    }

    #[test]
    fn deleting_category_uncategorizes_photos_and_drops_votes() {
        let repo = TestRepository::new()
            .with_categories(vec![sample_category(1, "Sea")])
            .with_photos(vec![sample_photo(10, 1, Some(1)), sample_photo(11, 1, Some(1))])
            .with_votes(vec![sample_vote(20, 1, 10, 11)]);

        delete_category(CategoryId::new(1).unwrap(), &repo).unwrap();

        assert!(repo.photos().iter().all(|p| p.category_id.is_none()));
        assert!(repo.votes().is_empty());
    }

    #[test]
    fn deleting_unknown_category_is_not_found() {
        let repo = TestRepository::new();
        let result = delete_category(CategoryId::new(3).unwrap(), &repo);
        assert_eq!(result, Err(ServiceError::NotFound));
    }
}
