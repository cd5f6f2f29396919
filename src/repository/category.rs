use diesel::prelude::*;

use crate::domain::category::{Category, NewCategory};
use crate::domain::types::CategoryId;
use crate::models::category::{Category as DbCategory, NewCategory as DbNewCategory};
use crate::repository::vote::delete_votes_referencing;
use crate::repository::{CategoryReader, CategoryWriter, DieselRepository, RepositoryResult};

impl CategoryReader for DieselRepository {
    fn list_categories(&self) -> RepositoryResult<Vec<Category>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let items = categories::table
            .order(categories::title.asc())
            .select(DbCategory::as_select())
            .load::<DbCategory>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Category>, _>>()?;

        Ok(items)
    }

    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let category = categories::table
            .find(id.get())
            .select(DbCategory::as_select())
            .first::<DbCategory>(&mut conn)
            .optional()?;

        let category = category.map(TryInto::try_into).transpose()?;
        Ok(category)
    }
}

impl CategoryWriter for DieselRepository {
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category> {
        use crate::schema::categories;

        let mut conn = self.conn()?;
        let db_category: DbNewCategory = category.clone().into();

        let created = diesel::insert_into(categories::table)
            .values(&db_category)
            .returning(DbCategory::as_returning())
            .get_result::<DbCategory>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn delete_category(&self, id: CategoryId) -> RepositoryResult<usize> {
        use crate::schema::{categories, photos};

        let mut conn = self.conn()?;

        let affected = conn.transaction::<_, diesel::result::Error, _>(|conn| {
            let photo_ids: Vec<i32> = photos::table
                .filter(photos::category_id.eq(Some(id.get())))
                .select(photos::id)
                .load(conn)?;

            // Leaving the category is a category change for each photo.
            delete_votes_referencing(conn, &photo_ids)?;

            diesel::update(photos::table.filter(photos::category_id.eq(Some(id.get()))))
                .set(photos::category_id.eq(None::<i32>))
                .execute(conn)?;

            diesel::delete(categories::table.find(id.get())).execute(conn)
        })?;

        Ok(affected)
    }
}
