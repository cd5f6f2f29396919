use std::collections::HashMap;

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::photo::{NewPhoto, Photo, PhotoContent};
use crate::domain::types::{AlbumId, CategoryId, PhotoId};
use crate::models::photo::{
    NewPhoto as DbNewPhoto, Photo as DbPhoto, PhotoContent as DbPhotoContent,
};
use crate::repository::vote::delete_votes_referencing;
use crate::repository::{DieselRepository, PhotoReader, PhotoWriter, RepositoryResult};

/// Delete photos along with their comments and every vote referencing them.
pub(crate) fn delete_photos_with_dependents(
    conn: &mut SqliteConnection,
    photo_ids: &[i32],
) -> QueryResult<usize> {
    use crate::schema::{comments, photos};

    if photo_ids.is_empty() {
        return Ok(0);
    }

    delete_votes_referencing(conn, photo_ids)?;

    diesel::delete(comments::table.filter(comments::photo_id.eq_any(photo_ids.to_vec())))
        .execute(conn)?;

    diesel::delete(photos::table.filter(photos::id.eq_any(photo_ids.to_vec()))).execute(conn)
}

impl PhotoReader for DieselRepository {
    fn get_photo_by_id(&self, id: PhotoId) -> RepositoryResult<Option<Photo>> {
        use crate::schema::photos;

        let mut conn = self.conn()?;

        let photo = photos::table
            .find(id.get())
            .select(DbPhoto::as_select())
            .first::<DbPhoto>(&mut conn)
            .optional()?;

        let photo = photo.map(TryInto::try_into).transpose()?;
        Ok(photo)
    }

    fn list_album_photos(&self, album_id: AlbumId) -> RepositoryResult<Vec<Photo>> {
        use crate::schema::photos;

        let mut conn = self.conn()?;

        let items = photos::table
            .filter(photos::album_id.eq(album_id.get()))
            .order(photos::id.asc())
            .select(DbPhoto::as_select())
            .load::<DbPhoto>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Photo>, _>>()?;

        Ok(items)
    }

    fn list_category_photos(&self, category_id: CategoryId) -> RepositoryResult<Vec<Photo>> {
        use crate::schema::photos;

        let mut conn = self.conn()?;

        let items = photos::table
            .filter(photos::category_id.eq(Some(category_id.get())))
            .order(photos::id.asc())
            .select(DbPhoto::as_select())
            .load::<DbPhoto>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Photo>, _>>()?;

        Ok(items)
    }

    fn count_photos_by_category(&self) -> RepositoryResult<HashMap<CategoryId, usize>> {
        use crate::schema::photos;

        let mut conn = self.conn()?;

        let rows: Vec<(Option<i32>, i64)> = photos::table
            .filter(photos::category_id.is_not_null())
            .group_by(photos::category_id)
            .select((photos::category_id, diesel::dsl::count_star()))
            .load(&mut conn)?;

        let mut counts = HashMap::with_capacity(rows.len());
        for (category_id, count) in rows {
            if let Some(category_id) = category_id {
                counts.insert(CategoryId::new(category_id)?, count as usize);
            }
        }
        Ok(counts)
    }

    fn get_photo_content(&self, id: PhotoId) -> RepositoryResult<Option<PhotoContent>> {
        use crate::schema::photos;

        let mut conn = self.conn()?;

        let content = photos::table
            .find(id.get())
            .select(DbPhotoContent::as_select())
            .first::<DbPhotoContent>(&mut conn)
            .optional()?;

        let content = content.map(TryInto::try_into).transpose()?;
        Ok(content)
    }
}

impl PhotoWriter for DieselRepository {
    fn create_photo(&self, photo: &NewPhoto) -> RepositoryResult<Photo> {
        use crate::schema::photos;

        let mut conn = self.conn()?;
        let db_photo: DbNewPhoto = photo.into();

        let created = diesel::insert_into(photos::table)
            .values(&db_photo)
            .returning(DbPhoto::as_returning())
            .get_result::<DbPhoto>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn set_photo_category(
        &self,
        id: PhotoId,
        category_id: Option<CategoryId>,
    ) -> RepositoryResult<bool> {
        use crate::schema::photos;

        let mut conn = self.conn()?;
        let new_category = category_id.map(CategoryId::get);

        let changed = conn.transaction::<_, diesel::result::Error, _>(|conn| {
            let current: Option<Option<i32>> = photos::table
                .find(id.get())
                .select(photos::category_id)
                .first(conn)
                .optional()?;

            match current {
                Some(current) if current != new_category => {}
                _ => return Ok(false),
            }

            diesel::update(photos::table.find(id.get()))
                .set(photos::category_id.eq(new_category))
                .execute(conn)?;

            // Preferences expressed under the old category mean nothing in
            // the new one, whoever cast them.
            delete_votes_referencing(conn, &[id.get()])?;

            Ok(true)
        })?;

        Ok(changed)
    }

    fn delete_photo(&self, id: PhotoId) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;

        let affected = conn.transaction::<_, diesel::result::Error, _>(|conn| {
            delete_photos_with_dependents(conn, &[id.get()])
        })?;

        Ok(affected)
    }
}
