use diesel::prelude::*;

use crate::domain::album::{Album, NewAlbum};
use crate::domain::types::{AlbumId, AlbumTitle, UserId};
use crate::models::album::{Album as DbAlbum, NewAlbum as DbNewAlbum};
use crate::repository::photo::delete_photos_with_dependents;
use crate::repository::{AlbumReader, AlbumWriter, DieselRepository, RepositoryResult};

impl AlbumReader for DieselRepository {
    fn list_albums(&self, user_id: UserId) -> RepositoryResult<Vec<Album>> {
        use crate::schema::albums;

        let mut conn = self.conn()?;

        let items = albums::table
            .filter(albums::user_id.eq(user_id.get()))
            .order((albums::title.asc(), albums::id.asc()))
            .select(DbAlbum::as_select())
            .load::<DbAlbum>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Album>, _>>()?;

        Ok(items)
    }

    fn get_album_by_id(&self, id: AlbumId) -> RepositoryResult<Option<Album>> {
        use crate::schema::albums;

        let mut conn = self.conn()?;

        let album = albums::table
            .find(id.get())
            .select(DbAlbum::as_select())
            .first::<DbAlbum>(&mut conn)
            .optional()?;

        let album = album.map(TryInto::try_into).transpose()?;
        Ok(album)
    }
}

impl AlbumWriter for DieselRepository {
    fn create_album(&self, album: &NewAlbum) -> RepositoryResult<Album> {
        use crate::schema::albums;

        let mut conn = self.conn()?;
        let db_album: DbNewAlbum = album.into();

        let created = diesel::insert_into(albums::table)
            .values(&db_album)
            .returning(DbAlbum::as_returning())
            .get_result::<DbAlbum>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn update_album_title(&self, id: AlbumId, title: &AlbumTitle) -> RepositoryResult<usize> {
        use crate::schema::albums;

        let mut conn = self.conn()?;

        let affected = diesel::update(albums::table.find(id.get()))
            .set(albums::title.eq(title.as_str()))
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn delete_album(&self, id: AlbumId) -> RepositoryResult<usize> {
        use crate::schema::{albums, photos};

        let mut conn = self.conn()?;

        let affected = conn.transaction::<_, diesel::result::Error, _>(|conn| {
            let photo_ids: Vec<i32> = photos::table
                .filter(photos::album_id.eq(id.get()))
                .select(photos::id)
                .load(conn)?;

            delete_photos_with_dependents(conn, &photo_ids)?;

            diesel::delete(albums::table.find(id.get())).execute(conn)
        })?;

        Ok(affected)
    }
}
