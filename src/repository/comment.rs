use diesel::prelude::*;

use crate::domain::comment::{Comment, NewComment};
use crate::domain::types::{CommentId, PhotoId};
use crate::models::comment::{Comment as DbComment, NewComment as DbNewComment};
use crate::repository::{CommentReader, CommentWriter, DieselRepository, RepositoryResult};

impl CommentReader for DieselRepository {
    fn list_comments(&self, photo_id: PhotoId) -> RepositoryResult<Vec<Comment>> {
        use crate::schema::comments;

        let mut conn = self.conn()?;

        let items = comments::table
            .filter(comments::photo_id.eq(photo_id.get()))
            .order(comments::id.asc())
            .select(DbComment::as_select())
            .load::<DbComment>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Comment>, _>>()?;

        Ok(items)
    }

    fn get_comment_by_id(&self, id: CommentId) -> RepositoryResult<Option<Comment>> {
        use crate::schema::comments;

        let mut conn = self.conn()?;

        let comment = comments::table
            .find(id.get())
            .select(DbComment::as_select())
            .first::<DbComment>(&mut conn)
            .optional()?;

        let comment = comment.map(TryInto::try_into).transpose()?;
        Ok(comment)
    }
}

impl CommentWriter for DieselRepository {
    fn create_comment(&self, comment: &NewComment) -> RepositoryResult<usize> {
        use crate::schema::comments;

        let mut conn = self.conn()?;
        let db_comment: DbNewComment = comment.into();

        let affected = diesel::insert_into(comments::table)
            .values(&db_comment)
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn delete_comment(&self, id: CommentId) -> RepositoryResult<usize> {
        use crate::schema::comments;

        let mut conn = self.conn()?;

        let affected = diesel::delete(comments::table.find(id.get())).execute(&mut conn)?;

        Ok(affected)
    }
}
