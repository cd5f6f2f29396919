use std::collections::HashMap;

use crate::db::{DbConnection, DbPool};
use crate::domain::album::{Album, NewAlbum};
use crate::domain::category::{Category, NewCategory};
use crate::domain::comment::{Comment, NewComment};
use crate::domain::photo::{NewPhoto, Photo, PhotoContent};
use crate::domain::types::{AlbumId, AlbumTitle, CategoryId, CommentId, PhotoId, UserId};
use crate::domain::user::{NewUser, User};
use crate::domain::vote::{NewVote, Vote};

pub mod album;
pub mod category;
pub mod comment;
pub mod errors;
pub mod photo;
pub mod user;
pub mod vote;

pub use errors::{RepositoryError, RepositoryResult};

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations for user accounts.
pub trait UserReader {
    fn get_user_by_id(&self, id: UserId) -> RepositoryResult<Option<User>>;
    fn get_user_by_username(&self, username: &str) -> RepositoryResult<Option<User>>;
    fn get_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;
}

/// Write operations for user accounts.
pub trait UserWriter {
    /// Persist a new user; duplicate usernames or e-mails yield a conflict.
    fn create_user(&self, user: &NewUser) -> RepositoryResult<User>;
}

/// Read-only operations for albums.
pub trait AlbumReader {
    /// List albums owned by a user ordered by title.
    fn list_albums(&self, user_id: UserId) -> RepositoryResult<Vec<Album>>;
    fn get_album_by_id(&self, id: AlbumId) -> RepositoryResult<Option<Album>>;
}

/// Write operations for albums.
pub trait AlbumWriter {
    fn create_album(&self, album: &NewAlbum) -> RepositoryResult<Album>;
    fn update_album_title(&self, id: AlbumId, title: &AlbumTitle) -> RepositoryResult<usize>;
    /// Delete an album together with its photos, their comments and every
    /// vote referencing those photos, in one transaction.
    fn delete_album(&self, id: AlbumId) -> RepositoryResult<usize>;
}

/// Read-only operations for categories.
pub trait CategoryReader {
    /// List all categories ordered by title.
    fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>>;
}

/// Write operations for categories.
pub trait CategoryWriter {
    /// Persist a new category; a duplicate title yields a conflict.
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category>;
    /// Delete a category. Its photos become uncategorized and lose their votes.
    fn delete_category(&self, id: CategoryId) -> RepositoryResult<usize>;
}

/// Read-only operations for photos.
pub trait PhotoReader {
    fn get_photo_by_id(&self, id: PhotoId) -> RepositoryResult<Option<Photo>>;
    /// Photos of an album ordered by id.
    fn list_album_photos(&self, album_id: AlbumId) -> RepositoryResult<Vec<Photo>>;
    /// Photos currently assigned to a category ordered by id.
    fn list_category_photos(&self, category_id: CategoryId) -> RepositoryResult<Vec<Photo>>;
    /// Number of photos assigned to each category that has any.
    fn count_photos_by_category(&self) -> RepositoryResult<HashMap<CategoryId, usize>>;
    /// Load the stored image bytes.
    fn get_photo_content(&self, id: PhotoId) -> RepositoryResult<Option<PhotoContent>>;
}

/// Write operations for photos.
pub trait PhotoWriter {
    fn create_photo(&self, photo: &NewPhoto) -> RepositoryResult<Photo>;
    /// Assign or clear a photo's category.
    ///
    /// When the assignment actually changes, every vote referencing the
    /// photo is removed in the same transaction. Returns whether it changed.
    fn set_photo_category(
        &self,
        id: PhotoId,
        category_id: Option<CategoryId>,
    ) -> RepositoryResult<bool>;
    /// Delete a photo, its comments and every vote referencing it.
    fn delete_photo(&self, id: PhotoId) -> RepositoryResult<usize>;
}

/// Read-only operations for comments.
pub trait CommentReader {
    /// Comments of a photo in creation order.
    fn list_comments(&self, photo_id: PhotoId) -> RepositoryResult<Vec<Comment>>;
    fn get_comment_by_id(&self, id: CommentId) -> RepositoryResult<Option<Comment>>;
}

/// Write operations for comments.
pub trait CommentWriter {
    fn create_comment(&self, comment: &NewComment) -> RepositoryResult<usize>;
    fn delete_comment(&self, id: CommentId) -> RepositoryResult<usize>;
}

/// Read-only operations for votes.
pub trait VoteReader {
    /// Every vote in which any of `photo_ids` is the winner or the loser.
    fn list_votes_for_photos(&self, photo_ids: &[PhotoId]) -> RepositoryResult<Vec<Vote>>;
    /// The vote `user_id` currently holds on the unordered pair `{a, b}`.
    fn get_user_vote_for_pair(
        &self,
        user_id: UserId,
        a: PhotoId,
        b: PhotoId,
    ) -> RepositoryResult<Option<Vote>>;
}

/// Write operations for votes.
pub trait VoteWriter {
    /// Record a vote, replacing the voter's previous vote on the same
    /// unordered pair in either direction. Delete and insert are atomic.
    ///
    /// Both photos must still be in `category_id` when the write happens,
    /// otherwise nothing is written and [`VoteError::CategoryMismatch`] is
    /// returned as [`RepositoryError::Vote`].
    ///
    /// [`VoteError::CategoryMismatch`]: crate::domain::vote::VoteError::CategoryMismatch
    fn cast_vote(&self, vote: &NewVote, category_id: CategoryId) -> RepositoryResult<Vote>;
    /// Remove every vote naming the photo as winner or loser, from all voters.
    fn invalidate_votes_for_photo(&self, photo_id: PhotoId) -> RepositoryResult<usize>;
}
