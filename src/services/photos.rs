use std::collections::HashMap;

use crate::domain::album::Album;
use crate::domain::photo::{Photo, PhotoContent};
use crate::domain::types::{AlbumId, CommentId, PhotoId, UserId};
use crate::domain::user::User;
use crate::dto::photos::{CommentDto, PhotoPageDto};
use crate::forms::comments::AddCommentFormPayload;
use crate::forms::photos::{SetPhotoCategoryFormPayload, UploadPhotoPayload};
use crate::repository::{
    AlbumReader, CategoryReader, CommentReader, CommentWriter, PhotoReader, PhotoWriter,
    UserReader, VoteReader,
};
use crate::services::albums::{find_album, owned_album};
use crate::services::categories::find_category;
use crate::services::voting::score_photos;

use super::{ServiceError, ServiceResult};

/// Load a photo or fail with [`ServiceError::NotFound`].
pub(crate) fn find_photo<R>(repo: &R, photo_id: PhotoId) -> ServiceResult<Photo>
where
    R: PhotoReader,
{
    match repo.get_photo_by_id(photo_id) {
        Ok(Some(photo)) => Ok(photo),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get photo {photo_id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Load a photo that `user` may modify, i.e. one in an album they own.
fn owned_photo<R>(repo: &R, photo_id: PhotoId, user: &User) -> ServiceResult<(Photo, Album)>
where
    R: PhotoReader + AlbumReader,
{
    let photo = find_photo(repo, photo_id)?;
    let album = find_album(repo, photo.album_id)?;
    if !album.is_owned_by(user.id) {
        return Err(ServiceError::Unauthorized);
    }
    Ok((photo, album))
}

/// Store an uploaded image in one of the user's albums.
pub fn upload_photo<R>(
    album_id: AlbumId,
    payload: UploadPhotoPayload,
    user: &User,
    repo: &R,
) -> ServiceResult<Photo>
where
    R: AlbumReader + PhotoWriter,
{
    owned_album(repo, album_id, user)?;

    repo.create_photo(&payload.into_new_photo(album_id))
        .map_err(|e| {
            log::error!("Failed to store photo in album {album_id}: {e}");
            ServiceError::Internal
        })
}

/// Gather the photo page. Any signed-in user may view any photo; only the
/// album owner gets the category selector.
pub fn show_photo<R>(photo_id: PhotoId, user: &User, repo: &R) -> ServiceResult<PhotoPageDto>
where
    R: PhotoReader + AlbumReader + CommentReader + CategoryReader + UserReader + VoteReader,
{
    let photo = find_photo(repo, photo_id)?;
    let album = find_album(repo, photo.album_id)?;
    let is_owner = album.is_owned_by(user.id);

    let score = score_photos(vec![photo.clone()], repo)?
        .into_iter()
        .next()
        .map(|scored| scored.score)
        .unwrap_or_default();

    let comments = repo.list_comments(photo_id).map_err(|e| {
        log::error!("Failed to list comments of photo {photo_id}: {e}");
        ServiceError::Internal
    })?;

    let mut authors: HashMap<UserId, String> = HashMap::new();
    let mut comment_dtos = Vec::with_capacity(comments.len());
    for comment in comments {
        if !authors.contains_key(&comment.user_id) {
            let author = repo.get_user_by_id(comment.user_id).map_err(|e| {
                log::error!("Failed to get comment author {}: {e}", comment.user_id);
                ServiceError::Internal
            })?;
            let name = author
                .map(|author| author.username.into_inner())
                .unwrap_or_default();
            authors.insert(comment.user_id, name);
        }
        comment_dtos.push(CommentDto {
            id: comment.id.get(),
            author: authors.get(&comment.user_id).cloned().unwrap_or_default(),
            text: comment.text.into_inner(),
            created_at: comment.created_at,
            can_delete: is_owner || comment.user_id == user.id,
        });
    }

    let categories = repo.list_categories().map_err(|e| {
        log::error!("Failed to list categories: {e}");
        ServiceError::Internal
    })?;

    Ok(PhotoPageDto {
        photo,
        album,
        score,
        comments: comment_dtos,
        categories,
        is_owner,
    })
}

/// Stored image bytes of a photo.
pub fn photo_content<R>(photo_id: PhotoId, repo: &R) -> ServiceResult<PhotoContent>
where
    R: PhotoReader,
{
    match repo.get_photo_content(photo_id) {
        Ok(Some(content)) => Ok(content),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to load content of photo {photo_id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// File a photo under a category or clear its category.
///
/// Returns whether the assignment changed. A change removes every vote on
/// the photo, whoever cast it; re-selecting the current category keeps them.
pub fn set_photo_category<R>(
    photo_id: PhotoId,
    payload: SetPhotoCategoryFormPayload,
    user: &User,
    repo: &R,
) -> ServiceResult<bool>
where
    R: PhotoReader + AlbumReader + CategoryReader + PhotoWriter,
{
    owned_photo(repo, photo_id, user)?;
    if let Some(category_id) = payload.category_id {
        find_category(repo, category_id)?;
    }

    repo.set_photo_category(photo_id, payload.category_id)
        .map_err(|e| {
            log::error!("Failed to set category of photo {photo_id}: {e}");
            ServiceError::Internal
        })
}

/// Delete a photo with its comments and votes. Returns the album it was in.
pub fn delete_photo<R>(photo_id: PhotoId, user: &User, repo: &R) -> ServiceResult<AlbumId>
where
    R: PhotoReader + AlbumReader + PhotoWriter,
{
    let (photo, _) = owned_photo(repo, photo_id, user)?;

    match repo.delete_photo(photo_id) {
        Ok(0) => Err(ServiceError::NotFound),
        Ok(_) => Ok(photo.album_id),
        Err(e) => {
            log::error!("Failed to delete photo {photo_id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn add_comment<R>(
    photo_id: PhotoId,
    payload: AddCommentFormPayload,
    user: &User,
    repo: &R,
) -> ServiceResult<()>
where
    R: PhotoReader + CommentWriter,
{
    find_photo(repo, photo_id)?;

    let comment = payload.into_new_comment(photo_id, user.id);
    repo.create_comment(&comment).map(|_| ()).map_err(|e| {
        log::error!("Failed to add comment to photo {photo_id}: {e}");
        ServiceError::Internal
    })
}

/// Delete a comment. Allowed for its author and for the photo's owner.
/// Returns the photo the comment belonged to.
pub fn delete_comment<R>(comment_id: CommentId, user: &User, repo: &R) -> ServiceResult<PhotoId>
where
    R: CommentReader + CommentWriter + PhotoReader + AlbumReader,
{
    let comment = match repo.get_comment_by_id(comment_id) {
        Ok(Some(comment)) => comment,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get comment {comment_id}: {e}");
            return Err(ServiceError::Internal);
        }
    };

    if comment.user_id != user.id {
        let photo = find_photo(repo, comment.photo_id)?;
        let album = find_album(repo, photo.album_id)?;
        if !album.is_owned_by(user.id) {
            return Err(ServiceError::Unauthorized);
        }
    }

    repo.delete_comment(comment_id).map_err(|e| {
        log::error!("Failed to delete comment {comment_id}: {e}");
        ServiceError::Internal
    })?;

    Ok(comment.photo_id)
}
