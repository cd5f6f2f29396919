use crate::domain::album::Album;
use crate::domain::types::AlbumId;
use crate::domain::user::User;
use crate::dto::photos::ScoredPhotoDto;
use crate::forms::albums::AlbumFormPayload;
use crate::repository::{AlbumReader, AlbumWriter, PhotoReader, VoteReader};
use crate::services::voting::score_photos;

use super::{ServiceError, ServiceResult};

/// Load an album or fail with [`ServiceError::NotFound`].
pub(crate) fn find_album<R>(repo: &R, album_id: AlbumId) -> ServiceResult<Album>
where
    R: AlbumReader,
{
    match repo.get_album_by_id(album_id) {
        Ok(Some(album)) => Ok(album),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get album {album_id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Load an album owned by `user`. Albums of other users are reported as
/// missing so their existence is not revealed.
pub(crate) fn owned_album<R>(repo: &R, album_id: AlbumId, user: &User) -> ServiceResult<Album>
where
    R: AlbumReader,
{
    let album = find_album(repo, album_id)?;
    if !album.is_owned_by(user.id) {
        return Err(ServiceError::NotFound);
    }
    Ok(album)
}

pub fn show_albums<R>(user: &User, repo: &R) -> ServiceResult<Vec<Album>>
where
    R: AlbumReader,
{
    repo.list_albums(user.id).map_err(|e| {
        log::error!("Failed to list albums of user {}: {e}", user.id);
        ServiceError::Internal
    })
}

pub fn add_album<R>(payload: AlbumFormPayload, user: &User, repo: &R) -> ServiceResult<Album>
where
    R: AlbumWriter,
{
    let album = payload.into_new_album(user.id);
    repo.create_album(&album).map_err(|e| {
        log::error!("Failed to add album: {e}");
        ServiceError::Internal
    })
}

/// An album with its photos, each annotated with its current tallies.
pub fn show_album<R>(
    album_id: AlbumId,
    user: &User,
    repo: &R,
) -> ServiceResult<(Album, Vec<ScoredPhotoDto>)>
where
    R: AlbumReader + PhotoReader + VoteReader,
{
    let album = owned_album(repo, album_id, user)?;

    let photos = repo.list_album_photos(album_id).map_err(|e| {
        log::error!("Failed to list photos of album {album_id}: {e}");
        ServiceError::Internal
    })?;

    Ok((album, score_photos(photos, repo)?))
}

pub fn update_album<R>(
    album_id: AlbumId,
    payload: AlbumFormPayload,
    user: &User,
    repo: &R,
) -> ServiceResult<()>
where
    R: AlbumReader + AlbumWriter,
{
    owned_album(repo, album_id, user)?;

    match repo.update_album_title(album_id, &payload.title) {
        Ok(0) => Err(ServiceError::NotFound),
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to update album {album_id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Delete an album with all of its photos, their comments and their votes.
pub fn delete_album<R>(album_id: AlbumId, user: &User, repo: &R) -> ServiceResult<()>
where
    R: AlbumReader + AlbumWriter,
{
    owned_album(repo, album_id, user)?;

    match repo.delete_album(album_id) {
        Ok(0) => Err(ServiceError::NotFound),
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to delete album {album_id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}
