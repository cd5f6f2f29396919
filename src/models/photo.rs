use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::photo::{
    NewPhoto as DomainNewPhoto, Photo as DomainPhoto, PhotoContent as DomainPhotoContent,
};
use crate::domain::types::{MimeType, PhotoFileName, TypeConstraintError};

/// Metadata columns of the `photos` table, without the picture blob.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::photos)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Photo {
    pub id: i32,
    pub album_id: i32,
    pub category_id: Option<i32>,
    pub mimetype: String,
    pub filename: String,
    pub created_at: NaiveDateTime,
}

/// Columns needed to serve the stored image.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::photos)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PhotoContent {
    pub mimetype: String,
    pub filename: String,
    pub picture: Vec<u8>,
}

/// Insertable form of a photo row.
#[derive(Insertable)]
#[diesel(table_name = crate::schema::photos)]
pub struct NewPhoto<'a> {
    pub album_id: i32,
    pub picture: &'a [u8],
    pub mimetype: &'a str,
    pub filename: &'a str,
}

impl TryFrom<Photo> for DomainPhoto {
    type Error = TypeConstraintError;

    fn try_from(photo: Photo) -> Result<Self, Self::Error> {
        Ok(Self {
            id: photo.id.try_into()?,
            album_id: photo.album_id.try_into()?,
            category_id: photo.category_id.map(TryInto::try_into).transpose()?,
            mimetype: MimeType::new(photo.mimetype)?,
            filename: PhotoFileName::new(photo.filename)?,
            created_at: photo.created_at,
        })
    }
}

impl TryFrom<PhotoContent> for DomainPhotoContent {
    type Error = TypeConstraintError;

    fn try_from(content: PhotoContent) -> Result<Self, Self::Error> {
        Ok(Self {
            mimetype: MimeType::new(content.mimetype)?,
            filename: PhotoFileName::new(content.filename)?,
            data: content.picture,
        })
    }
}

impl<'a> From<&'a DomainNewPhoto> for NewPhoto<'a> {
    fn from(photo: &'a DomainNewPhoto) -> Self {
        Self {
            album_id: photo.album_id.get(),
            picture: photo.data.as_slice(),
            mimetype: photo.mimetype.as_str(),
            filename: photo.filename.as_str(),
        }
    }
}
