use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use actix_multipart::form::{MultipartForm, tempfile::TempFile};
use serde::Deserialize;
use thiserror::Error;

use crate::domain::photo::NewPhoto;
use crate::domain::types::{AlbumId, CategoryId, MimeType, PhotoFileName, TypeConstraintError};

/// Extensions accepted for uploads together with the MIME type they map to.
const ALLOWED_EXTENSIONS: [(&str, &str); 4] = [
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
];

#[derive(MultipartForm)]
pub struct UploadPhotoForm {
    #[multipart(limit = "16MB")]
    pub file: TempFile,
}

/// Uploaded image ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadPhotoPayload {
    pub filename: PhotoFileName,
    pub mimetype: MimeType,
    pub data: Vec<u8>,
}

impl UploadPhotoPayload {
    pub fn into_new_photo(self, album_id: AlbumId) -> NewPhoto {
        NewPhoto {
            album_id,
            mimetype: self.mimetype,
            filename: self.filename,
            data: self.data,
        }
    }
}

#[derive(Debug, Error)]
pub enum UploadPhotoFormError {
    #[error("Файл не выбран")]
    MissingFile,
    #[error("Недопустимый тип файла: {0}")]
    UnsupportedExtension(String),
    #[error("Файл пуст")]
    EmptyFile,
    #[error("Не удалось прочитать файл")]
    Io(#[from] std::io::Error),
    #[error("Upload contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<TypeConstraintError> for UploadPhotoFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

/// Reduces a client supplied file name to a safe base name.
///
/// Directory components are dropped and every character outside ASCII
/// alphanumerics, `.`, `-` and `_` becomes `_`. Leading dots are stripped.
pub fn secure_filename(raw: &str) -> String {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    cleaned.trim_start_matches('.').to_string()
}

/// MIME type implied by the file extension, if the extension is allowed.
pub fn mimetype_for_filename(filename: &str) -> Option<&'static str> {
    let extension = Path::new(filename)
        .extension()?
        .to_str()?
        .to_ascii_lowercase();
    ALLOWED_EXTENSIONS
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, mime)| *mime)
}

impl TryFrom<UploadPhotoForm> for UploadPhotoPayload {
    type Error = UploadPhotoFormError;

    fn try_from(mut form: UploadPhotoForm) -> Result<Self, Self::Error> {
        let raw_name = form
            .file
            .file_name
            .as_deref()
            .ok_or(UploadPhotoFormError::MissingFile)?;
        if raw_name.trim().is_empty() {
            return Err(UploadPhotoFormError::MissingFile);
        }

        let filename = secure_filename(raw_name);
        // The declared content type is ignored: only the allowed extensions
        // decide what the image is later served as.
        let Some(mimetype) = mimetype_for_filename(&filename) else {
            return Err(UploadPhotoFormError::UnsupportedExtension(
                raw_name.to_string(),
            ));
        };

        let file = form.file.file.as_file_mut();
        file.seek(SeekFrom::Start(0))?;
        let mut data = Vec::with_capacity(form.file.size);
        file.read_to_end(&mut data)?;
        if data.is_empty() {
            return Err(UploadPhotoFormError::EmptyFile);
        }

        Ok(Self {
            filename: PhotoFileName::new(filename)?,
            mimetype: MimeType::new(mimetype)?,
            data,
        })
    }
}

/// Category selector on the photo page. An empty value clears the category.
#[derive(Deserialize)]
pub struct SetPhotoCategoryForm {
    #[serde(default)]
    pub category_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SetPhotoCategoryFormPayload {
    pub category_id: Option<CategoryId>,
}

#[derive(Debug, Error)]
pub enum SetPhotoCategoryFormError {
    #[error("Некорректная категория: {0}")]
    InvalidCategory(String),
    #[error("Category form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<TypeConstraintError> for SetPhotoCategoryFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<SetPhotoCategoryForm> for SetPhotoCategoryFormPayload {
    type Error = SetPhotoCategoryFormError;

    fn try_from(value: SetPhotoCategoryForm) -> Result<Self, Self::Error> {
        let raw = value.category_id.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case("none") {
            return Ok(Self { category_id: None });
        }
        let id: i32 = raw
            .parse()
            .map_err(|_| SetPhotoCategoryFormError::InvalidCategory(raw.to_string()))?;

        Ok(Self {
            category_id: Some(CategoryId::new(id)?),
        })
    }
}
