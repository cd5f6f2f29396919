//! Helpers for integration tests.
#![allow(dead_code)]

use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use photo_album::db::{DbPool, establish_connection_pool};
use photo_album::domain::album::{Album, NewAlbum};
use photo_album::domain::category::{Category, NewCategory};
use photo_album::domain::photo::{NewPhoto, Photo};
use photo_album::domain::types::{
    AlbumTitle, CategoryTitle, Email, MimeType, PersonName, PhotoFileName, Username,
};
use photo_album::domain::user::{NewUser, User};
use photo_album::repository::{
    AlbumWriter, CategoryWriter, DieselRepository, PhotoWriter, UserWriter,
};
use tempfile::NamedTempFile;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Temporary database used in integration tests.
pub struct TestDb {
    _tempfile: NamedTempFile,
    pool: DbPool,
}

impl TestDb {
    pub fn new() -> Self {
        let tempfile = NamedTempFile::new().expect("Failed to create temp file");
        let pool = establish_connection_pool(tempfile.path().to_str().unwrap())
            .expect("Failed to establish SQLite connection.");
        let mut conn = pool
            .get()
            .expect("Failed to get SQLite connection from pool.");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("Migrations failed");
        TestDb {
            _tempfile: tempfile,
            pool,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn repo(&self) -> DieselRepository {
        DieselRepository::new(self.pool())
    }
}

pub fn create_user(repo: &DieselRepository, username: &str) -> User {
    repo.create_user(&NewUser {
        username: Username::new(username).unwrap(),
        name: PersonName::new("Test").unwrap(),
        surname: PersonName::new("User").unwrap(),
        email: Email::new(format!("{username}@example.com")).unwrap(),
        password_hash: "pbkdf2_sha256$1$AA==$AA==".to_string(),
    })
    .expect("should create user")
}

pub fn create_album(repo: &DieselRepository, user: &User, title: &str) -> Album {
    repo.create_album(&NewAlbum {
        user_id: user.id,
        title: AlbumTitle::new(title).unwrap(),
    })
    .expect("should create album")
}

pub fn create_category(repo: &DieselRepository, title: &str) -> Category {
    repo.create_category(&NewCategory {
        title: CategoryTitle::new(title).unwrap(),
    })
    .expect("should create category")
}

/// Upload a photo and file it under `category`.
pub fn create_photo(repo: &DieselRepository, album: &Album, category: Option<&Category>) -> Photo {
    let photo = repo
        .create_photo(&NewPhoto {
            album_id: album.id,
            mimetype: MimeType::new("image/png").unwrap(),
            filename: PhotoFileName::new("photo.png").unwrap(),
            data: vec![0x89, b'P', b'N', b'G'],
        })
        .expect("should create photo");

    match category {
        Some(category) => {
            repo.set_photo_category(photo.id, Some(category.id))
                .expect("should set category");
            Photo {
                category_id: Some(category.id),
                ..photo
            }
        }
        None => photo,
    }
}
