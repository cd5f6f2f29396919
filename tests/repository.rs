use photo_album::domain::category::NewCategory;
use photo_album::domain::comment::NewComment;
use photo_album::domain::types::{
    AlbumTitle, CategoryTitle, CommentText, Email, PersonName, Username,
};
use photo_album::domain::user::NewUser;
use photo_album::repository::{
    AlbumReader, AlbumWriter, CategoryReader, CategoryWriter, CommentReader, CommentWriter,
    PhotoReader, PhotoWriter, RepositoryError, UserReader, UserWriter,
};

mod common;

use common::{TestDb, create_album, create_category, create_photo, create_user};

#[test]
fn users_are_unique_by_username_and_email() {
    let test_db = TestDb::new();
    let repo = test_db.repo();

    let user = create_user(&repo, "anna");
    let found = repo
        .get_user_by_username("anna")
        .expect("should query user")
        .expect("user should exist");
    assert_eq!(found.id, user.id);
    assert!(repo.get_user_by_email("anna@example.com").unwrap().is_some());

    let duplicate = repo.create_user(&NewUser {
        username: Username::new("anna").unwrap(),
        name: PersonName::new("Other").unwrap(),
        surname: PersonName::new("Person").unwrap(),
        email: Email::new("other@example.com").unwrap(),
        password_hash: String::new(),
    });
    assert!(matches!(duplicate, Err(RepositoryError::Conflict(_))));
}

#[test]
fn albums_are_listed_by_title_per_owner() {
    let test_db = TestDb::new();
    let repo = test_db.repo();
    let anna = create_user(&repo, "anna");
    let boris = create_user(&repo, "boris");

    let winter = create_album(&repo, &anna, "Winter");
    create_album(&repo, &anna, "Autumn");
    create_album(&repo, &boris, "Elsewhere");

    let titles: Vec<String> = repo
        .list_albums(anna.id)
        .expect("should list albums")
        .into_iter()
        .map(|a| a.title.into_inner())
        .collect();
    assert_eq!(titles, vec!["Autumn", "Winter"]);

    repo.update_album_title(winter.id, &AlbumTitle::new("Snow").unwrap())
        .expect("should rename album");
    let renamed = repo.get_album_by_id(winter.id).unwrap().unwrap();
    assert_eq!(renamed.title.as_str(), "Snow");
}

#[test]
fn duplicate_category_titles_are_rejected() {
    let test_db = TestDb::new();
    let repo = test_db.repo();

    create_category(&repo, "Sea");
    let duplicate = repo.create_category(&NewCategory {
        title: CategoryTitle::new("Sea").unwrap(),
    });

    assert!(matches!(duplicate, Err(RepositoryError::Conflict(_))));
    assert_eq!(repo.list_categories().unwrap().len(), 1);
}

#[test]
fn photo_content_is_loaded_separately() {
    let test_db = TestDb::new();
    let repo = test_db.repo();
    let anna = create_user(&repo, "anna");
    let album = create_album(&repo, &anna, "Trips");

    let photo = create_photo(&repo, &album, None);

    let content = repo
        .get_photo_content(photo.id)
        .expect("should load content")
        .expect("photo should exist");
    assert_eq!(content.data, vec![0x89, b'P', b'N', b'G']);
    assert_eq!(content.mimetype.as_str(), "image/png");
    assert_eq!(repo.list_album_photos(album.id).unwrap().len(), 1);
}

#[test]
fn photos_are_counted_per_category() {
    let test_db = TestDb::new();
    let repo = test_db.repo();
    let anna = create_user(&repo, "anna");
    let album = create_album(&repo, &anna, "Trips");
    let sea = create_category(&repo, "Sea");
    let cats = create_category(&repo, "Cats");

    create_photo(&repo, &album, Some(&sea));
    create_photo(&repo, &album, Some(&sea));
    create_photo(&repo, &album, None);

    let counts = repo.count_photos_by_category().expect("should count photos");
    assert_eq!(counts.get(&sea.id), Some(&2));
    assert_eq!(counts.get(&cats.id), None);

    let ids: Vec<i32> = repo
        .list_category_photos(sea.id)
        .unwrap()
        .into_iter()
        .map(|p| p.id.get())
        .collect();
    assert_eq!(ids.len(), 2);
    assert!(ids[0] < ids[1]);
}

#[test]
fn deleting_photo_removes_comments() {
    let test_db = TestDb::new();
    let repo = test_db.repo();
    let anna = create_user(&repo, "anna");
    let album = create_album(&repo, &anna, "Trips");
    let photo = create_photo(&repo, &album, None);

    repo.create_comment(&NewComment {
        photo_id: photo.id,
        user_id: anna.id,
        text: CommentText::new("Lovely").unwrap(),
    })
    .expect("should add comment");
    assert_eq!(repo.list_comments(photo.id).unwrap().len(), 1);

    assert_eq!(repo.delete_photo(photo.id).unwrap(), 1);

    assert!(repo.get_photo_by_id(photo.id).unwrap().is_none());
    assert!(repo.list_comments(photo.id).unwrap().is_empty());
}

#[test]
fn deleting_category_keeps_photos_uncategorized() {
    let test_db = TestDb::new();
    let repo = test_db.repo();
    let anna = create_user(&repo, "anna");
    let album = create_album(&repo, &anna, "Trips");
    let sea = create_category(&repo, "Sea");
    let photo = create_photo(&repo, &album, Some(&sea));

    assert_eq!(repo.delete_category(sea.id).unwrap(), 1);

    let photo = repo.get_photo_by_id(photo.id).unwrap().unwrap();
    assert_eq!(photo.category_id, None);
    assert!(repo.get_category_by_id(sea.id).unwrap().is_none());
}
