use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::types::AlbumId;
use crate::forms::albums::{AlbumForm, AlbumFormPayload};
use crate::forms::photos::{UploadPhotoForm, UploadPhotoPayload};
use crate::repository::DieselRepository;
use crate::routes::{CurrentUser, base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::albums::{
    add_album as add_album_service, delete_album as delete_album_service,
    show_album as show_album_service, show_albums as show_albums_service,
    update_album as update_album_service,
};
use crate::services::photos::upload_photo as upload_photo_service;

#[get("/albums")]
pub async fn show_albums(
    user: CurrentUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match show_albums_service(user.user(), repo.get_ref()) {
        Ok(albums) => {
            let mut context = base_context(&flash_messages, Some(user.user()), "albums");
            context.insert("albums", &albums);
            render_template(&tera, "albums/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to render albums page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/albums")]
pub async fn add_album(
    user: CurrentUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AlbumForm>,
) -> impl Responder {
    let payload: AlbumFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect("/albums");
        }
    };

    match add_album_service(payload, user.user(), repo.get_ref()) {
        Ok(album) => {
            FlashMessage::success("Альбом создан.").send();
            redirect(&format!("/albums/{}", album.id))
        }
        Err(err) => {
            log::error!("Failed to add album: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/albums/{album_id}")]
pub async fn show_album(
    album_id: web::Path<i32>,
    user: CurrentUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let Ok(album_id) = AlbumId::new(album_id.into_inner()) else {
        return HttpResponse::NotFound().finish();
    };

    match show_album_service(album_id, user.user(), repo.get_ref()) {
        Ok((album, photos)) => {
            let mut context = base_context(&flash_messages, Some(user.user()), "albums");
            context.insert("album", &album);
            context.insert("photos", &photos);
            render_template(&tera, "albums/show.html", &context)
        }
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to render album page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/albums/{album_id}/update")]
pub async fn update_album(
    album_id: web::Path<i32>,
    user: CurrentUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AlbumForm>,
) -> impl Responder {
    let Ok(album_id) = AlbumId::new(album_id.into_inner()) else {
        return HttpResponse::NotFound().finish();
    };
    let album_url = format!("/albums/{album_id}");

    let payload: AlbumFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect(&album_url);
        }
    };

    match update_album_service(album_id, payload, user.user(), repo.get_ref()) {
        Ok(()) => FlashMessage::success("Альбом переименован.").send(),
        Err(ServiceError::NotFound) => return HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to update album: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    }

    redirect(&album_url)
}

#[post("/albums/{album_id}/delete")]
pub async fn delete_album(
    album_id: web::Path<i32>,
    user: CurrentUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let Ok(album_id) = AlbumId::new(album_id.into_inner()) else {
        return HttpResponse::NotFound().finish();
    };

    match delete_album_service(album_id, user.user(), repo.get_ref()) {
        Ok(()) => FlashMessage::success("Альбом удалён.").send(),
        Err(ServiceError::NotFound) => FlashMessage::error("Альбом не найден.").send(),
        Err(err) => {
            log::error!("Failed to delete album: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    }

    redirect("/albums")
}

#[post("/albums/{album_id}/photos")]
pub async fn upload_photo(
    album_id: web::Path<i32>,
    user: CurrentUser,
    repo: web::Data<DieselRepository>,
    MultipartForm(form): MultipartForm<UploadPhotoForm>,
) -> impl Responder {
    let Ok(album_id) = AlbumId::new(album_id.into_inner()) else {
        return HttpResponse::NotFound().finish();
    };
    let album_url = format!("/albums/{album_id}");

    let payload: UploadPhotoPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect(&album_url);
        }
    };

    match upload_photo_service(album_id, payload, user.user(), repo.get_ref()) {
        Ok(photo) => {
            FlashMessage::success("Фото загружено.").send();
            redirect(&format!("/photos/{}", photo.id))
        }
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to upload photo: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
