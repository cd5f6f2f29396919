use actix_web::http::header::{self, ContentDisposition, DispositionParam, DispositionType};
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::photo::PhotoContent;
use crate::domain::types::{CommentId, PhotoId};
use crate::forms::comments::{AddCommentForm, AddCommentFormPayload};
use crate::forms::photos::{SetPhotoCategoryForm, SetPhotoCategoryFormPayload};
use crate::repository::DieselRepository;
use crate::routes::{CurrentUser, base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::photos::{
    add_comment as add_comment_service, delete_comment as delete_comment_service,
    delete_photo as delete_photo_service, photo_content,
    set_photo_category as set_photo_category_service, show_photo as show_photo_service,
};

#[get("/photos/{photo_id}")]
pub async fn show_photo(
    photo_id: web::Path<i32>,
    user: CurrentUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let Ok(photo_id) = PhotoId::new(photo_id.into_inner()) else {
        return HttpResponse::NotFound().finish();
    };

    match show_photo_service(photo_id, user.user(), repo.get_ref()) {
        Ok(page) => {
            let mut context = base_context(&flash_messages, Some(user.user()), "albums");
            context.insert("page", &page);
            render_template(&tera, "photos/show.html", &context)
        }
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to render photo page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Stored image with its MIME type. `nosniff` keeps browsers from
/// reinterpreting the bytes as anything but that type.
fn image_response(content: PhotoContent) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(content.mimetype.as_str())
        .insert_header((header::X_CONTENT_TYPE_OPTIONS, "nosniff"))
        .insert_header(ContentDisposition {
            disposition: DispositionType::Inline,
            parameters: vec![DispositionParam::Filename(content.filename.into_inner())],
        })
        .body(content.data)
}

/// Raw image bytes, served inline with the stored MIME type.
#[get("/photos/{photo_id}/image")]
pub async fn photo_image(
    photo_id: web::Path<i32>,
    _user: CurrentUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let Ok(photo_id) = PhotoId::new(photo_id.into_inner()) else {
        return HttpResponse::NotFound().finish();
    };

    match photo_content(photo_id, repo.get_ref()) {
        Ok(content) => image_response(content),
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to serve photo {photo_id}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/photos/{photo_id}/category")]
pub async fn set_photo_category(
    photo_id: web::Path<i32>,
    user: CurrentUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<SetPhotoCategoryForm>,
) -> impl Responder {
    let Ok(photo_id) = PhotoId::new(photo_id.into_inner()) else {
        return HttpResponse::NotFound().finish();
    };
    let photo_url = format!("/photos/{photo_id}");

    let payload: SetPhotoCategoryFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect(&photo_url);
        }
    };

    match set_photo_category_service(photo_id, payload, user.user(), repo.get_ref()) {
        Ok(true) => FlashMessage::success("Категория изменена, голоса за фото сброшены.").send(),
        Ok(false) => FlashMessage::info("Категория не изменилась.").send(),
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Менять категорию может только владелец альбома.").send()
        }
        Err(ServiceError::NotFound) => FlashMessage::error("Фото или категория не найдены.").send(),
        Err(err) => {
            log::error!("Failed to set photo category: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    }

    redirect(&photo_url)
}

#[post("/photos/{photo_id}/delete")]
pub async fn delete_photo(
    photo_id: web::Path<i32>,
    user: CurrentUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let Ok(photo_id) = PhotoId::new(photo_id.into_inner()) else {
        return HttpResponse::NotFound().finish();
    };

    match delete_photo_service(photo_id, user.user(), repo.get_ref()) {
        Ok(album_id) => {
            FlashMessage::success("Фото удалено.").send();
            redirect(&format!("/albums/{album_id}"))
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Удалять фото может только владелец альбома.").send();
            redirect(&format!("/photos/{photo_id}"))
        }
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to delete photo: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/photos/{photo_id}/comments")]
pub async fn add_comment(
    photo_id: web::Path<i32>,
    user: CurrentUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddCommentForm>,
) -> impl Responder {
    let Ok(photo_id) = PhotoId::new(photo_id.into_inner()) else {
        return HttpResponse::NotFound().finish();
    };
    let photo_url = format!("/photos/{photo_id}");

    let payload: AddCommentFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect(&photo_url);
        }
    };

    match add_comment_service(photo_id, payload, user.user(), repo.get_ref()) {
        Ok(()) => redirect(&photo_url),
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to add comment: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/comments/{comment_id}/delete")]
pub async fn delete_comment(
    comment_id: web::Path<i32>,
    user: CurrentUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let Ok(comment_id) = CommentId::new(comment_id.into_inner()) else {
        return HttpResponse::NotFound().finish();
    };

    match delete_comment_service(comment_id, user.user(), repo.get_ref()) {
        Ok(photo_id) => redirect(&format!("/photos/{photo_id}")),
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Недостаточно прав для удаления комментария.").send();
            redirect("/albums")
        }
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to delete comment: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{MimeType, PhotoFileName};

    #[test]
    fn image_response_forbids_content_sniffing() {
        let response = image_response(PhotoContent {
            mimetype: MimeType::new("image/png").unwrap(),
            filename: PhotoFileName::new("cat.png").unwrap(),
            data: vec![1, 2, 3],
        });

        let headers = response.headers();
        assert_eq!(headers.get(header::CONTENT_TYPE).unwrap(), "image/png");
        assert_eq!(headers.get(header::X_CONTENT_TYPE_OPTIONS).unwrap(), "nosniff");
        assert!(
            headers
                .get(header::CONTENT_DISPOSITION)
                .unwrap()
                .to_str()
                .unwrap()
                .starts_with("inline")
        );
    }
}
