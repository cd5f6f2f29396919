use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::types::CategoryId;
use crate::forms::categories::{AddCategoryForm, AddCategoryFormPayload};
use crate::repository::DieselRepository;
use crate::routes::{CurrentUser, base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::categories::{
    add_category as add_category_service, delete_category as delete_category_service,
    show_categories as show_categories_service,
};

#[get("/categories")]
pub async fn show_categories(
    user: CurrentUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match show_categories_service(repo.get_ref()) {
        Ok(categories) => {
            let mut context = base_context(&flash_messages, Some(user.user()), "categories");
            context.insert("categories", &categories);
            render_template(&tera, "categories/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to render categories page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/categories")]
pub async fn add_category(
    _user: CurrentUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddCategoryForm>,
) -> impl Responder {
    let payload: AddCategoryFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect("/categories");
        }
    };

    match add_category_service(payload, repo.get_ref()) {
        Ok(_) => FlashMessage::success("Категория добавлена.").send(),
        Err(ServiceError::Conflict(message)) => FlashMessage::error(message).send(),
        Err(err) => {
            log::error!("Failed to add category: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    }

    redirect("/categories")
}

#[post("/categories/{category_id}/delete")]
pub async fn delete_category(
    category_id: web::Path<i32>,
    _user: CurrentUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let Ok(category_id) = CategoryId::new(category_id.into_inner()) else {
        return HttpResponse::NotFound().finish();
    };

    match delete_category_service(category_id, repo.get_ref()) {
        Ok(()) => FlashMessage::success("Категория удалена.").send(),
        Err(ServiceError::NotFound) => FlashMessage::error("Категория не найдена.").send(),
        Err(err) => {
            log::error!("Failed to delete category: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    }

    redirect("/categories")
}
