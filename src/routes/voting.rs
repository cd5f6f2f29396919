use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use tera::Tera;

use crate::domain::rating::VotingPair;
use crate::domain::types::CategoryId;
use crate::forms::votes::{CastVoteForm, CastVoteFormPayload};
use crate::repository::DieselRepository;
use crate::routes::{CurrentUser, base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::voting::{
    cast_vote as cast_vote_service, show_rating as show_rating_service,
    show_top as show_top_service, show_voting_pair as show_voting_pair_service,
};

#[derive(Deserialize)]
struct TopQueryParams {
    limit: Option<usize>,
}

#[get("/categories/{category_id}/vote")]
pub async fn show_voting_pair(
    category_id: web::Path<i32>,
    user: CurrentUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let Ok(category_id) = CategoryId::new(category_id.into_inner()) else {
        return HttpResponse::NotFound().finish();
    };

    let mut rng = rand::thread_rng();
    match show_voting_pair_service(category_id, user.user(), repo.get_ref(), &mut rng) {
        Ok(page) => {
            let mut context = base_context(&flash_messages, Some(user.user()), "categories");
            context.insert("category", &page.category);
            match page.pair {
                VotingPair::Pair(first, second) => {
                    context.insert("insufficient_photos", &false);
                    context.insert("first", &first);
                    context.insert("second", &second);
                    context.insert("previous_winner", &page.previous_winner);
                }
                VotingPair::InsufficientPhotos => {
                    context.insert("insufficient_photos", &true);
                }
            }
            render_template(&tera, "voting/vote.html", &context)
        }
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to render voting page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/vote")]
pub async fn cast_vote(
    user: CurrentUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<CastVoteForm>,
) -> impl Responder {
    let payload: CastVoteFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect("/categories");
        }
    };

    match cast_vote_service(payload, user.user(), repo.get_ref()) {
        Ok(category_id) => redirect(&format!("/categories/{category_id}/vote")),
        Err(ServiceError::InvalidPair) => {
            FlashMessage::error("Нельзя голосовать за фото против него самого.").send();
            redirect("/categories")
        }
        Err(ServiceError::CategoryMismatch) => {
            FlashMessage::error("Фото должны быть в одной категории.").send();
            redirect("/categories")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Фото не найдено.").send();
            redirect("/categories")
        }
        Err(err) => {
            log::error!("Failed to cast vote: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/categories/{category_id}/top")]
pub async fn show_top(
    category_id: web::Path<i32>,
    params: web::Query<TopQueryParams>,
    user: CurrentUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let Ok(category_id) = CategoryId::new(category_id.into_inner()) else {
        return HttpResponse::NotFound().finish();
    };

    match show_top_service(category_id, params.limit, repo.get_ref()) {
        Ok((category, top)) => {
            let mut context = base_context(&flash_messages, Some(user.user()), "categories");
            context.insert("category", &category);
            context.insert("top", &top);
            render_template(&tera, "voting/top.html", &context)
        }
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to render top page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/rating")]
pub async fn show_rating(
    user: CurrentUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match show_rating_service(repo.get_ref()) {
        Ok(leaders) => {
            let mut context = base_context(&flash_messages, Some(user.user()), "rating");
            context.insert("leaders", &leaders);
            render_template(&tera, "voting/rating.html", &context)
        }
        Err(err) => {
            log::error!("Failed to render rating page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
