//! HTTP handlers and the helpers they share.

use std::future::{Ready, ready};

use actix_identity::IdentityExt;
use actix_web::dev::Payload;
use actix_web::http::{StatusCode, header};
use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError, web};
use actix_web_flash_messages::{IncomingFlashMessages, Level};
use tera::{Context, Tera};
use thiserror::Error;

use crate::domain::types::UserId;
use crate::domain::user::User;
use crate::repository::{DieselRepository, UserReader};

pub mod albums;
pub mod auth;
pub mod categories;
pub mod photos;
pub mod voting;

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(e) => {
            log::error!("Failed to render template '{template}': {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Bootstrap alert class for a flash message level.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        Level::Info => "info",
        Level::Debug => "secondary",
    }
}

/// Context shared by every page: alerts, the signed-in user and the active
/// navigation entry.
pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    user: Option<&User>,
    current_page: &str,
) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_user", &user);
    context.insert("current_page", current_page);
    context
}

/// Rejection of requests without a valid session; sends the browser to the
/// login page.
#[derive(Debug, Error)]
#[error("authentication required")]
pub struct AuthRedirect;

impl ResponseError for AuthRedirect {
    fn status_code(&self) -> StatusCode {
        StatusCode::SEE_OTHER
    }

    fn error_response(&self) -> HttpResponse {
        redirect("/login")
    }
}

/// The signed-in user, loaded from the session identity.
///
/// Handlers take this as an argument to require authentication; the user is
/// then passed explicitly to the service layer.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl CurrentUser {
    pub fn user(&self) -> &User {
        &self.0
    }
}

fn load_current_user(req: &HttpRequest) -> Option<User> {
    let identity = req.get_identity().ok()?;
    let raw_id = identity.id().ok()?;
    let user_id = raw_id.parse::<i32>().ok().and_then(|id| UserId::new(id).ok())?;

    let repo = req.app_data::<web::Data<DieselRepository>>()?;
    match repo.get_user_by_id(user_id) {
        Ok(user) => user,
        Err(e) => {
            log::error!("Failed to load user {user_id} from session: {e}");
            None
        }
    }
}

impl FromRequest for CurrentUser {
    type Error = AuthRedirect;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(load_current_user(req).map(CurrentUser).ok_or(AuthRedirect))
    }
}

/// Routes not tied to a single resource.
#[actix_web::get("/")]
pub async fn index() -> HttpResponse {
    redirect("/albums")
}
