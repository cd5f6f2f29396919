use actix_identity::Identity;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::user::User;
use crate::forms::auth::{LoginForm, LoginFormPayload, RegistrationForm, RegistrationFormPayload};
use crate::repository::DieselRepository;
use crate::routes::{CurrentUser, base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::auth::{authenticate, register_user};

fn start_session(req: &HttpRequest, user: &User) -> HttpResponse {
    match Identity::login(&req.extensions(), user.id.to_string()) {
        Ok(_) => redirect("/albums"),
        Err(e) => {
            log::error!("Failed to start session for user {}: {e}", user.id);
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/login")]
pub async fn show_login(
    user: Option<CurrentUser>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    if user.is_some() {
        return redirect("/albums");
    }
    let context = base_context(&flash_messages, None, "login");
    render_template(&tera, "auth/login.html", &context)
}

#[post("/login")]
pub async fn login(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<LoginForm>,
) -> impl Responder {
    let payload: LoginFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect("/login");
        }
    };

    match authenticate(payload, repo.get_ref()) {
        Ok(user) => start_session(&req, &user),
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Неверное имя пользователя или пароль").send();
            redirect("/login")
        }
        Err(err) => {
            log::error!("Failed to log in: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/register")]
pub async fn show_register(
    user: Option<CurrentUser>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    if user.is_some() {
        return redirect("/albums");
    }
    let context = base_context(&flash_messages, None, "register");
    render_template(&tera, "auth/register.html", &context)
}

#[post("/register")]
pub async fn register(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<RegistrationForm>,
) -> impl Responder {
    let payload: RegistrationFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect("/register");
        }
    };

    match register_user(payload, repo.get_ref()) {
        Ok(user) => {
            log::info!("Registered user {}", user.username);
            start_session(&req, &user)
        }
        Err(ServiceError::Conflict(message)) => {
            FlashMessage::error(message).send();
            redirect("/register")
        }
        Err(err) => {
            log::error!("Failed to register user: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/logout")]
pub async fn logout(identity: Option<Identity>) -> impl Responder {
    if let Some(identity) = identity {
        identity.logout();
    }
    redirect("/login")
}
