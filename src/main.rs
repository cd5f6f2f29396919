use actix_files::Files;
use actix_identity::IdentityMiddleware;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::{App, HttpServer, middleware, web};
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
use config::Config;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use dotenvy::dotenv;
use tera::Tera;

use photo_album::db::establish_connection_pool;
use photo_album::models::config::ServerConfig;
use photo_album::repository::DieselRepository;
use photo_album::routes::albums::{
    add_album, delete_album, show_album, show_albums, update_album, upload_photo,
};
use photo_album::routes::auth::{login, logout, register, show_login, show_register};
use photo_album::routes::categories::{add_category, delete_category, show_categories};
use photo_album::routes::index;
use photo_album::routes::photos::{
    add_comment, delete_comment, delete_photo, photo_image, set_photo_category, show_photo,
};
use photo_album::routes::voting::{cast_vote, show_rating, show_top, show_voting_pair};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

fn load_config() -> Result<ServerConfig, config::ConfigError> {
    Config::builder()
        .add_source(config::File::with_name("config/default"))
        .add_source(config::File::with_name("config/local").required(false))
        .add_source(config::Environment::with_prefix("APP").separator("__"))
        .build()?
        .try_deserialize()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let server_config = match load_config() {
        Ok(server_config) => server_config,
        Err(e) => {
            log::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&server_config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };

    match pool.get() {
        Ok(mut conn) => {
            if let Err(e) = conn.run_pending_migrations(MIGRATIONS) {
                log::error!("Failed to run database migrations: {e}");
                std::process::exit(1);
            }
        }
        Err(e) => {
            log::error!("Failed to get a connection for migrations: {e}");
            std::process::exit(1);
        }
    }

    let tera = match Tera::new(&server_config.templates_dir) {
        Ok(tera) => tera,
        Err(e) => {
            log::error!("Failed to parse templates: {e}");
            std::process::exit(1);
        }
    };

    let secret_key = match Key::try_from(server_config.secret_key.as_bytes()) {
        Ok(key) => key,
        Err(e) => {
            log::error!("Session secret key must be at least 64 bytes: {e}");
            std::process::exit(1);
        }
    };
    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let repo = DieselRepository::new(pool);
    let bind_address = (server_config.address.clone(), server_config.port);
    let secure_cookies = server_config.secure_cookies;

    log::info!("Starting server at {}:{}", bind_address.0, bind_address.1);

    HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(secure_cookies)
                    .build(),
            )
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/assets", "./assets"))
            .service(index)
            .service(show_login)
            .service(login)
            .service(show_register)
            .service(register)
            .service(logout)
            .service(show_albums)
            .service(add_album)
            .service(show_album)
            .service(update_album)
            .service(delete_album)
            .service(upload_photo)
            .service(show_photo)
            .service(photo_image)
            .service(set_photo_category)
            .service(delete_photo)
            .service(add_comment)
            .service(delete_comment)
            .service(show_categories)
            .service(add_category)
            .service(delete_category)
            .service(show_voting_pair)
            .service(show_top)
            .service(cast_vote)
            .service(show_rating)
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
