//! Application wiring shared by the HTTP tests.

use keepintouch::models::auth::AuthenticatedUser;
use keepintouch::models::config::ServerConfig;

pub const SECRET: &str = "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";

/// Name of the cookie holding flash messages between requests.
pub const FLASH_COOKIE: &str = "_flash";
/// Name of the session cookie carrying the identity.
pub const SESSION_COOKIE: &str = "id";

pub fn server_config() -> ServerConfig {
    ServerConfig {
        domain: "localhost".to_string(),
        address: "127.0.0.1".to_string(),
        port: 8080,
        database_url: ":memory:".to_string(),
        templates_dir: "./templates/**/*".to_string(),
        secret: SECRET.to_string(),
        auth_service_url: "http://auth.example.com".to_string(),
        relance_cache_path: String::new(),
        admin_emails: vec![],
    }
}

/// Token the auth service would hand over for `email`.
pub fn token_for(email: &str) -> String {
    AuthenticatedUser {
        sub: "1".to_string(),
        email: email.to_string(),
        exp: 4_102_444_800,
    }
    .to_jwt(SECRET)
    .expect("token is signed")
}

/// Builds the service with the same middleware stack and routes as `run`.
macro_rules! test_app {
    ($test_db:expr) => {{
        use actix_identity::IdentityMiddleware;
        use actix_session::{SessionMiddleware, storage::CookieSessionStore};
        use actix_web::cookie::Key;
        use actix_web::{App, test, web};
        use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
        use keepintouch::domain::relance::RelanceConfig;
        use keepintouch::middleware::RedirectUnauthorized;
        use keepintouch::routes::api::api_v1_clients;
        use keepintouch::routes::auth::{auth_callback, logout, signin};
        use keepintouch::routes::client::{close_client, followup_client, save_client};
        use keepintouch::routes::main::show_index;
        use keepintouch::routes::settings::{reassign, save_relance, show_settings, toggle_profile};
        use keepintouch::services::relance::RelanceStore;

        let key = Key::from(common::app::SECRET.as_bytes());
        let flash = FlashMessagesFramework::builder(CookieMessageStore::builder(key.clone()).build())
            .build();
        let tera = tera::Tera::new("templates/**/*").expect("templates parse");

        test::init_service(
            App::new()
                .wrap(flash)
                .wrap(IdentityMiddleware::default())
                .wrap(
                    SessionMiddleware::builder(CookieSessionStore::default(), key)
                        .cookie_secure(false)
                        .build(),
                )
                .service(auth_callback)
                .service(signin)
                .service(web::scope("/api").service(api_v1_clients))
                .service(
                    web::scope("")
                        .wrap(RedirectUnauthorized)
                        .service(show_index)
                        .service(save_client)
                        .service(followup_client)
                        .service(close_client)
                        .service(show_settings)
                        .service(save_relance)
                        .service(reassign)
                        .service(toggle_profile)
                        .service(logout),
                )
                .app_data(web::Data::new(tera))
                .app_data(web::Data::new($test_db.repo()))
                .app_data(web::Data::new(RelanceStore::in_memory(RelanceConfig::default())))
                .app_data(web::Data::new(common::app::server_config())),
        )
        .await
    }};
}
