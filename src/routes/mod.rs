//! HTTP handlers and the helpers they share.

use actix_identity::Identity;
use actix_web::{HttpResponse, http::header};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages, Level};
use chrono::{Local, NaiveDate};
use tera::{Context, Tera};

use crate::domain::session::Session;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::services::session::resolve_session;
use crate::services::ServiceError;

pub mod api;
pub mod auth;
pub mod client;
pub mod main;
pub mod settings;

/// Location unauthenticated callers are sent to.
pub const SIGNIN_PATH: &str = "/auth/signin";

/// Maps a flash level onto the Bootstrap alert class.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok().content_type("text/html").body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Context shared by every page: banners, the caller and navigation.
pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    session: &Session,
    current_page: &str,
    home_url: &str,
) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_user", &session.profile);
    context.insert("current_page", current_page);
    context.insert("home_url", home_url);
    context
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Resolves the caller's session or builds the response to send instead.
///
/// A deactivated account is signed out with an explanatory banner.
pub fn resolve_or_respond(
    repo: &DieselRepository,
    user: &AuthenticatedUser,
    identity: Identity,
    server_config: &ServerConfig,
) -> Result<Session, HttpResponse> {
    match resolve_session(repo, &user.email, &server_config.admin_emails) {
        Ok(session) => Ok(session),
        Err(ServiceError::Deactivated) => {
            identity.logout();
            FlashMessage::error("Your account has been deactivated. Contact an administrator.")
                .send();
            Err(redirect(SIGNIN_PATH))
        }
        Err(ServiceError::Unauthorized) => {
            identity.logout();
            Err(redirect(SIGNIN_PATH))
        }
        Err(err) => {
            log::error!("Failed to resolve session: {err}");
            Err(HttpResponse::InternalServerError().finish())
        }
    }
}
