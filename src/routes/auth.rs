use actix_identity::Identity;
use actix_web::{HttpMessage, HttpRequest, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use tera::{Context, Tera};

use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::routes::{SIGNIN_PATH, alert_level_to_str, redirect, render_template};

#[derive(Deserialize)]
pub struct CallbackQuery {
    token: String,
}

/// Receives the token issued by the auth service and keeps it in the
/// identity cookie.
#[get("/auth/callback")]
pub async fn auth_callback(
    req: HttpRequest,
    query: web::Query<CallbackQuery>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let token = query.into_inner().token;

    if let Err(err) = AuthenticatedUser::from_jwt(&token, &server_config.secret) {
        log::warn!("Rejected token on callback: {err}");
        FlashMessage::error("Sign-in failed, please try again.").send();
        return redirect(SIGNIN_PATH);
    }

    match Identity::login(&req.extensions(), token) {
        Ok(_) => redirect("/"),
        Err(err) => {
            log::error!("Failed to store identity: {err}");
            redirect(SIGNIN_PATH)
        }
    }
}

/// Landing page for signed-out callers, pointing at the auth service.
#[get("/auth/signin")]
pub async fn signin(
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("auth_service_url", &server_config.auth_service_url);
    render_template(&tera, "auth/signin.html", &context)
}

#[post("/logout")]
pub async fn logout(identity: Identity, server_config: web::Data<ServerConfig>) -> impl Responder {
    identity.logout();
    redirect(&server_config.auth_service_url)
}
