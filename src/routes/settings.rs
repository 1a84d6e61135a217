use actix_identity::Identity;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::forms::settings::{ReassignForm, RelanceConfigForm, ToggleProfileForm};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template, resolve_or_respond};
use crate::services::relance::RelanceStore;
use crate::services::{ServiceError, settings as settings_service};

fn settings_failed(err: ServiceError, action: &str) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => {
            FlashMessage::error("Admin rights are required.").send();
            return redirect("/");
        }
        ServiceError::Form(message) => {
            FlashMessage::error(message).send();
        }
        ServiceError::NotFound => {
            FlashMessage::error("Profile not found.").send();
        }
        err => {
            log::error!("Failed to {action}: {err}");
            FlashMessage::error(format!("Failed to {action}: {err}")).send();
        }
    }
    redirect("/settings")
}

#[get("/settings")]
pub async fn show_settings(
    user: AuthenticatedUser,
    identity: Identity,
    repo: web::Data<DieselRepository>,
    store: web::Data<RelanceStore>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let session = match resolve_or_respond(repo.get_ref(), &user, identity, &server_config) {
        Ok(session) => session,
        Err(response) => return response,
    };

    match settings_service::load_settings_page(repo.get_ref(), &session, &store) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &session,
                "settings",
                &server_config.auth_service_url,
            );
            context.insert("page", &data);
            render_template(&tera, "settings/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Admin rights are required.").send();
            redirect("/")
        }
        Err(err) => {
            log::error!("Failed to load settings: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/settings/relance")]
pub async fn save_relance(
    user: AuthenticatedUser,
    identity: Identity,
    repo: web::Data<DieselRepository>,
    store: web::Data<RelanceStore>,
    server_config: web::Data<ServerConfig>,
    web::Form(form): web::Form<RelanceConfigForm>,
) -> impl Responder {
    let session = match resolve_or_respond(repo.get_ref(), &user, identity, &server_config) {
        Ok(session) => session,
        Err(response) => return response,
    };

    match settings_service::save_relance_config(repo.get_ref(), &session, &store, form) {
        Ok(_) => {
            FlashMessage::success("Follow-up delays saved.").send();
            redirect("/settings")
        }
        Err(err) => settings_failed(err, "save the follow-up delays"),
    }
}

#[post("/settings/reassign")]
pub async fn reassign(
    user: AuthenticatedUser,
    identity: Identity,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    web::Form(form): web::Form<ReassignForm>,
) -> impl Responder {
    let session = match resolve_or_respond(repo.get_ref(), &user, identity, &server_config) {
        Ok(session) => session,
        Err(response) => return response,
    };

    match settings_service::reassign_clients(repo.get_ref(), &session, form) {
        Ok(moved) => {
            FlashMessage::success(format!("{moved} client(s) reassigned.")).send();
            redirect("/settings")
        }
        Err(err) => settings_failed(err, "reassign the clients"),
    }
}

#[post("/settings/profiles/toggle")]
pub async fn toggle_profile(
    user: AuthenticatedUser,
    identity: Identity,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    web::Form(form): web::Form<ToggleProfileForm>,
) -> impl Responder {
    let session = match resolve_or_respond(repo.get_ref(), &user, identity, &server_config) {
        Ok(session) => session,
        Err(response) => return response,
    };

    match settings_service::toggle_profile_active(repo.get_ref(), &session, form) {
        Ok(profile) => {
            let state = if profile.is_active { "activated" } else { "deactivated" };
            FlashMessage::success(format!("{} {state}.", profile.email)).send();
            redirect("/settings")
        }
        Err(err) => settings_failed(err, "update the profile"),
    }
}
