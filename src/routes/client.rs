use actix_identity::Identity;
use actix_web::{HttpResponse, Responder, post, web};
use actix_web_flash_messages::FlashMessage;

use crate::forms::client::{CloseClientForm, FollowUpForm, SaveClientForm};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{redirect, resolve_or_respond, today};
use crate::services::client as client_service;
use crate::services::relance::RelanceStore;
use crate::services::ServiceError;

/// Flash message and redirect for a failed mutation.
fn mutation_failed(err: ServiceError, action: &str) -> HttpResponse {
    match err {
        ServiceError::Form(message) | ServiceError::Internal(message) => {
            FlashMessage::error(message).send();
        }
        ServiceError::NotFound => {
            FlashMessage::error("Client not found.").send();
        }
        ServiceError::Unauthorized => {
            FlashMessage::error("You are not allowed to change this client.").send();
        }
        err => {
            log::error!("Failed to {action}: {err}");
            FlashMessage::error(format!("Failed to {action}: {err}")).send();
        }
    }
    redirect("/")
}

#[post("/client/save")]
pub async fn save_client(
    user: AuthenticatedUser,
    identity: Identity,
    repo: web::Data<DieselRepository>,
    store: web::Data<RelanceStore>,
    server_config: web::Data<ServerConfig>,
    web::Form(form): web::Form<SaveClientForm>,
) -> impl Responder {
    let session = match resolve_or_respond(repo.get_ref(), &user, identity, &server_config) {
        Ok(session) => session,
        Err(response) => return response,
    };

    let creating = form.id.is_none();
    match client_service::save_client(repo.get_ref(), &session, &store.current(), form, today()) {
        Ok(_) => {
            let message = if creating { "Client added." } else { "Client updated." };
            FlashMessage::success(message).send();
            redirect("/")
        }
        Err(err) => mutation_failed(err, "save the client"),
    }
}

#[post("/client/followup")]
pub async fn followup_client(
    user: AuthenticatedUser,
    identity: Identity,
    repo: web::Data<DieselRepository>,
    store: web::Data<RelanceStore>,
    server_config: web::Data<ServerConfig>,
    web::Form(form): web::Form<FollowUpForm>,
) -> impl Responder {
    let session = match resolve_or_respond(repo.get_ref(), &user, identity, &server_config) {
        Ok(session) => session,
        Err(response) => return response,
    };

    match client_service::validate_followup(
        repo.get_ref(),
        &session,
        &store.current(),
        form,
        today(),
    ) {
        Ok(_) => {
            FlashMessage::success("Follow-up recorded.").send();
            redirect("/")
        }
        Err(err) => mutation_failed(err, "validate the follow-up"),
    }
}

#[post("/client/close")]
pub async fn close_client(
    user: AuthenticatedUser,
    identity: Identity,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    web::Form(form): web::Form<CloseClientForm>,
) -> impl Responder {
    let session = match resolve_or_respond(repo.get_ref(), &user, identity, &server_config) {
        Ok(session) => session,
        Err(response) => return response,
    };

    match client_service::close_client(repo.get_ref(), &session, form) {
        Ok(_) => {
            FlashMessage::success("Client closed.").send();
            redirect("/")
        }
        Err(err) => mutation_failed(err, "close the client"),
    }
}
