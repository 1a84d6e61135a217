use actix_identity::Identity;
use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, render_template, resolve_or_respond, today};
use crate::services::ServiceError;
use crate::services::main::{IndexQuery, load_index_page};
use crate::services::relance::RelanceStore;

#[get("/")]
pub async fn show_index(
    query: web::Query<IndexQuery>,
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

    let config = store.current();
    let mut context = base_context(
        &flash_messages,
        &session,
        "index",
        &server_config.auth_service_url,
    );

    match load_index_page(repo.get_ref(), &session, &config, query.into_inner(), today()) {
        Ok(data) => {
            context.insert("page", &data);
            context.insert("relance", &config);
            render_template(&tera, "main/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => HttpResponse::Unauthorized().finish(),
        Err(err) => {
            log::error!("Failed to load the dashboard: {err}");
            context.insert("load_error", &err.to_string());
            render_template(&tera, "main/index.html", &context)
        }
    }
}
