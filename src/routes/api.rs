use actix_identity::Identity;
use actix_web::{HttpResponse, Responder, get, web};

use crate::dto::api::ClientsResponse;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{resolve_or_respond, today};
use crate::services::main::{IndexQuery, load_index_page};
use crate::services::relance::RelanceStore;

/// Same pipeline as the dashboard, as JSON.
#[get("/v1/clients")]
pub async fn api_v1_clients(
    query: web::Query<IndexQuery>,
    user: AuthenticatedUser,
    identity: Identity,
    repo: web::Data<DieselRepository>,
    store: web::Data<RelanceStore>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let session = match resolve_or_respond(repo.get_ref(), &user, identity, &server_config) {
        Ok(session) => session,
        Err(_) => return HttpResponse::Unauthorized().finish(),
    };

    match load_index_page(
        repo.get_ref(),
        &session,
        &store.current(),
        query.into_inner(),
        today(),
    ) {
        Ok(data) => HttpResponse::Ok().json(ClientsResponse::from(data)),
        Err(err) => {
            log::error!("Failed to list clients: {err}");
            HttpResponse::InternalServerError().json(serde_json::json!({ "error": err.to_string() }))
        }
    }
}
