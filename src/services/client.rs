//! Client mutation handlers.
//!
//! Each handler validates its form before touching the store and only acts
//! on clients inside the caller's visibility scope.

use chrono::NaiveDate;

use crate::domain::client::{
    Client, DueSource, FollowUp, FollowUpUpdate, NewClient, UpdateClient,
};
use crate::domain::comment::NewClientComment;
use crate::domain::relance::RelanceConfig;
use crate::domain::session::Session;
use crate::domain::types::{ClientId, CommentBody};
use crate::forms::client::{
    CloseClientForm, CloseClientPayload, FollowUpForm, FollowUpPayload, SaveClientForm,
    SaveClientPayload,
};
use crate::repository::{ClientReader, ClientWriter, CommentWriter};
use crate::services::followup::{default_next_due_date, initial_due_date};
use crate::services::{ServiceError, ServiceResult};

/// Loads a client the caller may act on, rejecting closed ones.
fn load_open_client<R>(repo: &R, session: &Session, client_id: ClientId) -> ServiceResult<Client>
where
    R: ClientReader + ?Sized,
{
    let client = repo
        .get_client_by_id(client_id)?
        .ok_or(ServiceError::NotFound)?;

    if !session.scope().allows(client.owner_id) {
        log::warn!(
            "Profile {} tried to access client {client_id} outside its scope",
            session.profile.id
        );
        return Err(ServiceError::Unauthorized);
    }
    if client.is_closed() {
        return Err(ServiceError::Form("this client is closed".to_string()));
    }
    Ok(client)
}

/// Creates a client, or updates it when the form carries an id.
pub fn save_client<R>(
    repo: &R,
    session: &Session,
    config: &RelanceConfig,
    form: SaveClientForm,
    today: NaiveDate,
) -> ServiceResult<Client>
where
    R: ClientReader + ClientWriter + ?Sized,
{
    let payload = SaveClientPayload::try_from(form)?;

    match payload.id {
        None => {
            let (next_due_date, source) = match payload.manual_due_date {
                Some(date) => (Some(date), DueSource::Manual),
                None => (
                    initial_due_date(&payload.attributes.details, config, today),
                    DueSource::Auto,
                ),
            };
            let new_client = NewClient {
                owner_id: session.profile.id,
                attributes: payload.attributes,
                followup: FollowUp {
                    next_due_date,
                    source: Some(source),
                    ..FollowUp::default()
                },
            };
            repo.create_client(&new_client).map_err(|err| {
                log::error!("Failed to create client: {err}");
                err.into()
            })
        }
        Some(client_id) => {
            load_open_client(repo, session, client_id)?;
            let updates = UpdateClient {
                attributes: payload.attributes,
                manual_due_date: payload.manual_due_date,
            };
            repo.update_client(client_id, &updates).map_err(|err| {
                log::error!("Failed to update client {client_id}: {err}");
                err.into()
            })
        }
    }
}

/// Records the comment of a follow-up and schedules the next one.
pub fn validate_followup<R>(
    repo: &R,
    session: &Session,
    config: &RelanceConfig,
    form: FollowUpForm,
    today: NaiveDate,
) -> ServiceResult<Client>
where
    R: ClientReader + ClientWriter + CommentWriter + ?Sized,
{
    let payload = FollowUpPayload::try_from(form)?;
    let client = load_open_client(repo, session, payload.client_id)?;

    let next_due_date = match payload.next_due_date {
        Some(date) => date,
        None => default_next_due_date(&client.details, config, today)
            .ok_or_else(|| ServiceError::Internal("follow-up date out of range".to_string()))?,
    };
    let note = payload.body.as_str().to_string();

    let comment = NewClientComment::new(client.id, payload.body, session.profile.id);
    repo.create_comment(&comment).map_err(|err| {
        log::error!("Failed to save comment for client {}: {err}", client.id);
        err
    })?;

    let update = FollowUpUpdate {
        next_due_date,
        note,
    };
    repo.record_followup(client.id, &update).map_err(|err| {
        log::error!("Failed to update follow-up of client {}: {err}", client.id);
        ServiceError::Internal(format!("comment saved but follow-up update failed: {err}"))
    })
}

/// Closes a client with a reason of its category.
///
/// The closure comment is best effort: a failed insert is logged and the
/// status change still goes through.
pub fn close_client<R>(repo: &R, session: &Session, form: CloseClientForm) -> ServiceResult<Client>
where
    R: ClientReader + ClientWriter + CommentWriter + ?Sized,
{
    let payload = CloseClientPayload::try_from(form)?;
    let client = load_open_client(repo, session, payload.client_id)?;

    if !payload.reason.belongs_to(client.category()) {
        return Err(ServiceError::Form(format!(
            "`{}` is not a closure reason for a {} client",
            payload.reason,
            client.category()
        )));
    }

    let body = CommentBody::new(format!("Client clôturé : {}", payload.reason.as_str()))?;
    let comment = NewClientComment::new(client.id, body, session.profile.id);
    if let Err(err) = repo.create_comment(&comment) {
        log::warn!("Failed to save closure comment for client {}: {err}", client.id);
    }

    repo.close_client(client.id, payload.reason).map_err(|err| {
        log::error!("Failed to close client {}: {err}", client.id);
        err.into()
    })
}
