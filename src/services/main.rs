//! Dashboard loader.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::domain::client::{Client, ClientCategory, ClosureReason};
use crate::domain::comment::ClientComment;
use crate::domain::relance::RelanceConfig;
use crate::domain::session::Session;
use crate::domain::types::{ClientId, ProfileId};
use crate::dto::main::{ALL_OWNERS, Choice, ClientView, IndexPageData};
pub use crate::dto::main::IndexQuery;
use crate::repository::{ClientListQuery, ClientReader, CommentReader, ProfileReader};
use crate::services::ServiceResult;
use crate::services::filters::{ClientFilter, FilterContext, StatusFilter, Tab, apply_filters};
use crate::services::followup::followup_info;
use crate::services::score::compute_score;
use crate::services::session::owner_options;

fn group_comments(comments: Vec<ClientComment>) -> HashMap<ClientId, Vec<ClientComment>> {
    let mut grouped: HashMap<ClientId, Vec<ClientComment>> = HashMap::new();
    for comment in comments {
        grouped.entry(comment.client_id).or_default().push(comment);
    }
    grouped
}

fn client_view(
    client: &Client,
    config: &RelanceConfig,
    today: NaiveDate,
    owner_emails: &HashMap<ProfileId, String>,
    comments: &mut HashMap<ClientId, Vec<ClientComment>>,
) -> ClientView {
    let category: ClientCategory = client.category();
    ClientView {
        client: client.clone(),
        display_name: client.contact.display_name(),
        owner_email: owner_emails.get(&client.owner_id).cloned(),
        followup: if client.is_closed() {
            None
        } else {
            followup_info(client, config, today)
        },
        comments: comments.remove(&client.id).unwrap_or_default(),
        closure_reasons: ClosureReason::for_category(category)
            .iter()
            .copied()
            .map(Choice::from)
            .collect(),
        default_closure_reason: ClosureReason::default_for(category).as_str(),
    }
}

/// Loads the snapshot visible to the caller, filters it and scores it.
///
/// Clients are fetched first and comments second, for the ids just loaded.
pub fn load_index_page<R>(
    repo: &R,
    session: &Session,
    config: &RelanceConfig,
    query: IndexQuery,
    today: NaiveDate,
) -> ServiceResult<IndexPageData>
where
    R: ClientReader + CommentReader + ProfileReader + ?Sized,
{
    let clients = repo
        .list_clients(ClientListQuery::new(session.scope()))
        .map_err(|err| {
            log::error!("Failed to load clients: {err}");
            err
        })?;

    let ids: Vec<ClientId> = clients.iter().map(|client| client.id).collect();
    let mut comments = match repo.list_comments(&ids) {
        Ok(comments) => group_comments(comments),
        Err(err) => {
            log::warn!("Failed to load comments: {err}");
            HashMap::new()
        }
    };

    let options = owner_options(repo, session)?;
    let mut owner_emails: HashMap<ProfileId, String> = options
        .iter()
        .map(|profile| (profile.id, profile.email.to_string()))
        .collect();
    owner_emails
        .entry(session.profile.id)
        .or_insert_with(|| session.profile.email.to_string());

    let owner = query
        .owner
        .map(|owner| owner.trim().to_lowercase())
        .filter(|owner| !owner.is_empty() && owner != ALL_OWNERS && session.is_elevated());
    let filter = ClientFilter {
        tab: query.tab.unwrap_or_default(),
        status: query.status.unwrap_or_default(),
        owner,
    };
    let ctx = FilterContext {
        config,
        today,
        elevated: session.is_elevated(),
        owner_emails: &owner_emails,
    };

    let views = apply_filters(&clients, &filter, &ctx)
        .into_iter()
        .map(|client| client_view(client, config, today, &owner_emails, &mut comments))
        .collect();

    Ok(IndexPageData {
        clients: views,
        score: compute_score(&clients, config, today),
        tab: filter.tab,
        status: filter.status,
        owner: filter.owner,
        view: query.view.unwrap_or_default(),
        owner_options: options
            .into_iter()
            .map(|profile| profile.email.into_inner())
            .collect(),
        tabs: Tab::ALL
            .iter()
            .map(|tab| Choice {
                value: tab.as_str(),
                label: tab.label(),
            })
            .collect(),
        statuses: StatusFilter::ALL
            .iter()
            .map(|status| Choice {
                value: status.as_str(),
                label: status.label(),
            })
            .collect(),
        current_email: session.profile.email.to_string(),
        is_admin: session.is_admin(),
    })
}
