//! Filter and sort pipeline over a client snapshot.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::client::{Client, ClientCategory};
use crate::domain::relance::RelanceConfig;
use crate::domain::types::ProfileId;
use crate::services::followup::next_due_date;

/// Category selector of the dashboard.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Seller,
    Buyer,
    After,
    All,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Self::Seller, Self::Buyer, Self::After, Self::All];

    pub fn category(self) -> Option<ClientCategory> {
        match self {
            Self::Seller => Some(ClientCategory::Seller),
            Self::Buyer => Some(ClientCategory::Buyer),
            Self::After => Some(ClientCategory::After),
            Self::All => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Seller => "seller",
            Self::Buyer => "buyer",
            Self::After => "after",
            Self::All => "all",
        }
    }

    pub fn label(self) -> &'static str {
        match self.category() {
            Some(category) => category.label(),
            None => "All",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    /// Active clients whose due date is today or earlier.
    #[default]
    ToFollowUp,
    InProgress,
    All,
    Closed,
}

impl StatusFilter {
    pub const ALL: [StatusFilter; 4] = [Self::ToFollowUp, Self::InProgress, Self::All, Self::Closed];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ToFollowUp => "to_follow_up",
            Self::InProgress => "in_progress",
            Self::All => "all",
            Self::Closed => "closed",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::ToFollowUp => "To follow up",
            Self::InProgress => "In progress",
            Self::All => "All",
            Self::Closed => "Closed",
        }
    }
}

/// Everything the pipeline needs besides the snapshot itself.
pub struct FilterContext<'a> {
    pub config: &'a RelanceConfig,
    pub today: NaiveDate,
    /// Whether the caller may filter by owner.
    pub elevated: bool,
    /// Resolved owner emails, used by the owner filter.
    pub owner_emails: &'a HashMap<ProfileId, String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClientFilter {
    pub tab: Tab,
    pub status: StatusFilter,
    /// Owner email; `None` selects every owner.
    pub owner: Option<String>,
}

fn keep_status(client: &Client, status: StatusFilter, ctx: &FilterContext<'_>) -> bool {
    match status {
        StatusFilter::Closed => client.is_closed(),
        StatusFilter::InProgress => !client.is_closed(),
        StatusFilter::ToFollowUp => {
            !client.is_closed()
                && next_due_date(client, ctx.config).is_some_and(|due| due <= ctx.today)
        }
        StatusFilter::All => true,
    }
}

fn keep_owner(client: &Client, owner: Option<&str>, ctx: &FilterContext<'_>) -> bool {
    match owner {
        Some(email) if ctx.elevated => ctx
            .owner_emails
            .get(&client.owner_id)
            .is_some_and(|owner_email| owner_email == email),
        _ => true,
    }
}

/// Due date ascending with undated clients last; undated clients newest
/// first by `inserted_at`, rows without a timestamp last.
fn compare(a: &Client, b: &Client, config: &RelanceConfig) -> Ordering {
    match (next_due_date(a, config), next_due_date(b, config)) {
        (Some(a_due), Some(b_due)) => a_due.cmp(&b_due),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => match (a.inserted_at, b.inserted_at) {
            (Some(a_ins), Some(b_ins)) => b_ins.cmp(&a_ins),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
    }
}

/// Sorts in place. The sort is stable, ties keep the snapshot order.
pub fn sort_clients(clients: &mut [&Client], config: &RelanceConfig) {
    clients.sort_by(|a, b| compare(a, b, config));
}

/// Narrows the snapshot by tab, status and owner, then sorts it.
pub fn apply_filters<'c>(
    clients: &'c [Client],
    filter: &ClientFilter,
    ctx: &FilterContext<'_>,
) -> Vec<&'c Client> {
    let category = filter.tab.category();
    let owner = filter.owner.as_deref();

    let mut list: Vec<&Client> = clients
        .iter()
        .filter(|client| category.is_none_or(|category| client.category() == category))
        .filter(|client| keep_status(client, filter.status, ctx))
        .filter(|client| keep_owner(client, owner, ctx))
        .collect();

    sort_clients(&mut list, ctx.config);
    list
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;

    use super::*;
    use crate::domain::client::{BuyerDetails, ClientDetails, ClientStatus};
    use crate::services::followup::tests::{client_with, seller, ymd};

    fn ctx<'a>(
        config: &'a RelanceConfig,
        owner_emails: &'a HashMap<ProfileId, String>,
        elevated: bool,
    ) -> FilterContext<'a> {
        FilterContext {
            config,
            today: ymd(2024, 1, 20),
            elevated,
            owner_emails,
        }
    }

    fn inserted(day: u32) -> Option<NaiveDateTime> {
        ymd(2024, 1, day).and_hms_opt(9, 0, 0)
    }

    fn snapshot() -> Vec<Client> {
        let mut closed = seller(1, Some(ymd(2024, 1, 1)));
        closed.status = ClientStatus::Closed;

        let due = seller(2, Some(ymd(2024, 1, 1)));
        let future = seller(3, Some(ymd(2024, 2, 1)));

        let mut undated_old = seller(4, None);
        undated_old.inserted_at = inserted(2);
        let mut undated_new = seller(5, None);
        undated_new.inserted_at = inserted(10);

        let mut buyer = client_with(
            6,
            ClientDetails::Buyer(BuyerDetails {
                acquisition_date: Some(ymd(2023, 12, 1)),
                ..BuyerDetails::default()
            }),
        );
        buyer.owner_id = ProfileId::new(2).expect("valid id");

        vec![closed, due, future, undated_old, undated_new, buyer]
    }

    fn ids(list: &[&Client]) -> Vec<i32> {
        list.iter().map(|client| client.id.get()).collect()
    }

    #[test]
    fn to_follow_up_keeps_due_active_clients() {
        let config = RelanceConfig::default();
        let emails = HashMap::new();
        let clients = snapshot();
        let filter = ClientFilter::default();

        let list = apply_filters(&clients, &filter, &ctx(&config, &emails, false));

        assert_eq!(ids(&list), vec![2]);
    }

    #[test]
    fn closed_clients_never_to_follow_up() {
        let config = RelanceConfig::default();
        let emails = HashMap::new();
        let clients = snapshot();
        let filter = ClientFilter {
            tab: Tab::All,
            ..ClientFilter::default()
        };

        let list = apply_filters(&clients, &filter, &ctx(&config, &emails, false));

        assert!(list.iter().all(|client| !client.is_closed()));
        assert_eq!(ids(&list), vec![6, 2]);
    }

    #[test]
    fn dated_clients_sort_before_undated() {
        let config = RelanceConfig::default();
        let emails = HashMap::new();
        let clients = snapshot();
        let filter = ClientFilter {
            tab: Tab::Seller,
            status: StatusFilter::InProgress,
            owner: None,
        };

        let list = apply_filters(&clients, &filter, &ctx(&config, &emails, false));

        assert_eq!(ids(&list), vec![2, 3, 5, 4]);
    }

    #[test]
    fn closed_filter_and_all_filter() {
        let config = RelanceConfig::default();
        let emails = HashMap::new();
        let clients = snapshot();

        let closed = ClientFilter {
            tab: Tab::All,
            status: StatusFilter::Closed,
            owner: None,
        };
        assert_eq!(
            ids(&apply_filters(&clients, &closed, &ctx(&config, &emails, false))),
            vec![1]
        );

        let all = ClientFilter {
            tab: Tab::All,
            status: StatusFilter::All,
            owner: None,
        };
        assert_eq!(
            apply_filters(&clients, &all, &ctx(&config, &emails, false)).len(),
            clients.len()
        );
    }

    #[test]
    fn owner_filter_applies_only_to_elevated_callers() {
        let config = RelanceConfig::default();
        let mut emails = HashMap::new();
        emails.insert(ProfileId::new(1).expect("id"), "rep@example.com".to_string());
        emails.insert(ProfileId::new(2).expect("id"), "other@example.com".to_string());
        let clients = snapshot();
        let filter = ClientFilter {
            tab: Tab::All,
            status: StatusFilter::All,
            owner: Some("other@example.com".to_string()),
        };

        let elevated = apply_filters(&clients, &filter, &ctx(&config, &emails, true));
        assert_eq!(ids(&elevated), vec![6]);

        let plain = apply_filters(&clients, &filter, &ctx(&config, &emails, false));
        assert_eq!(plain.len(), clients.len());
    }

    #[test]
    fn pipeline_is_idempotent() {
        let config = RelanceConfig::default();
        let emails = HashMap::new();
        let clients = snapshot();
        let filter = ClientFilter {
            tab: Tab::All,
            status: StatusFilter::All,
            owner: None,
        };
        let context = ctx(&config, &emails, false);

        let first = ids(&apply_filters(&clients, &filter, &context));
        let second = ids(&apply_filters(&clients, &filter, &context));

        assert_eq!(first, second);
    }

    #[test]
    fn query_values_deserialize() {
        let tab: Tab = serde_json::from_str("\"after\"").expect("tab");
        assert_eq!(tab, Tab::After);
        let status: StatusFilter = serde_json::from_str("\"to_follow_up\"").expect("status");
        assert_eq!(status, StatusFilter::ToFollowUp);
    }
}
