//! Diesel models for the flat `clients` table.
//!
//! The table stores every category's columns side by side; the conversion to
//! [`crate::domain::client::Client`] picks the ones that belong to the row's
//! category and drops the rest.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::client::{
    AfterDetails, BuyerDetails, Client as DomainClient, ClientAttributes, ClientCategory,
    ClientDetails, ClientStatus, ClosureReason, Contact, DueSource, FollowUp, FollowUpUpdate,
    NewClient as DomainNewClient, SellerDetails, UpdateClient as DomainUpdateClient,
};
use crate::domain::types::{
    ClientId, NonEmptyString, ProfileId, TypeConstraintError, format_storage_date,
    parse_loose_date,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::clients)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
/// Diesel model for [`crate::domain::client::Client`].
pub struct Client {
    pub id: i32,
    pub owner_id: i32,
    pub category: String,
    pub status: String,
    pub closure_reason: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub estimation_date: Option<String>,
    pub acquisition_date: Option<String>,
    pub sale_date: Option<String>,
    pub property_address: Option<String>,
    pub project_horizon: Option<String>,
    pub seller_kind: Option<String>,
    pub area: Option<String>,
    pub budget_max: Option<String>,
    pub min_surface: Option<String>,
    pub bedrooms: Option<String>,
    pub also_owner: bool,
    pub after_address: Option<String>,
    pub client_birthday: Option<String>,
    pub context: Option<String>,
    pub consultant_feeling: Option<String>,
    pub contact_origin: Option<String>,
    pub next_due_date: Option<String>,
    pub next_followup_at: Option<String>,
    pub next_due_note: Option<String>,
    pub next_due_source: Option<String>,
    pub inserted_at: NaiveDateTime,
}

/// Editable columns written on create and on update.
///
/// `None` is written as `NULL` so that switching category clears the columns
/// of the previous one.
#[derive(Debug, Clone, Default, PartialEq, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::clients)]
#[diesel(treat_none_as_null = true)]
pub struct ClientColumns {
    pub category: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub estimation_date: Option<String>,
    pub acquisition_date: Option<String>,
    pub sale_date: Option<String>,
    pub property_address: Option<String>,
    pub project_horizon: Option<String>,
    pub seller_kind: Option<String>,
    pub area: Option<String>,
    pub budget_max: Option<String>,
    pub min_surface: Option<String>,
    pub bedrooms: Option<String>,
    pub also_owner: bool,
    pub after_address: Option<String>,
    pub client_birthday: Option<String>,
    pub context: Option<String>,
    pub consultant_feeling: Option<String>,
    pub contact_origin: Option<String>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::clients)]
/// Insertable form of [`Client`].
pub struct NewClient {
    pub owner_id: i32,
    pub status: String,
    #[diesel(embed)]
    pub columns: ClientColumns,
    pub next_due_date: Option<String>,
    pub next_due_source: Option<String>,
}

/// Follow-up columns set by a manual due date.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::clients)]
pub struct ManualDueDate {
    pub next_due_date: String,
    pub next_due_source: String,
}

/// Follow-up columns set when a follow-up is validated.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::clients)]
pub struct FollowUpChanges {
    pub next_due_date: String,
    pub next_due_note: String,
    pub next_due_source: String,
}

/// Terminal transition: status, reason and cleared follow-up columns.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::clients)]
#[diesel(treat_none_as_null = true)]
pub struct ClosureChanges {
    pub status: String,
    pub closure_reason: Option<String>,
    pub next_due_date: Option<String>,
    pub next_followup_at: Option<String>,
    pub next_due_note: Option<String>,
    pub next_due_source: Option<String>,
}

impl ClosureChanges {
    pub fn new(reason: ClosureReason) -> Self {
        Self {
            status: ClientStatus::Closed.as_str().to_string(),
            closure_reason: Some(reason.as_str().to_string()),
            next_due_date: None,
            next_followup_at: None,
            next_due_note: None,
            next_due_source: None,
        }
    }
}

fn text(value: Option<String>) -> Option<NonEmptyString> {
    NonEmptyString::from_optional(value)
}

fn date(value: Option<String>) -> Option<chrono::NaiveDate> {
    value.as_deref().and_then(parse_loose_date)
}

fn column(value: &Option<NonEmptyString>) -> Option<String> {
    value.as_ref().map(|v| v.as_str().to_string())
}

fn date_column(value: Option<chrono::NaiveDate>) -> Option<String> {
    value.map(format_storage_date)
}

impl TryFrom<Client> for DomainClient {
    type Error = TypeConstraintError;

    fn try_from(row: Client) -> Result<Self, Self::Error> {
        let category: ClientCategory = row.category.parse()?;
        let details = match category {
            ClientCategory::Seller => ClientDetails::Seller(SellerDetails {
                estimation_date: date(row.estimation_date),
                property_address: text(row.property_address),
                project_horizon: text(row.project_horizon),
                seller_kind: text(row.seller_kind),
            }),
            ClientCategory::Buyer => ClientDetails::Buyer(BuyerDetails {
                acquisition_date: date(row.acquisition_date),
                area: text(row.area),
                budget_max: text(row.budget_max),
                min_surface: text(row.min_surface),
                bedrooms: text(row.bedrooms),
                also_owner: row.also_owner,
                project_horizon: text(row.project_horizon),
            }),
            ClientCategory::After => ClientDetails::After(AfterDetails {
                sale_date: date(row.sale_date),
                after_address: text(row.after_address),
                client_birthday: date(row.client_birthday),
                context: text(row.context),
            }),
        };

        // An unknown closure reason or due source is kept out of the domain
        // rather than failing the whole snapshot.
        let closure_reason = row
            .closure_reason
            .as_deref()
            .and_then(|reason| reason.parse::<ClosureReason>().ok());
        let source = row
            .next_due_source
            .as_deref()
            .and_then(|source| source.parse::<DueSource>().ok());

        Ok(Self {
            id: ClientId::try_from(row.id)?,
            owner_id: ProfileId::try_from(row.owner_id)?,
            status: row.status.parse()?,
            closure_reason,
            contact: Contact {
                first_name: text(row.first_name),
                last_name: text(row.last_name),
                email: text(row.email),
                phone: text(row.phone),
            },
            details,
            followup: FollowUp {
                next_due_date: date(row.next_due_date),
                next_followup_at: date(row.next_followup_at),
                note: row.next_due_note.filter(|note| !note.trim().is_empty()),
                source,
            },
            consultant_feeling: text(row.consultant_feeling),
            contact_origin: text(row.contact_origin),
            inserted_at: Some(row.inserted_at),
        })
    }
}

impl From<&ClientAttributes> for ClientColumns {
    fn from(attributes: &ClientAttributes) -> Self {
        let contact = &attributes.contact;
        let mut columns = Self {
            category: attributes.details.category().as_str().to_string(),
            first_name: column(&contact.first_name),
            last_name: column(&contact.last_name),
            email: column(&contact.email),
            phone: column(&contact.phone),
            consultant_feeling: column(&attributes.consultant_feeling),
            contact_origin: column(&attributes.contact_origin),
            ..Self::default()
        };

        match &attributes.details {
            ClientDetails::Seller(details) => {
                columns.estimation_date = date_column(details.estimation_date);
                columns.property_address = column(&details.property_address);
                columns.project_horizon = column(&details.project_horizon);
                columns.seller_kind = column(&details.seller_kind);
            }
            ClientDetails::Buyer(details) => {
                columns.acquisition_date = date_column(details.acquisition_date);
                columns.area = column(&details.area);
                columns.budget_max = column(&details.budget_max);
                columns.min_surface = column(&details.min_surface);
                columns.bedrooms = column(&details.bedrooms);
                columns.also_owner = details.also_owner;
                columns.project_horizon = column(&details.project_horizon);
            }
            ClientDetails::After(details) => {
                columns.sale_date = date_column(details.sale_date);
                columns.after_address = column(&details.after_address);
                columns.client_birthday = date_column(details.client_birthday);
                columns.context = column(&details.context);
            }
        }

        columns
    }
}

impl From<&DomainNewClient> for NewClient {
    fn from(client: &DomainNewClient) -> Self {
        Self {
            owner_id: client.owner_id.get(),
            status: ClientStatus::Active.as_str().to_string(),
            columns: ClientColumns::from(&client.attributes),
            next_due_date: date_column(client.followup.next_due_date),
            next_due_source: client.followup.source.map(|s| s.as_str().to_string()),
        }
    }
}

impl From<&DomainUpdateClient> for ClientColumns {
    fn from(update: &DomainUpdateClient) -> Self {
        Self::from(&update.attributes)
    }
}

impl From<&FollowUpUpdate> for FollowUpChanges {
    fn from(update: &FollowUpUpdate) -> Self {
        Self {
            next_due_date: format_storage_date(update.next_due_date),
            next_due_note: update.note.clone(),
            next_due_source: DueSource::Manual.as_str().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};

    use super::*;

    fn row(category: &str) -> Client {
        Client {
            id: 1,
            owner_id: 2,
            category: category.to_string(),
            status: "active".to_string(),
            closure_reason: None,
            first_name: Some("Léa".to_string()),
            last_name: Some("Martin".to_string()),
            email: None,
            phone: Some("0600000000".to_string()),
            estimation_date: Some("2024-01-01".to_string()),
            acquisition_date: Some("2024-02-01".to_string()),
            sale_date: None,
            property_address: Some("1 rue de la Paix".to_string()),
            project_horizon: Some("Court terme".to_string()),
            seller_kind: Some("  ".to_string()),
            area: Some("Lyon".to_string()),
            budget_max: None,
            min_surface: None,
            bedrooms: None,
            also_owner: true,
            after_address: None,
            client_birthday: None,
            context: None,
            consultant_feeling: None,
            contact_origin: None,
            next_due_date: Some("not a date".to_string()),
            next_followup_at: Some("2024-03-05T09:00:00Z".to_string()),
            next_due_note: None,
            next_due_source: Some("auto".to_string()),
            inserted_at: Utc::now().naive_utc(),
        }
    }

    #[test]
    fn seller_row_keeps_only_seller_columns() {
        let client = DomainClient::try_from(row("seller")).expect("valid row");
        match client.details {
            ClientDetails::Seller(details) => {
                assert_eq!(details.estimation_date, NaiveDate::from_ymd_opt(2024, 1, 1));
                assert_eq!(
                    details.property_address.map(NonEmptyString::into_inner),
                    Some("1 rue de la Paix".to_string())
                );
                assert_eq!(details.seller_kind, None);
            }
            other => panic!("unexpected details {other:?}"),
        }
        assert_eq!(client.followup.next_due_date, None);
        assert_eq!(
            client.followup.next_followup_at,
            NaiveDate::from_ymd_opt(2024, 3, 5)
        );
        assert_eq!(client.followup.source, Some(DueSource::Auto));
    }

    #[test]
    fn buyer_row_maps_buyer_columns() {
        let client = DomainClient::try_from(row("buyer")).expect("valid row");
        match client.details {
            ClientDetails::Buyer(details) => {
                assert_eq!(details.acquisition_date, NaiveDate::from_ymd_opt(2024, 2, 1));
                assert!(details.also_owner);
            }
            other => panic!("unexpected details {other:?}"),
        }
    }

    #[test]
    fn unknown_category_is_rejected() {
        assert!(DomainClient::try_from(row("tenant")).is_err());
    }

    #[test]
    fn columns_clear_other_categories() {
        let attributes = ClientAttributes {
            contact: Contact::default(),
            details: ClientDetails::Buyer(BuyerDetails {
                area: NonEmptyString::new("Annecy").ok(),
                ..BuyerDetails::default()
            }),
            consultant_feeling: None,
            contact_origin: None,
        };
        let columns = ClientColumns::from(&attributes);
        assert_eq!(columns.category, "buyer");
        assert_eq!(columns.area.as_deref(), Some("Annecy"));
        assert_eq!(columns.estimation_date, None);
        assert_eq!(columns.property_address, None);
    }

    #[test]
    fn closure_changes_clear_followup() {
        let changes = ClosureChanges::new(ClosureReason::AcheteSeul);
        assert_eq!(changes.status, "closed");
        assert_eq!(changes.closure_reason.as_deref(), Some("achete_seul"));
        assert!(changes.next_due_date.is_none());
        assert!(changes.next_followup_at.is_none());
        assert!(changes.next_due_note.is_none());
        assert!(changes.next_due_source.is_none());
    }
}
