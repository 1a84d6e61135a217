//! Forms for creating, following up and closing clients.

use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::domain::client::{
    AfterDetails, BuyerDetails, ClientAttributes, ClientCategory, ClientDetails, ClosureReason,
    Contact, SellerDetails,
};
use crate::domain::types::{ClientId, CommentBody, NonEmptyString, parse_loose_date};
use crate::forms::{FormError, blank_to_none};

#[derive(Debug, Default, Deserialize, Validate)]
/// Create/update form of the client modal.
pub struct SaveClientForm {
    /// Absent when creating a client.
    pub id: Option<i32>,
    pub category: String,
    #[validate(length(max = 255))]
    pub first_name: Option<String>,
    #[validate(length(max = 255))]
    pub last_name: Option<String>,
    #[validate(length(max = 255))]
    pub email: Option<String>,
    #[validate(length(max = 64))]
    pub phone: Option<String>,
    pub estimation_date: Option<String>,
    pub acquisition_date: Option<String>,
    pub sale_date: Option<String>,
    #[validate(length(max = 512))]
    pub property_address: Option<String>,
    pub project_horizon: Option<String>,
    pub seller_kind: Option<String>,
    pub area: Option<String>,
    pub budget_max: Option<String>,
    pub min_surface: Option<String>,
    pub bedrooms: Option<String>,
    /// Checkbox: present when ticked.
    pub also_owner: Option<String>,
    #[validate(length(max = 512))]
    pub after_address: Option<String>,
    pub client_birthday: Option<String>,
    #[validate(length(max = 4000))]
    pub context: Option<String>,
    #[validate(length(max = 4000))]
    pub consultant_feeling: Option<String>,
    pub contact_origin: Option<String>,
    /// Due date picked by hand; overrides the computed one.
    pub manual_next_due_date: Option<String>,
}

/// Validated create/update request.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveClientPayload {
    pub id: Option<ClientId>,
    pub attributes: ClientAttributes,
    pub manual_due_date: Option<NaiveDate>,
}

fn text(value: Option<String>) -> Option<NonEmptyString> {
    NonEmptyString::from_optional(value)
}

fn date(value: Option<String>) -> Result<Option<NaiveDate>, FormError> {
    match blank_to_none(value) {
        Some(raw) => parse_loose_date(&raw)
            .map(Some)
            .ok_or(FormError::InvalidDate(raw)),
        None => Ok(None),
    }
}

impl TryFrom<SaveClientForm> for SaveClientPayload {
    type Error = FormError;

    fn try_from(form: SaveClientForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let category: ClientCategory = form
            .category
            .parse()
            .map_err(|_| FormError::InvalidCategory)?;

        let contact = Contact {
            first_name: text(form.first_name),
            last_name: text(form.last_name),
            email: text(form.email),
            phone: text(form.phone),
        };
        if contact.last_name.is_none() {
            return Err(FormError::MissingLastName);
        }
        if contact.phone.is_none() {
            return Err(FormError::MissingPhone);
        }

        let details = match category {
            ClientCategory::Seller => {
                let property_address =
                    text(form.property_address).ok_or(FormError::MissingPropertyAddress)?;
                ClientDetails::Seller(SellerDetails {
                    estimation_date: date(form.estimation_date)?,
                    property_address: Some(property_address),
                    project_horizon: text(form.project_horizon),
                    seller_kind: text(form.seller_kind),
                })
            }
            ClientCategory::Buyer => ClientDetails::Buyer(BuyerDetails {
                acquisition_date: date(form.acquisition_date)?,
                area: text(form.area),
                budget_max: text(form.budget_max),
                min_surface: text(form.min_surface),
                bedrooms: text(form.bedrooms),
                also_owner: form.also_owner.is_some(),
                project_horizon: text(form.project_horizon),
            }),
            ClientCategory::After => ClientDetails::After(AfterDetails {
                sale_date: date(form.sale_date)?,
                after_address: text(form.after_address),
                client_birthday: date(form.client_birthday)?,
                context: text(form.context),
            }),
        };

        let id = form
            .id
            .map(ClientId::new)
            .transpose()
            .map_err(|_| FormError::InvalidClientId)?;

        Ok(Self {
            id,
            attributes: ClientAttributes {
                contact,
                details,
                consultant_feeling: text(form.consultant_feeling),
                contact_origin: text(form.contact_origin),
            },
            manual_due_date: date(form.manual_next_due_date)?,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
/// Comment typed under a client card, validating the current follow-up.
pub struct FollowUpForm {
    pub client_id: i32,
    #[validate(length(max = 5000))]
    pub body: String,
    /// Optional explicit next date; defaults to today plus the category delay.
    pub next_due_date: Option<String>,
}

#[derive(Debug)]
pub struct FollowUpPayload {
    pub client_id: ClientId,
    pub body: CommentBody,
    pub next_due_date: Option<NaiveDate>,
}

impl TryFrom<FollowUpForm> for FollowUpPayload {
    type Error = FormError;

    fn try_from(form: FollowUpForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let client_id = ClientId::new(form.client_id).map_err(|_| FormError::InvalidClientId)?;
        let body = CommentBody::new(form.body).map_err(|_| FormError::EmptyComment)?;

        Ok(Self {
            client_id,
            body,
            next_due_date: date(form.next_due_date)?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct CloseClientForm {
    pub client_id: i32,
    pub reason: String,
}

#[derive(Debug)]
pub struct CloseClientPayload {
    pub client_id: ClientId,
    pub reason: ClosureReason,
}

impl TryFrom<CloseClientForm> for CloseClientPayload {
    type Error = FormError;

    fn try_from(form: CloseClientForm) -> Result<Self, Self::Error> {
        Ok(Self {
            client_id: ClientId::new(form.client_id).map_err(|_| FormError::InvalidClientId)?,
            reason: form
                .reason
                .parse()
                .map_err(|_| FormError::InvalidClosureReason)?,
        })
    }
}
