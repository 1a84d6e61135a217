//! Client aggregate: a shared base plus a category-specific payload.

use std::fmt::Display;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::types::{ClientId, NonEmptyString, ProfileId, TypeConstraintError};

/// Commercial type of a client.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ClientCategory {
    /// Seller or landlord, usually met through an estimation.
    Seller,
    /// Buyer looking for a property.
    Buyer,
    /// After-sale contact kept warm once a deal is done.
    After,
}

impl ClientCategory {
    pub const ALL: [ClientCategory; 3] = [Self::Seller, Self::Buyer, Self::After];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Seller => "seller",
            Self::Buyer => "buyer",
            Self::After => "after",
        }
    }

    /// Human readable label used by the dashboard.
    pub fn label(self) -> &'static str {
        match self {
            Self::Seller => "Seller / Landlord & Estimation",
            Self::Buyer => "Buyer",
            Self::After => "After-sale",
        }
    }
}

impl Display for ClientCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClientCategory {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "seller" => Ok(Self::Seller),
            "buyer" => Ok(Self::Buyer),
            "after" => Ok(Self::After),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown client category `{other}`"
            ))),
        }
    }
}

/// Lifecycle state. `Closed` is terminal.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClientStatus {
    #[default]
    Active,
    Closed,
}

impl ClientStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Closed => "closed",
        }
    }
}

impl Display for ClientStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClientStatus {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "active" => Ok(Self::Active),
            "closed" => Ok(Self::Closed),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown client status `{other}`"
            ))),
        }
    }
}

/// Who produced the current due date.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DueSource {
    /// A human picked the date (initial override or follow-up validation).
    Manual,
    /// Derived by the due-date calculator.
    Auto,
}

impl DueSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Auto => "auto",
        }
    }
}

impl FromStr for DueSource {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "manual" => Ok(Self::Manual),
            "auto" => Ok(Self::Auto),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown due date source `{other}`"
            ))),
        }
    }
}

/// Reasons a client may be closed with, scoped by category.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ClosureReason {
    VenduAvecNous,
    VenduAutreAgence,
    VenduSeul,
    ProjetAbandonne,
    NeSouhaitePlusVendre,
    AcheteAvecNous,
    AcheteAutreAgence,
    AcheteSeul,
    NAchetePlus,
    NeRepondPlus,
    SuiviTermine,
    NeSouhaitePlus,
}

impl ClosureReason {
    const SELLER: [ClosureReason; 5] = [
        Self::VenduAvecNous,
        Self::VenduAutreAgence,
        Self::VenduSeul,
        Self::ProjetAbandonne,
        Self::NeSouhaitePlusVendre,
    ];
    const BUYER: [ClosureReason; 5] = [
        Self::AcheteAvecNous,
        Self::AcheteAutreAgence,
        Self::AcheteSeul,
        Self::NAchetePlus,
        Self::NeRepondPlus,
    ];
    const AFTER: [ClosureReason; 2] = [Self::SuiviTermine, Self::NeSouhaitePlus];

    /// Reasons offered when closing a client of the given category.
    pub fn for_category(category: ClientCategory) -> &'static [ClosureReason] {
        match category {
            ClientCategory::Seller => &Self::SELLER,
            ClientCategory::Buyer => &Self::BUYER,
            ClientCategory::After => &Self::AFTER,
        }
    }

    /// Preselected reason in the closure form.
    pub fn default_for(category: ClientCategory) -> ClosureReason {
        match category {
            ClientCategory::Seller => Self::ProjetAbandonne,
            ClientCategory::Buyer => Self::AcheteAvecNous,
            ClientCategory::After => Self::SuiviTermine,
        }
    }

    pub fn belongs_to(self, category: ClientCategory) -> bool {
        Self::for_category(category).contains(&self)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::VenduAvecNous => "vendu_avec_nous",
            Self::VenduAutreAgence => "vendu_autre_agence",
            Self::VenduSeul => "vendu_seul",
            Self::ProjetAbandonne => "projet_abandonne",
            Self::NeSouhaitePlusVendre => "ne_souhaite_plus_vendre",
            Self::AcheteAvecNous => "achete_avec_nous",
            Self::AcheteAutreAgence => "achete_autre_agence",
            Self::AcheteSeul => "achete_seul",
            Self::NAchetePlus => "n_achete_plus",
            Self::NeRepondPlus => "ne_repond_plus",
            Self::SuiviTermine => "suivi_termine",
            Self::NeSouhaitePlus => "ne_souhaite_plus",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::VenduAvecNous => "Sold with us",
            Self::VenduAutreAgence => "Sold with another agency",
            Self::VenduSeul => "Sold on their own",
            Self::ProjetAbandonne => "Project abandoned",
            Self::NeSouhaitePlusVendre => "No longer wants to sell / let",
            Self::AcheteAvecNous => "Bought with us",
            Self::AcheteAutreAgence => "Bought with another agency",
            Self::AcheteSeul => "Found on their own",
            Self::NAchetePlus => "No longer buying",
            Self::NeRepondPlus => "Stopped answering",
            Self::SuiviTermine => "After-sale follow-up finished",
            Self::NeSouhaitePlus => "No longer wants follow-up",
        }
    }
}

impl Display for ClosureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClosureReason {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ClientCategory::ALL
            .iter()
            .flat_map(|category| Self::for_category(*category).iter())
            .copied()
            .find(|reason| reason.as_str() == s)
            .ok_or_else(|| TypeConstraintError::InvalidValue(format!("unknown closure reason `{s}`")))
    }
}

/// Contact fields shared by every category.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct Contact {
    pub first_name: Option<NonEmptyString>,
    pub last_name: Option<NonEmptyString>,
    pub email: Option<NonEmptyString>,
    pub phone: Option<NonEmptyString>,
}

impl Contact {
    /// "First Last", falling back to a placeholder when both are missing.
    pub fn display_name(&self) -> String {
        let parts: Vec<&str> = [&self.first_name, &self.last_name]
            .into_iter()
            .flatten()
            .map(NonEmptyString::as_str)
            .collect();
        if parts.is_empty() {
            "(no name)".to_string()
        } else {
            parts.join(" ")
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct SellerDetails {
    pub estimation_date: Option<NaiveDate>,
    pub property_address: Option<NonEmptyString>,
    pub project_horizon: Option<NonEmptyString>,
    /// Sale or rental project.
    pub seller_kind: Option<NonEmptyString>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct BuyerDetails {
    pub acquisition_date: Option<NaiveDate>,
    pub area: Option<NonEmptyString>,
    pub budget_max: Option<NonEmptyString>,
    pub min_surface: Option<NonEmptyString>,
    pub bedrooms: Option<NonEmptyString>,
    pub also_owner: bool,
    pub project_horizon: Option<NonEmptyString>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct AfterDetails {
    pub sale_date: Option<NaiveDate>,
    pub after_address: Option<NonEmptyString>,
    pub client_birthday: Option<NaiveDate>,
    pub context: Option<NonEmptyString>,
}

/// Category-specific payload; the variant is the client's category.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "category", rename_all = "lowercase")]
pub enum ClientDetails {
    Seller(SellerDetails),
    Buyer(BuyerDetails),
    After(AfterDetails),
}

impl ClientDetails {
    pub fn category(&self) -> ClientCategory {
        match self {
            Self::Seller(_) => ClientCategory::Seller,
            Self::Buyer(_) => ClientCategory::Buyer,
            Self::After(_) => ClientCategory::After,
        }
    }

    /// Date the first follow-up is counted from.
    pub fn anchor_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Seller(details) => details.estimation_date,
            Self::Buyer(details) => details.acquisition_date,
            Self::After(details) => details.sale_date,
        }
    }
}

/// Follow-up scheduling state of a client.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct FollowUp {
    /// Explicit due date.
    pub next_due_date: Option<NaiveDate>,
    /// Legacy field carrying the same meaning as `next_due_date`.
    pub next_followup_at: Option<NaiveDate>,
    pub note: Option<String>,
    pub source: Option<DueSource>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Client {
    pub id: ClientId,
    pub owner_id: ProfileId,
    pub status: ClientStatus,
    pub closure_reason: Option<ClosureReason>,
    pub contact: Contact,
    pub details: ClientDetails,
    pub followup: FollowUp,
    pub consultant_feeling: Option<NonEmptyString>,
    pub contact_origin: Option<NonEmptyString>,
    pub inserted_at: Option<NaiveDateTime>,
}

impl Client {
    pub fn category(&self) -> ClientCategory {
        self.details.category()
    }

    pub fn is_closed(&self) -> bool {
        self.status == ClientStatus::Closed
    }
}

/// Editable attributes submitted through the create/update form.
#[derive(Clone, Debug, PartialEq)]
pub struct ClientAttributes {
    pub contact: Contact,
    pub details: ClientDetails,
    pub consultant_feeling: Option<NonEmptyString>,
    pub contact_origin: Option<NonEmptyString>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewClient {
    pub owner_id: ProfileId,
    pub attributes: ClientAttributes,
    pub followup: FollowUp,
}

/// Full replacement of the editable attributes of a client.
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateClient {
    pub attributes: ClientAttributes,
    /// A due date picked by hand while editing, stored as a manual override.
    pub manual_due_date: Option<NaiveDate>,
}

/// Changes applied when a follow-up is validated.
#[derive(Clone, Debug, PartialEq)]
pub struct FollowUpUpdate {
    pub next_due_date: NaiveDate,
    pub note: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closure_reasons_are_scoped_by_category() {
        assert!(ClosureReason::AcheteSeul.belongs_to(ClientCategory::Buyer));
        assert!(!ClosureReason::AcheteSeul.belongs_to(ClientCategory::Seller));
        assert_eq!(
            ClosureReason::default_for(ClientCategory::Seller),
            ClosureReason::ProjetAbandonne
        );
        assert_eq!(
            ClosureReason::default_for(ClientCategory::After),
            ClosureReason::SuiviTermine
        );
    }

    #[test]
    fn closure_reason_parses_from_storage_value() {
        assert_eq!(
            "achete_seul".parse::<ClosureReason>(),
            Ok(ClosureReason::AcheteSeul)
        );
        assert!("sold".parse::<ClosureReason>().is_err());
    }

    #[test]
    fn display_name_falls_back_to_placeholder() {
        let mut contact = Contact::default();
        assert_eq!(contact.display_name(), "(no name)");
        contact.last_name = NonEmptyString::new("Martin").ok();
        assert_eq!(contact.display_name(), "Martin");
        contact.first_name = NonEmptyString::new("Léa").ok();
        assert_eq!(contact.display_name(), "Léa Martin");
    }

    #[test]
    fn anchor_date_depends_on_category() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1);
        let seller = ClientDetails::Seller(SellerDetails {
            estimation_date: date,
            ..SellerDetails::default()
        });
        let buyer = ClientDetails::Buyer(BuyerDetails::default());
        assert_eq!(seller.anchor_date(), date);
        assert_eq!(buyer.anchor_date(), None);
        assert_eq!(buyer.category(), ClientCategory::Buyer);
    }
}
