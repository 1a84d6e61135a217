//! Per-category follow-up ("relance") delays.

use serde::{Deserialize, Serialize};

use crate::domain::client::ClientCategory;
use crate::domain::types::TypeConstraintError;

pub const DEFAULT_INITIAL_DAYS: u32 = 15;
pub const DEFAULT_NEXT_DAYS: u32 = 14;
pub const MAX_DELAY_DAYS: u32 = 365;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RelanceDelays {
    /// Days between the category anchor date and the first follow-up.
    pub initial_days: u32,
    /// Days until the next follow-up once one has been validated.
    pub default_next_days: u32,
}

impl Default for RelanceDelays {
    fn default() -> Self {
        Self {
            initial_days: DEFAULT_INITIAL_DAYS,
            default_next_days: DEFAULT_NEXT_DAYS,
        }
    }
}

impl RelanceDelays {
    fn validate(&self) -> Result<(), TypeConstraintError> {
        let in_range = |days: u32| (1..=MAX_DELAY_DAYS).contains(&days);
        if in_range(self.initial_days) && in_range(self.default_next_days) {
            Ok(())
        } else {
            Err(TypeConstraintError::InvalidValue(format!(
                "follow-up delays must lie between 1 and {MAX_DELAY_DAYS} days"
            )))
        }
    }
}

/// Global relance configuration keyed by category.
///
/// Missing categories deserialize to the defaults so that a partially
/// written shared copy still loads.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct RelanceConfig {
    #[serde(default)]
    pub seller: RelanceDelays,
    #[serde(default)]
    pub buyer: RelanceDelays,
    #[serde(default)]
    pub after: RelanceDelays,
}

impl RelanceConfig {
    pub fn delays(&self, category: ClientCategory) -> RelanceDelays {
        match category {
            ClientCategory::Seller => self.seller,
            ClientCategory::Buyer => self.buyer,
            ClientCategory::After => self.after,
        }
    }

    pub fn initial_days(&self, category: ClientCategory) -> u32 {
        self.delays(category).initial_days
    }

    pub fn default_next_days(&self, category: ClientCategory) -> u32 {
        self.delays(category).default_next_days
    }

    pub fn validate(&self) -> Result<(), TypeConstraintError> {
        self.seller.validate()?;
        self.buyer.validate()?;
        self.after.validate()
    }
}
