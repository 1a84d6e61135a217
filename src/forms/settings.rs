//! Admin panel forms.

use serde::Deserialize;
use validator::Validate;

use crate::domain::relance::{RelanceConfig, RelanceDelays};
use crate::domain::types::ProfileId;
use crate::forms::FormError;

#[derive(Debug, Deserialize)]
/// Bulk transfer of every client of one profile to another.
pub struct ReassignForm {
    /// `None` or `0` when nothing was selected.
    pub from_profile_id: Option<i32>,
    pub to_profile_id: Option<i32>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct ReassignPayload {
    pub from: ProfileId,
    pub to: ProfileId,
}

fn selected(id: Option<i32>) -> Result<ProfileId, FormError> {
    match id {
        None | Some(0) => Err(FormError::ProfileNotSelected),
        Some(id) => ProfileId::new(id).map_err(|_| FormError::InvalidProfileId),
    }
}

impl TryFrom<ReassignForm> for ReassignPayload {
    type Error = FormError;

    fn try_from(form: ReassignForm) -> Result<Self, Self::Error> {
        let from = selected(form.from_profile_id)?;
        let to = selected(form.to_profile_id)?;
        if from == to {
            return Err(FormError::SameProfiles);
        }
        Ok(Self { from, to })
    }
}

#[derive(Debug, Deserialize)]
pub struct ToggleProfileForm {
    pub profile_id: i32,
}

impl TryFrom<ToggleProfileForm> for ProfileId {
    type Error = FormError;

    fn try_from(form: ToggleProfileForm) -> Result<Self, Self::Error> {
        ProfileId::new(form.profile_id).map_err(|_| FormError::InvalidProfileId)
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct RelanceConfigForm {
    #[validate(range(min = 1, max = 365))]
    pub seller_initial_days: u32,
    #[validate(range(min = 1, max = 365))]
    pub seller_default_next_days: u32,
    #[validate(range(min = 1, max = 365))]
    pub buyer_initial_days: u32,
    #[validate(range(min = 1, max = 365))]
    pub buyer_default_next_days: u32,
    #[validate(range(min = 1, max = 365))]
    pub after_initial_days: u32,
    #[validate(range(min = 1, max = 365))]
    pub after_default_next_days: u32,
}

impl TryFrom<RelanceConfigForm> for RelanceConfig {
    type Error = FormError;

    fn try_from(form: RelanceConfigForm) -> Result<Self, Self::Error> {
        form.validate().map_err(|_| FormError::InvalidDelay)?;

        let config = RelanceConfig {
            seller: RelanceDelays {
                initial_days: form.seller_initial_days,
                default_next_days: form.seller_default_next_days,
            },
            buyer: RelanceDelays {
                initial_days: form.buyer_initial_days,
                default_next_days: form.buyer_default_next_days,
            },
            after: RelanceDelays {
                initial_days: form.after_initial_days,
                default_next_days: form.after_default_next_days,
            },
        };
        config.validate().map_err(|_| FormError::InvalidDelay)?;
        Ok(config)
    }
}
