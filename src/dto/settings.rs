use serde::Serialize;

use crate::domain::profile::Profile;
use crate::domain::relance::RelanceConfig;

/// Data required to render the admin panel.
#[derive(Debug, Serialize)]
pub struct SettingsPageData {
    pub profiles: Vec<Profile>,
    pub relance: RelanceConfig,
    pub current_profile_id: i32,
}
