use serde::{Deserialize, Serialize};

use crate::domain::client::{Client, ClosureReason};
use crate::domain::comment::ClientComment;
use crate::services::filters::{StatusFilter, Tab};
use crate::services::followup::FollowUpInfo;
use crate::services::score::ScoreReport;

/// Owner filter value selecting every owner.
pub const ALL_OWNERS: &str = "all";

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Detail,
    Compact,
}

/// Query parameters accepted by the dashboard.
#[derive(Debug, Default, Deserialize)]
pub struct IndexQuery {
    pub tab: Option<Tab>,
    pub status: Option<StatusFilter>,
    /// Owner email, or [`ALL_OWNERS`].
    pub owner: Option<String>,
    pub view: Option<ViewMode>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Choice {
    pub value: &'static str,
    pub label: &'static str,
}

impl From<ClosureReason> for Choice {
    fn from(reason: ClosureReason) -> Self {
        Self {
            value: reason.as_str(),
            label: reason.label(),
        }
    }
}

/// One client card of the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct ClientView {
    pub client: Client,
    pub display_name: String,
    pub owner_email: Option<String>,
    /// Absent for closed clients and clients without a computable date.
    pub followup: Option<FollowUpInfo>,
    /// Newest first.
    pub comments: Vec<ClientComment>,
    pub closure_reasons: Vec<Choice>,
    pub default_closure_reason: &'static str,
}

/// Data required to render the dashboard.
#[derive(Debug, Serialize)]
pub struct IndexPageData {
    pub clients: Vec<ClientView>,
    pub score: ScoreReport,
    pub tab: Tab,
    pub status: StatusFilter,
    pub owner: Option<String>,
    pub view: ViewMode,
    /// Emails offered in the owner dropdown; empty for plain users.
    pub owner_options: Vec<String>,
    pub tabs: Vec<Choice>,
    pub statuses: Vec<Choice>,
    pub current_email: String,
    pub is_admin: bool,
}
