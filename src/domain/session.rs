//! The resolved identity of the caller and what it may see.

use crate::domain::profile::{Profile, Role};
use crate::domain::types::ProfileId;

/// Caller identity resolved from the auth token and the profile records.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub profile: Profile,
    /// Profiles reporting to the caller (only meaningful for managers).
    pub managed_user_ids: Vec<ProfileId>,
}

/// Set of owners whose clients the caller may read and modify.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VisibilityScope {
    Everyone,
    Owners(Vec<ProfileId>),
}

impl VisibilityScope {
    pub fn allows(&self, owner_id: ProfileId) -> bool {
        match self {
            Self::Everyone => true,
            Self::Owners(ids) => ids.contains(&owner_id),
        }
    }
}

impl Session {
    pub fn new(profile: Profile, managed_user_ids: Vec<ProfileId>) -> Self {
        Self {
            profile,
            managed_user_ids,
        }
    }

    pub fn role(&self) -> Role {
        self.profile.role
    }

    pub fn is_admin(&self) -> bool {
        self.profile.role == Role::Admin
    }

    pub fn is_elevated(&self) -> bool {
        self.profile.role.is_elevated()
    }

    pub fn scope(&self) -> VisibilityScope {
        match self.profile.role {
            Role::Admin => VisibilityScope::Everyone,
            Role::Manager => {
                let mut ids = vec![self.profile.id];
                ids.extend(self.managed_user_ids.iter().copied());
                VisibilityScope::Owners(ids)
            }
            Role::User => VisibilityScope::Owners(vec![self.profile.id]),
        }
    }
}
