//! Staff profiles and their permission tier.

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::types::{ProfileEmail, ProfileId, TypeConstraintError};

/// Permission tier, ordered from least to most privileged.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Manager,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Manager => "manager",
            Self::Admin => "admin",
        }
    }

    /// Manager and admin may filter the list by owner.
    pub fn is_elevated(self) -> bool {
        self >= Self::Manager
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "user" => Ok(Self::User),
            "manager" => Ok(Self::Manager),
            "admin" => Ok(Self::Admin),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown role `{other}`"
            ))),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub id: ProfileId,
    pub email: ProfileEmail,
    pub role: Role,
    /// Manager this profile reports to, if any.
    pub manager_id: Option<ProfileId>,
    pub is_active: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewProfile {
    pub email: ProfileEmail,
    pub role: Role,
}

impl NewProfile {
    #[must_use]
    pub fn new(email: ProfileEmail, role: Role) -> Self {
        Self { email, role }
    }
}
