//! Diesel models representing staff profiles.

use diesel::prelude::*;

use crate::domain::profile::{NewProfile as DomainNewProfile, Profile as DomainProfile};
use crate::domain::types::{ProfileEmail, ProfileId, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::profiles)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
/// Diesel model for [`crate::domain::profile::Profile`].
pub struct Profile {
    pub id: i32,
    pub email: String,
    pub role: String,
    pub manager_id: Option<i32>,
    pub is_active: bool,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::profiles)]
/// Insertable form of [`Profile`].
pub struct NewProfile<'a> {
    pub email: &'a str,
    pub role: &'a str,
}

impl TryFrom<Profile> for DomainProfile {
    type Error = TypeConstraintError;

    fn try_from(profile: Profile) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ProfileId::try_from(profile.id)?,
            email: ProfileEmail::new(profile.email)?,
            role: profile.role.parse()?,
            manager_id: profile.manager_id.map(ProfileId::try_from).transpose()?,
            is_active: profile.is_active,
        })
    }
}

impl<'a> From<&'a DomainNewProfile> for NewProfile<'a> {
    fn from(profile: &'a DomainNewProfile) -> Self {
        Self {
            email: profile.email.as_str(),
            role: profile.role.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::profile::Role;

    #[test]
    fn from_profile_into_domain() {
        let db = Profile {
            id: 1,
            email: "Agent@Example.com".into(),
            role: "manager".into(),
            manager_id: None,
            is_active: true,
        };
        let domain = DomainProfile::try_from(db).expect("valid profile");
        assert_eq!(domain.id.get(), 1);
        assert_eq!(domain.email.as_str(), "agent@example.com");
        assert_eq!(domain.role, Role::Manager);
    }

    #[test]
    fn unknown_role_is_rejected() {
        let db = Profile {
            id: 1,
            email: "a@b.c".into(),
            role: "owner".into(),
            manager_id: None,
            is_active: true,
        };
        assert!(DomainProfile::try_from(db).is_err());
    }
}
