//! Session and role resolution.

use crate::domain::profile::{NewProfile, Profile, Role};
use crate::domain::session::Session;
use crate::domain::types::ProfileEmail;
use crate::repository::{ProfileReader, ProfileWriter};
use crate::services::{ServiceError, ServiceResult};

/// Resolves the caller from the email carried by the auth token.
///
/// A first sign-in creates the profile: `admin` when the email is listed in
/// `admin_emails`, `user` otherwise. Deactivated profiles are refused.
pub fn resolve_session<R>(repo: &R, email: &str, admin_emails: &[String]) -> ServiceResult<Session>
where
    R: ProfileReader + ProfileWriter + ?Sized,
{
    let email = ProfileEmail::new(email).map_err(|err| {
        log::warn!("Token carries an invalid email: {err}");
        ServiceError::Unauthorized
    })?;

    let profile = match repo.get_profile_by_email(&email)? {
        Some(profile) => profile,
        None => {
            let role = if admin_emails
                .iter()
                .any(|admin| admin.trim().eq_ignore_ascii_case(email.as_str()))
            {
                Role::Admin
            } else {
                Role::User
            };
            log::info!("Creating profile for {email} with role {role}");
            repo.create_profile(&NewProfile::new(email, role))
                .map_err(|err| {
                    log::error!("Failed to create profile: {err}");
                    err
                })?
        }
    };

    if !profile.is_active {
        log::warn!("Deactivated profile {} tried to sign in", profile.email);
        return Err(ServiceError::Deactivated);
    }

    let managed_user_ids = match profile.role {
        Role::Manager => repo.list_managed_profile_ids(profile.id)?,
        Role::User | Role::Admin => Vec::new(),
    };

    Ok(Session::new(profile, managed_user_ids))
}

/// Fails with `Unauthorized` unless the caller is an admin.
pub fn ensure_admin(session: &Session) -> ServiceResult<()> {
    if session.is_admin() {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized)
    }
}

/// Profiles the caller may pick in the owner dropdown.
pub fn owner_options<R>(repo: &R, session: &Session) -> ServiceResult<Vec<Profile>>
where
    R: ProfileReader + ?Sized,
{
    match session.role() {
        Role::User => Ok(Vec::new()),
        Role::Manager | Role::Admin => {
            let scope = session.scope();
            Ok(repo
                .list_profiles()?
                .into_iter()
                .filter(|profile| scope.allows(profile.id))
                .collect())
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::types::ProfileId;
    use crate::repository::mock::MockRepository;

    pub(crate) fn profile(id: i32, email: &str, role: Role) -> Profile {
        Profile {
            id: ProfileId::new(id).expect("valid id"),
            email: ProfileEmail::new(email).expect("valid email"),
            role,
            manager_id: None,
            is_active: true,
        }
    }

    pub(crate) fn session(id: i32, role: Role) -> Session {
        Session::new(profile(id, &format!("p{id}@example.com"), role), Vec::new())
    }

    #[test]
    fn existing_profile_is_resolved() {
        let mut repo = MockRepository::new();
        repo.expect_get_profile_by_email()
            .withf(|email| email.as_str() == "rep@example.com")
            .times(1)
            .returning(|_| Ok(Some(profile(3, "rep@example.com", Role::User))));
        repo.expect_create_profile().times(0);
        repo.expect_list_managed_profile_ids().times(0);

        let session = resolve_session(&repo, "Rep@Example.com", &[]).expect("session");

        assert_eq!(session.profile.id.get(), 3);
        assert!(session.managed_user_ids.is_empty());
    }

    #[test]
    fn first_sign_in_creates_profile() {
        let mut repo = MockRepository::new();
        repo.expect_get_profile_by_email()
            .returning(|_| Ok(None));
        repo.expect_create_profile()
            .withf(|new| new.role == Role::Admin && new.email.as_str() == "boss@example.com")
            .times(1)
            .returning(|new| Ok(profile(1, new.email.as_str(), new.role)));

        let admins = vec!["BOSS@example.com".to_string()];
        let session = resolve_session(&repo, "boss@example.com", &admins).expect("session");

        assert!(session.is_admin());
    }

    #[test]
    fn deactivated_profile_is_refused() {
        let mut repo = MockRepository::new();
        repo.expect_get_profile_by_email().returning(|_| {
            let mut inactive = profile(4, "gone@example.com", Role::User);
            inactive.is_active = false;
            Ok(Some(inactive))
        });

        let result = resolve_session(&repo, "gone@example.com", &[]);

        assert!(matches!(result, Err(ServiceError::Deactivated)));
    }

    #[test]
    fn manager_gets_team_and_options() {
        let mut repo = MockRepository::new();
        repo.expect_get_profile_by_email()
            .returning(|_| Ok(Some(profile(2, "lead@example.com", Role::Manager))));
        repo.expect_list_managed_profile_ids()
            .returning(|_| Ok(vec![ProfileId::new(5).expect("valid id")]));
        repo.expect_list_profiles().returning(|| {
            Ok(vec![
                profile(2, "lead@example.com", Role::Manager),
                profile(5, "junior@example.com", Role::User),
                profile(9, "elsewhere@example.com", Role::User),
            ])
        });

        let session = resolve_session(&repo, "lead@example.com", &[]).expect("session");
        let options = owner_options(&repo, &session).expect("options");

        let ids: Vec<i32> = options.iter().map(|p| p.id.get()).collect();
        assert_eq!(ids, vec![2, 5]);
    }

    #[test]
    fn users_get_no_owner_options() {
        let mut repo = MockRepository::new();
        repo.expect_list_profiles().times(0);

        let options = owner_options(&repo, &session(1, Role::User)).expect("options");

        assert!(options.is_empty());
    }
}
