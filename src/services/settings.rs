//! Admin panel workflows.

use crate::domain::profile::Profile;
use crate::domain::relance::RelanceConfig;
use crate::domain::session::Session;
use crate::domain::types::ProfileId;
use crate::dto::settings::SettingsPageData;
use crate::forms::settings::{ReassignForm, ReassignPayload, RelanceConfigForm, ToggleProfileForm};
use crate::repository::{ClientWriter, ProfileReader, ProfileWriter, SettingReader, SettingWriter};
use crate::services::relance::RelanceStore;
use crate::services::session::ensure_admin;
use crate::services::{ServiceError, ServiceResult};

/// Loads profiles and the relance configuration for the admin panel.
pub fn load_settings_page<R>(
    repo: &R,
    session: &Session,
    store: &RelanceStore,
) -> ServiceResult<SettingsPageData>
where
    R: ProfileReader + SettingReader + ?Sized,
{
    ensure_admin(session)?;

    let profiles = repo.list_profiles().map_err(|err| {
        log::error!("Failed to load profiles: {err}");
        err
    })?;

    Ok(SettingsPageData {
        profiles,
        relance: store.load_shared(repo),
        current_profile_id: session.profile.id.get(),
    })
}

/// Validates and stores new relance delays.
pub fn save_relance_config<R>(
    repo: &R,
    session: &Session,
    store: &RelanceStore,
    form: RelanceConfigForm,
) -> ServiceResult<RelanceConfig>
where
    R: SettingWriter + ?Sized,
{
    ensure_admin(session)?;

    let config = RelanceConfig::try_from(form)?;
    store.save(repo, config)?;

    Ok(config)
}

/// Moves every client of one profile to another; returns the count.
pub fn reassign_clients<R>(repo: &R, session: &Session, form: ReassignForm) -> ServiceResult<usize>
where
    R: ClientWriter + ProfileReader + ?Sized,
{
    ensure_admin(session)?;

    let payload = ReassignPayload::try_from(form)?;

    for id in [payload.from, payload.to] {
        if repo.get_profile_by_id(id)?.is_none() {
            return Err(ServiceError::NotFound);
        }
    }

    let moved = repo
        .reassign_clients(payload.from, payload.to)
        .map_err(|err| {
            log::error!("Failed to reassign clients: {err}");
            err
        })?;
    log::info!(
        "Reassigned {moved} client(s) from profile {} to {}",
        payload.from,
        payload.to
    );

    Ok(moved)
}

/// Flips the active flag of a profile other than the caller's.
pub fn toggle_profile_active<R>(
    repo: &R,
    session: &Session,
    form: ToggleProfileForm,
) -> ServiceResult<Profile>
where
    R: ProfileReader + ProfileWriter + ?Sized,
{
    ensure_admin(session)?;

    let profile_id = ProfileId::try_from(form)?;
    if profile_id == session.profile.id {
        return Err(ServiceError::Form(
            "you cannot deactivate your own account".to_string(),
        ));
    }

    let profile = repo
        .get_profile_by_id(profile_id)?
        .ok_or(ServiceError::NotFound)?;

    repo.set_profile_active(profile.id, !profile.is_active)
        .map_err(|err| {
            log::error!("Failed to toggle profile {profile_id}: {err}");
            err.into()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::profile::Role;
    use crate::repository::mock::MockRepository;
    use crate::services::session::tests::{profile, session};

    #[test]
    fn admin_only() {
        let mut repo = MockRepository::new();
        repo.expect_reassign_clients().times(0);
        repo.expect_set_profile_active().times(0);
        repo.expect_put_setting().times(0);
        let manager = session(2, Role::Manager);
        let store = RelanceStore::in_memory(RelanceConfig::default());

        let reassign = ReassignForm {
            from_profile_id: Some(3),
            to_profile_id: Some(4),
        };
        assert!(matches!(
            reassign_clients(&repo, &manager, reassign),
            Err(ServiceError::Unauthorized)
        ));
        assert!(matches!(
            toggle_profile_active(&repo, &manager, ToggleProfileForm { profile_id: 3 }),
            Err(ServiceError::Unauthorized)
        ));
        assert!(matches!(
            load_settings_page(&repo, &manager, &store),
            Err(ServiceError::Unauthorized)
        ));
    }

    #[test]
    fn reassign_moves_clients() {
        let mut repo = MockRepository::new();
        repo.expect_get_profile_by_id()
            .returning(|id| Ok(Some(profile(id.get(), &format!("p{id}@example.com"), Role::User))));
        repo.expect_reassign_clients()
            .withf(|from, to| from.get() == 3 && to.get() == 4)
            .times(1)
            .returning(|_, _| Ok(12));

        let form = ReassignForm {
            from_profile_id: Some(3),
            to_profile_id: Some(4),
        };
        let moved = reassign_clients(&repo, &session(1, Role::Admin), form).expect("moved");

        assert_eq!(moved, 12);
    }

    #[test]
    fn reassign_to_same_profile_is_rejected() {
        let mut repo = MockRepository::new();
        repo.expect_get_profile_by_id().times(0);
        repo.expect_reassign_clients().times(0);

        let form = ReassignForm {
            from_profile_id: Some(3),
            to_profile_id: Some(3),
        };
        assert!(matches!(
            reassign_clients(&repo, &session(1, Role::Admin), form),
            Err(ServiceError::Form(_))
        ));
    }

    #[test]
    fn self_deactivation_is_rejected() {
        let mut repo = MockRepository::new();
        repo.expect_set_profile_active().times(0);

        let result = toggle_profile_active(
            &repo,
            &session(1, Role::Admin),
            ToggleProfileForm { profile_id: 1 },
        );

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn toggle_flips_the_flag() {
        let mut repo = MockRepository::new();
        repo.expect_get_profile_by_id()
            .returning(|id| Ok(Some(profile(id.get(), "rep@example.com", Role::User))));
        repo.expect_set_profile_active()
            .withf(|id, active| id.get() == 5 && !*active)
            .times(1)
            .returning(|id, active| {
                let mut updated = profile(id.get(), "rep@example.com", Role::User);
                updated.is_active = active;
                Ok(updated)
            });

        let updated = toggle_profile_active(
            &repo,
            &session(1, Role::Admin),
            ToggleProfileForm { profile_id: 5 },
        )
        .expect("toggled");

        assert!(!updated.is_active);
    }

    #[test]
    fn saving_relance_config_updates_the_store() {
        let mut repo = MockRepository::new();
        repo.expect_put_setting().times(1).returning(|_, _| Ok(()));
        let store = RelanceStore::in_memory(RelanceConfig::default());
        let form = RelanceConfigForm {
            seller_initial_days: 10,
            seller_default_next_days: 7,
            buyer_initial_days: 15,
            buyer_default_next_days: 14,
            after_initial_days: 30,
            after_default_next_days: 60,
        };

        save_relance_config(&repo, &session(1, Role::Admin), &store, form).expect("saved");

        assert_eq!(store.current().seller.initial_days, 10);
        assert_eq!(store.current().after.default_next_days, 60);
    }
}
