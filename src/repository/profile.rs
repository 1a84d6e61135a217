//! Repository implementation for staff profiles.

use diesel::prelude::*;

use crate::domain::profile::{NewProfile, Profile};
use crate::domain::types::{ProfileEmail, ProfileId};
use crate::models::profile::{NewProfile as DbNewProfile, Profile as DbProfile};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, ProfileReader, ProfileWriter};

fn into_domain(row: DbProfile) -> RepositoryResult<Profile> {
    Profile::try_from(row).map_err(RepositoryError::from)
}

impl ProfileReader for DieselRepository {
    fn get_profile_by_id(&self, id: ProfileId) -> RepositoryResult<Option<Profile>> {
        use crate::schema::profiles;

        let mut conn = self.conn()?;
        let row = profiles::table
            .find(id.get())
            .select(DbProfile::as_select())
            .first(&mut conn)
            .optional()?;

        row.map(into_domain).transpose()
    }

    fn get_profile_by_email(&self, email: &ProfileEmail) -> RepositoryResult<Option<Profile>> {
        use crate::schema::profiles;

        let mut conn = self.conn()?;
        let row = profiles::table
            .filter(profiles::email.eq(email.as_str()))
            .select(DbProfile::as_select())
            .first(&mut conn)
            .optional()?;

        row.map(into_domain).transpose()
    }

    fn list_profiles(&self) -> RepositoryResult<Vec<Profile>> {
        use crate::schema::profiles;

        let mut conn = self.conn()?;
        profiles::table
            .order(profiles::email.asc())
            .select(DbProfile::as_select())
            .load::<DbProfile>(&mut conn)?
            .into_iter()
            .map(into_domain)
            .collect()
    }

    fn list_managed_profile_ids(&self, manager_id: ProfileId) -> RepositoryResult<Vec<ProfileId>> {
        use crate::schema::profiles;

        let mut conn = self.conn()?;
        profiles::table
            .filter(profiles::manager_id.eq(manager_id.get()))
            .select(profiles::id)
            .order(profiles::id.asc())
            .load::<i32>(&mut conn)?
            .into_iter()
            .map(|id| ProfileId::try_from(id).map_err(RepositoryError::from))
            .collect()
    }
}

impl ProfileWriter for DieselRepository {
    fn create_profile(&self, new_profile: &NewProfile) -> RepositoryResult<Profile> {
        use crate::schema::profiles;

        let mut conn = self.conn()?;
        let insertable = DbNewProfile::from(new_profile);

        let row = diesel::insert_into(profiles::table)
            .values(&insertable)
            .returning(DbProfile::as_returning())
            .get_result(&mut conn)?;

        into_domain(row)
    }

    fn set_profile_active(&self, id: ProfileId, is_active: bool) -> RepositoryResult<Profile> {
        use crate::schema::profiles;

        let mut conn = self.conn()?;
        let row = diesel::update(profiles::table.find(id.get()))
            .set(profiles::is_active.eq(is_active))
            .returning(DbProfile::as_returning())
            .get_result(&mut conn)?;

        into_domain(row)
    }
}
