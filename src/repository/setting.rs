use chrono::Utc;
use diesel::prelude::*;

use crate::models::setting::NewSetting;
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, SettingReader, SettingWriter};

impl SettingReader for DieselRepository {
    fn get_setting(&self, key: &str) -> RepositoryResult<Option<String>> {
        use crate::schema::settings;

        let mut conn = self.conn()?;
        let value = settings::table
            .find(key)
            .select(settings::value)
            .first::<String>(&mut conn)
            .optional()?;

        Ok(value)
    }
}

impl SettingWriter for DieselRepository {
    fn put_setting(&self, key: &str, value: &str) -> RepositoryResult<()> {
        use crate::schema::settings;

        let mut conn = self.conn()?;
        let row = NewSetting {
            key,
            value,
            updated_at: Utc::now().naive_utc(),
        };

        diesel::insert_into(settings::table)
            .values(&row)
            .on_conflict(settings::key)
            .do_update()
            .set((
                settings::value.eq(row.value),
                settings::updated_at.eq(row.updated_at),
            ))
            .execute(&mut conn)?;

        Ok(())
    }
}
