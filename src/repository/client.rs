//! Diesel implementation of the client traits.

use diesel::prelude::*;

use crate::domain::client::{
    Client, ClosureReason, DueSource, FollowUpUpdate, NewClient, UpdateClient,
};
use crate::domain::session::VisibilityScope;
use crate::domain::types::{ClientId, ProfileId, format_storage_date};
use crate::models::client::{
    Client as DbClient, ClientColumns, ClosureChanges, FollowUpChanges, ManualDueDate,
    NewClient as DbNewClient,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{ClientListQuery, ClientReader, ClientWriter, DieselRepository};

fn into_domain(row: DbClient) -> RepositoryResult<Client> {
    let id = row.id;
    Client::try_from(row).map_err(|err| {
        log::error!("Client row {id} is not valid: {err}");
        RepositoryError::ValidationError(err.to_string())
    })
}

impl ClientReader for DieselRepository {
    fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let row = clients::table
            .find(id.get())
            .select(DbClient::as_select())
            .first(&mut conn)
            .optional()?;

        row.map(into_domain).transpose()
    }

    fn list_clients(&self, query: ClientListQuery) -> RepositoryResult<Vec<Client>> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let mut items = clients::table
            .select(DbClient::as_select())
            .order(clients::id.asc())
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let VisibilityScope::Owners(owner_ids) = &query.scope {
            let owner_ids: Vec<i32> = owner_ids.iter().map(|id| id.get()).collect();
            items = items.filter(clients::owner_id.eq_any(owner_ids));
        }

        items
            .load::<DbClient>(&mut conn)?
            .into_iter()
            .map(into_domain)
            .collect()
    }
}

impl ClientWriter for DieselRepository {
    fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let insertable = DbNewClient::from(new_client);

        let row = diesel::insert_into(clients::table)
            .values(&insertable)
            .returning(DbClient::as_returning())
            .get_result(&mut conn)?;

        into_domain(row)
    }

    fn update_client(
        &self,
        client_id: ClientId,
        updates: &UpdateClient,
    ) -> RepositoryResult<Client> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let columns = ClientColumns::from(updates);
        let manual = updates.manual_due_date.map(|date| ManualDueDate {
            next_due_date: format_storage_date(date),
            next_due_source: DueSource::Manual.as_str().to_string(),
        });

        let row = conn.transaction::<DbClient, diesel::result::Error, _>(|conn| {
            let row = diesel::update(clients::table.find(client_id.get()))
                .set(&columns)
                .returning(DbClient::as_returning())
                .get_result(conn)?;

            match manual {
                Some(manual) => diesel::update(clients::table.find(client_id.get()))
                    .set(&manual)
                    .returning(DbClient::as_returning())
                    .get_result(conn),
                None => Ok(row),
            }
        })?;

        into_domain(row)
    }

    fn record_followup(
        &self,
        client_id: ClientId,
        update: &FollowUpUpdate,
    ) -> RepositoryResult<Client> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let changes = FollowUpChanges::from(update);

        let row = diesel::update(clients::table.find(client_id.get()))
            .set(&changes)
            .returning(DbClient::as_returning())
            .get_result(&mut conn)?;

        into_domain(row)
    }

    fn close_client(
        &self,
        client_id: ClientId,
        reason: ClosureReason,
    ) -> RepositoryResult<Client> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let changes = ClosureChanges::new(reason);

        let row = diesel::update(clients::table.find(client_id.get()))
            .set(&changes)
            .returning(DbClient::as_returning())
            .get_result(&mut conn)?;

        into_domain(row)
    }

    fn reassign_clients(&self, from: ProfileId, to: ProfileId) -> RepositoryResult<usize> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let moved = diesel::update(clients::table.filter(clients::owner_id.eq(from.get())))
            .set(clients::owner_id.eq(to.get()))
            .execute(&mut conn)?;

        Ok(moved)
    }
}
