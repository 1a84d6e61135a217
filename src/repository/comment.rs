use diesel::prelude::*;

use crate::domain::comment::{ClientComment, NewClientComment};
use crate::domain::types::ClientId;
use crate::models::comment::{ClientComment as DbClientComment, NewClientComment as DbNewClientComment};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{CommentReader, CommentWriter, DieselRepository};

impl CommentReader for DieselRepository {
    fn list_comments(&self, client_ids: &[ClientId]) -> RepositoryResult<Vec<ClientComment>> {
        use crate::schema::client_comments;

        if client_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.conn()?;
        let ids: Vec<i32> = client_ids.iter().map(|id| id.get()).collect();

        client_comments::table
            .filter(client_comments::client_id.eq_any(ids))
            .order((client_comments::created_at.desc(), client_comments::id.desc()))
            .select(DbClientComment::as_select())
            .load::<DbClientComment>(&mut conn)?
            .into_iter()
            .map(|comment| ClientComment::try_from(comment).map_err(RepositoryError::from))
            .collect()
    }
}

impl CommentWriter for DieselRepository {
    fn create_comment(&self, comment: &NewClientComment) -> RepositoryResult<ClientComment> {
        use crate::schema::client_comments;

        let mut conn = self.conn()?;
        let insertable = DbNewClientComment::from(comment);

        let row = diesel::insert_into(client_comments::table)
            .values(&insertable)
            .returning(DbClientComment::as_returning())
            .get_result(&mut conn)?;

        ClientComment::try_from(row).map_err(RepositoryError::from)
    }
}
