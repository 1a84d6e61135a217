//! Diesel models for storing client comments.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::comment::{
    ClientComment as DomainClientComment, NewClientComment as DomainNewClientComment,
};
use crate::domain::types::{ClientId, CommentId, ProfileId, TypeConstraintError};
use crate::models::client::Client;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(belongs_to(Client, foreign_key = client_id))]
#[diesel(table_name = crate::schema::client_comments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ClientComment {
    pub id: i32,
    pub client_id: i32,
    pub body: String,
    pub author_id: Option<i32>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::client_comments)]
pub struct NewClientComment<'a> {
    pub client_id: i32,
    pub body: &'a str,
    pub author_id: Option<i32>,
}

impl TryFrom<ClientComment> for DomainClientComment {
    type Error = TypeConstraintError;

    fn try_from(comment: ClientComment) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CommentId::try_from(comment.id)?,
            client_id: ClientId::try_from(comment.client_id)?,
            body: comment.body,
            author_id: comment.author_id.map(ProfileId::try_from).transpose()?,
            created_at: comment.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewClientComment> for NewClientComment<'a> {
    fn from(comment: &'a DomainNewClientComment) -> Self {
        Self {
            client_id: comment.client_id.get(),
            body: comment.body.as_str(),
            author_id: Some(comment.author_id.get()),
        }
    }
}
