use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{ClientId, CommentBody, CommentId, ProfileId};

/// Append-only history entry attached to a client.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ClientComment {
    pub id: CommentId,
    pub client_id: ClientId,
    pub body: String,
    pub author_id: Option<ProfileId>,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewClientComment {
    pub client_id: ClientId,
    pub body: CommentBody,
    pub author_id: ProfileId,
}

impl NewClientComment {
    #[must_use]
    pub fn new(client_id: ClientId, body: CommentBody, author_id: ProfileId) -> Self {
        Self {
            client_id,
            body,
            author_id,
        }
    }
}
