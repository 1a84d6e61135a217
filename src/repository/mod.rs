//! Store access: reader/writer traits and their Diesel implementation.
//!
//! The traits are the seam between the service layer and the system of
//! record. Visibility scoping is applied here, in the queries, so a caller
//! can never load rows outside its [`VisibilityScope`].

use crate::db::{DbConnection, DbPool};
use crate::domain::client::{Client, ClosureReason, FollowUpUpdate, NewClient, UpdateClient};
use crate::domain::comment::{ClientComment, NewClientComment};
use crate::domain::profile::{NewProfile, Profile};
use crate::domain::session::VisibilityScope;
use crate::domain::types::{ClientId, ProfileEmail, ProfileId};
use crate::repository::errors::RepositoryResult;

pub mod client;
pub mod comment;
pub mod errors;
pub mod profile;
pub mod setting;

#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;

/// Diesel-backed repository shared by every request handler.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientListQuery {
    pub scope: VisibilityScope,
}

impl ClientListQuery {
    pub fn new(scope: VisibilityScope) -> Self {
        Self { scope }
    }

    /// Every client regardless of owner.
    pub fn all() -> Self {
        Self::new(VisibilityScope::Everyone)
    }
}

pub trait ClientReader {
    fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>>;
    fn list_clients(&self, query: ClientListQuery) -> RepositoryResult<Vec<Client>>;
}

pub trait ClientWriter {
    fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client>;
    fn update_client(&self, client_id: ClientId, updates: &UpdateClient)
    -> RepositoryResult<Client>;
    fn record_followup(
        &self,
        client_id: ClientId,
        update: &FollowUpUpdate,
    ) -> RepositoryResult<Client>;
    fn close_client(&self, client_id: ClientId, reason: ClosureReason)
    -> RepositoryResult<Client>;
    /// Moves every client of `from` to `to`, returning the number of rows moved.
    fn reassign_clients(&self, from: ProfileId, to: ProfileId) -> RepositoryResult<usize>;
}

pub trait CommentReader {
    /// Comments of the given clients, newest first.
    fn list_comments(&self, client_ids: &[ClientId]) -> RepositoryResult<Vec<ClientComment>>;
}

pub trait CommentWriter {
    fn create_comment(&self, comment: &NewClientComment) -> RepositoryResult<ClientComment>;
}

pub trait ProfileReader {
    fn get_profile_by_id(&self, id: ProfileId) -> RepositoryResult<Option<Profile>>;
    fn get_profile_by_email(&self, email: &ProfileEmail) -> RepositoryResult<Option<Profile>>;
    /// All profiles ordered by email.
    fn list_profiles(&self) -> RepositoryResult<Vec<Profile>>;
    fn list_managed_profile_ids(&self, manager_id: ProfileId) -> RepositoryResult<Vec<ProfileId>>;
}

pub trait ProfileWriter {
    fn create_profile(&self, new_profile: &NewProfile) -> RepositoryResult<Profile>;
    fn set_profile_active(&self, id: ProfileId, is_active: bool) -> RepositoryResult<Profile>;
}

pub trait SettingReader {
    fn get_setting(&self, key: &str) -> RepositoryResult<Option<String>>;
}

pub trait SettingWriter {
    fn put_setting(&self, key: &str, value: &str) -> RepositoryResult<()>;
}
