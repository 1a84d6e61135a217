//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::client::{Client, ClosureReason, FollowUpUpdate, NewClient, UpdateClient};
use crate::domain::comment::{ClientComment, NewClientComment};
use crate::domain::profile::{NewProfile, Profile};
use crate::domain::types::{ClientId, ProfileEmail, ProfileId};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    ClientListQuery, ClientReader, ClientWriter, CommentReader, CommentWriter, ProfileReader,
    ProfileWriter, SettingReader, SettingWriter,
};

mock! {
    pub Repository {}

    impl ClientReader for Repository {
        fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>>;
        fn list_clients(&self, query: ClientListQuery) -> RepositoryResult<Vec<Client>>;
    }

    impl ClientWriter for Repository {
        fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client>;
        fn update_client(
            &self,
            client_id: ClientId,
            updates: &UpdateClient,
        ) -> RepositoryResult<Client>;
        fn record_followup(
            &self,
            client_id: ClientId,
            update: &FollowUpUpdate,
        ) -> RepositoryResult<Client>;
        fn close_client(
            &self,
            client_id: ClientId,
            reason: ClosureReason,
        ) -> RepositoryResult<Client>;
        fn reassign_clients(&self, from: ProfileId, to: ProfileId) -> RepositoryResult<usize>;
    }

    impl CommentReader for Repository {
        fn list_comments(&self, client_ids: &[ClientId]) -> RepositoryResult<Vec<ClientComment>>;
    }

    impl CommentWriter for Repository {
        fn create_comment(&self, comment: &NewClientComment) -> RepositoryResult<ClientComment>;
    }

    impl ProfileReader for Repository {
        fn get_profile_by_id(&self, id: ProfileId) -> RepositoryResult<Option<Profile>>;
        fn get_profile_by_email(&self, email: &ProfileEmail) -> RepositoryResult<Option<Profile>>;
        fn list_profiles(&self) -> RepositoryResult<Vec<Profile>>;
        fn list_managed_profile_ids(&self, manager_id: ProfileId) -> RepositoryResult<Vec<ProfileId>>;
    }

    impl ProfileWriter for Repository {
        fn create_profile(&self, new_profile: &NewProfile) -> RepositoryResult<Profile>;
        fn set_profile_active(&self, id: ProfileId, is_active: bool) -> RepositoryResult<Profile>;
    }

    impl SettingReader for Repository {
        fn get_setting(&self, key: &str) -> RepositoryResult<Option<String>>;
    }

    impl SettingWriter for Repository {
        fn put_setting(&self, key: &str, value: &str) -> RepositoryResult<()>;
    }
}
