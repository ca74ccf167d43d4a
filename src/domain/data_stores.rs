use super::{TeamMember, TeamMemberId};
use color_eyre::eyre::Report;
use thiserror::Error;

#[async_trait::async_trait]
pub trait TeamMemberStore {
    async fn add_team_member(
        &mut self,
        team_member: &TeamMember,
    ) -> Result<(), TeamMemberStoreError>;
    async fn get_team_member(
        &self,
        id: &TeamMemberId,
    ) -> Result<TeamMember, TeamMemberStoreError>;
    /// Records ordered by creation time, then id. `None` means no limit.
    async fn list_team_members(
        &self,
        offset: usize,
        limit: Option<usize>,
    ) -> Result<Vec<TeamMember>, TeamMemberStoreError>;
    async fn count_team_members(&self) -> Result<usize, TeamMemberStoreError>;
    async fn update_team_member(
        &mut self,
        team_member: &TeamMember,
    ) -> Result<(), TeamMemberStoreError>;
    async fn delete_team_member(
        &mut self,
        id: &TeamMemberId,
    ) -> Result<(), TeamMemberStoreError>;
}

#[derive(Debug, Error)]
pub enum TeamMemberStoreError {
    #[error("Team member ID exists")]
    TeamMemberIDExists,
    #[error("Team member ID not found")]
    TeamMemberIDNotFound,
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
}

impl PartialEq for TeamMemberStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::TeamMemberIDExists, Self::TeamMemberIDExists)
                | (Self::TeamMemberIDNotFound, Self::TeamMemberIDNotFound)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}
