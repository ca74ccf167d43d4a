use crate::domain::{
    TeamMember, TeamMemberId, TeamMemberStore, TeamMemberStoreError,
};
use std::collections::HashMap;

#[derive(Default)]
pub struct HashmapTeamMemberStore {
    team_members: HashMap<TeamMemberId, TeamMember>,
}

#[async_trait::async_trait]
impl TeamMemberStore for HashmapTeamMemberStore {
    async fn add_team_member(
        &mut self,
        team_member: &TeamMember,
    ) -> Result<(), TeamMemberStoreError> {
        if self.team_members.contains_key(&team_member.id) {
            return Err(TeamMemberStoreError::TeamMemberIDExists);
        }

        self.team_members
            .insert(team_member.id, team_member.clone());
        Ok(())
    }

    async fn get_team_member(
        &self,
        id: &TeamMemberId,
    ) -> Result<TeamMember, TeamMemberStoreError> {
        match self.team_members.get(id) {
            Some(team_member) => Ok(team_member.clone()),
            None => Err(TeamMemberStoreError::TeamMemberIDNotFound),
        }
    }

    async fn list_team_members(
        &self,
        offset: usize,
        limit: Option<usize>,
    ) -> Result<Vec<TeamMember>, TeamMemberStoreError> {
        let mut team_members: Vec<&TeamMember> =
            self.team_members.values().collect();
        team_members.sort_by_key(|m| (m.created_at, *m.id.as_ref()));

        Ok(team_members
            .into_iter()
            .skip(offset)
            .take(limit.unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }

    async fn count_team_members(&self) -> Result<usize, TeamMemberStoreError> {
        Ok(self.team_members.len())
    }

    async fn update_team_member(
        &mut self,
        team_member: &TeamMember,
    ) -> Result<(), TeamMemberStoreError> {
        match self.team_members.get_mut(&team_member.id) {
            Some(existing) => {
                *existing = team_member.clone();
                Ok(())
            }
            None => Err(TeamMemberStoreError::TeamMemberIDNotFound),
        }
    }

    async fn delete_team_member(
        &mut self,
        id: &TeamMemberId,
    ) -> Result<(), TeamMemberStoreError> {
        match self.team_members.remove(id) {
            Some(_) => Ok(()),
            None => Err(TeamMemberStoreError::TeamMemberIDNotFound),
        }
    }
}
