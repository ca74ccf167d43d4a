use color_eyre::eyre::eyre;

use crate::domain::{TeamMemberAPIError, TeamMemberId, TeamMemberStoreError};

mod create_team_member;
mod delete_team_member;
mod get_team_member;
mod list_team_members;
mod update_team_member;

pub use create_team_member::create_team_member;
pub use delete_team_member::delete_team_member;
pub use get_team_member::get_team_member;
pub use list_team_members::{list_team_members, TeamMemberListResponse};
pub use update_team_member::{partially_update_team_member, replace_team_member};

// An id that is not a UUID cannot name an existing team member
fn parse_team_member_id(id: &str) -> Result<TeamMemberId, TeamMemberAPIError> {
    TeamMemberId::parse(id)
        .map_err(|_| TeamMemberAPIError::IDNotFoundError(id.to_owned()))
}

fn map_store_error(
    error: TeamMemberStoreError,
    id: &TeamMemberId,
) -> TeamMemberAPIError {
    match error {
        TeamMemberStoreError::TeamMemberIDNotFound => {
            TeamMemberAPIError::IDNotFoundError(id.to_string())
        }
        e => TeamMemberAPIError::UnexpectedError(eyre!(e)),
    }
}
