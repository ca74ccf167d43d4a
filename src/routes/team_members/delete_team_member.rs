use axum::{
    extract::{Path, State},
    http::StatusCode,
};

use super::{map_store_error, parse_team_member_id};
use crate::{domain::TeamMemberAPIError, AppState};

#[tracing::instrument(name = "Delete team member route handler", skip_all)]
pub async fn delete_team_member(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, TeamMemberAPIError> {
    let team_member_id = parse_team_member_id(&id)?;

    state
        .team_member_store
        .write()
        .await
        .delete_team_member(&team_member_id)
        .await
        .map_err(|e| map_store_error(e, &team_member_id))?;

    tracing::info!("deleted team member {}", team_member_id);

    Ok(StatusCode::NO_CONTENT)
}
