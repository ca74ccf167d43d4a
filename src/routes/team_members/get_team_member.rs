use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::{map_store_error, parse_team_member_id};
use crate::{
    domain::{
        transcoder::{encode, TeamMemberRepresentation},
        TeamMemberAPIError,
    },
    AppState,
};

#[tracing::instrument(name = "Get team member route handler", skip_all)]
pub async fn get_team_member(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<TeamMemberRepresentation>), TeamMemberAPIError> {
    let team_member_id = parse_team_member_id(&id)?;
    tracing::debug!("team_member_id: {}", team_member_id);

    let team_member = state
        .team_member_store
        .read()
        .await
        .get_team_member(&team_member_id)
        .await
        .map_err(|e| map_store_error(e, &team_member_id))?;

    Ok((StatusCode::OK, Json(encode(&team_member))))
}
