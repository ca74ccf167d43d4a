use axum::{extract::State, http::StatusCode, Json};
use color_eyre::eyre::eyre;
use serde_json::Value;

use crate::{
    domain::{
        transcoder::{decode_new, encode, TeamMemberRepresentation},
        TeamMemberAPIError,
    },
    AppState,
};

#[tracing::instrument(name = "Create team member route handler", skip_all)]
pub async fn create_team_member(
    State(state): State<AppState>,
    Json(request): Json<Value>,
) -> Result<(StatusCode, Json<TeamMemberRepresentation>), TeamMemberAPIError> {
    let team_member = decode_new(&request)?;

    state
        .team_member_store
        .write()
        .await
        .add_team_member(&team_member)
        .await
        .map_err(|e| TeamMemberAPIError::UnexpectedError(eyre!(e)))?;

    tracing::info!("created team member {}", team_member.id);

    Ok((StatusCode::CREATED, Json(encode(&team_member))))
}
