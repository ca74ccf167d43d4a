use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

use super::{map_store_error, parse_team_member_id};
use crate::{
    domain::{
        transcoder::{
            decode_changes, encode, TeamMemberRepresentation, WriteMode,
        },
        TeamMemberAPIError,
    },
    AppState,
};

#[tracing::instrument(name = "Replace team member route handler", skip_all)]
pub async fn replace_team_member(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<Value>,
) -> Result<(StatusCode, Json<TeamMemberRepresentation>), TeamMemberAPIError> {
    update_team_member(state, &id, &request, WriteMode::Replace).await
}

#[tracing::instrument(
    name = "Partially update team member route handler",
    skip_all
)]
pub async fn partially_update_team_member(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<Value>,
) -> Result<(StatusCode, Json<TeamMemberRepresentation>), TeamMemberAPIError> {
    update_team_member(state, &id, &request, WriteMode::Partial).await
}

async fn update_team_member(
    state: AppState,
    id: &str,
    request: &Value,
    mode: WriteMode,
) -> Result<(StatusCode, Json<TeamMemberRepresentation>), TeamMemberAPIError> {
    let team_member_id = parse_team_member_id(id)?;
    tracing::debug!("team_member_id: {}, mode: {:?}", team_member_id, mode);

    // Held across the read-modify-write so concurrent updates serialise
    let mut store = state.team_member_store.write().await;

    let mut team_member = store
        .get_team_member(&team_member_id)
        .await
        .map_err(|e| map_store_error(e, &team_member_id))?;

    let changes = decode_changes(request, mode)?;
    team_member.apply(changes);

    store
        .update_team_member(&team_member)
        .await
        .map_err(|e| map_store_error(e, &team_member_id))?;

    Ok((StatusCode::OK, Json(encode(&team_member))))
}
