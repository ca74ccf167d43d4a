use axum::{
    extract::{Host, Query, State},
    http::StatusCode,
    Json,
};
use color_eyre::eyre::eyre;
use serde::Serialize;

use crate::{
    domain::{
        transcoder::{encode, TeamMemberRepresentation},
        TeamMemberAPIError,
    },
    utils::{
        constants::{TEAM_MEMBERS_PATH, URL_SCHEME},
        pagination::{collection_url, Paginated, PaginationParams},
    },
    AppState,
};

#[tracing::instrument(name = "List team members route handler", skip_all)]
pub async fn list_team_members(
    State(state): State<AppState>,
    host: Option<Host>,
    Query(params): Query<PaginationParams>,
) -> Result<(StatusCode, Json<TeamMemberListResponse>), TeamMemberAPIError> {
    let page = params.page();
    tracing::debug!("page: {:?}", page);

    let store = state.team_member_store.read().await;

    let response = match page {
        None => {
            let team_members = store
                .list_team_members(0, None)
                .await
                .map_err(|e| TeamMemberAPIError::UnexpectedError(eyre!(e)))?;
            TeamMemberListResponse::All(
                team_members.iter().map(encode).collect(),
            )
        }
        Some(page) => {
            let count = store
                .count_team_members()
                .await
                .map_err(|e| TeamMemberAPIError::UnexpectedError(eyre!(e)))?;
            let team_members = store
                .list_team_members(page.offset, Some(page.limit))
                .await
                .map_err(|e| TeamMemberAPIError::UnexpectedError(eyre!(e)))?;
            let base_url = collection_url(
                &URL_SCHEME,
                host.as_ref().map(|Host(host)| host.as_str()),
                TEAM_MEMBERS_PATH,
            );
            TeamMemberListResponse::Page(page.paginate(
                &base_url,
                count,
                team_members.iter().map(encode).collect(),
            ))
        }
    };

    Ok((StatusCode::OK, Json(response)))
}

#[derive(Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TeamMemberListResponse {
    All(Vec<TeamMemberRepresentation>),
    Page(Paginated<TeamMemberRepresentation>),
}
