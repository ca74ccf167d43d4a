use crate::helpers::{
    ada, create_team_member, get_json_response_body, team_member_schema,
    TestApp,
};
use reqwest::StatusCode;
use team_members_api::ErrorResponse;
use test_context::test_context;
use uuid::Uuid;

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_200_for_existing_team_member(app: &mut TestApp) {
    let created = create_team_member(app, &ada()).await;
    let id = created["id"].as_str().unwrap();

    let response = app.get_team_member(id).await;
    assert_eq!(
        response.status(),
        StatusCode::OK,
        "Failed to get team member: {:?}",
        response
    );

    let body = get_json_response_body(response).await;
    assert!(
        jsonschema::is_valid(&team_member_schema(), &body),
        "response does not match schema: {body}"
    );
    assert_eq!(body, created);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_404_for_non_existent_id(app: &mut TestApp) {
    let _ = create_team_member(app, &ada()).await;
    let id = Uuid::new_v4().to_string();

    let response = app.get_team_member(&id).await;
    assert_eq!(
        response.status(),
        StatusCode::NOT_FOUND,
        "Should return 404 for unused IDs"
    );

    let error_response = response
        .json::<ErrorResponse>()
        .await
        .expect("Could not deserialise response body to ErrorResponse");
    assert_eq!(error_response.error, format!("Team member not found: {id}"));
    assert!(error_response.fields.is_empty());
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_404_for_malformed_id(app: &mut TestApp) {
    let response = app.get_team_member("not-a-uuid").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
