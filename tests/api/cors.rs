use crate::helpers::TestApp;
use reqwest::{Method, StatusCode};
use test_context::test_context;

#[test_context(TestApp)]
#[tokio::test]
async fn should_allow_preflight_from_web_client(app: &mut TestApp) {
    let response = app
        .http_client
        .request(Method::OPTIONS, app.team_members_url())
        .header("origin", "http://localhost:5173")
        .header("access-control-request-method", "PATCH")
        .header("access-control-request-headers", "content-type")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|value| value.to_str().ok()),
        Some("http://localhost:5173")
    );
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_not_allow_unknown_origins(app: &mut TestApp) {
    let response = app
        .http_client
        .get(app.team_members_url())
        .header("origin", "http://evil.test")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get("access-control-allow-origin")
        .is_none());
}
