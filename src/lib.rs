use std::collections::BTreeMap;
use std::error::Error;

use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    serve::Serve,
    Json, Router,
};
use color_eyre::eyre::Result;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgPoolOptions, PgPool};
use tokio::signal;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::Level;

use domain::TeamMemberAPIError;
pub mod routes;
use crate::utils::{
    constants::{ALLOWED_ORIGINS, DATABASE_MAX_CONNECTIONS},
    tracing::*,
};
use routes::{
    create_team_member, delete_team_member, get_team_member,
    list_team_members, partially_update_team_member, replace_team_member,
};
pub mod app_state;
pub mod domain;
pub mod services;
use app_state::AppState;
pub mod utils;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, Vec<String>>,
}

impl IntoResponse for TeamMemberAPIError {
    fn into_response(self) -> Response {
        let (status, error_message, fields) = match &self {
            TeamMemberAPIError::IDNotFoundError(id) => {
                log_error_chain(&self, Level::DEBUG);
                (
                    StatusCode::NOT_FOUND,
                    format!("Team member not found: {id}"),
                    BTreeMap::new(),
                )
            }
            TeamMemberAPIError::ValidationError(errors) => {
                log_error_chain(&self, Level::DEBUG);
                (
                    StatusCode::BAD_REQUEST,
                    "Validation error".to_string(),
                    errors.fields().clone(),
                )
            }
            TeamMemberAPIError::UnexpectedError(_) => {
                log_error_chain(&self, Level::ERROR);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Unexpected error".to_string(),
                    BTreeMap::new(),
                )
            }
        };
        let body = Json(ErrorResponse {
            error: error_message,
            fields,
        });
        (status, body).into_response()
    }
}

fn log_error_chain(e: &(dyn Error + 'static), debug_level: Level) {
    let separator =
        "\n-----------------------------------------------------------------------------------\n";
    let mut report = format!("{}{:?}\n", separator, e);
    let mut current = e.source();
    while let Some(cause) = current {
        let str = format!("Caused by:\n\n{:?}", cause);
        report = format!("{}\n{}", report, str);
        current = cause.source();
    }
    report = format!("{}\n{}", report, separator);
    match debug_level {
        Level::ERROR => tracing::error!("{}", report),
        Level::WARN => tracing::warn!("{}", report),
        Level::INFO => tracing::info!("{}", report),
        Level::DEBUG => tracing::debug!("{}", report),
        Level::TRACE => tracing::trace!("{}", report),
    }
}

pub struct Application {
    server: Serve<Router, Router>,
    pub address: String,
}

impl Application {
    pub async fn build(app_state: AppState, address: &str) -> Result<Self> {
        let allowed_origins = ALLOWED_ORIGINS
            .iter()
            .map(|origin| origin.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()?;

        let cors = CorsLayer::new()
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
            ])
            .allow_headers([CONTENT_TYPE])
            .allow_origin(AllowOrigin::list(allowed_origins));

        let router = router(app_state).layer(cors).layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );

        let listener = tokio::net::TcpListener::bind(address).await?;
        let address = listener.local_addr()?.to_string();
        let server = axum::serve(listener, router);

        Ok(Application { server, address })
    }

    pub async fn run(self) -> Result<(), std::io::Error> {
        tracing::info!("listening on {}", &self.address);
        self.server.with_graceful_shutdown(shutdown_signal()).await
    }
}

// Trailing slashes are optional on every route
fn router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/teammembers/",
            get(list_team_members).post(create_team_member),
        )
        .route(
            "/teammembers",
            get(list_team_members).post(create_team_member),
        )
        .route(
            "/teammembers/:id/",
            get(get_team_member)
                .put(replace_team_member)
                .patch(partially_update_team_member)
                .delete(delete_team_member),
        )
        .route(
            "/teammembers/:id",
            get(get_team_member)
                .put(replace_team_member)
                .patch(partially_update_team_member)
                .delete(delete_team_member),
        )
        .with_state(app_state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

pub async fn get_postgres_pool(
    url: &Secret<String>,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(DATABASE_MAX_CONNECTIONS)
        .connect(url.expose_secret())
        .await
}
