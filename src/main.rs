use std::sync::Arc;

use color_eyre::eyre::{Result, WrapErr};
use team_members_api::{
    app_state::AppState,
    get_postgres_pool,
    services::data_stores::PostgresTeamMemberStore,
    utils::{
        constants::{APP_ADDRESS, DATABASE_URL},
        tracing::init_tracing,
    },
    Application,
};
use tokio::sync::RwLock;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    let pg_pool = get_postgres_pool(&DATABASE_URL)
        .await
        .wrap_err("Failed to create Postgres connection pool")?;

    sqlx::migrate!()
        .run(&pg_pool)
        .await
        .wrap_err("Failed to run migrations")?;

    let team_member_store =
        Arc::new(RwLock::new(PostgresTeamMemberStore::new(pg_pool)));
    let app_state = AppState::new(team_member_store);

    let app = Application::build(app_state, &APP_ADDRESS)
        .await
        .wrap_err("Failed to build app")?;

    app.run().await.wrap_err("Failed to run app")?;

    Ok(())
}
