use chrono::Duration;
use sqlx::{
    postgres::{PgConnectOptions, PgConnection, PgPoolOptions},
    Connection, Executor, PgPool,
};
use std::str::FromStr;
use team_members_api::{
    domain::{
        current_timestamp, Email, PersonName, Phone, Role, TeamMember,
        TeamMemberChanges, TeamMemberId, TeamMemberStore, TeamMemberStoreError,
    },
    services::data_stores::PostgresTeamMemberStore,
    utils::constants::env::DATABASE_URL_ENV_VAR,
};
use test_context::{test_context, AsyncTestContext};
use uuid::Uuid;

// Skipped unless DATABASE_URL points at a PostgreSQL server
pub struct PostgresTestStore {
    database: Option<TmpDatabase>,
}

struct TmpDatabase {
    server_url: String,
    name: String,
    pool: PgPool,
    store: PostgresTeamMemberStore,
}

impl PostgresTestStore {
    fn database(&mut self) -> Option<&mut TmpDatabase> {
        if self.database.is_none() {
            eprintln!("{DATABASE_URL_ENV_VAR} is not set, skipping");
        }
        self.database.as_mut()
    }
}

impl AsyncTestContext for PostgresTestStore {
    async fn setup() -> PostgresTestStore {
        dotenvy::dotenv().ok();
        let Some(server_url) = std::env::var(DATABASE_URL_ENV_VAR)
            .ok()
            .filter(|url| !url.is_empty())
        else {
            return PostgresTestStore { database: None };
        };

        let name = Uuid::new_v4().to_string();
        let pool = configure_database(&server_url, &name).await;
        let store = PostgresTeamMemberStore::new(pool.clone());

        PostgresTestStore {
            database: Some(TmpDatabase {
                server_url,
                name,
                pool,
                store,
            }),
        }
    }

    async fn teardown(self) {
        if let Some(database) = self.database {
            database.pool.close().await;
            delete_database(&database.server_url, &database.name).await;
        }
    }
}

async fn configure_database(server_url: &str, db_name: &str) -> PgPool {
    let connection_options = PgConnectOptions::from_str(server_url)
        .expect("Failed to parse PostgreSQL connection string");

    let mut connection = PgConnection::connect_with(&connection_options)
        .await
        .expect("Failed to connect to Postgres");

    connection
        .execute(format!(r#"CREATE DATABASE "{}";"#, db_name).as_str())
        .await
        .expect("Failed to create database.");

    let pool = PgPoolOptions::new()
        .connect_with(connection_options.database(db_name))
        .await
        .expect("Failed to create Postgres connection pool.");

    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("Failed to migrate the database");

    pool
}

async fn delete_database(server_url: &str, db_name: &str) {
    let connection_options = PgConnectOptions::from_str(server_url)
        .expect("Failed to parse PostgreSQL connection string");

    let mut connection = PgConnection::connect_with(&connection_options)
        .await
        .expect("Failed to connect to Postgres");

    // Kill any active connections to the database
    connection
        .execute(
            format!(
                r#"
                SELECT pg_terminate_backend(pg_stat_activity.pid)
                FROM pg_stat_activity
                WHERE pg_stat_activity.datname = '{}'
                  AND pid <> pg_backend_pid();
        "#,
                db_name
            )
            .as_str(),
        )
        .await
        .expect("Failed to drop the database.");

    connection
        .execute(format!(r#"DROP DATABASE "{}";"#, db_name).as_str())
        .await
        .expect("Failed to drop the database.");
}

fn team_member(first_name: &str, role: Option<Role>) -> TeamMember {
    TeamMember::new(
        PersonName::parse(first_name.to_string()).unwrap(),
        PersonName::parse("Lovelace".to_string()).unwrap(),
        Email::parse(format!("{}@example.com", first_name.to_lowercase()))
            .unwrap(),
        Phone::parse("555-0100".to_string()).unwrap(),
        role,
    )
}

async fn insert_raw(
    pool: &PgPool,
    role: &str,
    updated_after_created: bool,
) -> Result<(), sqlx::Error> {
    let created_at = current_timestamp();
    let updated_at = if updated_after_created {
        created_at
    } else {
        created_at - Duration::seconds(1)
    };

    sqlx::query(
        r#"
        INSERT INTO team_members
            (id, first_name, last_name, email, phone, role, created_at, updated_at)
        VALUES ($1, 'Ada', 'Lovelace', 'ada@example.com', '555-0100', $2, $3, $4)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(role)
    .bind(created_at)
    .bind(updated_at)
    .execute(pool)
    .await
    .map(|_| ())
}

fn is_check_violation(result: Result<(), sqlx::Error>) -> bool {
    match result {
        Err(sqlx::Error::Database(db_err)) => {
            db_err.code().as_deref() == Some("23514")
        }
        _ => false,
    }
}

#[test_context(PostgresTestStore)]
#[tokio::test]
async fn should_add_and_get_team_member(ctx: &mut PostgresTestStore) {
    let Some(db) = ctx.database() else { return };

    let test_members =
        [team_member("Ada", None), team_member("Grace", Some(Role::Admin))];
    for test_member in test_members {
        assert_eq!(
            db.store.add_team_member(&test_member).await,
            Ok(()),
            "Failed to add team member: {:?}",
            &test_member
        );
        assert_eq!(
            db.store.get_team_member(&test_member.id).await,
            Ok(test_member.clone()),
            "Stored team member should round trip exactly"
        );
        assert_eq!(
            db.store.add_team_member(&test_member).await,
            Err(TeamMemberStoreError::TeamMemberIDExists),
            "Should not be able to add team member with duplicate ID"
        );
    }
}

#[test_context(PostgresTestStore)]
#[tokio::test]
async fn should_not_get_missing_team_member(ctx: &mut PostgresTestStore) {
    let Some(db) = ctx.database() else { return };

    assert_eq!(
        db.store.get_team_member(&TeamMemberId::default()).await,
        Err(TeamMemberStoreError::TeamMemberIDNotFound)
    );
}

#[test_context(PostgresTestStore)]
#[tokio::test]
async fn should_list_by_creation_then_id_and_count(
    ctx: &mut PostgresTestStore,
) {
    let Some(db) = ctx.database() else { return };

    let base = current_timestamp();
    let mut expected = Vec::new();
    for (offset, first_name) in ["Ada", "Grace", "Katherine"].iter().enumerate()
    {
        let mut member = team_member(first_name, None);
        member.created_at = base + Duration::seconds(offset as i64);
        member.updated_at = member.created_at;
        expected.push(member);
    }
    // Same instant as the first, so only the id decides
    let mut tied = team_member("Dorothy", None);
    tied.created_at = base;
    tied.updated_at = base;
    expected.push(tied);
    expected.sort_by_key(|m| (m.created_at, *m.id.as_ref()));

    for member in expected.iter().rev() {
        db.store.add_team_member(member).await.unwrap();
    }

    assert_eq!(db.store.count_team_members().await, Ok(4));
    assert_eq!(
        db.store.list_team_members(0, None).await,
        Ok(expected.clone())
    );
    assert_eq!(
        db.store.list_team_members(1, Some(2)).await,
        Ok(expected[1..3].to_vec())
    );
    assert_eq!(
        db.store.list_team_members(3, None).await,
        Ok(expected[3..].to_vec())
    );
    assert_eq!(db.store.list_team_members(4, Some(10)).await, Ok(vec![]));
}

#[test_context(PostgresTestStore)]
#[tokio::test]
async fn should_update_team_member(ctx: &mut PostgresTestStore) {
    let Some(db) = ctx.database() else { return };
    let mut member = team_member("Ada", None);

    assert_eq!(
        db.store.update_team_member(&member).await,
        Err(TeamMemberStoreError::TeamMemberIDNotFound),
        "Cannot update a team member that was never added"
    );

    db.store.add_team_member(&member).await.unwrap();
    member.apply(TeamMemberChanges {
        phone: Some(Phone::parse("555-0199".to_string()).unwrap()),
        role: Some(Role::Admin),
        ..Default::default()
    });

    assert_eq!(db.store.update_team_member(&member).await, Ok(()));
    assert_eq!(db.store.get_team_member(&member.id).await, Ok(member));
}

#[test_context(PostgresTestStore)]
#[tokio::test]
async fn should_delete_team_member(ctx: &mut PostgresTestStore) {
    let Some(db) = ctx.database() else { return };
    let member = team_member("Ada", None);
    db.store.add_team_member(&member).await.unwrap();

    assert_eq!(db.store.delete_team_member(&member.id).await, Ok(()));
    assert_eq!(
        db.store.delete_team_member(&member.id).await,
        Err(TeamMemberStoreError::TeamMemberIDNotFound),
        "Team member should not have existed"
    );
    assert_eq!(db.store.count_team_members().await, Ok(0));
}

#[test_context(PostgresTestStore)]
#[tokio::test]
async fn should_enforce_table_constraints(ctx: &mut PostgresTestStore) {
    let Some(db) = ctx.database() else { return };

    assert!(insert_raw(&db.pool, "admin", true).await.is_ok());
    assert!(
        is_check_violation(insert_raw(&db.pool, "owner", true).await),
        "Unknown roles should be rejected"
    );
    assert!(
        is_check_violation(insert_raw(&db.pool, "regular", false).await),
        "updated_at before created_at should be rejected"
    );
}
