use dotenvy::dotenv;
use lazy_static::lazy_static;
use secrecy::Secret;
use std::env as std_env;

lazy_static! {
    pub static ref DATABASE_URL: Secret<String> = get_db_url();
    pub static ref APP_ADDRESS: String =
        load_or_default(env::APP_ADDRESS_ENV_VAR, prod::APP_ADDRESS);
    pub static ref ALLOWED_ORIGINS: Vec<String> = load_allowed_origins();
    pub static ref URL_SCHEME: String =
        load_or_default(env::URL_SCHEME_ENV_VAR, DEFAULT_URL_SCHEME);
}

fn load_env() {
    dotenv().ok();
}

fn get_db_url() -> Secret<String> {
    load_env();
    let db_url = std_env::var(env::DATABASE_URL_ENV_VAR)
        .expect("DATABASE_URL must be set.");
    if db_url.is_empty() {
        panic!("DATABASE_URL must not be empty.");
    }
    Secret::new(db_url)
}

fn load_or_default(variable_name: &str, default_value: &str) -> String {
    load_env();

    match std_env::var(variable_name) {
        Ok(value) => {
            if value.is_empty() {
                String::from(default_value)
            } else {
                value
            }
        }
        Err(_) => String::from(default_value),
    }
}

fn load_allowed_origins() -> Vec<String> {
    parse_origins(&load_or_default(
        env::ALLOWED_ORIGINS_ENV_VAR,
        DEFAULT_ALLOWED_ORIGINS,
    ))
}

fn parse_origins(origins: &str) -> Vec<String> {
    origins
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_owned)
        .collect()
}

pub mod env {
    pub const DATABASE_URL_ENV_VAR: &str = "DATABASE_URL";
    pub const APP_ADDRESS_ENV_VAR: &str = "APP_ADDRESS";
    pub const ALLOWED_ORIGINS_ENV_VAR: &str = "ALLOWED_ORIGINS";
    pub const URL_SCHEME_ENV_VAR: &str = "URL_SCHEME";
}

// Vite dev server, where the web client runs locally
pub const DEFAULT_ALLOWED_ORIGINS: &str =
    "http://localhost:5173,http://127.0.0.1:5173";
// Set to https when TLS is terminated in front of the service
pub const DEFAULT_URL_SCHEME: &str = "http";
pub const DATABASE_MAX_CONNECTIONS: u32 = 5;
pub const TEAM_MEMBERS_PATH: &str = "/teammembers/";

pub mod prod {
    pub const APP_ADDRESS: &str = "0.0.0.0:8000";
}

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";
}
