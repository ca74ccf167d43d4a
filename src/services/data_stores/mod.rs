mod hashmap_team_member_store;
mod postgres_team_member_store;

pub use hashmap_team_member_store::*;
pub use postgres_team_member_store::*;
