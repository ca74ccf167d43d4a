use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::TeamMemberStore;

pub type TeamMemberStoreType = Arc<RwLock<dyn TeamMemberStore + Send + Sync>>;

#[derive(Clone)]
pub struct AppState {
    pub team_member_store: TeamMemberStoreType,
}

impl AppState {
    pub fn new(team_member_store: TeamMemberStoreType) -> Self {
        Self { team_member_store }
    }
}
