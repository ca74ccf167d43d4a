mod team_members;

pub use team_members::*;
