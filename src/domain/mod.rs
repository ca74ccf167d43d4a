mod data_stores;
mod email;
mod error;
mod person_name;
mod phone;
mod role;
mod team_member;
mod team_member_id;
pub mod transcoder;

pub use data_stores::*;
pub use email::*;
pub use error::*;
pub use person_name::*;
pub use phone::*;
pub use role::*;
pub use team_member::*;
pub use team_member_id::*;
