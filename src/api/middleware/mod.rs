//! API middleware components

pub mod admin_auth;
pub mod logging;
pub mod team_auth;
mod token;

pub use admin_auth::RequireAdmin;
pub use logging::logging_middleware;
pub use team_auth::RequireTeam;
