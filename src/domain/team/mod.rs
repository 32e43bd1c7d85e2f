//! Team domain module
//!
//! A team is one competing group: a name, the address of its host, a secret token used
//! to authenticate it, and scoreboard flags. Participants only ever see the redacted
//! field mapping; the token is reserved for admin views.

mod entity;
mod repository;
mod token;
mod validation;

pub use entity::{Team, TeamDefaults, TeamId, TEAM_DEFAULTS};
pub use repository::{TeamQuery, TeamRepository};
pub use token::{TeamToken, TOKEN_BYTES, TOKEN_LENGTH};
pub(crate) use token::constant_time_compare;
pub use validation::{
    canonical_team_ip, validate_logo_path, validate_team_id, validate_team_ip, validate_team_name,
    TeamValidationError,
};

#[cfg(test)]
pub use repository::mock;
