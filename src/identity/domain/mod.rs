//! Domain model for caller identity and user summaries.
//!
//! Authentication itself is owned by an external identity service; this
//! domain only models what that service resolves: who is calling, with
//! which role, and how users are summarised in listings.

mod actor;
mod error;
mod ids;
mod profile;

pub use actor::{Actor, Role};
pub use error::ParseRoleError;
pub use ids::UserId;
pub use profile::UserProfile;
