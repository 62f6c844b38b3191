use kernel::model::id::UserId;
use sqlx::FromRow;

pub mod event;
pub mod matches;
pub mod program;
pub mod registration;
pub mod tournament;
pub mod user;

/// Owner projection loaded before the owner-or-admin check. One shape for
/// every owned resource table.
#[derive(Debug, FromRow)]
pub struct OwnerRow {
    pub owner_id: Option<UserId>,
}
