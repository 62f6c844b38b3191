use kernel::model::{id::UserId, role::Role, user::User};
use shared::error::{AppError, AppResult};
use sqlx::FromRow;

#[derive(Debug, FromRow)]
pub struct UserRow {
    pub user_id: UserId,
    pub user_name: String,
    pub email: String,
    pub role: String,
}

impl TryFrom<UserRow> for User {
    type Error = AppError;

    fn try_from(value: UserRow) -> AppResult<Self> {
        let UserRow {
            user_id,
            user_name,
            email,
            role,
        } = value;
        Ok(User {
            user_id,
            user_name,
            email,
            role: parse_role(&role)?,
        })
    }
}

/// Row used on the login path; the password hash never leaves the adapter.
#[derive(Debug, FromRow)]
pub struct UserCredentialRow {
    pub user_id: UserId,
    pub user_name: String,
    pub email: String,
    pub role: String,
    pub password_hash: String,
}

pub fn parse_role(value: &str) -> AppResult<Role> {
    value
        .parse::<Role>()
        .map_err(|_| AppError::ConversionEntityError(format!("unknown role `{value}`")))
}
