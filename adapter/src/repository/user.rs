use async_trait::async_trait;
use bcrypt::{hash, verify, DEFAULT_COST};
use derive_new::new;
use kernel::model::{
    id::UserId,
    user::{
        event::{CreateUser, DeleteUser, UpdateUserPassword, UpdateUserRole},
        User,
    },
};
use kernel::repository::user::UserRepository;
use shared::error::{AppError, AppResult};

use crate::database::{
    model::user::{UserCredentialRow, UserRow},
    ConnectionPool,
};

#[derive(new)]
pub struct UserRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn create(&self, event: CreateUser) -> AppResult<User> {
        let user_id = UserId::new();
        let password_hash = hash(&event.password, DEFAULT_COST)
            .map_err(|e| AppError::CredentialVerificationError(e.into()))?;
        let role = event.role;

        let res = sqlx::query(
            r#"
                INSERT INTO users (user_id, user_name, email, password_hash, role)
                VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user_id)
        .bind(&event.user_name)
        .bind(&event.email)
        .bind(&password_hash)
        .bind(role.as_ref())
        .execute(self.db.inner_ref())
        .await
        .map_err(map_email_unique_violation)?;
        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "no user record has been created".into(),
            ));
        }

        Ok(User {
            user_id,
            user_name: event.user_name,
            email: event.email,
            role,
        })
    }

    async fn find_current_user(&self, user_id: UserId) -> AppResult<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            "SELECT user_id, user_name, email, role FROM users WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        row.map(User::try_from).transpose()
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        let rows: Vec<UserRow> = sqlx::query_as(
            "SELECT user_id, user_name, email, role FROM users ORDER BY created_at ASC",
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(User::try_from).collect()
    }

    async fn verify_credentials(&self, email: &str, password: &str) -> AppResult<User> {
        let row: Option<UserCredentialRow> = sqlx::query_as(
            r#"
                SELECT user_id, user_name, email, role, password_hash
                FROM users
                WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        // Unknown email and wrong password fail the same way.
        let Some(row) = row else {
            return Err(AppError::UnauthenticatedError);
        };
        let valid = verify(password, &row.password_hash)
            .map_err(|e| AppError::CredentialVerificationError(e.into()))?;
        if !valid {
            return Err(AppError::UnauthenticatedError);
        }

        User::try_from(UserRow {
            user_id: row.user_id,
            user_name: row.user_name,
            email: row.email,
            role: row.role,
        })
    }

    async fn update_password(&self, event: UpdateUserPassword) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let current_hash: Option<String> =
            sqlx::query_scalar("SELECT password_hash FROM users WHERE user_id = $1")
                .bind(event.user_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(AppError::SpecificOperationError)?;
        let Some(current_hash) = current_hash else {
            return Err(AppError::EntityNotFound("user not found".into()));
        };

        let valid = verify(&event.current_password, &current_hash)
            .map_err(|e| AppError::CredentialVerificationError(e.into()))?;
        if !valid {
            return Err(AppError::UnauthenticatedError);
        }

        let new_hash = hash(&event.new_password, DEFAULT_COST)
            .map_err(|e| AppError::CredentialVerificationError(e.into()))?;
        sqlx::query("UPDATE users SET password_hash = $1 WHERE user_id = $2")
            .bind(&new_hash)
            .bind(event.user_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

        tx.commit().await.map_err(AppError::TransactionError)
    }

    async fn update_role(&self, event: UpdateUserRole) -> AppResult<()> {
        let role = event.role;
        let res = sqlx::query("UPDATE users SET role = $1 WHERE user_id = $2")
            .bind(role.as_ref())
            .bind(event.user_id)
            .execute(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;
        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound("user not found".into()));
        }

        Ok(())
    }

    async fn delete(&self, event: DeleteUser) -> AppResult<()> {
        let res = sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(event.user_id)
            .execute(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;
        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound("user not found".into()));
        }

        Ok(())
    }
}

fn map_email_unique_violation(e: sqlx::Error) -> AppError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::DuplicateKey("email is already in use".into())
        }
        _ => AppError::SpecificOperationError(e),
    }
}
