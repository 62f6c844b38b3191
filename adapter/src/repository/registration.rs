use async_trait::async_trait;
use chrono::Utc;
use derive_new::new;
use kernel::model::{
    access::{self, ForbiddenDisclosure},
    auth::Principal,
    id::{RegistrationId, UserId},
    registration::{
        admission,
        event::{CancelRegistration, CreateRegistration},
        Registration, RegistrationStatus, RegistrationTarget, TargetKind,
    },
};
use kernel::repository::registration::RegistrationRepository;
use shared::error::{AppError, AppResult};

use crate::database::{
    model::{
        registration::{parse_status, RegistrationRow, RegistrationStateRow, TargetRow},
        OwnerRow,
    },
    ConnectionPool,
};

#[derive(new)]
pub struct RegistrationRepositoryImpl {
    db: ConnectionPool,
    disclosure: ForbiddenDisclosure,
}

#[async_trait]
impl RegistrationRepository for RegistrationRepositoryImpl {
    async fn create(&self, event: CreateRegistration) -> AppResult<Registration> {
        let target = event.target;
        let kind = target.kind();

        let mut tx = self.db.begin().await?;

        // The existence, uniqueness and capacity reads below decide whether
        // the insert may happen. They run in the same SERIALIZABLE
        // transaction as the insert, so two concurrent admissions for the
        // last place cannot both pass the count check; the partial unique
        // index on active registrations backstops the uniqueness rule.
        self.set_transaction_serializable(&mut tx).await?;

        let target_sql = match kind {
            TargetKind::Event => {
                "SELECT title, registration_open, max_participants FROM events WHERE event_id = $1"
            }
            TargetKind::Program => {
                "SELECT title, registration_open, max_participants FROM programs WHERE program_id = $1"
            }
        };
        let target_row: Option<TargetRow> = sqlx::query_as(target_sql)
            .bind(target.raw_id())
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

        let already_registered: bool = sqlx::query_scalar(
            r#"
                SELECT EXISTS (
                    SELECT 1 FROM registrations
                    WHERE user_id = $1 AND target_id = $2 AND target_kind = $3
                      AND status <> 'cancelled'
                )
            "#,
        )
        .bind(event.registered_by)
        .bind(target.raw_id())
        .bind(kind.as_ref())
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        let active_count: i64 = sqlx::query_scalar(
            r#"
                SELECT COUNT(*) FROM registrations
                WHERE target_id = $1 AND target_kind = $2 AND status <> 'cancelled'
            "#,
        )
        .bind(target.raw_id())
        .bind(kind.as_ref())
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        let snapshot = admission::check_admission(
            kind,
            target_row.map(Into::into),
            already_registered,
            active_count,
        )?;

        let registration_id = RegistrationId::new();
        let created_at = Utc::now();
        let res = sqlx::query(
            r#"
                INSERT INTO registrations
                (registration_id, user_id, target_id, target_kind, status, created_at)
                VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(registration_id)
        .bind(event.registered_by)
        .bind(target.raw_id())
        .bind(kind.as_ref())
        .bind(RegistrationStatus::Pending.as_ref())
        .bind(created_at)
        .execute(&mut *tx)
        .await
        .map_err(map_active_unique_violation)?;
        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "no registration record has been created".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(Registration {
            registration_id,
            registered_by: event.registered_by,
            target_id: target.raw_id(),
            target_kind: kind,
            target_title: snapshot.title,
            status: RegistrationStatus::Pending,
            created_at,
        })
    }

    async fn cancel(&self, event: CancelRegistration) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let state: Option<RegistrationStateRow> = sqlx::query_as(
            "SELECT user_id, status FROM registrations WHERE registration_id = $1",
        )
        .bind(event.registration_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;
        let Some(state) = state else {
            return Err(AppError::EntityNotFound("registration not found".into()));
        };

        // A registration is "owned" by the user who made it.
        access::enforce(
            Some(state.user_id),
            &event.requested_by,
            self.disclosure,
            "registration",
        )?;

        if parse_status(&state.status)? == RegistrationStatus::Cancelled {
            return Err(AppError::UnprocessableEntity(
                "registration is already cancelled".into(),
            ));
        }

        let res = sqlx::query(
            "UPDATE registrations SET status = 'cancelled' WHERE registration_id = $1",
        )
        .bind(event.registration_id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;
        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "no registration record has been cancelled".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)
    }

    async fn find_active_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Registration>> {
        let rows: Vec<RegistrationRow> = sqlx::query_as(
            r#"
                SELECT
                    r.registration_id,
                    r.user_id,
                    r.target_id,
                    r.target_kind,
                    r.status,
                    r.created_at,
                    COALESCE(e.title, p.title, '') AS target_title
                FROM registrations AS r
                LEFT JOIN events AS e
                    ON r.target_kind = 'event' AND e.event_id = r.target_id
                LEFT JOIN programs AS p
                    ON r.target_kind = 'program' AND p.program_id = r.target_id
                WHERE r.user_id = $1 AND r.status <> 'cancelled'
                ORDER BY r.created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(Registration::try_from).collect()
    }

    async fn find_by_target(
        &self,
        target: RegistrationTarget,
        requested_by: Principal,
    ) -> AppResult<Vec<Registration>> {
        let kind = target.kind();

        let owner_sql = match kind {
            TargetKind::Event => "SELECT owner_id FROM events WHERE event_id = $1",
            TargetKind::Program => "SELECT owner_id FROM programs WHERE program_id = $1",
        };
        let owner: Option<OwnerRow> = sqlx::query_as(owner_sql)
            .bind(target.raw_id())
            .fetch_optional(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;
        let Some(owner) = owner else {
            return Err(AppError::EntityNotFound(format!("{kind} not found")));
        };
        access::enforce(owner.owner_id, &requested_by, self.disclosure, kind.as_ref())?;

        let rows: Vec<RegistrationRow> = sqlx::query_as(
            r#"
                SELECT
                    r.registration_id,
                    r.user_id,
                    r.target_id,
                    r.target_kind,
                    r.status,
                    r.created_at,
                    COALESCE(e.title, p.title, '') AS target_title
                FROM registrations AS r
                LEFT JOIN events AS e
                    ON r.target_kind = 'event' AND e.event_id = r.target_id
                LEFT JOIN programs AS p
                    ON r.target_kind = 'program' AND p.program_id = r.target_id
                WHERE r.target_id = $1 AND r.target_kind = $2
                  AND r.status <> 'cancelled'
                ORDER BY r.created_at ASC
            "#,
        )
        .bind(target.raw_id())
        .bind(kind.as_ref())
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(Registration::try_from).collect()
    }
}

impl RegistrationRepositoryImpl {
    async fn set_transaction_serializable(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    ) -> AppResult<()> {
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut **tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        Ok(())
    }
}

fn map_active_unique_violation(e: sqlx::Error) -> AppError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => AppError::AlreadyRegistered,
        _ => AppError::SpecificOperationError(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{event::EventRepositoryImpl, user::UserRepositoryImpl};
    use kernel::model::{
        event::event::CreateEvent, id::EventId, role::Role, user::event::CreateUser,
    };
    use kernel::repository::{
        event::EventRepository, registration::RegistrationRepository, user::UserRepository,
    };

    async fn fixture_user(pool: &ConnectionPool, name: &str) -> anyhow::Result<Principal> {
        let user = UserRepositoryImpl::new(pool.clone())
            .create(CreateUser {
                user_name: name.into(),
                email: format!("{name}@example.com"),
                password: "passw0rd".into(),
                role: Role::User,
            })
            .await?;
        Ok(Principal {
            user_id: user.user_id,
            role: user.role,
        })
    }

    async fn fixture_event(
        pool: &ConnectionPool,
        owner: Principal,
        max_participants: Option<i32>,
        registration_open: bool,
    ) -> anyhow::Result<EventId> {
        let repo = EventRepositoryImpl::new(pool.clone(), ForbiddenDisclosure::Reveal);
        let event_id = repo
            .create(CreateEvent {
                title: "spring tryouts".into(),
                description: None,
                event_date: Utc::now(),
                location: Some("court 1".into()),
                registration_open,
                max_participants,
                requested_by: owner,
            })
            .await?;
        Ok(event_id)
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn admitted_registration_is_pending(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let pool = ConnectionPool::new(pool);
        let repo = RegistrationRepositoryImpl::new(pool.clone(), ForbiddenDisclosure::Reveal);
        let owner = fixture_user(&pool, "owner").await?;
        let member = fixture_user(&pool, "member").await?;
        let event_id = fixture_event(&pool, owner, Some(10), true).await?;

        let registration = repo
            .create(CreateRegistration::new(
                member.user_id,
                RegistrationTarget::Event(event_id),
            ))
            .await?;

        assert_eq!(registration.status, RegistrationStatus::Pending);
        assert_eq!(registration.registered_by, member.user_id);
        assert_eq!(registration.target_id, event_id.raw());
        assert_eq!(registration.target_title, "spring tryouts");
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn second_admission_for_same_target_is_rejected(
        pool: sqlx::PgPool,
    ) -> anyhow::Result<()> {
        let pool = ConnectionPool::new(pool);
        let repo = RegistrationRepositoryImpl::new(pool.clone(), ForbiddenDisclosure::Reveal);
        let owner = fixture_user(&pool, "owner").await?;
        let member = fixture_user(&pool, "member").await?;
        let event_id = fixture_event(&pool, owner, None, true).await?;
        let target = RegistrationTarget::Event(event_id);

        repo.create(CreateRegistration::new(member.user_id, target))
            .await?;
        let err = repo
            .create(CreateRegistration::new(member.user_id, target))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::AlreadyRegistered));

        // No second row was written.
        let active = repo.find_active_by_user_id(member.user_id).await?;
        assert_eq!(active.len(), 1);
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn cancellation_reopens_the_uniqueness_slot(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let pool = ConnectionPool::new(pool);
        let repo = RegistrationRepositoryImpl::new(pool.clone(), ForbiddenDisclosure::Reveal);
        let owner = fixture_user(&pool, "owner").await?;
        let member = fixture_user(&pool, "member").await?;
        let event_id = fixture_event(&pool, owner, Some(1), true).await?;
        let target = RegistrationTarget::Event(event_id);

        let first = repo
            .create(CreateRegistration::new(member.user_id, target))
            .await?;
        repo.cancel(CancelRegistration::new(first.registration_id, member))
            .await?;

        // Re-admission creates a new row rather than reviving the old one.
        let second = repo
            .create(CreateRegistration::new(member.user_id, target))
            .await?;
        assert_ne!(first.registration_id, second.registration_id);
        assert_eq!(second.status, RegistrationStatus::Pending);
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn capacity_is_enforced_on_active_count(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let pool = ConnectionPool::new(pool);
        let repo = RegistrationRepositoryImpl::new(pool.clone(), ForbiddenDisclosure::Reveal);
        let owner = fixture_user(&pool, "owner").await?;
        let first = fixture_user(&pool, "first").await?;
        let second = fixture_user(&pool, "second").await?;
        let event_id = fixture_event(&pool, owner, Some(1), true).await?;
        let target = RegistrationTarget::Event(event_id);

        repo.create(CreateRegistration::new(first.user_id, target))
            .await?;
        let err = repo
            .create(CreateRegistration::new(second.user_id, target))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::CapacityExceeded));
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn closed_target_rejects_admission(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let pool = ConnectionPool::new(pool);
        let repo = RegistrationRepositoryImpl::new(pool.clone(), ForbiddenDisclosure::Reveal);
        let owner = fixture_user(&pool, "owner").await?;
        let member = fixture_user(&pool, "member").await?;
        let event_id = fixture_event(&pool, owner, None, false).await?;

        let err = repo
            .create(CreateRegistration::new(
                member.user_id,
                RegistrationTarget::Event(event_id),
            ))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::RegistrationClosed));
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn missing_target_is_not_found(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let pool = ConnectionPool::new(pool);
        let repo = RegistrationRepositoryImpl::new(pool.clone(), ForbiddenDisclosure::Reveal);
        let member = fixture_user(&pool, "member").await?;

        let err = repo
            .create(CreateRegistration::new(
                member.user_id,
                RegistrationTarget::Event(EventId::new()),
            ))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::EntityNotFound(_)));
        Ok(())
    }
}
