use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    access::{self, ForbiddenDisclosure},
    event::{
        event::{CreateEvent, DeleteEvent, UpdateEvent},
        Event,
    },
    id::EventId,
};
use kernel::repository::event::EventRepository;
use shared::error::{AppError, AppResult};

use crate::database::{
    changeset::Changeset,
    model::{event::EventRow, OwnerRow},
    ConnectionPool,
};

#[derive(new)]
pub struct EventRepositoryImpl {
    db: ConnectionPool,
    disclosure: ForbiddenDisclosure,
}

#[async_trait]
impl EventRepository for EventRepositoryImpl {
    async fn create(&self, event: CreateEvent) -> AppResult<EventId> {
        let event_id = EventId::new();
        sqlx::query(
            r#"
                INSERT INTO events
                (event_id, title, description, event_date, location,
                 registration_open, max_participants, owner_id)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(event_id)
        .bind(&event.title)
        .bind(&event.description)
        .bind(event.event_date)
        .bind(&event.location)
        .bind(event.registration_open)
        .bind(event.max_participants)
        .bind(event.requested_by.user_id)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(event_id)
    }

    async fn find_all(&self) -> AppResult<Vec<Event>> {
        let rows: Vec<EventRow> = sqlx::query_as(
            r#"
                SELECT
                    event_id, title, description, event_date, location,
                    registration_open, max_participants, owner_id
                FROM events
                ORDER BY event_date ASC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Event::from).collect())
    }

    async fn find_by_id(&self, event_id: EventId) -> AppResult<Option<Event>> {
        let row: Option<EventRow> = sqlx::query_as(
            r#"
                SELECT
                    event_id, title, description, event_date, location,
                    registration_open, max_participants, owner_id
                FROM events
                WHERE event_id = $1
            "#,
        )
        .bind(event_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(Event::from))
    }

    async fn update(&self, event: UpdateEvent) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        // Existence is settled before ownership; the not-found message must
        // not depend on who asks.
        let owner: Option<OwnerRow> =
            sqlx::query_as("SELECT owner_id FROM events WHERE event_id = $1")
                .bind(event.event_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(AppError::SpecificOperationError)?;
        let Some(owner) = owner else {
            return Err(AppError::EntityNotFound("event not found".into()));
        };
        access::enforce(owner.owner_id, &event.requested_by, self.disclosure, "event")?;

        let mut cs = Changeset::new();
        cs.text("title", event.title)?;
        cs.text_opt("description", event.description);
        cs.timestamptz("event_date", event.event_date)?;
        cs.text_opt("location", event.location);
        cs.boolean("registration_open", event.registration_open)?;
        cs.int4_opt("max_participants", event.max_participants);

        let mut query = cs.into_update("events", "event_id", event.event_id.raw())?;
        let res = query
            .build()
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "no event record has been updated".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)
    }

    async fn delete(&self, event: DeleteEvent) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let owner: Option<OwnerRow> =
            sqlx::query_as("SELECT owner_id FROM events WHERE event_id = $1")
                .bind(event.event_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(AppError::SpecificOperationError)?;
        let Some(owner) = owner else {
            return Err(AppError::EntityNotFound("event not found".into()));
        };
        access::enforce(owner.owner_id, &event.requested_by, self.disclosure, "event")?;

        // The registrations table has no foreign key onto events (the target
        // is polymorphic), so the cascade happens here, in the same
        // transaction.
        sqlx::query("DELETE FROM registrations WHERE target_id = $1 AND target_kind = 'event'")
            .bind(event.event_id.raw())
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

        let res = sqlx::query("DELETE FROM events WHERE event_id = $1")
            .bind(event.event_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "no event record has been deleted".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)
    }

    async fn close_registrations_all(&self) -> AppResult<u64> {
        let res = sqlx::query("UPDATE events SET registration_open = FALSE WHERE registration_open")
            .execute(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        Ok(res.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::user::UserRepositoryImpl;
    use chrono::Utc;
    use kernel::model::{
        auth::Principal, patch::Patch, role::Role, user::event::CreateUser,
    };
    use kernel::repository::user::UserRepository;

    async fn fixture_user(pool: &ConnectionPool, name: &str, role: Role) -> anyhow::Result<Principal> {
        let user = UserRepositoryImpl::new(pool.clone())
            .create(CreateUser {
                user_name: name.into(),
                email: format!("{name}@example.com"),
                password: "passw0rd".into(),
                role,
            })
            .await?;
        Ok(Principal {
            user_id: user.user_id,
            role: user.role,
        })
    }

    fn create_event(requested_by: Principal) -> CreateEvent {
        CreateEvent {
            title: "open training".into(),
            description: Some("all levels".into()),
            event_date: Utc::now(),
            location: None,
            registration_open: true,
            max_participants: Some(20),
            requested_by,
        }
    }

    fn retitle(event_id: EventId, requested_by: Principal, title: &str) -> UpdateEvent {
        UpdateEvent {
            event_id,
            title: Patch::Value(title.into()),
            description: Patch::Missing,
            event_date: Patch::Missing,
            location: Patch::Missing,
            registration_open: Patch::Missing,
            max_participants: Patch::Missing,
            requested_by,
        }
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn owner_can_update_own_event(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let pool = ConnectionPool::new(pool);
        let repo = EventRepositoryImpl::new(pool.clone(), ForbiddenDisclosure::Reveal);
        let owner = fixture_user(&pool, "owner", Role::User).await?;
        let event_id = repo.create(create_event(owner)).await?;

        repo.update(retitle(event_id, owner, "renamed")).await?;

        let event = repo.find_by_id(event_id).await?.unwrap();
        assert_eq!(event.title, "renamed");
        assert_eq!(event.description.as_deref(), Some("all levels"));
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn non_owner_is_forbidden_and_writes_nothing(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let pool = ConnectionPool::new(pool);
        let repo = EventRepositoryImpl::new(pool.clone(), ForbiddenDisclosure::Reveal);
        let owner = fixture_user(&pool, "owner", Role::User).await?;
        let other = fixture_user(&pool, "other", Role::User).await?;
        let event_id = repo.create(create_event(owner)).await?;

        let err = repo
            .update(retitle(event_id, other, "hijacked"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ForbiddenOperation));

        let event = repo.find_by_id(event_id).await?.unwrap();
        assert_eq!(event.title, "open training");
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn admin_can_mutate_an_unowned_event(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let pool = ConnectionPool::new(pool);
        let repo = EventRepositoryImpl::new(pool.clone(), ForbiddenDisclosure::Reveal);
        let admin = fixture_user(&pool, "admin", Role::Admin).await?;
        let member = fixture_user(&pool, "member", Role::User).await?;
        let event_id = repo.create(create_event(admin)).await?;

        // Detach the owner; the event becomes administratively owned.
        sqlx::query("UPDATE events SET owner_id = NULL WHERE event_id = $1")
            .bind(event_id)
            .execute(pool.inner_ref())
            .await?;

        let err = repo
            .update(retitle(event_id, member, "taken over"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ForbiddenOperation));

        repo.update(retitle(event_id, admin, "rescheduled")).await?;
        let event = repo.find_by_id(event_id).await?.unwrap();
        assert_eq!(event.title, "rescheduled");
        Ok(())
    }
}
