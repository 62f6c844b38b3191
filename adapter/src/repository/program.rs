use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    access::{self, ForbiddenDisclosure},
    id::ProgramId,
    program::{
        event::{CreateProgram, DeleteProgram, UpdateProgram},
        Program,
    },
};
use kernel::repository::program::ProgramRepository;
use shared::error::{AppError, AppResult};

use crate::database::{
    changeset::Changeset,
    model::{program::ProgramRow, OwnerRow},
    ConnectionPool,
};

#[derive(new)]
pub struct ProgramRepositoryImpl {
    db: ConnectionPool,
    disclosure: ForbiddenDisclosure,
}

#[async_trait]
impl ProgramRepository for ProgramRepositoryImpl {
    async fn create(&self, event: CreateProgram) -> AppResult<ProgramId> {
        let program_id = ProgramId::new();
        sqlx::query(
            r#"
                INSERT INTO programs
                (program_id, title, description, start_date, end_date,
                 registration_open, max_participants, owner_id)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(program_id)
        .bind(&event.title)
        .bind(&event.description)
        .bind(event.start_date)
        .bind(event.end_date)
        .bind(event.registration_open)
        .bind(event.max_participants)
        .bind(event.requested_by.user_id)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(program_id)
    }

    async fn find_all(&self) -> AppResult<Vec<Program>> {
        let rows: Vec<ProgramRow> = sqlx::query_as(
            r#"
                SELECT
                    program_id, title, description, start_date, end_date,
                    registration_open, max_participants, owner_id
                FROM programs
                ORDER BY start_date ASC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Program::from).collect())
    }

    async fn find_by_id(&self, program_id: ProgramId) -> AppResult<Option<Program>> {
        let row: Option<ProgramRow> = sqlx::query_as(
            r#"
                SELECT
                    program_id, title, description, start_date, end_date,
                    registration_open, max_participants, owner_id
                FROM programs
                WHERE program_id = $1
            "#,
        )
        .bind(program_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(Program::from))
    }

    async fn update(&self, event: UpdateProgram) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let owner: Option<OwnerRow> =
            sqlx::query_as("SELECT owner_id FROM programs WHERE program_id = $1")
                .bind(event.program_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(AppError::SpecificOperationError)?;
        let Some(owner) = owner else {
            return Err(AppError::EntityNotFound("program not found".into()));
        };
        access::enforce(owner.owner_id, &event.requested_by, self.disclosure, "program")?;

        let mut cs = Changeset::new();
        cs.text("title", event.title)?;
        cs.text_opt("description", event.description);
        cs.timestamptz("start_date", event.start_date)?;
        cs.timestamptz("end_date", event.end_date)?;
        cs.boolean("registration_open", event.registration_open)?;
        cs.int4_opt("max_participants", event.max_participants);

        let mut query = cs.into_update("programs", "program_id", event.program_id.raw())?;
        let res = query
            .build()
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "no program record has been updated".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)
    }

    async fn delete(&self, event: DeleteProgram) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let owner: Option<OwnerRow> =
            sqlx::query_as("SELECT owner_id FROM programs WHERE program_id = $1")
                .bind(event.program_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(AppError::SpecificOperationError)?;
        let Some(owner) = owner else {
            return Err(AppError::EntityNotFound("program not found".into()));
        };
        access::enforce(owner.owner_id, &event.requested_by, self.disclosure, "program")?;

        sqlx::query("DELETE FROM registrations WHERE target_id = $1 AND target_kind = 'program'")
            .bind(event.program_id.raw())
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

        let res = sqlx::query("DELETE FROM programs WHERE program_id = $1")
            .bind(event.program_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "no program record has been deleted".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)
    }

    async fn close_registrations_all(&self) -> AppResult<u64> {
        let res =
            sqlx::query("UPDATE programs SET registration_open = FALSE WHERE registration_open")
                .execute(self.db.inner_ref())
                .await
                .map_err(AppError::SpecificOperationError)?;

        Ok(res.rows_affected())
    }
}
