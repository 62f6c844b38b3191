use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    access::{self, ForbiddenDisclosure},
    id::TournamentId,
    tournament::{
        event::{CreateTournament, DeleteTournament, UpdateTournament},
        Tournament,
    },
};
use kernel::repository::tournament::TournamentRepository;
use shared::error::{AppError, AppResult};

use crate::database::{
    changeset::Changeset,
    model::{tournament::TournamentRow, OwnerRow},
    ConnectionPool,
};

#[derive(new)]
pub struct TournamentRepositoryImpl {
    db: ConnectionPool,
    disclosure: ForbiddenDisclosure,
}

#[async_trait]
impl TournamentRepository for TournamentRepositoryImpl {
    async fn create(&self, event: CreateTournament) -> AppResult<TournamentId> {
        let tournament_id = TournamentId::new();
        sqlx::query(
            r#"
                INSERT INTO tournaments (tournament_id, name, start_date, location, owner_id)
                VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(tournament_id)
        .bind(&event.name)
        .bind(event.start_date)
        .bind(&event.location)
        .bind(event.requested_by.user_id)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(tournament_id)
    }

    async fn find_all(&self) -> AppResult<Vec<Tournament>> {
        let rows: Vec<TournamentRow> = sqlx::query_as(
            r#"
                SELECT tournament_id, name, start_date, location, owner_id
                FROM tournaments
                ORDER BY start_date ASC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Tournament::from).collect())
    }

    async fn find_by_id(&self, tournament_id: TournamentId) -> AppResult<Option<Tournament>> {
        let row: Option<TournamentRow> = sqlx::query_as(
            r#"
                SELECT tournament_id, name, start_date, location, owner_id
                FROM tournaments
                WHERE tournament_id = $1
            "#,
        )
        .bind(tournament_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(Tournament::from))
    }

    async fn update(&self, event: UpdateTournament) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let owner: Option<OwnerRow> =
            sqlx::query_as("SELECT owner_id FROM tournaments WHERE tournament_id = $1")
                .bind(event.tournament_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(AppError::SpecificOperationError)?;
        let Some(owner) = owner else {
            return Err(AppError::EntityNotFound("tournament not found".into()));
        };
        access::enforce(
            owner.owner_id,
            &event.requested_by,
            self.disclosure,
            "tournament",
        )?;

        let mut cs = Changeset::new();
        cs.text("name", event.name)?;
        cs.timestamptz("start_date", event.start_date)?;
        cs.text_opt("location", event.location);

        let mut query = cs.into_update("tournaments", "tournament_id", event.tournament_id.raw())?;
        let res = query
            .build()
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "no tournament record has been updated".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)
    }

    async fn delete(&self, event: DeleteTournament) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let owner: Option<OwnerRow> =
            sqlx::query_as("SELECT owner_id FROM tournaments WHERE tournament_id = $1")
                .bind(event.tournament_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(AppError::SpecificOperationError)?;
        let Some(owner) = owner else {
            return Err(AppError::EntityNotFound("tournament not found".into()));
        };
        access::enforce(
            owner.owner_id,
            &event.requested_by,
            self.disclosure,
            "tournament",
        )?;

        let res = sqlx::query("DELETE FROM tournaments WHERE tournament_id = $1")
            .bind(event.tournament_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "no tournament record has been deleted".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)
    }
}
