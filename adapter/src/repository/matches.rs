use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    access::{self, ForbiddenDisclosure},
    id::MatchId,
    matches::{
        event::{CreateMatch, DeleteMatch, UpdateMatch},
        Match,
    },
    patch::Patch,
};
use kernel::repository::matches::MatchRepository;
use shared::error::{AppError, AppResult};

use crate::database::{
    changeset::Changeset,
    model::{matches::MatchRow, OwnerRow},
    ConnectionPool,
};

#[derive(new)]
pub struct MatchRepositoryImpl {
    db: ConnectionPool,
    disclosure: ForbiddenDisclosure,
}

#[async_trait]
impl MatchRepository for MatchRepositoryImpl {
    async fn create(&self, event: CreateMatch) -> AppResult<MatchId> {
        let match_id = MatchId::new();
        sqlx::query(
            r#"
                INSERT INTO matches
                (match_id, home_team, away_team, match_date, tournament_id, owner_id)
                VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(match_id)
        .bind(&event.home_team)
        .bind(&event.away_team)
        .bind(event.match_date)
        .bind(event.tournament_id)
        .bind(event.requested_by.user_id)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(match_id)
    }

    async fn find_all(&self) -> AppResult<Vec<Match>> {
        let rows: Vec<MatchRow> = sqlx::query_as(
            r#"
                SELECT
                    match_id, home_team, away_team, match_date,
                    tournament_id, home_score, away_score, owner_id
                FROM matches
                ORDER BY match_date ASC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Match::from).collect())
    }

    async fn find_by_id(&self, match_id: MatchId) -> AppResult<Option<Match>> {
        let row: Option<MatchRow> = sqlx::query_as(
            r#"
                SELECT
                    match_id, home_team, away_team, match_date,
                    tournament_id, home_score, away_score, owner_id
                FROM matches
                WHERE match_id = $1
            "#,
        )
        .bind(match_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(Match::from))
    }

    async fn update(&self, event: UpdateMatch) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let owner: Option<OwnerRow> =
            sqlx::query_as("SELECT owner_id FROM matches WHERE match_id = $1")
                .bind(event.match_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(AppError::SpecificOperationError)?;
        let Some(owner) = owner else {
            return Err(AppError::EntityNotFound("match not found".into()));
        };
        access::enforce(owner.owner_id, &event.requested_by, self.disclosure, "match")?;

        let mut cs = Changeset::new();
        cs.text("home_team", event.home_team)?;
        cs.text("away_team", event.away_team)?;
        cs.timestamptz("match_date", event.match_date)?;
        cs.uuid_opt("tournament_id", map_patch_id(event.tournament_id));
        cs.int4_opt("home_score", event.home_score);
        cs.int4_opt("away_score", event.away_score);

        let mut query = cs.into_update("matches", "match_id", event.match_id.raw())?;
        let res = query
            .build()
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "no match record has been updated".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)
    }

    async fn delete(&self, event: DeleteMatch) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let owner: Option<OwnerRow> =
            sqlx::query_as("SELECT owner_id FROM matches WHERE match_id = $1")
                .bind(event.match_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(AppError::SpecificOperationError)?;
        let Some(owner) = owner else {
            return Err(AppError::EntityNotFound("match not found".into()));
        };
        access::enforce(owner.owner_id, &event.requested_by, self.disclosure, "match")?;

        let res = sqlx::query("DELETE FROM matches WHERE match_id = $1")
            .bind(event.match_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "no match record has been deleted".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)
    }
}

fn map_patch_id(patch: Patch<kernel::model::id::TournamentId>) -> Patch<uuid::Uuid> {
    match patch {
        Patch::Missing => Patch::Missing,
        Patch::Null => Patch::Null,
        Patch::Value(id) => Patch::Value(id.raw()),
    }
}
