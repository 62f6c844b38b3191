use chrono::{DateTime, Utc};
use shared::error::{AppError, AppResult};
use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use kernel::model::patch::Patch;

#[derive(Debug)]
enum Bind {
    Text(Option<String>),
    Bool(Option<bool>),
    Int4(Option<i32>),
    Timestamptz(Option<DateTime<Utc>>),
    Uuid(Option<Uuid>),
}

/// Collects the fields an update request actually supplied and emits one
/// parameterized `UPDATE` statement for them.
///
/// The set of push calls made for a resource is its updatable-field
/// whitelist; column names are always compile-time literals, never caller
/// input. Fields are written in push order, so the generated SQL is
/// deterministic. `Missing` patches are skipped, `Null` is written as SQL
/// NULL where the column allows it and rejected by the `*_required`
/// variants where it does not.
#[derive(Debug, Default)]
pub struct Changeset {
    entries: Vec<(&'static str, Bind)>,
}

impl Changeset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn text(&mut self, col: &'static str, patch: Patch<String>) -> AppResult<()> {
        self.required(col, patch, |v| Bind::Text(Some(v)))
    }

    pub fn text_opt(&mut self, col: &'static str, patch: Patch<String>) {
        self.nullable(col, patch, Bind::Text)
    }

    pub fn boolean(&mut self, col: &'static str, patch: Patch<bool>) -> AppResult<()> {
        self.required(col, patch, |v| Bind::Bool(Some(v)))
    }

    pub fn int4_opt(&mut self, col: &'static str, patch: Patch<i32>) {
        self.nullable(col, patch, Bind::Int4)
    }

    pub fn timestamptz(&mut self, col: &'static str, patch: Patch<DateTime<Utc>>) -> AppResult<()> {
        self.required(col, patch, |v| Bind::Timestamptz(Some(v)))
    }

    pub fn uuid_opt(&mut self, col: &'static str, patch: Patch<Uuid>) {
        self.nullable(col, patch, Bind::Uuid)
    }

    fn required<T>(
        &mut self,
        col: &'static str,
        patch: Patch<T>,
        bind: impl FnOnce(T) -> Bind,
    ) -> AppResult<()> {
        match patch {
            Patch::Missing => Ok(()),
            Patch::Null => Err(AppError::UnexpectedNullField(col)),
            Patch::Value(v) => {
                self.entries.push((col, bind(v)));
                Ok(())
            }
        }
    }

    fn nullable<T>(&mut self, col: &'static str, patch: Patch<T>, bind: impl FnOnce(Option<T>) -> Bind) {
        match patch {
            Patch::Missing => {}
            Patch::Null => self.entries.push((col, bind(None))),
            Patch::Value(v) => self.entries.push((col, bind(Some(v)))),
        }
    }

    /// Builds `UPDATE {table} SET col = $1, ... WHERE {key_col} = $n`.
    /// Fails `EmptyChangeset` when no field was supplied, before anything
    /// touches the database.
    pub fn into_update(
        self,
        table: &'static str,
        key_col: &'static str,
        key: Uuid,
    ) -> AppResult<QueryBuilder<'static, Postgres>> {
        if self.entries.is_empty() {
            return Err(AppError::EmptyChangeset);
        }

        let mut builder = QueryBuilder::new(format!("UPDATE {table} SET "));
        let mut first = true;
        for (col, bind) in self.entries {
            if !first {
                builder.push(", ");
            }
            first = false;
            builder.push(col).push(" = ");
            match bind {
                Bind::Text(v) => builder.push_bind(v),
                Bind::Bool(v) => builder.push_bind(v),
                Bind::Int4(v) => builder.push_bind(v),
                Bind::Timestamptz(v) => builder.push_bind(v),
                Bind::Uuid(v) => builder.push_bind(v),
            };
        }
        builder.push(" WHERE ").push(key_col).push(" = ").push_bind(key);

        Ok(builder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_sql_is_ordered_and_parameterized() {
        let mut cs = Changeset::new();
        cs.text("title", Patch::Value("spring open".into())).unwrap();
        cs.text_opt("description", Patch::Null);
        cs.boolean("registration_open", Patch::Value(false)).unwrap();

        let builder = cs.into_update("events", "event_id", Uuid::nil()).unwrap();
        assert_eq!(
            builder.into_sql(),
            "UPDATE events SET title = $1, description = $2, registration_open = $3 \
             WHERE event_id = $4"
        );
    }

    #[test]
    fn push_order_decides_column_order() {
        let mut cs = Changeset::new();
        cs.int4_opt("max_participants", Patch::Value(8));
        cs.text("title", Patch::Value("a".into())).unwrap();

        let builder = cs.into_update("programs", "program_id", Uuid::nil()).unwrap();
        assert_eq!(
            builder.into_sql(),
            "UPDATE programs SET max_participants = $1, title = $2 WHERE program_id = $3"
        );
    }

    #[test]
    fn empty_changeset_is_rejected() {
        let mut cs = Changeset::new();
        cs.text("title", Patch::Missing).unwrap();
        cs.int4_opt("max_participants", Patch::Missing);

        assert!(matches!(
            cs.into_update("events", "event_id", Uuid::nil()),
            Err(AppError::EmptyChangeset)
        ));
    }

    #[test]
    fn null_on_required_column_names_the_field() {
        let mut cs = Changeset::new();

        match cs.text("title", Patch::Null) {
            Err(AppError::UnexpectedNullField(col)) => assert_eq!(col, "title"),
            other => panic!("expected UnexpectedNullField, got {other:?}"),
        }
        // The rejected field must not leak into the changeset.
        assert!(cs.is_empty());
    }

    #[test]
    fn null_clears_a_nullable_column() {
        let mut cs = Changeset::new();
        cs.int4_opt("max_participants", Patch::Null);

        let builder = cs.into_update("events", "event_id", Uuid::nil()).unwrap();
        assert_eq!(
            builder.into_sql(),
            "UPDATE events SET max_participants = $1 WHERE event_id = $2"
        );
    }
}
