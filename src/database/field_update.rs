//! Single-row UPDATE of a chosen set of columns.
//!
//! Table and column names are `&'static str` so they can only come from code;
//! every value goes through `push_bind`.

use sqlx::{QueryBuilder, Sqlite, SqlitePool};

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(Option<String>),
    Integer(Option<i64>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldUpdate {
    pub column: &'static str,
    pub value: FieldValue,
}

impl FieldUpdate {
    pub fn text(column: &'static str, value: impl Into<Option<String>>) -> Self {
        Self {
            column,
            value: FieldValue::Text(value.into()),
        }
    }

    pub fn integer(column: &'static str, value: impl Into<Option<i64>>) -> Self {
        Self {
            column,
            value: FieldValue::Integer(value.into()),
        }
    }
}

pub fn build_update<'a>(
    table: &'static str,
    id: i64,
    fields: &'a [FieldUpdate],
) -> QueryBuilder<'a, Sqlite> {
    let mut qb = QueryBuilder::<Sqlite>::new("UPDATE ");
    qb.push(table).push(" SET ");

    {
        let mut set = qb.separated(", ");
        for field in fields {
            set.push(field.column).push_unseparated(" = ");
            match &field.value {
                FieldValue::Text(v) => set.push_bind_unseparated(v.clone()),
                FieldValue::Integer(v) => set.push_bind_unseparated(*v),
            };
        }
        set.push("updated_at = CURRENT_TIMESTAMP");
    }

    qb.push(" WHERE id = ").push_bind(id);
    qb
}

/// Returns the number of rows touched: 0 when `id` matched nothing, 1
/// otherwise.
pub async fn update_fields(
    pool: &SqlitePool,
    table: &'static str,
    id: i64,
    fields: &[FieldUpdate],
) -> sqlx::Result<u64> {
    if fields.is_empty() {
        return Err(sqlx::Error::Protocol("no fields to update".into()));
    }

    let mut qb = build_update(table, id, fields);
    let res = qb.build().execute(pool).await?;
    Ok(res.rows_affected())
}
