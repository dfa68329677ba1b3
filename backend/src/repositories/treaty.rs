use chrono::NaiveDate;
use serde_json::Value;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::treaty::{CreateTreatyPayload, ExpiringTreaty, Treaty};

const TREATY_COLUMNS: &str = "id, title, description, type, category, signatory_countries, \
     current_status, date_signed, effective_date, expiry_date, is_active, admin_id, \
     created_at, updated_at";

/// Optional filters for the list view. `status` and `category` are exact
/// matches; `term` matches a case-insensitive title substring OR exact
/// membership in `signatory_countries`. All filters AND-compose.
#[derive(Debug, Clone, Default)]
pub struct TreatyFilters {
    pub term: Option<String>,
    pub status: Option<String>,
    pub category: Option<String>,
}

/// A typed column assignment for the partial update. Only whitelisted
/// columns can be named here (`column_value` is the sole constructor), so
/// pushing the column name into SQL directly is safe.
#[derive(Debug, Clone)]
pub enum ColumnValue {
    Text(Option<String>),
    TextArray(Vec<String>),
    Date(Option<NaiveDate>),
}

/// Converts a submitted JSON value into the typed bind for `field`.
/// Rejects unknown fields and type mismatches with a caller-facing message.
pub fn column_value(field: &str, value: &Value) -> Result<ColumnValue, String> {
    let invalid = || format!("Invalid value for field '{}'", field);
    match field {
        "title" | "description" | "type" | "category" | "current_status" => {
            serde_json::from_value::<Option<String>>(value.clone())
                .map(ColumnValue::Text)
                .map_err(|_| invalid())
        }
        "signatory_countries" => serde_json::from_value::<Vec<String>>(value.clone())
            .map(ColumnValue::TextArray)
            .map_err(|_| invalid()),
        "date_signed" | "effective_date" | "expiry_date" => {
            serde_json::from_value::<Option<NaiveDate>>(value.clone())
                .map(ColumnValue::Date)
                .map_err(|_| invalid())
        }
        _ => Err(format!("Field '{}' is not editable", field)),
    }
}

pub struct TreatyRepository;

impl TreatyRepository {
    pub fn new() -> Self {
        Self
    }

    /// Active treaties only; archived rows never appear in the list view.
    pub async fn list(
        &self,
        pool: &PgPool,
        filters: &TreatyFilters,
    ) -> Result<Vec<Treaty>, sqlx::Error> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {} FROM treaties WHERE is_active = TRUE",
            TREATY_COLUMNS
        ));

        if let Some(status) = filters.status.as_ref() {
            builder
                .push(" AND current_status = ")
                .push_bind(status.clone());
        }
        if let Some(category) = filters.category.as_ref() {
            builder.push(" AND category = ").push_bind(category.clone());
        }
        if let Some(term) = filters.term.as_ref() {
            builder
                .push(" AND (title ILIKE ")
                .push_bind(format!("%{}%", term))
                .push(" OR ")
                .push_bind(term.clone())
                .push(" = ANY(signatory_countries))");
        }
        builder.push(" ORDER BY id ASC");

        builder.build_query_as::<Treaty>().fetch_all(pool).await
    }

    /// Fetches by id regardless of `is_active`, so archived treaties stay
    /// viewable next to their audit history.
    pub async fn find_by_id(&self, pool: &PgPool, id: i64) -> Result<Option<Treaty>, sqlx::Error> {
        sqlx::query_as::<_, Treaty>(&format!(
            "SELECT {} FROM treaties WHERE id = $1",
            TREATY_COLUMNS
        ))
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    pub async fn insert(
        &self,
        pool: &PgPool,
        payload: &CreateTreatyPayload,
        admin_id: &str,
    ) -> Result<Treaty, sqlx::Error> {
        sqlx::query_as::<_, Treaty>(&format!(
            "INSERT INTO treaties \
             (title, description, type, category, signatory_countries, current_status, \
             date_signed, effective_date, expiry_date, admin_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {}",
            TREATY_COLUMNS
        ))
        .bind(&payload.title)
        .bind(&payload.description)
        .bind(&payload.treaty_type)
        .bind(&payload.category)
        .bind(&payload.signatory_countries)
        .bind(payload.current_status.as_deref().unwrap_or("Draft"))
        .bind(payload.date_signed)
        .bind(payload.effective_date)
        .bind(payload.expiry_date)
        .bind(admin_id)
        .fetch_one(pool)
        .await
    }

    /// Writes only the changed columns computed by the diff.
    pub async fn update_fields(
        &self,
        pool: &PgPool,
        id: i64,
        updates: &[(String, ColumnValue)],
    ) -> Result<Treaty, sqlx::Error> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE treaties SET updated_at = now()");

        for (field, value) in updates {
            builder.push(", ").push(field.as_str()).push(" = ");
            match value {
                ColumnValue::Text(v) => builder.push_bind(v.clone()),
                ColumnValue::TextArray(v) => builder.push_bind(v.clone()),
                ColumnValue::Date(v) => builder.push_bind(*v),
            };
        }

        builder
            .push(" WHERE id = ")
            .push_bind(id)
            .push(format!(" RETURNING {}", TREATY_COLUMNS));

        builder.build_query_as::<Treaty>().fetch_one(pool).await
    }

    /// Logical deletion: the row is kept, flagged inactive and re-statused.
    pub async fn archive(&self, pool: &PgPool, id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE treaties SET is_active = FALSE, current_status = 'Archived', \
             updated_at = now() WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Statuses of active treaties in insertion (id) order, for the status
    /// histogram.
    pub async fn active_statuses(&self, pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT current_status FROM treaties WHERE is_active = TRUE ORDER BY id ASC",
        )
        .fetch_all(pool)
        .await
    }

    /// Active treaties with `after < expiry_date <= until`, ascending by
    /// expiry date.
    pub async fn expiring_between(
        &self,
        pool: &PgPool,
        after: NaiveDate,
        until: NaiveDate,
    ) -> Result<Vec<ExpiringTreaty>, sqlx::Error> {
        sqlx::query_as::<_, ExpiringTreaty>(
            "SELECT id, title, expiry_date, current_status, signatory_countries \
             FROM treaties \
             WHERE is_active = TRUE AND expiry_date > $1 AND expiry_date <= $2 \
             ORDER BY expiry_date ASC, id ASC",
        )
        .bind(after)
        .bind(until)
        .fetch_all(pool)
        .await
    }
}

impl Default for TreatyRepository {
    fn default() -> Self {
        Self::new()
    }
}
