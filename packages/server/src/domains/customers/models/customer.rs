use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::PgPool;

/// Backing table for a deployment.
///
/// Table names are never taken from request input; this closed set is the
/// only thing interpolated into SQL text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerTable {
    PgCustomers,
    PjCustomers,
}

impl CustomerTable {
    pub fn as_str(self) -> &'static str {
        match self {
            CustomerTable::PgCustomers => "pg_customers",
            CustomerTable::PjCustomers => "pj_customers",
        }
    }
}

impl std::fmt::Display for CustomerTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted customer row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Customer {
    pub id: i64,
    // JSONB columns: the submitted string or number comes back unchanged
    pub quality: Value,
    pub service: Value,
    pub money_value: Value,
    pub phone: String,
}

/// Validated input for creating a customer
#[derive(Debug, Clone, PartialEq)]
pub struct NewCustomer {
    pub quality: Value,
    pub service: Value,
    pub money_value: Value,
    pub phone: String,
}

impl Customer {
    /// Find every customer, oldest first
    pub async fn find_all(table: CustomerTable, pool: &PgPool) -> Result<Vec<Self>> {
        let sql = format!(
            "SELECT id, quality, service, money_value, phone FROM {} ORDER BY id ASC",
            table
        );
        let customers = sqlx::query_as::<_, Self>(&sql).fetch_all(pool).await?;
        Ok(customers)
    }

    pub async fn count(table: CustomerTable, pool: &PgPool) -> Result<i64> {
        let sql = format!("SELECT COUNT(*) FROM {}", table);
        let count = sqlx::query_scalar::<_, i64>(&sql).fetch_one(pool).await?;
        Ok(count)
    }

    /// Insert a customer and return the stored row, including its assigned id.
    ///
    /// Phones are not unique; a repeat visit adds another row.
    pub async fn create(table: CustomerTable, input: NewCustomer, pool: &PgPool) -> Result<Self> {
        let sql = format!(
            r#"
            INSERT INTO {} (quality, service, money_value, phone)
            VALUES ($1, $2, $3, $4)
            RETURNING id, quality, service, money_value, phone
            "#,
            table
        );

        let customer = sqlx::query_as::<_, Self>(&sql)
            .bind(&input.quality)
            .bind(&input.service)
            .bind(&input.money_value)
            .bind(&input.phone)
            .fetch_one(pool)
            .await?;

        Ok(customer)
    }

    /// Whether any row carries `phone`. `None` binds SQL NULL and never matches.
    pub async fn phone_exists(
        table: CustomerTable,
        phone: Option<&str>,
        pool: &PgPool,
    ) -> Result<bool> {
        let sql = format!(
            "SELECT EXISTS (SELECT 1 FROM {} WHERE phone = $1)",
            table
        );
        let exists = sqlx::query_scalar::<_, bool>(&sql)
            .bind(phone)
            .fetch_one(pool)
            .await?;
        Ok(exists)
    }
}
