//! # Table Repository
//!
//! Dining tables and the floor-plan overview (status plus the running total
//! of each table's open order).

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::new_id;
use atrium_core::{DiningTable, TableOverview, TableStatus};

/// Repository for dining table database operations.
#[derive(Debug, Clone)]
pub struct TableRepository {
    pool: SqlitePool,
}

impl TableRepository {
    pub fn new(pool: SqlitePool) -> Self {
        TableRepository { pool }
    }

    /// All tables with their status and the total due on their open order
    /// (zero for a free table).
    pub async fn list_overview(&self) -> DbResult<Vec<TableOverview>> {
        let tables: Vec<TableOverview> = sqlx::query_as(
            r#"
            SELECT
                t.id,
                t.table_number,
                t.status,
                COALESCE(SUM(oi.total_cents), 0) AS open_total_cents
            FROM dining_tables t
            LEFT JOIN orders o ON t.id = o.table_id AND o.status = 'OPEN'
            LEFT JOIN order_items oi ON o.id = oi.order_id
            GROUP BY t.id
            ORDER BY t.table_number
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(tables)
    }

    pub async fn get(&self, id: &str) -> DbResult<Option<DiningTable>> {
        let table: Option<DiningTable> =
            sqlx::query_as("SELECT id, table_number, status FROM dining_tables WHERE id = ?1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(table)
    }

    /// Adds a table. A duplicate number surfaces as
    /// [`DbError::UniqueViolation`].
    pub async fn add(&self, table_number: &str) -> DbResult<DiningTable> {
        let table = DiningTable {
            id: new_id(),
            table_number: table_number.to_string(),
            status: TableStatus::Available,
        };

        debug!(table_number = %table.table_number, "inserting dining table");

        sqlx::query(
            "INSERT INTO dining_tables (id, table_number, status) VALUES (?1, ?2, 'AVAILABLE')",
        )
        .bind(&table.id)
        .bind(&table.table_number)
        .execute(&self.pool)
        .await?;

        Ok(table)
    }

    pub async fn delete(&self, id: &str) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM dining_tables WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Table", id));
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn add_list_delete() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let tables = db.tables();

        let t1 = tables.add("T1").await.unwrap();
        tables.add("T2").await.unwrap();

        let overview = tables.list_overview().await.unwrap();
        assert_eq!(overview.len(), 2);
        assert_eq!(overview[0].status, TableStatus::Available);
        assert_eq!(overview[0].open_total_cents, 0);

        tables.delete(&t1.id).await.unwrap();
        assert_eq!(tables.list_overview().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn duplicate_table_number_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let tables = db.tables();

        tables.add("T1").await.unwrap();
        assert!(tables.add("T1").await.unwrap_err().is_unique_violation());
    }
}
