//! # Order Repository
//!
//! Orders and their lines: the open-order reconciliation for tables and
//! rooms, counter (takeout/delivery) capture, KOT bookkeeping, and the
//! sales-history and revenue queries.
//!
//! ## Reconciliation model
//! A save is a full replacement: the slot's open order keeps its id, its
//! line rows are deleted, and the current cart is re-inserted wholesale.
//! The delete, the inserts, and the table-status flip commit as one
//! transaction, so the "at most one OPEN order per slot, lines match the
//! last save" invariant holds even across a crash.

use chrono::{NaiveDate, Utc};
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::debug;

use crate::error::DbResult;
use crate::repository::new_id;
use atrium_core::{CartLine, CustomerInfo, Order, OrderLine, OrderType, SalesRecord};

// =============================================================================
// Order Slot
// =============================================================================

/// The table or room an in-house order is attached to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderSlot {
    /// Dining table, by table id.
    Table(String),
    /// Hotel room, by room number.
    Room(String),
}

impl OrderSlot {
    fn key(&self) -> &str {
        match self {
            OrderSlot::Table(id) => id,
            OrderSlot::Room(num) => num,
        }
    }
}

/// One aggregated room-service line for a stay's folio.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RoomServiceLine {
    pub item_name: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
    pub total_cents: i64,
}

// =============================================================================
// Order Repository
// =============================================================================

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// The slot's open order, if any.
    pub async fn find_open(&self, slot: &OrderSlot) -> DbResult<Option<Order>> {
        let sql = match slot {
            OrderSlot::Table(_) => {
                "SELECT id, table_id, room_number, order_type, status, order_date, created_at, \
                 customer_name, customer_phone, customer_address \
                 FROM orders WHERE table_id = ?1 AND status = 'OPEN'"
            }
            OrderSlot::Room(_) => {
                "SELECT id, table_id, room_number, order_type, status, order_date, created_at, \
                 customer_name, customer_phone, customer_address \
                 FROM orders WHERE room_number = ?1 AND status = 'OPEN'"
            }
        };

        let order: Option<Order> = sqlx::query_as(sql)
            .bind(slot.key())
            .fetch_optional(&self.pool)
            .await?;

        Ok(order)
    }

    /// The slot's open order lines, in insertion order. Empty when the slot
    /// has no open order.
    pub async fn open_lines(&self, slot: &OrderSlot) -> DbResult<Vec<OrderLine>> {
        let sql = match slot {
            OrderSlot::Table(_) => {
                "SELECT oi.id, oi.order_id, oi.item_name, oi.quantity, oi.unit_price_cents, \
                 oi.tax_rate_bps, oi.total_cents, oi.printed_qty, oi.note \
                 FROM order_items oi JOIN orders o ON oi.order_id = o.id \
                 WHERE o.table_id = ?1 AND o.status = 'OPEN' ORDER BY oi.rowid"
            }
            OrderSlot::Room(_) => {
                "SELECT oi.id, oi.order_id, oi.item_name, oi.quantity, oi.unit_price_cents, \
                 oi.tax_rate_bps, oi.total_cents, oi.printed_qty, oi.note \
                 FROM order_items oi JOIN orders o ON oi.order_id = o.id \
                 WHERE o.room_number = ?1 AND o.status = 'OPEN' ORDER BY oi.rowid"
            }
        };

        let lines: Vec<OrderLine> = sqlx::query_as(sql)
            .bind(slot.key())
            .fetch_all(&self.pool)
            .await?;

        Ok(lines)
    }

    /// Saves the cart as the slot's open order: reuses the open order id if
    /// one exists (replacing its lines), creates the order otherwise, and
    /// marks a table slot OCCUPIED. One transaction.
    ///
    /// Returns the order id.
    pub async fn save_open(
        &self,
        slot: &OrderSlot,
        order_type: OrderType,
        lines: &[CartLine],
    ) -> DbResult<String> {
        let mut tx = self.pool.begin().await?;

        let find_sql = match slot {
            OrderSlot::Table(_) => "SELECT id FROM orders WHERE table_id = ?1 AND status = 'OPEN'",
            OrderSlot::Room(_) => {
                "SELECT id FROM orders WHERE room_number = ?1 AND status = 'OPEN'"
            }
        };
        let existing: Option<String> = sqlx::query_scalar(find_sql)
            .bind(slot.key())
            .fetch_optional(&mut *tx)
            .await?;

        let order_id = match existing {
            Some(id) => {
                // Full replace: clear the old lines, keep the order row
                sqlx::query("DELETE FROM order_items WHERE order_id = ?1")
                    .bind(&id)
                    .execute(&mut *tx)
                    .await?;
                id
            }
            None => {
                let id = new_id();
                let now = Utc::now();
                let (table_id, room_number) = match slot {
                    OrderSlot::Table(t) => (Some(t.as_str()), None),
                    OrderSlot::Room(r) => (None, Some(r.as_str())),
                };

                sqlx::query(
                    r#"
                    INSERT INTO orders (id, table_id, room_number, order_type, status,
                                        order_date, created_at)
                    VALUES (?1, ?2, ?3, ?4, 'OPEN', ?5, ?6)
                    "#,
                )
                .bind(&id)
                .bind(table_id)
                .bind(room_number)
                .bind(order_type)
                .bind(now.date_naive())
                .bind(now)
                .execute(&mut *tx)
                .await?;

                id
            }
        };

        insert_lines(&mut tx, &order_id, lines).await?;

        if let OrderSlot::Table(table_id) = slot {
            sqlx::query("UPDATE dining_tables SET status = 'OCCUPIED' WHERE id = ?1")
                .bind(table_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        debug!(order_id = %order_id, lines = lines.len(), "open order saved");
        Ok(order_id)
    }

    /// Syncs `printed_qty = quantity` on the slot's open order lines, after
    /// a KOT went out. No-op when the slot has no open order.
    pub async fn mark_kot_printed(&self, slot: &OrderSlot) -> DbResult<()> {
        let mut tx = self.pool.begin().await?;

        let find_sql = match slot {
            OrderSlot::Table(_) => "SELECT id FROM orders WHERE table_id = ?1 AND status = 'OPEN'",
            OrderSlot::Room(_) => {
                "SELECT id FROM orders WHERE room_number = ?1 AND status = 'OPEN'"
            }
        };
        let order_id: Option<String> = sqlx::query_scalar(find_sql)
            .bind(slot.key())
            .fetch_optional(&mut *tx)
            .await?;

        if let Some(order_id) = order_id {
            sqlx::query("UPDATE order_items SET printed_qty = quantity WHERE order_id = ?1")
                .bind(&order_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Closes the slot's open order(s) and frees a table slot. One
    /// transaction. Returns how many orders were closed (zero when the slot
    /// was already clear).
    pub async fn close_open(&self, slot: &OrderSlot) -> DbResult<u64> {
        let mut tx = self.pool.begin().await?;

        let close_sql = match slot {
            OrderSlot::Table(_) => {
                "UPDATE orders SET status = 'CLOSED' WHERE table_id = ?1 AND status = 'OPEN'"
            }
            OrderSlot::Room(_) => {
                "UPDATE orders SET status = 'CLOSED' WHERE room_number = ?1 AND status = 'OPEN'"
            }
        };
        let closed = sqlx::query(close_sql)
            .bind(slot.key())
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if let OrderSlot::Table(table_id) = slot {
            sqlx::query("UPDATE dining_tables SET status = 'AVAILABLE' WHERE id = ?1")
                .bind(table_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        debug!(slot = ?slot, closed, "open orders closed");
        Ok(closed)
    }

    /// Captures a takeout or delivery order: inserted directly CLOSED with
    /// its lines (counter orders have no open phase). One transaction.
    pub async fn insert_counter_order(
        &self,
        order_type: OrderType,
        lines: &[CartLine],
        customer: Option<&CustomerInfo>,
    ) -> DbResult<String> {
        let mut tx = self.pool.begin().await?;

        let id = new_id();
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO orders (id, order_type, status, order_date, created_at,
                                customer_name, customer_phone, customer_address)
            VALUES (?1, ?2, 'CLOSED', ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&id)
        .bind(order_type)
        .bind(now.date_naive())
        .bind(now)
        .bind(customer.map(|c| c.name.as_str()))
        .bind(customer.map(|c| c.phone.as_str()))
        .bind(customer.map(|c| c.address.as_str()))
        .execute(&mut *tx)
        .await?;

        insert_lines(&mut tx, &id, lines).await?;

        tx.commit().await?;

        debug!(order_id = %id, order_type = ?order_type, "counter order captured");
        Ok(id)
    }

    /// Total due across a room's open room-service orders.
    pub async fn room_service_total(&self, room_number: &str) -> DbResult<i64> {
        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(oi.total_cents), 0)
            FROM order_items oi
            JOIN orders o ON oi.order_id = o.id
            WHERE o.room_number = ?1 AND o.status = 'OPEN'
            "#,
        )
        .bind(room_number)
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }

    /// A room's open room-service lines aggregated by item, for the folio.
    pub async fn room_service_lines(&self, room_number: &str) -> DbResult<Vec<RoomServiceLine>> {
        let lines: Vec<RoomServiceLine> = sqlx::query_as(
            r#"
            SELECT
                oi.item_name,
                SUM(oi.quantity) AS quantity,
                oi.unit_price_cents,
                SUM(oi.total_cents) AS total_cents
            FROM order_items oi
            JOIN orders o ON oi.order_id = o.id
            WHERE o.room_number = ?1 AND o.status = 'OPEN'
            GROUP BY oi.item_name, oi.unit_price_cents
            ORDER BY oi.item_name
            "#,
        )
        .bind(room_number)
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }

    /// Finalized orders, newest first, with an item summary like
    /// `2x Burger, 1x Coke`.
    pub async fn sales_history(&self) -> DbResult<Vec<SalesRecord>> {
        let records: Vec<SalesRecord> = sqlx::query_as(
            r#"
            SELECT
                o.id,
                o.created_at,
                o.order_type,
                COALESCE(t.table_number, o.room_number, '-') AS label,
                COALESCE(GROUP_CONCAT(oi.quantity || 'x ' || oi.item_name, ', '), '') AS summary,
                COALESCE(SUM(oi.total_cents), 0) AS total_cents
            FROM orders o
            LEFT JOIN dining_tables t ON o.table_id = t.id
            JOIN order_items oi ON o.id = oi.order_id
            WHERE o.status = 'CLOSED'
            GROUP BY o.id
            ORDER BY o.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Food revenue for one business date, across every order type.
    pub async fn daily_food_total(&self, date: NaiveDate) -> DbResult<i64> {
        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(oi.total_cents), 0)
            FROM order_items oi
            JOIN orders o ON oi.order_id = o.id
            WHERE o.order_date = ?1
            "#,
        )
        .bind(date)
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }

    /// Wipes orders, order lines, and room bookings. Admin-gated upstream.
    pub async fn reset_sales(&self) -> DbResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM order_items").execute(&mut *tx).await?;
        sqlx::query("DELETE FROM orders").execute(&mut *tx).await?;
        sqlx::query("DELETE FROM bookings").execute(&mut *tx).await?;

        tx.commit().await?;
        Ok(())
    }
}

/// Inserts cart lines as order_items rows, totals denormalized.
async fn insert_lines(
    tx: &mut Transaction<'_, Sqlite>,
    order_id: &str,
    lines: &[CartLine],
) -> DbResult<()> {
    for line in lines {
        sqlx::query(
            r#"
            INSERT INTO order_items (id, order_id, item_name, quantity, unit_price_cents,
                                     tax_rate_bps, total_cents, printed_qty, note)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(new_id())
        .bind(order_id)
        .bind(&line.item_name)
        .bind(line.quantity)
        .bind(line.unit_price.cents())
        .bind(line.tax_rate.bps())
        .bind(line.line_total().cents())
        .bind(line.printed_qty)
        .bind(&line.note)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use atrium_core::{Money, TaxRate, TableStatus};

    fn line(name: &str, qty: i64, price_cents: i64, tax_bps: u32) -> CartLine {
        CartLine {
            item_name: name.to_string(),
            quantity: qty,
            unit_price: Money::from_cents(price_cents),
            tax_rate: TaxRate::from_bps(tax_bps),
            printed_qty: 0,
            note: String::new(),
        }
    }

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn save_reuses_open_order_and_replaces_lines() {
        let db = test_db().await;
        let table = db.tables().add("T1").await.unwrap();
        let slot = OrderSlot::Table(table.id.clone());
        let orders = db.orders();

        let first_id = orders
            .save_open(&slot, OrderType::DineIn, &[line("Burger", 2, 15000, 500)])
            .await
            .unwrap();

        // Table is now occupied
        let t = db.tables().get(&table.id).await.unwrap().unwrap();
        assert_eq!(t.status, TableStatus::Occupied);

        // Second save: same order id, replaced lines
        let second_id = orders
            .save_open(
                &slot,
                OrderType::DineIn,
                &[line("Burger", 2, 15000, 500), line("Coke", 1, 6000, 0)],
            )
            .await
            .unwrap();
        assert_eq!(first_id, second_id);

        let lines = orders.open_lines(&slot).await.unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].total_cents, 30000);
    }

    #[tokio::test]
    async fn close_frees_table_and_retires_order_id() {
        let db = test_db().await;
        let table = db.tables().add("T1").await.unwrap();
        let slot = OrderSlot::Table(table.id.clone());
        let orders = db.orders();

        let closed_id = orders
            .save_open(&slot, OrderType::DineIn, &[line("Burger", 1, 15000, 500)])
            .await
            .unwrap();
        assert_eq!(orders.close_open(&slot).await.unwrap(), 1);

        let t = db.tables().get(&table.id).await.unwrap().unwrap();
        assert_eq!(t.status, TableStatus::Available);

        // Closing again is a no-op
        assert_eq!(orders.close_open(&slot).await.unwrap(), 0);

        // A new save opens a fresh order, never the closed id
        let new_id = orders
            .save_open(&slot, OrderType::DineIn, &[line("Coke", 1, 6000, 0)])
            .await
            .unwrap();
        assert_ne!(new_id, closed_id);
    }

    #[tokio::test]
    async fn kot_printed_syncs_quantities() {
        let db = test_db().await;
        let table = db.tables().add("T1").await.unwrap();
        let slot = OrderSlot::Table(table.id.clone());
        let orders = db.orders();

        orders
            .save_open(&slot, OrderType::DineIn, &[line("Burger", 3, 15000, 500)])
            .await
            .unwrap();
        orders.mark_kot_printed(&slot).await.unwrap();

        let lines = orders.open_lines(&slot).await.unwrap();
        assert_eq!(lines[0].printed_qty, 3);
    }

    #[tokio::test]
    async fn counter_order_lands_closed_with_customer() {
        let db = test_db().await;
        let orders = db.orders();

        let customer = CustomerInfo {
            name: "Asha Rao".to_string(),
            phone: "9876543210".to_string(),
            address: "12 Lake Road".to_string(),
        };
        orders
            .insert_counter_order(
                OrderType::Delivery,
                &[line("Cheese Pizza", 1, 30000, 500)],
                Some(&customer),
            )
            .await
            .unwrap();

        let history = orders.sales_history().await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].order_type, OrderType::Delivery);
        assert_eq!(history[0].label, "-");
        assert_eq!(history[0].summary, "1x Cheese Pizza");
        assert_eq!(history[0].total_cents, 30000);
    }

    #[tokio::test]
    async fn room_service_totals_and_lines() {
        let db = test_db().await;
        db.rooms().add("101", "Double", 250000).await.unwrap();
        let slot = OrderSlot::Room("101".to_string());
        let orders = db.orders();

        orders
            .save_open(
                &slot,
                OrderType::RoomService,
                &[line("Burger", 2, 10000, 500), line("Coke", 1, 4000, 0)],
            )
            .await
            .unwrap();

        assert_eq!(orders.room_service_total("101").await.unwrap(), 24000);
        assert_eq!(orders.room_service_total("102").await.unwrap(), 0);

        let lines = orders.room_service_lines("101").await.unwrap();
        assert_eq!(lines.len(), 2);
        let burger = lines.iter().find(|l| l.item_name == "Burger").unwrap();
        assert_eq!(burger.quantity, 2);
        assert_eq!(burger.total_cents, 20000);
    }

    #[tokio::test]
    async fn daily_food_total_counts_today() {
        let db = test_db().await;
        let orders = db.orders();

        orders
            .insert_counter_order(OrderType::Takeout, &[line("Fries", 2, 9000, 500)], None)
            .await
            .unwrap();

        let today = Utc::now().date_naive();
        assert_eq!(orders.daily_food_total(today).await.unwrap(), 18000);

        let yesterday = today.pred_opt().unwrap();
        assert_eq!(orders.daily_food_total(yesterday).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn reset_sales_wipes_history() {
        let db = test_db().await;
        let orders = db.orders();

        orders
            .insert_counter_order(OrderType::Takeout, &[line("Fries", 1, 9000, 500)], None)
            .await
            .unwrap();
        assert_eq!(orders.sales_history().await.unwrap().len(), 1);

        orders.reset_sales().await.unwrap();
        assert!(orders.sales_history().await.unwrap().is_empty());
    }
}
