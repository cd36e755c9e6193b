//! # Catalog Repository
//!
//! Categories and menu items. The menu projection resolves the effective
//! tax rate in SQL (item override, else category default, else zero) so
//! every caller sees the same rule.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::new_id;
use atrium_core::{Category, MenuEntry, MenuItem, PriceMode};

/// Row shape behind [`CatalogRepository::list_menu`]: both prices plus the
/// already-resolved tax rate.
#[derive(Debug, sqlx::FromRow)]
struct MenuRow {
    item_id: String,
    name: String,
    category: String,
    dine_in_price_cents: i64,
    delivery_price_cents: i64,
    tax_rate_bps: u32,
    image_path: String,
}

/// Repository for catalog database operations.
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    pool: SqlitePool,
}

impl CatalogRepository {
    pub fn new(pool: SqlitePool) -> Self {
        CatalogRepository { pool }
    }

    // =========================================================================
    // Menu Projection
    // =========================================================================

    /// The orderable menu for one price mode, joined with category names.
    pub async fn list_menu(&self, mode: PriceMode) -> DbResult<Vec<MenuEntry>> {
        let rows: Vec<MenuRow> = sqlx::query_as(
            r#"
            SELECT
                i.id AS item_id,
                i.name AS name,
                COALESCE(c.name, '') AS category,
                i.dine_in_price_cents,
                i.delivery_price_cents,
                COALESCE(i.tax_rate_bps, c.tax_rate_bps, 0) AS tax_rate_bps,
                COALESCE(i.image_path, '') AS image_path
            FROM items i
            LEFT JOIN categories c ON i.category_id = c.id
            ORDER BY c.name, i.name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| MenuEntry {
                item_id: r.item_id,
                name: r.name,
                category: r.category,
                unit_price_cents: match mode {
                    PriceMode::DineIn => r.dine_in_price_cents,
                    PriceMode::Delivery => r.delivery_price_cents,
                },
                tax_rate_bps: r.tax_rate_bps,
                image_path: r.image_path,
            })
            .collect())
    }

    // =========================================================================
    // Items
    // =========================================================================

    /// All items as stored (both prices, unresolved tax override).
    pub async fn list_items(&self) -> DbResult<Vec<MenuItem>> {
        let items: Vec<MenuItem> = sqlx::query_as(
            r#"
            SELECT id, name, category_id, dine_in_price_cents,
                   delivery_price_cents, image_path, tax_rate_bps
            FROM items
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Inserts a menu item, resolving the category by display name.
    #[allow(clippy::too_many_arguments)]
    pub async fn add_item(
        &self,
        name: &str,
        category_name: Option<&str>,
        dine_in_price_cents: i64,
        delivery_price_cents: i64,
        image_path: Option<&str>,
        tax_rate_bps: Option<u32>,
    ) -> DbResult<MenuItem> {
        let category_id: Option<String> = match category_name {
            Some(cat) => {
                sqlx::query_scalar("SELECT id FROM categories WHERE name = ?1")
                    .bind(cat)
                    .fetch_optional(&self.pool)
                    .await?
            }
            None => None,
        };

        let item = MenuItem {
            id: new_id(),
            name: name.to_string(),
            category_id,
            dine_in_price_cents,
            delivery_price_cents,
            image_path: image_path.map(str::to_string),
            tax_rate_bps,
        };

        debug!(id = %item.id, name = %item.name, "inserting menu item");

        sqlx::query(
            r#"
            INSERT INTO items (
                id, name, category_id, dine_in_price_cents,
                delivery_price_cents, image_path, tax_rate_bps
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&item.id)
        .bind(&item.name)
        .bind(&item.category_id)
        .bind(item.dine_in_price_cents)
        .bind(item.delivery_price_cents)
        .bind(&item.image_path)
        .bind(item.tax_rate_bps)
        .execute(&self.pool)
        .await?;

        Ok(item)
    }

    pub async fn delete_item(&self, id: &str) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM items WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Item", id));
        }
        Ok(())
    }

    // =========================================================================
    // Categories
    // =========================================================================

    pub async fn list_categories(&self) -> DbResult<Vec<Category>> {
        let categories: Vec<Category> =
            sqlx::query_as("SELECT id, name, tax_rate_bps FROM categories ORDER BY name")
                .fetch_all(&self.pool)
                .await?;

        Ok(categories)
    }

    /// Inserts a category. A duplicate name surfaces as
    /// [`DbError::UniqueViolation`].
    pub async fn add_category(&self, name: &str, tax_rate_bps: u32) -> DbResult<Category> {
        let category = Category {
            id: new_id(),
            name: name.to_string(),
            tax_rate_bps,
        };

        debug!(name = %category.name, tax_rate_bps, "inserting category");

        sqlx::query("INSERT INTO categories (id, name, tax_rate_bps) VALUES (?1, ?2, ?3)")
            .bind(&category.id)
            .bind(&category.name)
            .bind(category.tax_rate_bps)
            .execute(&self.pool)
            .await?;

        Ok(category)
    }

    pub async fn delete_category(&self, id: &str) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM categories WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Category", id));
        }
        Ok(())
    }

    /// Updates a category's default tax rate. Items without their own
    /// override pick the change up on the next menu listing.
    pub async fn update_category_tax(&self, id: &str, tax_rate_bps: u32) -> DbResult<()> {
        let result = sqlx::query("UPDATE categories SET tax_rate_bps = ?2 WHERE id = ?1")
            .bind(id)
            .bind(tax_rate_bps)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Category", id));
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

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn menu_resolves_price_mode_and_tax_fallback() {
        let db = test_db().await;
        let catalog = db.catalog();

        let drinks = catalog.add_category("DRINKS", 1200).await.unwrap();
        catalog
            .add_item("Cold Coffee", Some("DRINKS"), 12000, 13000, None, None)
            .await
            .unwrap();
        catalog
            .add_item("Coca Cola", Some("DRINKS"), 6000, 6500, None, Some(0))
            .await
            .unwrap();

        let menu = catalog.list_menu(PriceMode::DineIn).await.unwrap();
        assert_eq!(menu.len(), 2);

        let coffee = menu.iter().find(|e| e.name == "Cold Coffee").unwrap();
        // No override: category default applies
        assert_eq!(coffee.tax_rate_bps, 1200);
        assert_eq!(coffee.unit_price_cents, 12000);

        let cola = menu.iter().find(|e| e.name == "Coca Cola").unwrap();
        // Explicit zero override beats the category default
        assert_eq!(cola.tax_rate_bps, 0);

        let delivery = catalog.list_menu(PriceMode::Delivery).await.unwrap();
        let coffee = delivery.iter().find(|e| e.name == "Cold Coffee").unwrap();
        assert_eq!(coffee.unit_price_cents, 13000);

        assert_eq!(drinks.tax_rate_bps, 1200);
    }

    #[tokio::test]
    async fn duplicate_category_is_a_typed_error() {
        let db = test_db().await;
        let catalog = db.catalog();

        catalog.add_category("FOOD", 500).await.unwrap();
        let err = catalog.add_category("FOOD", 500).await.unwrap_err();
        assert!(err.is_unique_violation());
    }

    #[tokio::test]
    async fn uncategorized_item_defaults_to_zero_tax() {
        let db = test_db().await;
        let catalog = db.catalog();

        catalog
            .add_item("Mystery Special", None, 9900, 9900, None, None)
            .await
            .unwrap();

        let menu = catalog.list_menu(PriceMode::DineIn).await.unwrap();
        assert_eq!(menu[0].tax_rate_bps, 0);
        assert_eq!(menu[0].category, "");
    }

    #[tokio::test]
    async fn delete_item_and_category() {
        let db = test_db().await;
        let catalog = db.catalog();

        let cat = catalog.add_category("SNACKS", 500).await.unwrap();
        let item = catalog
            .add_item("French Fries", Some("SNACKS"), 9000, 10000, None, None)
            .await
            .unwrap();

        catalog.delete_item(&item.id).await.unwrap();
        assert!(catalog.list_items().await.unwrap().is_empty());

        catalog.delete_category(&cat.id).await.unwrap();
        assert!(matches!(
            catalog.delete_category(&cat.id).await,
            Err(DbError::NotFound { .. })
        ));
    }
}
