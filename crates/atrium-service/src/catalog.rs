//! # Catalog Administration
//!
//! Menu listing for the order screens and the admin CRUD behind the menu
//! manager.

use atrium_core::validation::{validate_name, validate_price};
use atrium_core::{Category, MenuEntry, MenuItem, PriceMode};
use atrium_db::Database;

use crate::error::ServiceResult;

/// Menu listing and catalog administration.
#[derive(Clone)]
pub struct CatalogService {
    db: Database,
}

impl CatalogService {
    pub fn new(db: Database) -> Self {
        CatalogService { db }
    }

    /// The orderable menu for one price mode.
    pub async fn menu(&self, mode: PriceMode) -> ServiceResult<Vec<MenuEntry>> {
        Ok(self.db.catalog().list_menu(mode).await?)
    }

    pub async fn items(&self) -> ServiceResult<Vec<MenuItem>> {
        Ok(self.db.catalog().list_items().await?)
    }

    pub async fn add_item(
        &self,
        name: &str,
        category_name: Option<&str>,
        dine_in_price_cents: i64,
        delivery_price_cents: i64,
        image_path: Option<&str>,
        tax_rate_bps: Option<u32>,
    ) -> ServiceResult<MenuItem> {
        validate_name("item name", name)?;
        validate_price("dine-in price", dine_in_price_cents)?;
        validate_price("delivery price", delivery_price_cents)?;

        Ok(self
            .db
            .catalog()
            .add_item(
                name,
                category_name,
                dine_in_price_cents,
                delivery_price_cents,
                image_path,
                tax_rate_bps,
            )
            .await?)
    }

    pub async fn delete_item(&self, id: &str) -> ServiceResult<()> {
        Ok(self.db.catalog().delete_item(id).await?)
    }

    pub async fn categories(&self) -> ServiceResult<Vec<Category>> {
        Ok(self.db.catalog().list_categories().await?)
    }

    pub async fn add_category(&self, name: &str, tax_rate_bps: u32) -> ServiceResult<Category> {
        validate_name("category name", name)?;
        Ok(self.db.catalog().add_category(name, tax_rate_bps).await?)
    }

    pub async fn delete_category(&self, id: &str) -> ServiceResult<()> {
        Ok(self.db.catalog().delete_category(id).await?)
    }

    pub async fn update_category_tax(&self, id: &str, tax_rate_bps: u32) -> ServiceResult<()> {
        Ok(self.db.catalog().update_category_tax(id, tax_rate_bps).await?)
    }
}
