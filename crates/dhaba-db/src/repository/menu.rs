//! # Menu Repository
//!
//! Database operations for the menu catalog.
//!
//! ## Key Operations
//! - List / get by business id
//! - Insert with optional generated item id
//! - Partial update via COALESCE
//! - Hard delete
//!
//! ## Dual-Key Lookups
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Which Key Is Used Where                              │
//! │                                                                         │
//! │  REST surface / receipts:  item_id  ("ITEM001", human-readable)        │
//! │  Row identity / relations: id       (UUID v4, never exposed in URLs)   │
//! │                                                                         │
//! │  All repository methods key on item_id because that is what the        │
//! │  API routes carry. The UUID exists for joins and future sync.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use dhaba_core::{MenuItem, MenuItemPatch, NewMenuItem};

/// Repository for menu catalog operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = MenuRepository::new(pool);
///
/// let items = repo.list().await?;
/// let item = repo.get_by_item_id("ITEM001").await?;
/// ```
#[derive(Debug, Clone)]
pub struct MenuRepository {
    pool: SqlitePool,
}

/// All columns of `menu_items`, in struct field order.
const MENU_COLUMNS: &str =
    "id, item_id, name, price_cents, category, description, created_at, updated_at";

impl MenuRepository {
    /// Creates a new MenuRepository.
    pub fn new(pool: SqlitePool) -> Self {
        MenuRepository { pool }
    }

    /// Lists the full catalog, ordered by item id.
    ///
    /// The catalog is small (tens of items), so there is no pagination here.
    pub async fn list(&self) -> DbResult<Vec<MenuItem>> {
        let items = sqlx::query_as::<_, MenuItem>(&format!(
            "SELECT {MENU_COLUMNS} FROM menu_items ORDER BY item_id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        debug!(count = items.len(), "Listed menu items");
        Ok(items)
    }

    /// Gets a menu item by its business id.
    ///
    /// ## Returns
    /// * `Ok(Some(MenuItem))` - Item found
    /// * `Ok(None)` - Item not found
    pub async fn get_by_item_id(&self, item_id: &str) -> DbResult<Option<MenuItem>> {
        let item = sqlx::query_as::<_, MenuItem>(&format!(
            "SELECT {MENU_COLUMNS} FROM menu_items WHERE item_id = ?1"
        ))
        .bind(item_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Inserts a new menu item.
    ///
    /// When `item_id` is omitted one is generated from the current epoch
    /// millis ("ITEM1756540800123"), matching the legacy admin panel.
    ///
    /// ## Returns
    /// * `Ok(MenuItem)` - Inserted item with generated fields
    /// * `Err(DbError::UniqueViolation)` - Item id already exists
    pub async fn insert(&self, new_item: NewMenuItem) -> DbResult<MenuItem> {
        let now = Utc::now();
        let item_id = match new_item.item_id {
            Some(item_id) => item_id,
            None => format!("ITEM{}", now.timestamp_millis()),
        };

        debug!(item_id = %item_id, "Inserting menu item");

        let item = MenuItem {
            id: Uuid::new_v4().to_string(),
            item_id,
            name: new_item.name,
            price_cents: new_item.price_cents,
            category: new_item.category,
            description: new_item.description,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(&format!(
            "INSERT INTO menu_items ({MENU_COLUMNS}) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"
        ))
        .bind(&item.id)
        .bind(&item.item_id)
        .bind(&item.name)
        .bind(item.price_cents)
        .bind(&item.category)
        .bind(&item.description)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(item)
    }

    /// Applies a partial update to a menu item.
    ///
    /// Fields left as `None` in the patch keep their current values
    /// (COALESCE on the SQL side).
    ///
    /// ## Returns
    /// * `Ok(MenuItem)` - The updated item
    /// * `Err(DbError::NotFound)` - Item doesn't exist
    pub async fn update(&self, item_id: &str, patch: MenuItemPatch) -> DbResult<MenuItem> {
        debug!(item_id = %item_id, "Updating menu item");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE menu_items SET
                name = COALESCE(?2, name),
                price_cents = COALESCE(?3, price_cents),
                category = COALESCE(?4, category),
                description = COALESCE(?5, description),
                updated_at = ?6
            WHERE item_id = ?1
            "#,
        )
        .bind(item_id)
        .bind(&patch.name)
        .bind(patch.price_cents)
        .bind(&patch.category)
        .bind(&patch.description)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Menu item", item_id));
        }

        self.get_by_item_id(item_id)
            .await?
            .ok_or_else(|| DbError::not_found("Menu item", item_id))
    }

    /// Deletes a menu item.
    ///
    /// Hard delete: past transactions are unaffected because their line
    /// items are snapshots, not references.
    ///
    /// ## Returns
    /// * `Ok(())` - Item deleted
    /// * `Err(DbError::NotFound)` - Item doesn't exist
    pub async fn delete(&self, item_id: &str) -> DbResult<()> {
        debug!(item_id = %item_id, "Deleting menu item");

        let result = sqlx::query("DELETE FROM menu_items WHERE item_id = ?1")
            .bind(item_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Menu item", item_id));
        }

        Ok(())
    }

    /// Counts catalog entries (for diagnostics and seeding).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM menu_items")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
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

    fn new_item(item_id: Option<&str>, name: &str, price_cents: i64) -> NewMenuItem {
        NewMenuItem {
            item_id: item_id.map(String::from),
            name: name.to_string(),
            price_cents,
            category: Some("Main Course".to_string()),
            description: None,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = test_db().await;
        let repo = db.menu();

        let inserted = repo
            .insert(new_item(Some("ITEM001"), "Butter Chicken", 25000))
            .await
            .unwrap();
        assert_eq!(inserted.item_id, "ITEM001");
        assert_eq!(inserted.price_cents, 25000);

        let fetched = repo.get_by_item_id("ITEM001").await.unwrap().unwrap();
        assert_eq!(fetched.name, "Butter Chicken");
        assert_eq!(fetched.id, inserted.id);
    }

    #[tokio::test]
    async fn test_insert_generates_item_id_when_omitted() {
        let db = test_db().await;
        let repo = db.menu();

        let inserted = repo.insert(new_item(None, "Naan", 3000)).await.unwrap();
        assert!(inserted.item_id.starts_with("ITEM"));
        assert!(inserted.item_id.len() > "ITEM".len());
    }

    #[tokio::test]
    async fn test_insert_duplicate_item_id_is_unique_violation() {
        let db = test_db().await;
        let repo = db.menu();

        repo.insert(new_item(Some("ITEM001"), "Naan", 3000))
            .await
            .unwrap();
        let err = repo
            .insert(new_item(Some("ITEM001"), "Garlic Naan", 4000))
            .await
            .unwrap_err();

        assert!(err.is_unique_violation_on("item_id"), "got: {err:?}");
    }

    #[tokio::test]
    async fn test_list_ordered_by_item_id() {
        let db = test_db().await;
        let repo = db.menu();

        repo.insert(new_item(Some("ITEM003"), "Masala Chai", 2000))
            .await
            .unwrap();
        repo.insert(new_item(Some("ITEM001"), "Butter Chicken", 25000))
            .await
            .unwrap();
        repo.insert(new_item(Some("ITEM002"), "Naan", 3000))
            .await
            .unwrap();

        let items = repo.list().await.unwrap();
        let ids: Vec<&str> = items.iter().map(|i| i.item_id.as_str()).collect();
        assert_eq!(ids, vec!["ITEM001", "ITEM002", "ITEM003"]);
    }

    #[tokio::test]
    async fn test_partial_update_keeps_unset_fields() {
        let db = test_db().await;
        let repo = db.menu();

        repo.insert(new_item(Some("ITEM001"), "Butter Chicken", 25000))
            .await
            .unwrap();

        let patch = MenuItemPatch {
            price_cents: Some(26000),
            ..Default::default()
        };
        let updated = repo.update("ITEM001", patch).await.unwrap();

        assert_eq!(updated.price_cents, 26000);
        assert_eq!(updated.name, "Butter Chicken");
        assert_eq!(updated.category.as_deref(), Some("Main Course"));
    }

    #[tokio::test]
    async fn test_update_missing_item_is_not_found() {
        let db = test_db().await;
        let repo = db.menu();

        let err = repo
            .update("ITEM404", MenuItemPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_then_get_returns_none() {
        let db = test_db().await;
        let repo = db.menu();

        repo.insert(new_item(Some("ITEM001"), "Naan", 3000))
            .await
            .unwrap();
        repo.delete("ITEM001").await.unwrap();

        assert!(repo.get_by_item_id("ITEM001").await.unwrap().is_none());

        let err = repo.delete("ITEM001").await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
