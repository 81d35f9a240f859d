//! Menu catalog handlers.
//!
//! Thin wrappers over [`dhaba_db::MenuRepository`]: validate input, call
//! the repository, map errors. No caching; every mutation is immediately
//! visible to the next read.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::info;

use dhaba_core::{validation, CoreError, MenuItem, MenuItemPatch, NewMenuItem};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// `GET /menu` - the full catalog, ordered by item id.
pub async fn list_menu(State(state): State<AppState>) -> ApiResult<Json<Vec<MenuItem>>> {
    let items = state.db.menu().list().await?;
    Ok(Json(items))
}

/// `GET /menu/{item_id}` - a single catalog entry.
pub async fn get_menu_item(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
) -> ApiResult<Json<MenuItem>> {
    let item = state
        .db
        .menu()
        .get_by_item_id(&item_id)
        .await?
        .ok_or_else(|| ApiError::from(CoreError::MenuItemNotFound(item_id)))?;

    Ok(Json(item))
}

/// `POST /menu` - create a catalog entry.
///
/// `item_id` is optional; one is generated when omitted. A duplicate
/// `item_id` is a 409.
pub async fn create_menu_item(
    State(state): State<AppState>,
    Json(new_item): Json<NewMenuItem>,
) -> ApiResult<(StatusCode, Json<MenuItem>)> {
    if let Some(ref item_id) = new_item.item_id {
        validation::validate_item_id(item_id).map_err(CoreError::from)?;
    }
    validation::validate_item_name(&new_item.name).map_err(CoreError::from)?;
    validation::validate_unit_price_cents(new_item.price_cents).map_err(CoreError::from)?;

    let item = state.db.menu().insert(new_item).await?;
    info!(item_id = %item.item_id, "Menu item created");

    Ok((StatusCode::CREATED, Json(item)))
}

/// `PUT /menu/{item_id}` - partial update.
///
/// Fields absent from the body are left unchanged. An empty patch is a 400.
pub async fn update_menu_item(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
    Json(patch): Json<MenuItemPatch>,
) -> ApiResult<Json<MenuItem>> {
    if patch.is_empty() {
        return Err(ApiError::validation("No fields to update"));
    }
    if let Some(ref name) = patch.name {
        validation::validate_item_name(name).map_err(CoreError::from)?;
    }
    if let Some(price_cents) = patch.price_cents {
        validation::validate_unit_price_cents(price_cents).map_err(CoreError::from)?;
    }

    let item = state.db.menu().update(&item_id, patch).await?;
    info!(item_id = %item.item_id, "Menu item updated");

    Ok(Json(item))
}

/// `DELETE /menu/{item_id}` - hard delete.
///
/// Recorded transactions are untouched: their line items are snapshots.
pub async fn delete_menu_item(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
) -> ApiResult<StatusCode> {
    state.db.menu().delete(&item_id).await?;
    info!(item_id = %item_id, "Menu item deleted");

    Ok(StatusCode::NO_CONTENT)
}
