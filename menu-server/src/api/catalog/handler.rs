//! Catalog API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::payload::{CategoryPayload, DishPayload};

use crate::api::convert::Presenter;
use crate::core::ServerState;
use crate::db::repository::{category, dish};
use crate::utils::{AppError, AppResult, ErrorCode};

/// GET /api/categories/
pub async fn list_categories(
    State(state): State<ServerState>,
    presenter: Presenter,
) -> AppResult<Json<Vec<CategoryPayload>>> {
    let categories = category::find_all(state.pool()).await?;
    let mut payloads = Vec::with_capacity(categories.len());
    for c in &categories {
        payloads.push(presenter.load_category(state.pool(), c).await?);
    }
    Ok(Json(payloads))
}

/// GET /api/categories/{slug}/
pub async fn get_category(
    State(state): State<ServerState>,
    presenter: Presenter,
    Path(slug): Path<String>,
) -> AppResult<Json<CategoryPayload>> {
    let category = category::find_by_slug(state.pool(), &slug)
        .await?
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::CategoryNotFound, format!("Category {slug} not found"))
        })?;
    Ok(Json(presenter.load_category(state.pool(), &category).await?))
}

/// GET /api/dishes/{slug}/
pub async fn get_dish(
    State(state): State<ServerState>,
    presenter: Presenter,
    Path(slug): Path<String>,
) -> AppResult<Json<DishPayload>> {
    let dish = dish::find_by_slug(state.pool(), &slug)
        .await?
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::DishNotFound, format!("Dish {slug} not found"))
        })?;
    Ok(Json(presenter.load_dish(state.pool(), &dish).await?))
}
