//! Catalog Management Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{Category, CategoryCreate, CategoryUpdate, Dish, DishCreate, DishUpdate};

use crate::auth::StaffUser;
use crate::core::ServerState;
use crate::db::repository::{category, dish};
use crate::security_log;
use crate::utils::validation::{
    MAX_DESCRIPTION_LEN, MAX_NAME_LEN, MAX_URL_LEN, validate_localized, validate_optional_text,
    validate_position,
};
use crate::utils::{AppError, AppResult, ErrorCode};

fn category_not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::CategoryNotFound, format!("Category {id} not found"))
}

fn dish_not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::DishNotFound, format!("Dish {id} not found"))
}

fn validate_category_fields(
    name: Option<&shared::LocalizedText>,
    description: Option<&shared::LocalizedText>,
    image: &Option<String>,
    position: Option<i32>,
    nav_position: Option<i32>,
) -> AppResult<()> {
    if let Some(name) = name {
        validate_localized(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(description) = description {
        validate_localized(description, "description", MAX_DESCRIPTION_LEN)?;
    }
    validate_optional_text(image, "image", MAX_URL_LEN)?;
    validate_position(position, "position")?;
    validate_position(nav_position, "nav_position")?;
    Ok(())
}

fn validate_dish_fields(
    name: Option<&shared::LocalizedText>,
    description: Option<&shared::LocalizedText>,
    image: &Option<String>,
    passport_bg: &Option<String>,
    position: Option<i32>,
) -> AppResult<()> {
    if let Some(name) = name {
        validate_localized(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(description) = description {
        validate_localized(description, "description", MAX_DESCRIPTION_LEN)?;
    }
    validate_optional_text(image, "image", MAX_URL_LEN)?;
    validate_optional_text(passport_bg, "passport_bg", MAX_URL_LEN)?;
    validate_position(position, "position")?;
    Ok(())
}

// ==================== Categories ====================

/// GET /api/manage/categories
pub async fn list_categories(State(state): State<ServerState>) -> AppResult<Json<Vec<Category>>> {
    Ok(Json(category::find_all(state.pool()).await?))
}

/// GET /api/manage/categories/{id}
pub async fn get_category(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Category>> {
    let category = category::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| category_not_found(id))?;
    Ok(Json(category))
}

/// POST /api/manage/categories
pub async fn create_category(
    State(state): State<ServerState>,
    StaffUser(staff): StaffUser,
    Json(payload): Json<CategoryCreate>,
) -> AppResult<Json<Category>> {
    validate_category_fields(
        Some(&payload.name),
        Some(&payload.description),
        &payload.image,
        payload.position,
        payload.nav_position,
    )?;

    let category = category::create(state.pool(), payload).await?;
    security_log!(
        "INFO",
        "category_created",
        staff = staff.username.as_str(),
        category_id = category.id,
        slug = category.slug.as_str()
    );
    Ok(Json(category))
}

/// PUT /api/manage/categories/{id}
pub async fn update_category(
    State(state): State<ServerState>,
    StaffUser(staff): StaffUser,
    Path(id): Path<i64>,
    Json(payload): Json<CategoryUpdate>,
) -> AppResult<Json<Category>> {
    validate_category_fields(
        payload.name.as_ref(),
        payload.description.as_ref(),
        &payload.image,
        payload.position,
        payload.nav_position,
    )?;

    let category = category::update(state.pool(), id, payload).await?;
    security_log!(
        "INFO",
        "category_updated",
        staff = staff.username.as_str(),
        category_id = id
    );
    Ok(Json(category))
}

/// DELETE /api/manage/categories/{id}
pub async fn delete_category(
    State(state): State<ServerState>,
    StaffUser(staff): StaffUser,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let deleted = category::delete(state.pool(), id).await?;
    security_log!(
        "INFO",
        "category_deleted",
        staff = staff.username.as_str(),
        category_id = id
    );
    Ok(Json(deleted))
}

// ==================== Dishes ====================

/// GET /api/manage/dishes
pub async fn list_dishes(State(state): State<ServerState>) -> AppResult<Json<Vec<Dish>>> {
    Ok(Json(dish::find_all(state.pool(), false).await?))
}

/// GET /api/manage/dishes/{id}
pub async fn get_dish(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Dish>> {
    let dish = dish::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| dish_not_found(id))?;
    Ok(Json(dish))
}

/// POST /api/manage/dishes
pub async fn create_dish(
    State(state): State<ServerState>,
    StaffUser(staff): StaffUser,
    Json(payload): Json<DishCreate>,
) -> AppResult<Json<Dish>> {
    validate_dish_fields(
        Some(&payload.name),
        Some(&payload.description),
        &payload.image,
        &payload.passport_bg,
        payload.position,
    )?;
    if category::find_by_id(state.pool(), payload.category_id)
        .await?
        .is_none()
    {
        return Err(category_not_found(payload.category_id));
    }

    let dish = dish::create(state.pool(), payload).await?;
    security_log!(
        "INFO",
        "dish_created",
        staff = staff.username.as_str(),
        dish_id = dish.id,
        slug = dish.slug.as_str()
    );
    Ok(Json(dish))
}

/// PUT /api/manage/dishes/{id}
pub async fn update_dish(
    State(state): State<ServerState>,
    StaffUser(staff): StaffUser,
    Path(id): Path<i64>,
    Json(payload): Json<DishUpdate>,
) -> AppResult<Json<Dish>> {
    validate_dish_fields(
        payload.name.as_ref(),
        payload.description.as_ref(),
        &payload.image,
        &payload.passport_bg,
        payload.position,
    )?;
    if let Some(category_id) = payload.category_id
        && category::find_by_id(state.pool(), category_id)
            .await?
            .is_none()
    {
        return Err(category_not_found(category_id));
    }

    let dish = dish::update(state.pool(), id, payload).await?;
    security_log!(
        "INFO",
        "dish_updated",
        staff = staff.username.as_str(),
        dish_id = id
    );
    Ok(Json(dish))
}

/// DELETE /api/manage/dishes/{id}
pub async fn delete_dish(
    State(state): State<ServerState>,
    StaffUser(staff): StaffUser,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let deleted = dish::delete(state.pool(), id).await?;
    security_log!(
        "INFO",
        "dish_deleted",
        staff = staff.username.as_str(),
        dish_id = id
    );
    Ok(Json(deleted))
}
