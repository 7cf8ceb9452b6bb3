//! Menu pages: home, category and dish

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Serialize;
use shared::payload::{CategoryPayload, DishPayload};
use tower_cookies::Cookies;

use super::layout::Layout;
use crate::age_gate::RouteName;
use crate::core::ServerState;
use crate::db::repository::{category, dish};
use crate::locale::Message;
use crate::utils::flash::{self, FlashLevel};
use crate::utils::urls::with_next;
use crate::utils::{AppError, AppResult, ErrorCode};

/// Number of dishes in the home page carousel
const POPULAR_LIMIT: i64 = 12;

#[derive(Serialize)]
struct HomeContext {
    categories: Vec<CategoryPayload>,
    popular_dishes: Vec<DishPayload>,
    /// A 21+ category exists and the visitor has not confirmed their age
    age_locked: bool,
}

#[derive(Serialize)]
struct CategoryContext {
    category: CategoryPayload,
    background_url: Option<String>,
}

#[derive(Serialize)]
struct DishContext {
    dish: DishPayload,
    background_url: Option<String>,
}

/// Warn and send 21+ content to the age page, coming back here afterwards
fn age_redirect(layout: &Layout, cookies: &Cookies, back: &str) -> Response {
    flash::push(cookies, FlashLevel::Warning, Message::AgeContent.text(layout.lang));
    Redirect::to(&with_next(&RouteName::AgeGate.url(layout.lang, None), back)).into_response()
}

/// GET / and GET /categories/
pub async fn home(State(state): State<ServerState>, layout: Layout) -> AppResult<Response> {
    let presenter = &layout.presenter;
    let pool = state.pool();

    let mut categories = Vec::new();
    for c in category::find_all(pool).await? {
        categories.push(presenter.load_category(pool, &c).await?);
    }

    let popular_dishes = dish::find_popular(pool, POPULAR_LIMIT)
        .await?
        .iter()
        .map(|d| presenter.dish(d, None))
        .collect();

    let age_locked = category::any_21plus(pool).await? && !layout.age_verified;

    Ok(layout.render(
        "menu/home.html",
        HomeContext {
            categories,
            popular_dishes,
            age_locked,
        },
    ))
}

/// GET /categories/{slug}/
pub async fn category_detail(
    State(state): State<ServerState>,
    cookies: Cookies,
    layout: Layout,
    Path(slug): Path<String>,
) -> AppResult<Response> {
    let category = category::find_by_slug(state.pool(), &slug)
        .await?
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::CategoryNotFound, format!("Category {slug} not found"))
        })?;

    if category.locked(layout.age_verified) {
        let back = RouteName::CategoryDetail.url(layout.lang, Some(&category.slug));
        return Ok(age_redirect(&layout, &cookies, &back));
    }

    let payload = layout.presenter.load_category(state.pool(), &category).await?;
    let background_url = payload.cover_background_url.clone();
    Ok(layout.render(
        "menu/category.html",
        CategoryContext {
            category: payload,
            background_url,
        },
    ))
}

/// GET /dishes/{slug}/
pub async fn dish_detail(
    State(state): State<ServerState>,
    cookies: Cookies,
    layout: Layout,
    Path(slug): Path<String>,
) -> AppResult<Response> {
    let dish = dish::find_by_slug(state.pool(), &slug)
        .await?
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::DishNotFound, format!("Dish {slug} not found"))
        })?;

    if dish.locked(layout.age_verified) {
        let back = RouteName::DishDetail.url(layout.lang, Some(&dish.slug));
        return Ok(age_redirect(&layout, &cookies, &back));
    }

    let payload = layout.presenter.load_dish(state.pool(), &dish).await?;
    let background_url = payload.cover_background_url.clone();
    Ok(layout.render(
        "menu/dish.html",
        DishContext {
            dish: payload,
            background_url,
        },
    ))
}
