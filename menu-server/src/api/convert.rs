//! Catalog payloads
//!
//! Turns `shared` catalog models into the language-resolved payloads served
//! by the JSON API and embedded in page contexts.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use http::request::Parts;
use shared::Lang;
use shared::models::{Category, Dish};
use shared::payload::{CategoryPayload, DishPayload};
use sqlx::SqlitePool;
use tower_cookies::Cookies;

use crate::age_gate::is_age_verified;
use crate::core::ServerState;
use crate::db::repository::{RepoResult, category, dish};
use crate::utils::urls::RequestUrls;

/// Request-scoped view settings: language, age confirmation and URL origin
#[derive(Debug, Clone)]
pub struct Presenter {
    pub lang: Lang,
    pub age_verified: bool,
    pub urls: RequestUrls,
}

impl Presenter {
    pub fn new(lang: Lang, age_verified: bool, urls: RequestUrls) -> Self {
        Self {
            lang,
            age_verified,
            urls,
        }
    }

    /// `cover` is the stored path from [`category::cover_image`]
    pub fn category(
        &self,
        category: &Category,
        cover: Option<&str>,
        dishes: Vec<DishPayload>,
    ) -> CategoryPayload {
        CategoryPayload {
            id: category.id,
            slug: category.slug.clone(),
            name: category.display_name(self.lang).to_string(),
            description: category.display_description(self.lang).to_string(),
            position: category.position,
            show_in_nav: category.show_in_nav,
            nav_position: category.nav_position,
            image_url: self.urls.media(category.image.as_deref()),
            cover_background_url: self.urls.media(cover),
            requires_21: category.requires_21(),
            locked: category.locked(self.age_verified),
            dishes,
            lang: self.lang,
        }
    }

    /// `category_cover` is the owning category's stored cover path
    pub fn dish(&self, dish: &Dish, category_cover: Option<&str>) -> DishPayload {
        let passport_bg_url = self.urls.media(dish.passport_bg.as_deref());
        DishPayload {
            id: dish.id,
            category_id: dish.category_id,
            slug: dish.slug.clone(),
            name: dish.display_name(self.lang).to_string(),
            description: dish.display_description(self.lang).to_string(),
            price: dish.price,
            is_available: dish.is_available,
            position: dish.position,
            image_url: self.urls.media(dish.image.as_deref()),
            cover_background_url: passport_bg_url
                .clone()
                .or_else(|| self.urls.media(category_cover)),
            passport_bg_url,
            requires_21: dish.requires_21,
            locked: dish.locked(self.age_verified),
            lang: self.lang,
        }
    }

    /// Category with its available dishes
    pub async fn load_category(
        &self,
        pool: &SqlitePool,
        category: &Category,
    ) -> RepoResult<CategoryPayload> {
        let cover = category::cover_image(pool, category).await;
        let dishes = dish::find_by_category(pool, category.id, true)
            .await?
            .iter()
            .map(|d| self.dish(d, cover.as_deref()))
            .collect();
        Ok(self.category(category, cover.as_deref(), dishes))
    }

    /// Dish with its category's cover as background fallback
    pub async fn load_dish(&self, pool: &SqlitePool, dish: &Dish) -> RepoResult<DishPayload> {
        let cover = match category::find_by_id(pool, dish.category_id).await? {
            Some(category) => category::cover_image(pool, &category).await,
            None => None,
        };
        Ok(self.dish(dish, cover.as_deref()))
    }
}

impl FromRequestParts<ServerState> for Presenter {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        let lang = parts.extensions.get::<Lang>().copied().unwrap_or_default();
        let age_verified = parts
            .extensions
            .get::<Cookies>()
            .is_some_and(is_age_verified);
        let urls = RequestUrls::from_headers(&state.config, &parts.headers);
        Ok(Self::new(lang, age_verified, urls))
    }
}
