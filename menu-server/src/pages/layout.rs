//! Page layout context
//!
//! Every page is answered with its template name, the layout context shared
//! by all pages and the page's own context, as one JSON object:
//!
//! ```json
//! {
//!   "template": "menu/category.html",
//!   "lang": "kk",
//!   "lang_choices": [...],
//!   "nav_categories": [...],
//!   "cart_order": null,
//!   "brand_contacts": {"whatsapp": "..."},
//!   "age_verified": false,
//!   "user": null,
//!   "flash": {"level": "warning", "message": "..."},
//!   "category": {...}
//! }
//! ```

use axum::{
    Json,
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use shared::Lang;
use shared::payload::{CategoryPayload, OrderSummary};
use tower_cookies::Cookies;

use crate::api::convert::Presenter;
use crate::auth::{CurrentUser, MaybeUser};
use crate::core::{BrandContacts, ServerState};
use crate::db::repository::category;
use crate::locale::{self, LangChoice};
use crate::utils::AppError;
use crate::utils::flash::{self, Flash};

/// Signed-in user as shown in the page header
#[derive(Debug, Clone, Serialize)]
pub struct UserInfo {
    pub id: i64,
    pub username: String,
    pub is_staff: bool,
}

impl From<&CurrentUser> for UserInfo {
    fn from(user: &CurrentUser) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            is_staff: user.is_privileged(),
        }
    }
}

/// Context every page receives
#[derive(Debug, Clone, Serialize)]
pub struct Layout {
    pub lang: Lang,
    pub lang_choices: Vec<LangChoice>,
    /// Language prefix for building links (`""`, `/kk`, `/en`)
    pub lang_prefix: &'static str,
    pub nav_categories: Vec<CategoryPayload>,
    /// The signed-in user's latest open order
    pub cart_order: Option<OrderSummary>,
    pub brand_contacts: BrandContacts,
    pub age_verified: bool,
    pub user: Option<UserInfo>,
    pub flash: Option<Flash>,
    #[serde(skip)]
    pub presenter: Presenter,
}

impl Layout {
    pub fn render<T: Serialize>(self, template: &'static str, context: T) -> Response {
        Json(Page {
            template,
            layout: self,
            context,
        })
        .into_response()
    }
}

#[derive(Serialize)]
struct Page<T> {
    template: &'static str,
    #[serde(flatten)]
    layout: Layout,
    #[serde(flatten)]
    context: T,
}

impl FromRequestParts<ServerState> for Layout {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        let presenter = Presenter::from_request_parts(parts, state)
            .await
            .unwrap_or_else(|never| match never {});
        let MaybeUser(user) = MaybeUser::from_request_parts(parts, state)
            .await
            .unwrap_or_else(|never| match never {});
        let flash = parts.extensions.get::<Cookies>().and_then(flash::take);

        let nav_categories = category::find_nav(state.pool())
            .await?
            .iter()
            .map(|c| presenter.category(c, None, Vec::new()))
            .collect();

        let cart_order = match &user {
            Some(user) => state
                .orders()
                .open_order(user.id)
                .await?
                .map(|order| OrderSummary::from_order(&order, presenter.lang)),
            None => None,
        };

        Ok(Self {
            lang: presenter.lang,
            lang_choices: locale::choices(),
            lang_prefix: locale::prefix(presenter.lang),
            nav_categories,
            cart_order,
            brand_contacts: state.config.brand_contacts.clone(),
            age_verified: presenter.age_verified,
            user: user.as_ref().map(UserInfo::from),
            flash,
            presenter,
        })
    }
}
