//! Age confirmation pages

use axum::{
    Extension, Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use shared::Lang;
use tower_cookies::Cookies;

use super::account::NextQuery;
use super::layout::Layout;
use crate::age_gate::RouteName;
use crate::age_gate::confirm_age;
use crate::age_gate::redirect::{next_or, safe_next};
use crate::core::ServerState;
use crate::locale::Message;
use crate::security_log;
use crate::utils::flash::{self, FlashLevel};

#[derive(Serialize)]
struct AgeContext<'a> {
    /// Where the confirm form returns to; dropped when not a local path
    next: Option<&'a str>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ConfirmForm {
    #[serde(default)]
    pub next: Option<String>,
}

/// GET /age/
pub async fn age_page(layout: Layout, Query(query): Query<NextQuery>) -> Response {
    let next = safe_next(query.next.as_deref());
    layout.render("age/gate.html", AgeContext { next })
}

/// POST /age/confirm/
pub async fn age_confirm(
    State(state): State<ServerState>,
    cookies: Cookies,
    Extension(lang): Extension<Lang>,
    Form(form): Form<ConfirmForm>,
) -> Response {
    confirm_age(&cookies, state.config.is_production());
    security_log!("INFO", "age_confirmed");

    let target = next_or(form.next.as_deref(), &RouteName::Home.url(lang, None));
    flash::push(&cookies, FlashLevel::Success, Message::AgeConfirmed.text(lang));
    Redirect::to(&target).into_response()
}
