//! Customer order pages: cart, add, submit to kitchen

use axum::{
    Extension,
    extract::{Path, State},
    response::Response,
};
use serde::Serialize;
use shared::Lang;
use shared::payload::{OrderActionResponse, OrderSummary};
use tower_cookies::Cookies;

use super::layout::Layout;
use super::respond::Reply;
use crate::age_gate::{AgeVerified, RouteName};
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::locale::Message;
use crate::utils::format::ResponseFormat;

#[derive(Serialize)]
struct OrderContext {
    order: Option<OrderSummary>,
}

/// GET /order/
///
/// Shows the user's latest order that is still `new` or in the kitchen.
pub async fn view_order(_user: CurrentUser, layout: Layout) -> Response {
    let order = layout.cart_order.clone();
    layout.render("order/order.html", OrderContext { order })
}

/// POST /order/add/{dish_id}/
pub async fn add_to_order(
    State(state): State<ServerState>,
    user: CurrentUser,
    AgeVerified(age_verified): AgeVerified,
    format: ResponseFormat,
    Extension(lang): Extension<Lang>,
    cookies: Cookies,
    Path(dish_id): Path<i64>,
) -> Response {
    let reply = Reply {
        format,
        lang,
        cookies: &cookies,
    };
    match state.orders().add_item(&user, dish_id, age_verified).await {
        Ok(added) => reply.success(
            OrderActionResponse::success(added.order_id, added.status)
                .with_item(added.item_id, added.quantity),
            Message::AddedToOrder,
            RouteName::ViewOrder,
        ),
        Err(err) => reply.failure(err),
    }
}

/// POST /order/finalize/
pub async fn finalize(
    State(state): State<ServerState>,
    user: CurrentUser,
    format: ResponseFormat,
    Extension(lang): Extension<Lang>,
    cookies: Cookies,
) -> Response {
    let reply = Reply {
        format,
        lang,
        cookies: &cookies,
    };
    match state.orders().finalize(&user).await {
        Ok((order_id, status)) => reply.success(
            OrderActionResponse::success(order_id, status),
            Message::SentToKitchen,
            RouteName::Home,
        ),
        Err(err) => reply.failure(err),
    }
}
