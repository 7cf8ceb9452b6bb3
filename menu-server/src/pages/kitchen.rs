//! Kitchen board: staff-only queue with accept / ready actions

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
use crate::age_gate::RouteName;
use crate::auth::StaffUser;
use crate::core::ServerState;
use crate::locale::Message;
use crate::utils::AppResult;
use crate::utils::format::ResponseFormat;

#[derive(Serialize)]
struct KitchenContext {
    orders: Vec<OrderSummary>,
}

/// GET /kitchen/
pub async fn kitchen_orders(
    State(state): State<ServerState>,
    _staff: StaffUser,
    layout: Layout,
) -> AppResult<Response> {
    let orders = state
        .orders()
        .kitchen_queue()
        .await?
        .iter()
        .map(|order| OrderSummary::from_order(order, layout.lang))
        .collect();
    Ok(layout.render("kitchen/orders.html", KitchenContext { orders }))
}

/// POST /kitchen/accept/{order_id}/
pub async fn mark_accept(
    State(state): State<ServerState>,
    StaffUser(staff): StaffUser,
    format: ResponseFormat,
    Extension(lang): Extension<Lang>,
    cookies: Cookies,
    Path(order_id): Path<i64>,
) -> Response {
    let reply = Reply {
        format,
        lang,
        cookies: &cookies,
    };
    match state.orders().accept(&staff, order_id).await {
        Ok(status) => reply.success(
            OrderActionResponse::success(order_id, status),
            Message::OrderAccepted,
            RouteName::KitchenOrders,
        ),
        Err(err) => reply.failure(err),
    }
}

/// POST /kitchen/ready/{order_id}/
pub async fn mark_ready(
    State(state): State<ServerState>,
    StaffUser(staff): StaffUser,
    format: ResponseFormat,
    Extension(lang): Extension<Lang>,
    cookies: Cookies,
    Path(order_id): Path<i64>,
) -> Response {
    let reply = Reply {
        format,
        lang,
        cookies: &cookies,
    };
    match state.orders().mark_ready(&staff, order_id).await {
        Ok(status) => reply.success(
            OrderActionResponse::success(order_id, status),
            Message::OrderReady,
            RouteName::KitchenOrders,
        ),
        Err(err) => reply.failure(err),
    }
}
