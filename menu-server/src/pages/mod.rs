//! Browser pages
//!
//! Every route in [`RouteName`] is registered once per language prefix
//! (`""`, `/kk`, `/en`) and carries its own age-gate layer:
//!
//! | Route | Method | Handler |
//! |-------|--------|---------|
//! | `/` , `/categories/` | GET | [`menu::home`] |
//! | `/categories/{slug}/` | GET | [`menu::category_detail`] |
//! | `/dishes/{slug}/` | GET | [`menu::dish_detail`] |
//! | `/signup/` | GET, POST | [`account`] |
//! | `/login/` | GET, POST | [`account`] |
//! | `/logout/` | POST | [`account::logout`] |
//! | `/order/` | GET | [`order::view_order`] |
//! | `/order/add/{dish_id}/` | POST | [`order::add_to_order`] |
//! | `/order/finalize/` | POST | [`order::finalize`] |
//! | `/kitchen/` | GET | [`kitchen::kitchen_orders`] |
//! | `/kitchen/accept/{order_id}/` | POST | [`kitchen::mark_accept`] |
//! | `/kitchen/ready/{order_id}/` | POST | [`kitchen::mark_ready`] |
//! | `/age/` | GET | [`age::age_page`] |
//! | `/age/confirm/` | POST | [`age::age_confirm`] |
//! | `/i18n/setlang/` | POST | [`crate::locale::handler::set_language`] (unprefixed) |

pub mod account;
pub mod age;
pub mod kitchen;
pub mod layout;
pub mod menu;
pub mod order;
pub mod respond;

use axum::{
    Router, middleware,
    routing::{MethodRouter, get, post},
};

use crate::age_gate::{RouteName, age_gate};
use crate::core::ServerState;
use crate::locale::{self, handler::set_language};

pub use layout::Layout;

fn handler(route: RouteName) -> MethodRouter<ServerState> {
    match route {
        RouteName::Home | RouteName::Categories => get(menu::home),
        RouteName::CategoryDetail => get(menu::category_detail),
        RouteName::DishDetail => get(menu::dish_detail),
        RouteName::Signup => get(account::signup_page).post(account::signup),
        RouteName::Login => get(account::login_page).post(account::login),
        RouteName::Logout => post(account::logout),
        RouteName::AddToOrder => post(order::add_to_order),
        RouteName::ViewOrder => get(order::view_order),
        RouteName::FinalizeOrder => post(order::finalize),
        RouteName::KitchenOrders => get(kitchen::kitchen_orders),
        RouteName::MarkAccept => post(kitchen::mark_accept),
        RouteName::MarkReady => post(kitchen::mark_ready),
        RouteName::AgeGate => get(age::age_page),
        RouteName::AgeConfirm => post(age::age_confirm),
        RouteName::SetLanguage => post(set_language),
    }
}

fn gated(route: RouteName) -> MethodRouter<ServerState> {
    handler(route).route_layer(middleware::from_fn(age_gate(route)))
}

pub fn router() -> Router<ServerState> {
    let mut router = Router::new();

    for route in RouteName::ALL {
        if !route.is_localized() {
            router = router.route(route.path(), gated(route));
            continue;
        }
        for prefix in locale::PREFIXES {
            router = router.route(&format!("{prefix}{}", route.path()), gated(route));
        }
    }

    // `/kk` and `/en` without the trailing slash
    for prefix in locale::PREFIXES.into_iter().filter(|p| !p.is_empty()) {
        router = router.route(prefix, gated(RouteName::Home));
    }

    router
}
