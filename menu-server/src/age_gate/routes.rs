//! Page route table
//!
//! Every browser route is a [`RouteName`]. The router registers pages from
//! this table, so a route's age-gate exemption is fixed where the route is
//! defined and cannot drift from a separate name list.

use shared::Lang;

use crate::locale;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteName {
    Home,
    Categories,
    CategoryDetail,
    DishDetail,
    Signup,
    Login,
    Logout,
    AddToOrder,
    ViewOrder,
    FinalizeOrder,
    KitchenOrders,
    MarkAccept,
    MarkReady,
    AgeGate,
    AgeConfirm,
    SetLanguage,
}

impl RouteName {
    pub const ALL: [RouteName; 16] = [
        RouteName::Home,
        RouteName::Categories,
        RouteName::CategoryDetail,
        RouteName::DishDetail,
        RouteName::Signup,
        RouteName::Login,
        RouteName::Logout,
        RouteName::AddToOrder,
        RouteName::ViewOrder,
        RouteName::FinalizeOrder,
        RouteName::KitchenOrders,
        RouteName::MarkAccept,
        RouteName::MarkReady,
        RouteName::AgeGate,
        RouteName::AgeConfirm,
        RouteName::SetLanguage,
    ];

    pub const fn name(&self) -> &'static str {
        match self {
            RouteName::Home => "home",
            RouteName::Categories => "categories",
            RouteName::CategoryDetail => "category_detail",
            RouteName::DishDetail => "dish_detail",
            RouteName::Signup => "signup",
            RouteName::Login => "login",
            RouteName::Logout => "logout",
            RouteName::AddToOrder => "add_to_order",
            RouteName::ViewOrder => "view_order",
            RouteName::FinalizeOrder => "finalize_order",
            RouteName::KitchenOrders => "kitchen_orders",
            RouteName::MarkAccept => "mark_accept",
            RouteName::MarkReady => "mark_ready",
            RouteName::AgeGate => "age_gate",
            RouteName::AgeConfirm => "age_confirm",
            RouteName::SetLanguage => "set_language",
        }
    }

    /// Axum path template, without language prefix
    pub const fn path(&self) -> &'static str {
        match self {
            RouteName::Home => "/",
            RouteName::Categories => "/categories/",
            RouteName::CategoryDetail => "/categories/{slug}/",
            RouteName::DishDetail => "/dishes/{slug}/",
            RouteName::Signup => "/signup/",
            RouteName::Login => "/login/",
            RouteName::Logout => "/logout/",
            RouteName::AddToOrder => "/order/add/{dish_id}/",
            RouteName::ViewOrder => "/order/",
            RouteName::FinalizeOrder => "/order/finalize/",
            RouteName::KitchenOrders => "/kitchen/",
            RouteName::MarkAccept => "/kitchen/accept/{order_id}/",
            RouteName::MarkReady => "/kitchen/ready/{order_id}/",
            RouteName::AgeGate => "/age/",
            RouteName::AgeConfirm => "/age/confirm/",
            RouteName::SetLanguage => "/i18n/setlang/",
        }
    }

    /// Unsafe requests to this route skip the age confirmation check
    pub const fn is_age_exempt(&self) -> bool {
        matches!(
            self,
            RouteName::AgeGate
                | RouteName::AgeConfirm
                | RouteName::SetLanguage
                | RouteName::Login
                | RouteName::Logout
                | RouteName::Signup
                | RouteName::KitchenOrders
                | RouteName::MarkAccept
                | RouteName::MarkReady
                | RouteName::ViewOrder
        )
    }

    /// Registered once per language prefix
    pub const fn is_localized(&self) -> bool {
        !matches!(self, RouteName::SetLanguage)
    }

    /// Concrete URL for `lang`; `param` fills the single `{...}` segment
    pub fn url(&self, lang: Lang, param: Option<&str>) -> String {
        let template = self.path();
        let path = match (template.find('{'), template.find('}'), param) {
            (Some(start), Some(end), Some(value)) => {
                format!("{}{}{}", &template[..start], value, &template[end + 1..])
            }
            _ => template.to_string(),
        };
        if self.is_localized() {
            locale::localized(lang, &path)
        } else {
            path
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_exempt_set() {
        let exempt: HashSet<&str> = RouteName::ALL
            .iter()
            .filter(|r| r.is_age_exempt())
            .map(|r| r.name())
            .collect();
        let expected: HashSet<&str> = [
            "age_gate",
            "age_confirm",
            "set_language",
            "login",
            "logout",
            "signup",
            "kitchen_orders",
            "mark_accept",
            "mark_ready",
            "view_order",
        ]
        .into_iter()
        .collect();
        assert_eq!(exempt, expected);
    }

    #[test]
    fn test_ordering_routes_are_gated() {
        assert!(!RouteName::AddToOrder.is_age_exempt());
        assert!(!RouteName::FinalizeOrder.is_age_exempt());
    }

    #[test]
    fn test_urls() {
        assert_eq!(RouteName::Home.url(Lang::Ru, None), "/");
        assert_eq!(RouteName::ViewOrder.url(Lang::Kk, None), "/kk/order/");
        assert_eq!(
            RouteName::DishDetail.url(Lang::En, Some("plov")),
            "/en/dishes/plov/"
        );
        assert_eq!(
            RouteName::MarkReady.url(Lang::Ru, Some("12")),
            "/kitchen/ready/12/"
        );
        assert_eq!(RouteName::SetLanguage.url(Lang::En, None), "/i18n/setlang/");
    }

    #[test]
    fn test_paths_unique() {
        let paths: HashSet<&str> = RouteName::ALL.iter().map(|r| r.path()).collect();
        assert_eq!(paths.len(), RouteName::ALL.len());
    }
}
