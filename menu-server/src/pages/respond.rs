//! Action responses
//!
//! Order and kitchen actions answer browsers with a flash message and a 303
//! redirect, and programmatic callers with an [`OrderActionResponse`].

use axum::{
    Json,
    response::{IntoResponse, Redirect, Response},
};
use shared::Lang;
use shared::payload::OrderActionResponse;
use tower_cookies::Cookies;

use crate::age_gate::RouteName;
use crate::locale::Message;
use crate::orders::OrderError;
use crate::utils::AppError;
use crate::utils::flash::{self, FlashLevel};
use crate::utils::format::ResponseFormat;

/// Flash `message` and redirect to `to`
pub fn flash_redirect(
    cookies: &Cookies,
    lang: Lang,
    level: FlashLevel,
    message: Message,
    to: &str,
) -> Response {
    flash::push(cookies, level, message.text(lang));
    Redirect::to(to).into_response()
}

/// Everything an action reply needs from the request
pub struct Reply<'a> {
    pub format: ResponseFormat,
    pub lang: Lang,
    pub cookies: &'a Cookies,
}

impl Reply<'_> {
    /// `200 {ok: true, ...}` or flash + redirect
    pub fn success(
        &self,
        payload: OrderActionResponse,
        message: Message,
        to: RouteName,
    ) -> Response {
        if self.format.is_json() {
            return Json(payload).into_response();
        }
        flash_redirect(
            self.cookies,
            self.lang,
            FlashLevel::Success,
            message,
            &to.url(self.lang, None),
        )
    }

    /// Failure of an order action
    ///
    /// Programmatic callers get `{ok: false, error}` with the error's HTTP
    /// status. Browsers get a flash and a redirect for rule violations, and
    /// the plain error response for missing records and internal failures.
    pub fn failure(&self, err: OrderError) -> Response {
        if self.format.is_json() {
            let code = err.code();
            if code.http_status().is_server_error() {
                // logged by the AppError response
                return AppError::from(err).into_response();
            }
            let body = OrderActionResponse::failure(err.order_id(), code.key());
            return (code.http_status(), Json(body)).into_response();
        }

        let Some((level, message, to)) = browser_target(&err) else {
            return AppError::from(err).into_response();
        };
        tracing::debug!(error = %err, "Order action rejected");
        flash_redirect(self.cookies, self.lang, level, message, &to.url(self.lang, None))
    }
}

/// Flash level, text and redirect target for a rule violation; `None` for
/// errors that are answered with a plain error response
fn browser_target(err: &OrderError) -> Option<(FlashLevel, Message, RouteName)> {
    let target = match err {
        OrderError::NoOpenOrder => (FlashLevel::Info, Message::NothingToSubmit, RouteName::Home),
        OrderError::EmptyOrder(_) => (FlashLevel::Info, Message::CartEmpty, RouteName::ViewOrder),
        OrderError::OrderInKitchen(_) => {
            (FlashLevel::Warning, Message::OrderInKitchen, RouteName::ViewOrder)
        }
        OrderError::AgeRequired(_) => (FlashLevel::Warning, Message::AgeRequired, RouteName::AgeGate),
        OrderError::InvalidTransition { .. } => (
            FlashLevel::Error,
            Message::TransitionRejected,
            RouteName::KitchenOrders,
        ),
        OrderError::NotFound(_)
        | OrderError::DishNotFound(_)
        | OrderError::DishUnavailable(_)
        | OrderError::Repo(_) => return None,
    };
    Some(target)
}
