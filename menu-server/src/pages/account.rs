//! Account pages: signup, login, logout
//!
//! Browsers get the session as an HttpOnly cookie and a redirect.
//! Programmatic callers (`Accept: application/json`) get
//! `{"token": "...", "user": {...}}` and send the token as
//! `Authorization: Bearer` afterwards.

use std::collections::BTreeMap;

use axum::{
    Form, Json,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use shared::models::{LoginForm, SignupForm, User};
use tower_cookies::Cookies;
use validator::{Validate, ValidationErrors};

use super::layout::Layout;
use crate::age_gate::RouteName;
use crate::age_gate::redirect::next_or;
use crate::auth::password::{hash_password, verify_password};
use crate::auth::session::{end_session, start_session};
use crate::core::ServerState;
use crate::db::repository::{RepoError, user};
use crate::locale::Message;
use crate::security_log;
use crate::utils::flash::{self, FlashLevel};
use crate::utils::format::ResponseFormat;
use crate::utils::{AppError, AppResult, ErrorCode};

#[derive(Debug, Default, Deserialize)]
pub struct NextQuery {
    #[serde(default)]
    pub next: Option<String>,
}

/// Field name → error codes
type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Serialize)]
struct FormContext {
    username: String,
    next: Option<String>,
    errors: FieldErrors,
    /// Form-wide error text
    error: Option<&'static str>,
}

#[derive(Serialize)]
struct SessionResponse {
    token: String,
    user: User,
}

fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let codes = errs.iter().map(|e| e.code.to_string()).collect();
            (field.to_string(), codes)
        })
        .collect()
}

fn single_error(field: &str, code: &str) -> FieldErrors {
    FieldErrors::from([(field.to_string(), vec![code.to_string()])])
}

/// Issue a session for `user`: JSON token, or cookie + flash + redirect
fn open_session(
    state: &ServerState,
    cookies: &Cookies,
    format: ResponseFormat,
    user: User,
    message: Message,
    lang: shared::Lang,
    next: &str,
) -> AppResult<Response> {
    let jwt = state.get_jwt_service();
    let token = jwt
        .generate_token(&user)
        .map_err(|e| AppError::internal(format!("Failed to issue session: {e}")))?;

    if format.is_json() {
        return Ok(Json(SessionResponse { token, user }).into_response());
    }
    start_session(cookies, &jwt, token, state.config.is_production());
    flash::push(cookies, FlashLevel::Success, message.text(lang));
    Ok(Redirect::to(next).into_response())
}

/// GET /signup/
pub async fn signup_page(layout: Layout) -> Response {
    layout.render(
        "account/signup.html",
        FormContext {
            username: String::new(),
            next: None,
            errors: FieldErrors::new(),
            error: None,
        },
    )
}

/// POST /signup/
pub async fn signup(
    State(state): State<ServerState>,
    cookies: Cookies,
    format: ResponseFormat,
    layout: Layout,
    Form(form): Form<SignupForm>,
) -> AppResult<Response> {
    let rejected = |errors: FieldErrors, layout: Layout| -> AppResult<Response> {
        if format.is_json() {
            let mut error = AppError::validation("Signup form is invalid");
            for (field, codes) in &errors {
                error = error.with_detail(field.clone(), codes.clone());
            }
            return Err(error);
        }
        Ok(layout.render(
            "account/signup.html",
            FormContext {
                username: form.username.clone(),
                next: None,
                errors,
                error: None,
            },
        ))
    };

    if let Err(errors) = form.validate() {
        return rejected(field_errors(&errors), layout);
    }

    let password_hash = hash_password(&form.password1)
        .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;
    let created = match user::create(state.pool(), &form.username, &password_hash, false).await {
        Ok(created) => created,
        Err(RepoError::Business(ErrorCode::UsernameExists, _)) => {
            return rejected(single_error("username", "username_exists"), layout);
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(user_id = created.id, username = %created.username, "User signed up");
    let home = RouteName::Home.url(layout.lang, None);
    open_session(
        &state,
        &cookies,
        format,
        created,
        Message::Welcome,
        layout.lang,
        &home,
    )
}

/// GET /login/
pub async fn login_page(layout: Layout, Query(query): Query<NextQuery>) -> Response {
    layout.render(
        "account/login.html",
        FormContext {
            username: String::new(),
            next: query.next,
            errors: FieldErrors::new(),
            error: None,
        },
    )
}

/// POST /login/
pub async fn login(
    State(state): State<ServerState>,
    cookies: Cookies,
    format: ResponseFormat,
    layout: Layout,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    let credentials = if form.validate().is_ok() {
        user::find_credentials(state.pool(), &form.username).await?
    } else {
        None
    };

    let verified = credentials.filter(|(_, hash)| verify_password(&form.password, hash));
    let Some((account, _)) = verified else {
        security_log!("WARN", "login_failed", username = form.username.as_str());
        if format.is_json() {
            return Err(AppError::invalid_credentials());
        }
        let error = Some(Message::LoginFailed.text(layout.lang));
        return Ok(layout.render(
            "account/login.html",
            FormContext {
                username: form.username.clone(),
                next: form.next.clone(),
                errors: single_error("__all__", "invalid_credentials"),
                error,
            },
        ));
    };

    tracing::info!(user_id = account.id, username = %account.username, "User logged in");
    let next = next_or(form.next.as_deref(), &RouteName::Home.url(layout.lang, None));
    open_session(
        &state,
        &cookies,
        format,
        account,
        Message::LoggedIn,
        layout.lang,
        &next,
    )
}

/// POST /logout/
pub async fn logout(cookies: Cookies, layout: Layout) -> Response {
    end_session(&cookies);
    flash::push(
        &cookies,
        FlashLevel::Info,
        Message::LoggedOut.text(layout.lang),
    );
    Redirect::to(&RouteName::Home.url(layout.lang, None)).into_response()
}
