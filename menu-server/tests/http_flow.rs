//! End-to-end HTTP flows through the fully layered router
//!
//! Every test runs against its own SQLite file in a temp dir and drives the
//! router with `oneshot`, so no listener is bound.

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use menu_server::auth::password::hash_password;
use menu_server::db::repository::{category, dish, user};
use menu_server::services::HttpService;
use menu_server::{Config, ServerState};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use shared::i18n::LocalizedText;
use shared::models::{CategoryCreate, DishCreate, User};
use tempfile::TempDir;
use tower::ServiceExt;

const AGE_COOKIE: &str = "AGE_VERIFIED_21=1";

fn new_dish(category_id: i64, name: LocalizedText, slug: &str, price: Decimal) -> DishCreate {
    DishCreate {
        category_id,
        name,
        description: LocalizedText::default(),
        slug: Some(slug.into()),
        price,
        is_available: None,
        position: None,
        image: None,
        passport_bg: None,
    }
}

struct TestApp {
    router: Router,
    state: ServerState,
    plov_id: i64,
    beer_id: i64,
    _dir: TempDir,
}

impl TestApp {
    async fn start() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::with_overrides(dir.path().display().to_string(), 0);
        config.public_base_url = None;
        config.admin_username = None;
        config.admin_password = None;
        let state = ServerState::initialize(&config).await.unwrap();

        let pool = state.pool();
        let mains = category::create(
            pool,
            CategoryCreate {
                name: LocalizedText::from_parts("Горячее", "Ыстық тағамдар", "Mains"),
                show_in_nav: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        let bar = category::create(
            pool,
            CategoryCreate {
                name: LocalizedText::from_parts("Пиво", "Сыра", "Beer"),
                slug: Some("beer".into()),
                image: Some("categories/beer.jpg".into()),
                is_21plus: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        let plov = dish::create(
            pool,
            new_dish(
                mains.id,
                LocalizedText::from_parts("Плов", "Палау", "Pilaf"),
                "plov",
                Decimal::new(250000, 2),
            ),
        )
        .await
        .unwrap();
        let beer = dish::create(
            pool,
            new_dish(
                bar.id,
                LocalizedText::from_parts("Светлое", "Ашық", "Lager"),
                "lager",
                Decimal::new(120000, 2),
            ),
        )
        .await
        .unwrap();

        Self {
            router: HttpService::new(state.clone()).router(),
            state,
            plov_id: plov.id,
            beer_id: beer.id,
            _dir: dir,
        }
    }

    async fn user(&self, username: &str, is_staff: bool) -> (User, String) {
        let hash = hash_password("correct-horse-9").unwrap();
        let created = user::create(self.state.pool(), username, &hash, is_staff)
            .await
            .unwrap();
        let token = self.state.get_jwt_service().generate_token(&created).unwrap();
        (created, token)
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, http::HeaderMap, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, headers, body)
    }
}

fn get(uri: &str) -> http::request::Builder {
    Request::builder().method("GET").uri(uri)
}

/// Programmatic POST with an optional bearer token and cookie
fn post_json(uri: &str, token: Option<&str>, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::ACCEPT, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn set_cookies(headers: &http::HeaderMap) -> Vec<String> {
    headers
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(str::to_string)
        .collect()
}

#[tokio::test]
async fn test_anonymous_pages_are_not_gated() {
    let app = TestApp::start().await;

    let (status, _, body) = app.send(get("/").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["template"], "menu/home.html");
    assert_eq!(body["lang"], "ru");
    assert_eq!(body["age_locked"], true);
    assert_eq!(body["user"], Value::Null);

    let (status, _, body) = app.send(get("/kk").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["lang"], "kk");

    let (status, _, body) = app.send(get("/en/dishes/plov/").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["dish"]["name"], "Pilaf");
}

#[tokio::test]
async fn test_locked_dish_page_redirects_to_age_gate() {
    let app = TestApp::start().await;

    let (status, headers, _) = app.send(get("/kk/dishes/lager/").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(headers[header::LOCATION], "/kk/age/?next=%2Fkk%2Fdishes%2Flager%2F");

    let request = get("/kk/dishes/lager/")
        .header(header::COOKIE, AGE_COOKIE)
        .body(Body::empty())
        .unwrap();
    let (status, _, body) = app.send(request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["dish"]["name"], "Ашық");
}

#[tokio::test]
async fn test_add_without_age_cookie_is_blocked() {
    let app = TestApp::start().await;
    let (_, token) = app.user("aida", false).await;

    let uri = format!("/order/add/{}/", app.plov_id);
    let (status, _, body) = app.send(post_json(&uri, Some(&token), None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, json!({"ok": false, "order_id": null, "error": "age_required"}));

    // a browser without a usable referer lands on the bare age page
    let request = Request::builder()
        .method("POST")
        .uri(format!("/en/order/add/{}/", app.plov_id))
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let (status, headers, _) = app.send(request).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(headers[header::LOCATION], "/en/age/");

    let (_, headers, _) = app.send(post_form("/en/age/confirm/", "")).await;
    assert_eq!(headers[header::LOCATION], "/en/");
}

#[tokio::test]
async fn test_blocked_add_returns_to_the_referring_page() {
    let app = TestApp::start().await;
    let (_, token) = app.user("aida", false).await;

    let request = Request::builder()
        .method("POST")
        .uri(format!("/en/order/add/{}/", app.beer_id))
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(header::HOST, "localhost")
        .header(header::REFERER, "http://localhost/en/dishes/lager/")
        .body(Body::empty())
        .unwrap();
    let (status, headers, _) = app.send(request).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    let gate = headers[header::LOCATION].to_str().unwrap().to_string();
    assert_eq!(gate, "/en/age/?next=%2Fen%2Fdishes%2Flager%2F");

    let next = gate.split_once("?next=").unwrap().1;
    let (status, headers, _) = app
        .send(post_form("/en/age/confirm/", &format!("next={next}")))
        .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    let back = headers[header::LOCATION].to_str().unwrap().to_string();
    assert_eq!(back, "/en/dishes/lager/");

    // the page after confirmation is reachable with a GET
    let request = get(&back)
        .header(header::COOKIE, AGE_COOKIE)
        .body(Body::empty())
        .unwrap();
    let (status, _, body) = app.send(request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["dish"]["name"], "Lager");
}

#[tokio::test]
async fn test_anonymous_adult_dish_add_needs_age_confirmation() {
    let app = TestApp::start().await;
    let uri = format!("/order/add/{}/", app.beer_id);

    let (status, _, body) = app.send(post_json(&uri, None, None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, json!({"ok": false, "order_id": null, "error": "age_required"}));

    // confirmed but still anonymous
    let (status, _, _) = app.send(post_json(&uri, None, Some(AGE_COOKIE))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_add_twice_increments_quantity() {
    let app = TestApp::start().await;
    let (_, token) = app.user("aida", false).await;
    let uri = format!("/order/add/{}/", app.beer_id);

    let (status, _, first) = app.send(post_json(&uri, Some(&token), Some(AGE_COOKIE))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["ok"], true);
    assert_eq!(first["status"], "new");
    assert_eq!(first["quantity"], 1);

    let (_, _, second) = app.send(post_json(&uri, Some(&token), Some(AGE_COOKIE))).await;
    assert_eq!(second["quantity"], 2);
    assert_eq!(second["order_id"], first["order_id"]);
    assert_eq!(second["item_id"], first["item_id"]);
}

#[tokio::test]
async fn test_anonymous_add_requires_login() {
    let app = TestApp::start().await;
    let uri = format!("/order/add/{}/", app.plov_id);

    let (status, _, _) = app.send(post_json(&uri, None, Some(AGE_COOKIE))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let request = Request::builder()
        .method("POST")
        .uri(&uri)
        .header(header::COOKIE, AGE_COOKIE)
        .body(Body::empty())
        .unwrap();
    let (status, headers, _) = app.send(request).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert!(headers[header::LOCATION].to_str().unwrap().starts_with("/login/?next="));
}

#[tokio::test]
async fn test_finalize_preconditions_and_kitchen_flow() {
    let app = TestApp::start().await;
    let (_, guest) = app.user("aida", false).await;
    let (_, chef) = app.user("chef", true).await;

    let (status, _, body) = app
        .send(post_json("/order/finalize/", Some(&guest), Some(AGE_COOKIE)))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "no_order");

    let add = format!("/order/add/{}/", app.plov_id);
    let (_, _, added) = app.send(post_json(&add, Some(&guest), Some(AGE_COOKIE))).await;
    let order_id = added["order_id"].as_i64().unwrap();

    let (status, _, body) = app
        .send(post_json("/order/finalize/", Some(&guest), Some(AGE_COOKIE)))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "kitchen");

    // the order is in the kitchen now
    let (status, _, body) = app.send(post_json(&add, Some(&guest), Some(AGE_COOKIE))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "order_in_kitchen");

    // guests cannot see the kitchen board
    let request = get("/kitchen/")
        .header(header::ACCEPT, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {guest}"))
        .body(Body::empty())
        .unwrap();
    let (status, _, _) = app.send(request).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let request = get("/kitchen/")
        .header(header::AUTHORIZATION, format!("Bearer {chef}"))
        .body(Body::empty())
        .unwrap();
    let (status, _, body) = app.send(request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["orders"][0]["id"], order_id);
    assert_eq!(body["orders"][0]["username"], "aida");

    // staff actions are exempt from the age cookie
    let ready = format!("/kitchen/ready/{order_id}/");
    for _ in 0..2 {
        let (status, _, body) = app.send(post_json(&ready, Some(&chef), None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ready");
    }

    let accept = format!("/kitchen/accept/{order_id}/");
    let (status, _, body) = app.send(post_json(&accept, Some(&chef), None)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "invalid_transition");
}

#[tokio::test]
async fn test_finalize_empty_order() {
    let app = TestApp::start().await;
    let (account, token) = app.user("aida", false).await;

    // an open order without lines
    sqlx::query("INSERT INTO orders (user_id, status, created_at) VALUES (?, 'new', 0)")
        .bind(account.id)
        .execute(app.state.pool())
        .await
        .unwrap();

    let (status, _, body) = app
        .send(post_json("/order/finalize/", Some(&token), Some(AGE_COOKIE)))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "empty");
}

#[tokio::test]
async fn test_age_confirm_sets_cookie_and_follows_safe_next() {
    let app = TestApp::start().await;

    let (status, headers, _) = app
        .send(post_form("/kk/age/confirm/", "next=%2Fkk%2Fdishes%2Flager%2F"))
        .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(headers[header::LOCATION], "/kk/dishes/lager/");
    let cookies = set_cookies(&headers);
    assert!(cookies.iter().any(|c| c.starts_with("AGE_VERIFIED_21=1")));

    let (_, headers, _) = app
        .send(post_form("/age/confirm/", "next=https%3A%2F%2Fevil.example%2F"))
        .await;
    assert_eq!(headers[header::LOCATION], "/");
}

#[tokio::test]
async fn test_set_language_rewrites_next() {
    let app = TestApp::start().await;

    let (status, headers, _) = app
        .send(post_form("/i18n/setlang/", "language=kk&next=%2Fen%2Fdishes%2Fplov%2F"))
        .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(headers[header::LOCATION], "/kk/dishes/plov/");
    assert!(set_cookies(&headers).iter().any(|c| c.starts_with("menu_language=kk")));

    // unprefixed routes are left alone
    let (_, headers, _) = app
        .send(post_form("/i18n/setlang/", "language=en&next=%2Fapi%2Fcategories%2F"))
        .await;
    assert_eq!(headers[header::LOCATION], "/api/categories/");
}

#[tokio::test]
async fn test_api_categories_carry_locked_flags_and_absolute_urls() {
    let app = TestApp::start().await;

    let request = get("/api/categories/")
        .header(header::HOST, "menu.kz")
        .header(header::ACCEPT_LANGUAGE, "en")
        .body(Body::empty())
        .unwrap();
    let (status, _, body) = app.send(request).await;
    assert_eq!(status, StatusCode::OK);

    let categories = body.as_array().unwrap();
    let beer = categories.iter().find(|c| c["slug"] == "beer").unwrap();
    assert_eq!(beer["name"], "Beer");
    assert_eq!(beer["requires_21"], true);
    assert_eq!(beer["locked"], true);
    assert_eq!(beer["image"], "http://menu.kz/media/categories/beer.jpg");
    assert_eq!(beer["dishes"][0]["locked"], true);

    let request = get("/api/categories/beer/")
        .header(header::COOKIE, AGE_COOKIE)
        .body(Body::empty())
        .unwrap();
    let (status, _, body) = app.send(request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["locked"], false);
    assert_eq!(body["name"], "Пиво");
}

#[tokio::test]
async fn test_api_generates_slugs() {
    let app = TestApp::start().await;

    let request = get("/api/dishes/plov/").body(Body::empty()).unwrap();
    let (status, _, body) = app.send(request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["slug"], "plov");

    // derived from the transliterated Russian name
    let request = get("/api/categories/").body(Body::empty()).unwrap();
    let (_, _, body) = app.send(request).await;
    assert!(body.as_array().unwrap().iter().any(|c| c["slug"] == "goryachee"));
}
