use axum::{
    http::{self, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use mock_server::{app, User};
use serde_json::Value;
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn request(method: &str, uri: &str, cookies: &str, body: &str) -> Request<String> {
    let mut builder = Request::builder().method(method).uri(uri);
    if !body.is_empty() {
        builder = builder.header(http::header::CONTENT_TYPE, "application/json");
    }
    if !cookies.is_empty() {
        builder = builder.header(http::header::COOKIE, cookies);
    }
    builder.body(body.to_string()).unwrap()
}

fn set_cookies(response: &axum::response::Response) -> Vec<String> {
    response
        .headers()
        .get_all(http::header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect()
}

/// `name=value` pairs of the cookies set by `response`, joined for a Cookie header.
fn cookie_header(response: &axum::response::Response) -> String {
    set_cookies(response)
        .iter()
        .map(|c| c.split(';').next().unwrap().to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

async fn login(app: &Router, login: &str, password: &str) -> String {
    let body = format!(r#"{{"login":"{login}","password":"{password}"}}"#);
    let resp = app
        .clone()
        .oneshot(request("POST", "/api/v1/auth", "", &body))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    cookie_header(&resp)
}

async fn first_book_id(app: &Router) -> String {
    let resp = app
        .clone()
        .oneshot(request("GET", "/api/v1/book/search?page=1&size=10&sortBy=TITLE", "", ""))
        .await
        .unwrap();
    let page: Value = body_json(resp).await;
    page["books"][0]["bookId"].as_str().unwrap().to_string()
}

// --- auth ---

#[tokio::test]
async fn login_sets_both_cookies_and_empty_body() {
    let app = app();
    let resp = app
        .oneshot(request(
            "POST",
            "/api/v1/auth",
            "",
            r#"{"login":"reader","password":"reader"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let cookies = set_cookies(&resp);
    assert_eq!(cookies.len(), 2);
    assert!(cookies[0].starts_with("access_token="));
    assert!(cookies[1].starts_with("refresh_token="));
    assert!(cookies.iter().all(|c| c.contains("Path=/")));
    assert!(body_bytes(resp).await.is_empty());
}

#[tokio::test]
async fn login_unknown_user_returns_404_message() {
    let app = app();
    let resp = app
        .oneshot(request(
            "POST",
            "/api/v1/auth",
            "",
            r#"{"login":"ghost","password":"boo"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = body_json(resp).await;
    assert_eq!(body, serde_json::json!({"message": "User not found"}));
}

#[tokio::test]
async fn current_user_requires_access_cookie() {
    let app = app();
    let resp = app
        .clone()
        .oneshot(request("GET", "/api/v1/auth", "", ""))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = body_json(resp).await;
    assert_eq!(body, serde_json::json!({"title": "Unauthorized"}));

    let cookies = login(&app, "admin", "admin").await;
    let resp = app
        .oneshot(request("GET", "/api/v1/auth", &cookies, ""))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let user: User = body_json(resp).await;
    assert_eq!(user.login, "admin");
    assert_eq!(user.role, 0);
}

#[tokio::test]
async fn refresh_restores_expired_session() {
    let app = app();
    let cookies = login(&app, "reader", "reader").await;

    let resp = app
        .clone()
        .oneshot(request("POST", "/__test/expire-sessions", "", ""))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = app
        .clone()
        .oneshot(request("GET", "/api/v1/auth", &cookies, ""))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = app
        .clone()
        .oneshot(request("PATCH", "/api/v1/auth", &cookies, ""))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let refreshed = cookie_header(&resp);
    assert!(refreshed.starts_with("access_token="));
    let body: Value = body_json(resp).await;
    assert_eq!(body["message"], "Token refreshed successfully");

    let resp = app
        .oneshot(request("GET", "/api/v1/auth", &refreshed, ""))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn refresh_without_cookie_is_rejected() {
    let app = app();
    let resp = app
        .oneshot(request("PATCH", "/api/v1/auth", "", ""))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = body_json(resp).await;
    assert_eq!(body["message"], "Refresh token not found");
}

#[tokio::test]
async fn logout_revokes_refresh_token() {
    let app = app();
    let cookies = login(&app, "reader", "reader").await;

    let resp = app
        .clone()
        .oneshot(request("DELETE", "/api/v1/auth", &cookies, ""))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(set_cookies(&resp).iter().all(|c| c.contains("Max-Age=0")));

    let resp = app
        .oneshot(request("PATCH", "/api/v1/auth", &cookies, ""))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// --- books ---

#[tokio::test]
async fn get_book_by_id_and_missing() {
    let app = app();
    let id = first_book_id(&app).await;

    let resp = app
        .clone()
        .oneshot(request("GET", &format!("/api/v1/book/{id}"), "", ""))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(body["book"]["bookId"], id.as_str());
    assert_eq!(body["book"]["isLoggedUserTranslator"], false);

    let resp = app
        .oneshot(request("GET", "/api/v1/book/abc", "", ""))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = body_json(resp).await;
    assert_eq!(body, serde_json::json!({"error": "not found"}));
}

#[tokio::test]
async fn search_filters_sorts_and_pages() {
    let app = app();
    let resp = app
        .clone()
        .oneshot(request(
            "GET",
            "/api/v1/book/search?page=1&size=2&sortBy=TITLE&sortType=ASC",
            "",
            "",
        ))
        .await
        .unwrap();
    let page: Value = body_json(resp).await;
    assert_eq!(page["countPages"], 2);
    let titles: Vec<&str> = page["books"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["A Wizard of Earthsea", "Dune"]);

    let resp = app
        .oneshot(request(
            "GET",
            "/api/v1/book/search?page=1&size=10&bookTitle=DARK",
            "",
            "",
        ))
        .await
        .unwrap();
    let page: Value = body_json(resp).await;
    assert_eq!(page["countPages"], 1);
    assert_eq!(page["books"][0]["title"], "The Left Hand of Darkness");
}

#[tokio::test]
async fn search_past_last_page_is_empty() {
    let app = app();
    let huge = usize::MAX / 2;
    let resp = app
        .oneshot(request(
            "GET",
            &format!("/api/v1/book/search?page={huge}&size=10"),
            "",
            "",
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let page: Value = body_json(resp).await;
    assert_eq!(page["countPages"], 1);
    assert!(page["books"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn search_by_author_uses_repeated_params() {
    let app = app();
    let resp = app
        .clone()
        .oneshot(request("GET", "/api/v1/book/search?bookTitle=earthsea", "", ""))
        .await
        .unwrap();
    let page: Value = body_json(resp).await;
    let le_guin = page["books"][0]["authors"][0]["id"].as_str().unwrap().to_string();

    let resp = app
        .oneshot(request(
            "GET",
            &format!("/api/v1/book/search?authorIds%5B%5D={le_guin}&sortBy=TITLE"),
            "",
            "",
        ))
        .await
        .unwrap();
    let page: Value = body_json(resp).await;
    assert_eq!(page["books"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn create_book_requires_session() {
    let app = app();
    let body = r#"{"title":"Solaris","description":"Ocean"}"#;
    let resp = app
        .clone()
        .oneshot(request("POST", "/api/v1/book", "", body))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let cookies = login(&app, "admin", "admin").await;
    let resp = app
        .clone()
        .oneshot(request("POST", "/api/v1/book", &cookies, body))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let created: Value = body_json(resp).await;
    let id = created["bookId"].as_str().unwrap();

    let resp = app
        .oneshot(request("GET", &format!("/api/v1/book/{id}"), "", ""))
        .await
        .unwrap();
    let body: Value = body_json(resp).await;
    assert_eq!(body["book"]["title"], "Solaris");
}

// --- ratings ---

#[tokio::test]
async fn rating_aggregates_per_user() {
    let app = app();
    let id = first_book_id(&app).await;
    let path = format!("/api/v1/book/{id}/raiting");

    let admin = login(&app, "admin", "admin").await;
    let reader = login(&app, "reader", "reader").await;
    for (cookies, value) in [(&admin, 5), (&reader, 4), (&reader, 2)] {
        let resp = app
            .clone()
            .oneshot(request("POST", &path, cookies, &format!(r#"{{"value":{value}}}"#)))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let resp = app.clone().oneshot(request("GET", &path, "", "")).await.unwrap();
    let rating: Value = body_json(resp).await;
    assert_eq!(rating["average"], 3.5);
    assert_eq!(rating["count"], 2);

    let resp = app
        .clone()
        .oneshot(request("DELETE", &path, &admin, ""))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let resp = app.oneshot(request("GET", &path, "", "")).await.unwrap();
    let rating: Value = body_json(resp).await;
    assert_eq!(rating["count"], 1);
}

#[tokio::test]
async fn rating_out_of_range_is_a_field_error() {
    let app = app();
    let id = first_book_id(&app).await;
    let cookies = login(&app, "reader", "reader").await;
    let resp = app
        .oneshot(request(
            "POST",
            &format!("/api/v1/book/{id}/raiting"),
            &cookies,
            r#"{"value":9}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = body_json(resp).await;
    assert_eq!(body["errors"]["value"][0], "must be between 1 and 5");
}

// --- genres ---

#[tokio::test]
async fn empty_genre_name_is_rejected() {
    let app = app();
    let cookies = login(&app, "admin", "admin").await;
    let resp = app
        .oneshot(request("POST", "/api/v1/genre", &cookies, r#"{"name":""}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = body_json(resp).await;
    assert_eq!(body, serde_json::json!({"errors": {"name": ["must not be empty"]}}));
}

#[tokio::test]
async fn genre_lifecycle() {
    let app = app();
    let cookies = login(&app, "admin", "admin").await;

    let resp = app
        .clone()
        .oneshot(request("POST", "/api/v1/genre", &cookies, r#"{"name":"Horror"}"#))
        .await
        .unwrap();
    let created: Value = body_json(resp).await;
    let id = created["id"].as_str().unwrap().to_string();

    let edit = format!(r#"{{"id":"{id}","name":"Gothic"}}"#);
    let resp = app
        .clone()
        .oneshot(request("PATCH", "/api/v1/genre", &cookies, &edit))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app
        .clone()
        .oneshot(request("GET", "/api/v1/genre", "", ""))
        .await
        .unwrap();
    let list: Value = body_json(resp).await;
    assert!(list["genres"]
        .as_array()
        .unwrap()
        .iter()
        .any(|g| g["name"] == "Gothic"));

    let delete = format!(r#"{{"id":"{id}"}}"#);
    let resp = app
        .clone()
        .oneshot(request("DELETE", "/api/v1/genre", &cookies, &delete))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let resp = app
        .oneshot(request("DELETE", "/api/v1/genre", &cookies, &delete))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- users ---

#[tokio::test]
async fn user_can_edit_self_but_not_others() {
    let app = app();
    let resp = app
        .clone()
        .oneshot(request("GET", "/api/v1/user", "", ""))
        .await
        .unwrap();
    let users: Vec<User> = body_json(resp).await;
    let admin = users.iter().find(|u| u.login == "admin").unwrap().id;
    let reader = users.iter().find(|u| u.login == "reader").unwrap().id;

    let cookies = login(&app, "reader", "reader").await;
    let own = format!(r#"{{"id":"{reader}","login":"reader","password":"","aboutMe":"likes maps"}}"#);
    let resp = app
        .clone()
        .oneshot(request("PATCH", "/api/v1/user", &cookies, &own))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: User = body_json(resp).await;
    assert_eq!(updated.about_me, "likes maps");

    let other = format!(r#"{{"id":"{admin}","login":"admin","password":"","aboutMe":"hacked"}}"#);
    let resp = app
        .clone()
        .oneshot(request("PATCH", "/api/v1/user", &cookies, &other))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = app
        .oneshot(request("GET", &format!("/api/v1/user/{reader}"), "", ""))
        .await
        .unwrap();
    let fetched: User = body_json(resp).await;
    assert_eq!(fetched.about_me, "likes maps");
}
