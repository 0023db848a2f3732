//! In-memory stand-in for the book catalog API.
//!
//! Sessions use the same two cookies as the real server: a short-lived
//! `access_token` checked by every authenticated route and a `refresh_token`
//! that `PATCH /api/v1/auth` trades for a new access token. Tokens are opaque
//! random strings kept in server state, so `POST /__test/expire-sessions` can
//! invalidate every access token at once.

use std::{cmp::Ordering, collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, RawQuery, State},
    http::{header, HeaderMap, StatusCode},
    response::{AppendHeaders, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const ACCESS_COOKIE: &str = "access_token";
pub const REFRESH_COOKIE: &str = "refresh_token";

const DEFAULT_PAGE_SIZE: usize = 10;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub login: String,
    pub role: u8,
    pub about_me: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: Uuid,
    pub first_name: String,
    pub second_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Genre {
    pub id: Uuid,
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub book_id: Uuid,
    pub title: String,
    pub description: String,
    pub authors: Vec<Author>,
    pub genres: Vec<Genre>,
    pub is_logged_user_translator: bool,
}

#[derive(Deserialize)]
pub struct LoginForm {
    pub login: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct CreateBook {
    pub title: String,
    pub description: String,
}

#[derive(Deserialize)]
pub struct EditBook {
    pub id: Uuid,
    pub title: String,
    pub description: String,
}

#[derive(Deserialize)]
pub struct ById {
    pub id: Uuid,
}

#[derive(Deserialize)]
pub struct CreateGenre {
    pub name: String,
}

#[derive(Deserialize)]
pub struct EditGenre {
    pub id: Uuid,
    pub name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditUser {
    pub id: Uuid,
    pub login: String,
    pub password: String,
    pub about_me: String,
}

#[derive(Deserialize)]
pub struct UpdateRating {
    pub value: u32,
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

struct UserRecord {
    user: User,
    password: String,
}

struct BookRecord {
    id: Uuid,
    title: String,
    description: String,
    author_ids: Vec<Uuid>,
    genre_ids: Vec<Uuid>,
}

#[derive(Default)]
pub struct ApiState {
    users: Vec<UserRecord>,
    authors: Vec<Author>,
    genres: Vec<Genre>,
    books: Vec<BookRecord>,
    ratings: HashMap<(Uuid, Uuid), u32>,
    access_tokens: HashMap<String, Uuid>,
    refresh_tokens: HashMap<String, Uuid>,
}

pub type Db = Arc<RwLock<ApiState>>;

impl ApiState {
    /// Two users (`admin`/`admin`, `reader`/`reader`) and a small catalog.
    pub fn seeded() -> Self {
        let mut state = ApiState::default();
        state.add_user("admin", "admin", 0, "Keeps the catalog tidy");
        state.add_user("reader", "reader", 1, "");

        let herbert = state.add_author("Frank", "Herbert");
        let le_guin = state.add_author("Ursula", "Le Guin");
        let sci_fi = state.add_genre("Science Fiction");
        let fantasy = state.add_genre("Fantasy");

        state.add_book("Dune", "Spice and sandworms", herbert, sci_fi);
        state.add_book("A Wizard of Earthsea", "A school for wizards", le_guin, fantasy);
        state.add_book("The Left Hand of Darkness", "An envoy on Gethen", le_guin, sci_fi);
        state
    }

    fn add_user(&mut self, login: &str, password: &str, role: u8, about_me: &str) {
        self.users.push(UserRecord {
            user: User {
                id: Uuid::new_v4(),
                login: login.to_string(),
                role,
                about_me: about_me.to_string(),
            },
            password: password.to_string(),
        });
    }

    fn add_author(&mut self, first_name: &str, second_name: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.authors.push(Author {
            id,
            first_name: first_name.to_string(),
            second_name: second_name.to_string(),
            middle_name: None,
            nickname: None,
        });
        id
    }

    fn add_genre(&mut self, name: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.genres.push(Genre {
            id,
            name: name.to_string(),
        });
        id
    }

    fn add_book(&mut self, title: &str, description: &str, author: Uuid, genre: Uuid) {
        self.books.push(BookRecord {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: description.to_string(),
            author_ids: vec![author],
            genre_ids: vec![genre],
        });
    }

    fn render_book(&self, record: &BookRecord) -> Book {
        Book {
            book_id: record.id,
            title: record.title.clone(),
            description: record.description.clone(),
            authors: self
                .authors
                .iter()
                .filter(|a| record.author_ids.contains(&a.id))
                .cloned()
                .collect(),
            genres: self
                .genres
                .iter()
                .filter(|g| record.genre_ids.contains(&g.id))
                .cloned()
                .collect(),
            is_logged_user_translator: false,
        }
    }

    fn rating(&self, book_id: Uuid) -> (f64, usize) {
        let values: Vec<u32> = self
            .ratings
            .iter()
            .filter(|((book, _), _)| *book == book_id)
            .map(|(_, value)| *value)
            .collect();
        if values.is_empty() {
            return (0.0, 0);
        }
        let total: u32 = values.iter().sum();
        (f64::from(total) / values.len() as f64, values.len())
    }

    fn user(&self, id: Uuid) -> Option<&UserRecord> {
        self.users.iter().find(|r| r.user.id == id)
    }
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(ApiState::seeded()));
    Router::new()
        .route(
            "/api/v1/auth",
            get(current_user).post(login).patch(refresh).delete(logout),
        )
        .route(
            "/api/v1/book",
            post(create_book).patch(edit_book).delete(delete_book),
        )
        .route("/api/v1/book/search", get(search_books))
        .route("/api/v1/book/{id}", get(get_book))
        .route(
            "/api/v1/book/{id}/raiting",
            get(get_rating).post(update_rating).delete(delete_rating),
        )
        .route(
            "/api/v1/genre",
            get(list_genres)
                .post(create_genre)
                .patch(edit_genre)
                .delete(delete_genre),
        )
        .route("/api/v1/user", get(list_users).patch(edit_user))
        .route("/api/v1/user/{id}", get(get_user))
        .route("/__test/expire-sessions", post(expire_sessions))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn error(status: StatusCode, body: Value) -> Response {
    (status, Json(body)).into_response()
}

fn unauthorized() -> Response {
    error(StatusCode::UNAUTHORIZED, json!({ "title": "Unauthorized" }))
}

fn not_found() -> Response {
    error(StatusCode::NOT_FOUND, json!({ "error": "not found" }))
}

fn field_error(field: &str, message: &str) -> Response {
    error(
        StatusCode::BAD_REQUEST,
        json!({ "errors": { field: [message] } }),
    )
}

fn cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}

fn set_cookie(name: &str, value: &str) -> String {
    format!("{name}={value}; Path=/; HttpOnly; SameSite=Lax")
}

fn clear_cookie(name: &str) -> String {
    format!("{name}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

fn new_token() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Id of the user owning the request's access cookie.
fn authenticate(state: &ApiState, headers: &HeaderMap) -> Result<Uuid, Response> {
    cookie(headers, ACCESS_COOKIE)
        .and_then(|token| state.access_tokens.get(token).copied())
        .ok_or_else(unauthorized)
}

fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw).ok()
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

async fn login(State(db): State<Db>, Json(form): Json<LoginForm>) -> Response {
    let mut state = db.write().await;
    let Some(user_id) = state
        .users
        .iter()
        .find(|r| r.user.login == form.login && r.password == form.password)
        .map(|r| r.user.id)
    else {
        return error(StatusCode::NOT_FOUND, json!({ "message": "User not found" }));
    };

    let access = new_token();
    let refresh = new_token();
    state.access_tokens.insert(access.clone(), user_id);
    state.refresh_tokens.insert(refresh.clone(), user_id);
    info!("{} logged in", form.login);

    (
        StatusCode::OK,
        AppendHeaders([
            (header::SET_COOKIE, set_cookie(ACCESS_COOKIE, &access)),
            (header::SET_COOKIE, set_cookie(REFRESH_COOKIE, &refresh)),
        ]),
    )
        .into_response()
}

async fn refresh(State(db): State<Db>, headers: HeaderMap) -> Response {
    let mut state = db.write().await;
    let Some(token) = cookie(&headers, REFRESH_COOKIE) else {
        return error(
            StatusCode::UNAUTHORIZED,
            json!({ "message": "Refresh token not found" }),
        );
    };
    let Some(user_id) = state.refresh_tokens.get(token).copied() else {
        return error(
            StatusCode::UNAUTHORIZED,
            json!({ "message": "Invalid refresh token" }),
        );
    };

    let access = new_token();
    state.access_tokens.insert(access.clone(), user_id);
    debug!("issued new access token for {user_id}");

    (
        StatusCode::OK,
        AppendHeaders([(header::SET_COOKIE, set_cookie(ACCESS_COOKIE, &access))]),
        Json(json!({ "message": "Token refreshed successfully" })),
    )
        .into_response()
}

async fn logout(State(db): State<Db>, headers: HeaderMap) -> Response {
    let mut state = db.write().await;
    if let Some(token) = cookie(&headers, ACCESS_COOKIE) {
        state.access_tokens.remove(token);
    }
    if let Some(token) = cookie(&headers, REFRESH_COOKIE) {
        state.refresh_tokens.remove(token);
    }

    (
        StatusCode::OK,
        AppendHeaders([
            (header::SET_COOKIE, clear_cookie(ACCESS_COOKIE)),
            (header::SET_COOKIE, clear_cookie(REFRESH_COOKIE)),
        ]),
    )
        .into_response()
}

async fn current_user(State(db): State<Db>, headers: HeaderMap) -> Response {
    let state = db.read().await;
    let user_id = match authenticate(&state, &headers) {
        Ok(id) => id,
        Err(response) => return response,
    };
    match state.user(user_id) {
        Some(record) => Json(record.user.clone()).into_response(),
        None => unauthorized(),
    }
}

async fn expire_sessions(State(db): State<Db>) -> StatusCode {
    let mut state = db.write().await;
    let dropped = state.access_tokens.len();
    state.access_tokens.clear();
    info!("expired {dropped} access tokens");
    StatusCode::NO_CONTENT
}

// ---------------------------------------------------------------------------
// Books
// ---------------------------------------------------------------------------

async fn get_book(State(db): State<Db>, Path(id): Path<String>) -> Response {
    let state = db.read().await;
    parse_id(&id)
        .and_then(|id| state.books.iter().find(|b| b.id == id))
        .map(|record| Json(json!({ "book": state.render_book(record) })).into_response())
        .unwrap_or_else(not_found)
}

struct SearchParams {
    page: usize,
    size: usize,
    title: Option<String>,
    author_ids: Vec<Uuid>,
    genre_ids: Vec<Uuid>,
    sort_by: Option<String>,
    descending: bool,
}

impl SearchParams {
    fn parse(query: &str) -> Result<Self, Response> {
        let mut params = SearchParams {
            page: 1,
            size: DEFAULT_PAGE_SIZE,
            title: None,
            author_ids: Vec::new(),
            genre_ids: Vec::new(),
            sort_by: None,
            descending: false,
        };
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "page" => {
                    params.page = value.parse().map_err(|_| field_error("page", "must be a number"))?
                }
                "size" => {
                    params.size = value.parse().map_err(|_| field_error("size", "must be a number"))?
                }
                "bookTitle" => params.title = Some(value.to_lowercase()),
                "authorIds[]" => params.author_ids.extend(parse_id(&value)),
                "genreIds[]" => params.genre_ids.extend(parse_id(&value)),
                "sortBy" => params.sort_by = Some(value.into_owned()),
                "sortType" => params.descending = value == "DESC",
                _ => {}
            }
        }
        if params.size == 0 {
            return Err(field_error("size", "must be positive"));
        }
        Ok(params)
    }
}

async fn search_books(State(db): State<Db>, RawQuery(query): RawQuery) -> Response {
    let params = match SearchParams::parse(query.as_deref().unwrap_or_default()) {
        Ok(params) => params,
        Err(response) => return response,
    };
    let state = db.read().await;

    let mut matches: Vec<&BookRecord> = state
        .books
        .iter()
        .filter(|b| {
            params
                .title
                .as_ref()
                .is_none_or(|t| b.title.to_lowercase().contains(t))
        })
        .filter(|b| {
            params.author_ids.is_empty() || b.author_ids.iter().any(|a| params.author_ids.contains(a))
        })
        .filter(|b| {
            params.genre_ids.is_empty() || b.genre_ids.iter().any(|g| params.genre_ids.contains(g))
        })
        .collect();

    match params.sort_by.as_deref() {
        Some("TITLE") => matches.sort_by(|a, b| a.title.cmp(&b.title)),
        Some("RATING") => matches.sort_by(|a, b| {
            state
                .rating(a.id)
                .0
                .partial_cmp(&state.rating(b.id).0)
                .unwrap_or(Ordering::Equal)
        }),
        Some("RATING_COUNT") => matches.sort_by_key(|b| state.rating(b.id).1),
        _ => {}
    }
    if params.descending {
        matches.reverse();
    }

    let count_pages = matches.len().div_ceil(params.size);
    // Pages past the end come back empty.
    let offset = params.page.saturating_sub(1).saturating_mul(params.size);
    let books: Vec<Book> = matches
        .into_iter()
        .skip(offset)
        .take(params.size)
        .map(|record| state.render_book(record))
        .collect();

    Json(json!({ "books": books, "countPages": count_pages })).into_response()
}

async fn create_book(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<CreateBook>,
) -> Response {
    let mut state = db.write().await;
    if let Err(response) = authenticate(&state, &headers) {
        return response;
    }
    if input.title.trim().is_empty() {
        return field_error("title", "must not be empty");
    }
    let id = Uuid::new_v4();
    state.books.push(BookRecord {
        id,
        title: input.title,
        description: input.description,
        author_ids: Vec::new(),
        genre_ids: Vec::new(),
    });
    Json(json!({ "bookId": id })).into_response()
}

async fn edit_book(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<EditBook>,
) -> Response {
    let mut state = db.write().await;
    if let Err(response) = authenticate(&state, &headers) {
        return response;
    }
    let Some(book) = state.books.iter_mut().find(|b| b.id == input.id) else {
        return not_found();
    };
    book.title = input.title;
    book.description = input.description;
    StatusCode::OK.into_response()
}

async fn delete_book(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<ById>,
) -> Response {
    let mut state = db.write().await;
    if let Err(response) = authenticate(&state, &headers) {
        return response;
    }
    let before = state.books.len();
    state.books.retain(|b| b.id != input.id);
    if state.books.len() == before {
        return not_found();
    }
    state.ratings.retain(|(book, _), _| *book != input.id);
    StatusCode::OK.into_response()
}

// ---------------------------------------------------------------------------
// Ratings
// ---------------------------------------------------------------------------

async fn get_rating(State(db): State<Db>, Path(id): Path<String>) -> Response {
    let state = db.read().await;
    let Some(book_id) = parse_id(&id).filter(|id| state.books.iter().any(|b| b.id == *id)) else {
        return not_found();
    };
    let (average, count) = state.rating(book_id);
    Json(json!({ "average": average, "count": count })).into_response()
}

async fn update_rating(
    State(db): State<Db>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(input): Json<UpdateRating>,
) -> Response {
    let mut state = db.write().await;
    let user_id = match authenticate(&state, &headers) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let Some(book_id) = parse_id(&id).filter(|id| state.books.iter().any(|b| b.id == *id)) else {
        return not_found();
    };
    if !(1..=5).contains(&input.value) {
        return field_error("value", "must be between 1 and 5");
    }
    state.ratings.insert((book_id, user_id), input.value);
    StatusCode::OK.into_response()
}

async fn delete_rating(State(db): State<Db>, Path(id): Path<String>, headers: HeaderMap) -> Response {
    let mut state = db.write().await;
    let user_id = match authenticate(&state, &headers) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let Some(book_id) = parse_id(&id) else {
        return not_found();
    };
    state.ratings.remove(&(book_id, user_id));
    StatusCode::OK.into_response()
}

// ---------------------------------------------------------------------------
// Genres
// ---------------------------------------------------------------------------

async fn list_genres(State(db): State<Db>) -> Json<Value> {
    let state = db.read().await;
    Json(json!({ "genres": state.genres }))
}

async fn create_genre(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<CreateGenre>,
) -> Response {
    let mut state = db.write().await;
    if let Err(response) = authenticate(&state, &headers) {
        return response;
    }
    if input.name.trim().is_empty() {
        return field_error("name", "must not be empty");
    }
    let id = state.add_genre(&input.name);
    Json(json!({ "id": id })).into_response()
}

async fn edit_genre(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<EditGenre>,
) -> Response {
    let mut state = db.write().await;
    if let Err(response) = authenticate(&state, &headers) {
        return response;
    }
    if input.name.trim().is_empty() {
        return field_error("name", "must not be empty");
    }
    let Some(genre) = state.genres.iter_mut().find(|g| g.id == input.id) else {
        return not_found();
    };
    genre.name = input.name;
    StatusCode::OK.into_response()
}

async fn delete_genre(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<ById>,
) -> Response {
    let mut state = db.write().await;
    if let Err(response) = authenticate(&state, &headers) {
        return response;
    }
    let before = state.genres.len();
    state.genres.retain(|g| g.id != input.id);
    if state.genres.len() == before {
        return not_found();
    }
    for book in &mut state.books {
        book.genre_ids.retain(|g| *g != input.id);
    }
    StatusCode::OK.into_response()
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

async fn list_users(State(db): State<Db>) -> Json<Vec<User>> {
    let state = db.read().await;
    Json(state.users.iter().map(|r| r.user.clone()).collect())
}

async fn get_user(State(db): State<Db>, Path(id): Path<String>) -> Response {
    let state = db.read().await;
    parse_id(&id)
        .and_then(|id| state.user(id))
        .map(|record| Json(record.user.clone()).into_response())
        .unwrap_or_else(not_found)
}

async fn edit_user(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<EditUser>,
) -> Response {
    let mut state = db.write().await;
    let caller = match authenticate(&state, &headers) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let caller_is_admin = state.user(caller).is_some_and(|r| r.user.role == 0);
    if caller != input.id && !caller_is_admin {
        return error(StatusCode::FORBIDDEN, json!({ "message": "forbidden" }));
    }
    if input.login.trim().is_empty() {
        return field_error("login", "must not be empty");
    }
    let Some(record) = state.users.iter_mut().find(|r| r.user.id == input.id) else {
        return not_found();
    };
    record.user.login = input.login;
    record.user.about_me = input.about_me;
    if !input.password.is_empty() {
        record.password = input.password;
    }
    Json(record.user.clone()).into_response()
}
