//! Request and response shapes of the book catalog API.
//!
//! # Design
//! These types mirror the server's JSON schema (camelCase on the wire) but
//! are defined independently from the mock-server crate; integration tests
//! catch schema drift between the two. Identifiers are kept as strings, the
//! client never interprets them.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

/// Credentials submitted on login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthForm {
    pub login: String,
    pub password: String,
}

// ---------------------------------------------------------------------------
// Author
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: String,
    pub first_name: String,
    pub second_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAuthor {
    pub first_name: String,
    pub second_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nick_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditAuthor {
    pub id: String,
    pub first_name: String,
    pub second_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nick_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteAuthor {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListAuthorResponse {
    pub authors: Vec<Author>,
}

// ---------------------------------------------------------------------------
// Book
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub book_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub authors: Vec<Author>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub is_logged_user_translator: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetBookResponse {
    pub book: Book,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListBookResponse {
    pub books: Vec<Book>,
    pub count_pages: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateBook {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditBook {
    pub id: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteBook {
    pub id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortBy {
    Title,
    Rating,
    RatingCount,
    ChaptersCount,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Title => "TITLE",
            SortBy::Rating => "RATING",
            SortBy::RatingCount => "RATING_COUNT",
            SortBy::ChaptersCount => "CHAPTERS_COUNT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortType {
    Asc,
    Desc,
}

impl SortType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortType::Asc => "ASC",
            SortType::Desc => "DESC",
        }
    }
}

/// Catalog search filters. `page` is 1-based.
///
/// Unset, empty and zero-valued filters are left out of the query.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BookSearch {
    pub page: u32,
    pub size: u32,
    pub book_title: Option<String>,
    pub author_ids: Vec<String>,
    pub genre_ids: Vec<String>,
    pub min_chapters_count: Option<u32>,
    pub max_chapters_count: Option<u32>,
    pub min_rating: Option<f64>,
    pub max_rating: Option<f64>,
    pub min_rating_count: Option<u32>,
    pub max_rating_count: Option<u32>,
    pub sort_by: Option<SortBy>,
    pub sort_type: Option<SortType>,
}

impl BookSearch {
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page,
            size,
            ..Self::default()
        }
    }

    /// Query parameters in the order the server documents them.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("page", self.page.to_string()), ("size", self.size.to_string())];

        if let Some(title) = self.book_title.as_deref().filter(|t| !t.is_empty()) {
            pairs.push(("bookTitle", title.to_string()));
        }
        pairs.extend(self.author_ids.iter().map(|id| ("authorIds[]", id.clone())));
        pairs.extend(self.genre_ids.iter().map(|id| ("genreIds[]", id.clone())));

        let counts = [
            ("minChaptersCount", self.min_chapters_count),
            ("maxChaptersCount", self.max_chapters_count),
        ];
        push_nonzero(&mut pairs, &counts);
        for (name, value) in [("minRating", self.min_rating), ("maxRating", self.max_rating)] {
            if let Some(value) = value.filter(|v| *v != 0.0) {
                pairs.push((name, value.to_string()));
            }
        }
        let counts = [
            ("minRatingCount", self.min_rating_count),
            ("maxRatingCount", self.max_rating_count),
        ];
        push_nonzero(&mut pairs, &counts);

        if let Some(sort_by) = self.sort_by {
            pairs.push(("sortBy", sort_by.as_str().to_string()));
        }
        if let Some(sort_type) = self.sort_type {
            pairs.push(("sortType", sort_type.as_str().to_string()));
        }
        pairs
    }
}

fn push_nonzero(pairs: &mut Vec<(&'static str, String)>, values: &[(&'static str, Option<u32>)]) {
    for &(name, value) in values {
        if let Some(value) = value.filter(|v| *v != 0) {
            pairs.push((name, value.to_string()));
        }
    }
}

// ---------------------------------------------------------------------------
// Book ↔ author / genre links
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookAuthorLink {
    pub book_id: String,
    pub author_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookGenreLink {
    pub book_id: String,
    pub genre_id: String,
}

// ---------------------------------------------------------------------------
// Book chapter
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookChapter {
    pub book_chapter_id: String,
    pub index: u32,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListBookChapterResponse {
    pub book_chapters: Vec<BookChapter>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookChapter {
    pub book_id: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditBookChapter {
    pub book_chapter_id: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteBookChapter {
    pub book_chapter_id: String,
}

// ---------------------------------------------------------------------------
// Book chapter translation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetBookChapterTranslation {
    pub book_chapter_id: String,
    pub translator_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreBookChapterTranslation {
    pub book_chapter_id: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookChapterTranslation {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTranslators {
    pub book_chapter_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTranslatorsResponse {
    pub translators_id: Vec<String>,
}

// ---------------------------------------------------------------------------
// Book rating
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateBookRating {
    pub value: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetBookRatingResponse {
    #[serde(default)]
    pub average: f64,
    #[serde(default)]
    pub count: u64,
}

// ---------------------------------------------------------------------------
// Genre
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListGenreResponse {
    pub genres: Vec<Genre>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateGenre {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditGenre {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteGenre {
    pub id: String,
}

// ---------------------------------------------------------------------------
// Image
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRef {
    pub image_id: String,
}

/// Base64-encoded image payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub image_data: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreImageBook {
    pub book_id: String,
    pub image_data: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreImageAuthor {
    pub author_id: String,
    pub image_data: String,
}

// ---------------------------------------------------------------------------
// Reading session
// ---------------------------------------------------------------------------

// The server spells the chapter field `bookChaptedId`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreReadingSession {
    pub book_id: String,
    #[serde(rename = "bookChaptedId")]
    pub book_chapter_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetReadingSessionResponse {
    #[serde(rename = "bookChaptedId")]
    pub book_chapter_id: String,
}

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// Sent as its numeric code: 0 for admin, 1 for client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum UserRole {
    Admin,
    Client,
}

impl From<UserRole> for u8 {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::Admin => 0,
            UserRole::Client => 1,
        }
    }
}

impl TryFrom<u8> for UserRole {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(UserRole::Admin),
            1 => Ok(UserRole::Client),
            other => Err(format!("unknown user role {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub login: String,
    pub role: UserRole,
    #[serde(default)]
    pub about_me: String,
    #[serde(default, alias = "avatar", skip_serializing_if = "Option::is_none")]
    pub avatar_id: Option<String>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    pub login: String,
    pub password: String,
    pub about_me: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditUser {
    pub id: String,
    pub login: String,
    pub password: String,
    pub about_me: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteUser {
    pub id: String,
}

// ---------------------------------------------------------------------------
// User book favourites
// ---------------------------------------------------------------------------

/// Shelf a user has put a book on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FavoriteType {
    Reading,
    Planned,
    Deferred,
    Read,
    Dropped,
    Favorite,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookRef {
    pub book_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListBookByFavorites {
    pub types: Vec<FavoriteType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListBookByFavoritesResponse {
    pub books: Vec<Book>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreUserBookFavorites {
    pub book_id: String,
    #[serde(rename = "type")]
    pub favorite_type: FavoriteType,
}

// ---------------------------------------------------------------------------
// Verify book request
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyBookRequest {
    pub verify_book_request_id: String,
    pub translator_id: String,
    pub book_id: String,
    pub is_verified: bool,
    pub send_date_milli: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListVerifyBookRequestResponse {
    pub verify_book_requests: Vec<VerifyBookRequest>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyBookRequestRef {
    pub verify_book_request_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptVerifyBookRequest {
    pub verify_book_request_id: String,
    pub accept: bool,
}
