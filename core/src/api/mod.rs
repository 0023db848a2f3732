//! One client per REST resource.
//!
//! Every operation comes in two halves: a pure `build_*` method that returns
//! the `HttpRequest` descriptor, and a calling method that sends it through
//! `ApiClient::send` (and so through session recovery). Calls whose response
//! has no fixed shape return the raw JSON `Value`.

mod auth;
mod author;
mod book;
mod book_author;
mod book_chapter;
mod book_chapter_translation;
mod book_genre;
mod book_rating;
mod genre;
mod image;
mod reading_session;
mod user;
mod user_book_favourites;
mod verify_book_request;

pub use auth::AuthApi;
pub use author::AuthorApi;
pub use book::BookApi;
pub use book_author::BookAuthorApi;
pub use book_chapter::BookChapterApi;
pub use book_chapter_translation::BookChapterTranslationApi;
pub use book_genre::BookGenreApi;
pub use book_rating::BookRatingApi;
pub use genre::GenreApi;
pub use image::ImageApi;
pub use reading_session::ReadingSessionApi;
pub use user::UserApi;
pub use user_book_favourites::UserBookFavouritesApi;
pub use verify_book_request::VerifyBookRequestApi;
