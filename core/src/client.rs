//! The shared request pipeline behind every resource client.
//!
//! # Design
//! `ApiClient` holds the base URL, the transport and the navigator, all
//! cheap to clone. Resource clients borrow it through accessors such as
//! `client.books()` and split each operation into a pure `build_*` method
//! that produces an `HttpRequest` and a calling method that sends it.
//!
//! `send` is the only path to the network for resource calls: it executes
//! the descriptor, hands non-2xx responses to `recovery::recover` with the
//! same descriptor as the retry request, and deserializes the final body.

use std::fmt;
use std::sync::Arc;

use log::debug;
use serde::de::DeserializeOwned;
use url::Url;

use crate::api::{
    AuthApi, AuthorApi, BookApi, BookAuthorApi, BookChapterApi, BookChapterTranslationApi,
    BookGenreApi, BookRatingApi, GenreApi, ImageApi, ReadingSessionApi, UserApi,
    UserBookFavouritesApi, VerifyBookRequestApi,
};
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::navigation::Navigator;
use crate::recovery;
use crate::transport::{Transport, UreqTransport};

/// Entry point for all API calls.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    transport: Arc<dyn Transport>,
    navigator: Arc<dyn Navigator>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(
        base_url: &str,
        transport: Arc<dyn Transport>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ApiError> {
        Url::parse(base_url)?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
            navigator,
        })
    }

    /// Build a client with a cookie-keeping `UreqTransport` configured from `config`.
    pub fn from_config(config: &ClientConfig, navigator: Arc<dyn Navigator>) -> Result<Self, ApiError> {
        let transport = Arc::new(UreqTransport::new(config.timeout()));
        Self::new(&config.base_url, transport, navigator)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn navigator(&self) -> &dyn Navigator {
        self.navigator.as_ref()
    }

    /// Start a descriptor for `path`, which must begin with `/`.
    pub fn request(&self, method: HttpMethod, path: &str) -> HttpRequest {
        HttpRequest::new(method, format!("{}{path}", self.base_url))
    }

    /// Execute a descriptor once, without recovery.
    pub fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        self.transport.execute(request)
    }

    /// Send a request; on failure, refresh the session and replay it once.
    pub fn send<T: DeserializeOwned>(&self, request: HttpRequest) -> Result<T, ApiError> {
        let response = self.execute(&request)?;
        let response = if response.is_success() {
            response
        } else {
            debug!("{} {} failed with {}", request.method.as_str(), request.path, response.status);
            recovery::recover(self, response, Some(&request))?
        };
        parse_body(&response)
    }

    /// Send a request whose failure is reported without a refresh attempt.
    pub fn send_without_retry<T: DeserializeOwned>(&self, request: HttpRequest) -> Result<T, ApiError> {
        let response = self.execute(&request)?;
        let response = if response.is_success() {
            response
        } else {
            recovery::recover(self, response, None)?
        };
        parse_body(&response)
    }

    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    pub fn authors(&self) -> AuthorApi<'_> {
        AuthorApi::new(self)
    }

    pub fn books(&self) -> BookApi<'_> {
        BookApi::new(self)
    }

    pub fn book_authors(&self) -> BookAuthorApi<'_> {
        BookAuthorApi::new(self)
    }

    pub fn book_chapters(&self) -> BookChapterApi<'_> {
        BookChapterApi::new(self)
    }

    pub fn book_chapter_translations(&self) -> BookChapterTranslationApi<'_> {
        BookChapterTranslationApi::new(self)
    }

    pub fn book_genres(&self) -> BookGenreApi<'_> {
        BookGenreApi::new(self)
    }

    pub fn book_ratings(&self) -> BookRatingApi<'_> {
        BookRatingApi::new(self)
    }

    pub fn genres(&self) -> GenreApi<'_> {
        GenreApi::new(self)
    }

    pub fn images(&self) -> ImageApi<'_> {
        ImageApi::new(self)
    }

    pub fn reading_sessions(&self) -> ReadingSessionApi<'_> {
        ReadingSessionApi::new(self)
    }

    pub fn users(&self) -> UserApi<'_> {
        UserApi::new(self)
    }

    pub fn favourites(&self) -> UserBookFavouritesApi<'_> {
        UserBookFavouritesApi::new(self)
    }

    pub fn verify_book_requests(&self) -> VerifyBookRequestApi<'_> {
        VerifyBookRequestApi::new(self)
    }
}

/// Deserialize a 2xx body. An empty body reads as JSON `null`.
fn parse_body<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    let body = if response.body.trim().is_empty() {
        "null"
    } else {
        response.body.as_str()
    };
    serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))
}
