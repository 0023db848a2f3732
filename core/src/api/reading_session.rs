//! Reading progress: the last session for a book, and recording a new one.

use serde_json::Value;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::{encode_query, HttpMethod, HttpRequest};
use crate::types::{GetReadingSessionResponse, StoreReadingSession};

pub const PREFIX: &str = "/api/v1/reading-session";

/// Where the logged-in user stopped reading a book.
#[derive(Debug, Clone, Copy)]
pub struct ReadingSessionApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ReadingSessionApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub fn build_get_last_reading_session(&self, book_id: &str) -> HttpRequest {
        self.client
            .request(HttpMethod::Get, PREFIX)
            .with_query(&encode_query(&[("bookId", book_id)]))
    }

    pub fn build_store_reading_session(&self, body: &StoreReadingSession) -> Result<HttpRequest, ApiError> {
        self.client.request(HttpMethod::Post, PREFIX).with_json(body)
    }

    pub fn get_last_reading_session(&self, book_id: &str) -> Result<GetReadingSessionResponse, ApiError> {
        self.client.send(self.build_get_last_reading_session(book_id))
    }

    pub fn store_reading_session(&self, body: &StoreReadingSession) -> Result<Value, ApiError> {
        self.client.send(self.build_store_reading_session(body)?)
    }
}
