//! Linking genres to books.

use serde_json::Value;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest};
use crate::types::BookGenreLink;

pub const PREFIX: &str = "/api/v1/book-genre";

#[derive(Debug, Clone, Copy)]
pub struct BookGenreApi<'a> {
    client: &'a ApiClient,
}

impl<'a> BookGenreApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub fn build_store_book_genre(&self, link: &BookGenreLink) -> Result<HttpRequest, ApiError> {
        self.client.request(HttpMethod::Post, PREFIX).with_json(link)
    }

    pub fn build_delete_book_genre(&self, link: &BookGenreLink) -> Result<HttpRequest, ApiError> {
        self.client.request(HttpMethod::Delete, PREFIX).with_json(link)
    }

    pub fn store_book_genre(&self, link: &BookGenreLink) -> Result<Value, ApiError> {
        self.client.send(self.build_store_book_genre(link)?)
    }

    pub fn delete_book_genre(&self, link: &BookGenreLink) -> Result<Value, ApiError> {
        self.client.send(self.build_delete_book_genre(link)?)
    }
}
