//! Linking authors to books.

use serde_json::Value;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest};
use crate::types::BookAuthorLink;

pub const PREFIX: &str = "/api/v1/book-author";

/// Links between books and their authors.
#[derive(Debug, Clone, Copy)]
pub struct BookAuthorApi<'a> {
    client: &'a ApiClient,
}

impl<'a> BookAuthorApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub fn build_store_book_author(&self, link: &BookAuthorLink) -> Result<HttpRequest, ApiError> {
        self.client.request(HttpMethod::Post, PREFIX).with_json(link)
    }

    pub fn build_delete_book_author(&self, link: &BookAuthorLink) -> Result<HttpRequest, ApiError> {
        self.client.request(HttpMethod::Delete, PREFIX).with_json(link)
    }

    pub fn store_book_author(&self, link: &BookAuthorLink) -> Result<Value, ApiError> {
        self.client.send(self.build_store_book_author(link)?)
    }

    pub fn delete_book_author(&self, link: &BookAuthorLink) -> Result<Value, ApiError> {
        self.client.send(self.build_delete_book_author(link)?)
    }
}
