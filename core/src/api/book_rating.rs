//! Per-book ratings under `/book/{id}/raiting`.

use serde_json::Value;

use crate::api::book;
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::{encode_segment, HttpMethod, HttpRequest};
use crate::types::{GetBookRatingResponse, UpdateBookRating};

/// Ratings hang off the book resource at `/api/v1/book/{id}/raiting`.
#[derive(Debug, Clone, Copy)]
pub struct BookRatingApi<'a> {
    client: &'a ApiClient,
}

impl<'a> BookRatingApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    fn rating_path(book_id: &str) -> String {
        // The server spells the segment this way.
        format!("{}/{}/raiting", book::PREFIX, encode_segment(book_id))
    }

    pub fn build_update_rating(&self, book_id: &str, body: &UpdateBookRating) -> Result<HttpRequest, ApiError> {
        self.client
            .request(HttpMethod::Post, &Self::rating_path(book_id))
            .with_json(body)
    }

    pub fn build_delete_rating(&self, book_id: &str) -> HttpRequest {
        self.client
            .request(HttpMethod::Delete, &Self::rating_path(book_id))
    }

    pub fn build_get_rating(&self, book_id: &str) -> HttpRequest {
        self.client.request(HttpMethod::Get, &Self::rating_path(book_id))
    }

    pub fn update_rating(&self, book_id: &str, body: &UpdateBookRating) -> Result<Value, ApiError> {
        self.client.send(self.build_update_rating(book_id, body)?)
    }

    pub fn delete_rating(&self, book_id: &str) -> Result<Value, ApiError> {
        self.client.send(self.build_delete_rating(book_id))
    }

    pub fn get_rating(&self, book_id: &str) -> Result<GetBookRatingResponse, ApiError> {
        self.client.send(self.build_get_rating(book_id))
    }
}
