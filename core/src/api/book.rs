//! Catalog books: detail, search and admin CRUD.

use serde_json::Value;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::{encode_query, encode_segment, HttpMethod, HttpRequest};
use crate::types::{BookSearch, CreateBook, DeleteBook, EditBook, GetBookResponse, ListBookResponse};

pub const PREFIX: &str = "/api/v1/book";

#[derive(Debug, Clone, Copy)]
pub struct BookApi<'a> {
    client: &'a ApiClient,
}

impl<'a> BookApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub fn build_get_book(&self, id: &str) -> HttpRequest {
        self.client
            .request(HttpMethod::Get, &format!("{PREFIX}/{}", encode_segment(id)))
    }

    pub fn build_search_books(&self, search: &BookSearch) -> HttpRequest {
        self.client
            .request(HttpMethod::Get, &format!("{PREFIX}/search"))
            .with_query(&encode_query(&search.query_pairs()))
    }

    pub fn build_create_book(&self, body: &CreateBook) -> Result<HttpRequest, ApiError> {
        self.client.request(HttpMethod::Post, PREFIX).with_json(body)
    }

    pub fn build_edit_book(&self, body: &EditBook) -> Result<HttpRequest, ApiError> {
        self.client.request(HttpMethod::Patch, PREFIX).with_json(body)
    }

    pub fn build_delete_book(&self, body: &DeleteBook) -> Result<HttpRequest, ApiError> {
        self.client.request(HttpMethod::Delete, PREFIX).with_json(body)
    }

    pub fn get_book(&self, id: &str) -> Result<GetBookResponse, ApiError> {
        self.client.send(self.build_get_book(id))
    }

    pub fn search_books(&self, search: &BookSearch) -> Result<ListBookResponse, ApiError> {
        self.client.send(self.build_search_books(search))
    }

    pub fn create_book(&self, body: &CreateBook) -> Result<Value, ApiError> {
        self.client.send(self.build_create_book(body)?)
    }

    pub fn edit_book(&self, body: &EditBook) -> Result<Value, ApiError> {
        self.client.send(self.build_edit_book(body)?)
    }

    pub fn delete_book(&self, body: &DeleteBook) -> Result<Value, ApiError> {
        self.client.send(self.build_delete_book(body)?)
    }
}
