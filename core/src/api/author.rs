//! Authors: lookup, listing and admin CRUD.

use serde_json::Value;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::{encode_segment, HttpMethod, HttpRequest};
use crate::types::{Author, CreateAuthor, DeleteAuthor, EditAuthor, ListAuthorResponse};

pub const PREFIX: &str = "/api/v1/author";

#[derive(Debug, Clone, Copy)]
pub struct AuthorApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthorApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub fn build_get_author(&self, id: &str) -> HttpRequest {
        self.client
            .request(HttpMethod::Get, &format!("{PREFIX}/{}", encode_segment(id)))
    }

    pub fn build_list_authors(&self) -> HttpRequest {
        self.client.request(HttpMethod::Get, PREFIX)
    }

    pub fn build_create_author(&self, body: &CreateAuthor) -> Result<HttpRequest, ApiError> {
        self.client.request(HttpMethod::Post, PREFIX).with_json(body)
    }

    pub fn build_edit_author(&self, body: &EditAuthor) -> Result<HttpRequest, ApiError> {
        self.client.request(HttpMethod::Patch, PREFIX).with_json(body)
    }

    pub fn build_delete_author(&self, body: &DeleteAuthor) -> Result<HttpRequest, ApiError> {
        self.client.request(HttpMethod::Delete, PREFIX).with_json(body)
    }

    pub fn get_author(&self, id: &str) -> Result<Author, ApiError> {
        self.client.send(self.build_get_author(id))
    }

    pub fn list_authors(&self) -> Result<ListAuthorResponse, ApiError> {
        self.client.send(self.build_list_authors())
    }

    pub fn create_author(&self, body: &CreateAuthor) -> Result<Value, ApiError> {
        self.client.send(self.build_create_author(body)?)
    }

    pub fn edit_author(&self, body: &EditAuthor) -> Result<Value, ApiError> {
        self.client.send(self.build_edit_author(body)?)
    }

    pub fn delete_author(&self, body: &DeleteAuthor) -> Result<Value, ApiError> {
        self.client.send(self.build_delete_author(body)?)
    }
}
