//! Genres.

use serde_json::Value;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest};
use crate::types::{CreateGenre, DeleteGenre, EditGenre, ListGenreResponse};

pub const PREFIX: &str = "/api/v1/genre";

#[derive(Debug, Clone, Copy)]
pub struct GenreApi<'a> {
    client: &'a ApiClient,
}

impl<'a> GenreApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub fn build_list_genres(&self) -> HttpRequest {
        self.client.request(HttpMethod::Get, PREFIX)
    }

    pub fn build_create_genre(&self, body: &CreateGenre) -> Result<HttpRequest, ApiError> {
        self.client.request(HttpMethod::Post, PREFIX).with_json(body)
    }

    pub fn build_edit_genre(&self, body: &EditGenre) -> Result<HttpRequest, ApiError> {
        self.client.request(HttpMethod::Patch, PREFIX).with_json(body)
    }

    pub fn build_delete_genre(&self, body: &DeleteGenre) -> Result<HttpRequest, ApiError> {
        self.client.request(HttpMethod::Delete, PREFIX).with_json(body)
    }

    pub fn list_genres(&self) -> Result<ListGenreResponse, ApiError> {
        self.client.send(self.build_list_genres())
    }

    pub fn create_genre(&self, body: &CreateGenre) -> Result<Value, ApiError> {
        self.client.send(self.build_create_genre(body)?)
    }

    pub fn edit_genre(&self, body: &EditGenre) -> Result<Value, ApiError> {
        self.client.send(self.build_edit_genre(body)?)
    }

    pub fn delete_genre(&self, body: &DeleteGenre) -> Result<Value, ApiError> {
        self.client.send(self.build_delete_genre(body)?)
    }
}
