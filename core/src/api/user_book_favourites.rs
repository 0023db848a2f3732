//! A user's favourite books, grouped by `FavoriteType`.

use serde_json::Value;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest};
use crate::types::{
    BookRef, FavoriteType, ListBookByFavorites, ListBookByFavoritesResponse, StoreUserBookFavorites,
};

pub const PREFIX: &str = "/api/v1/user-book-favourites";

/// The logged-in user's reading shelves.
#[derive(Debug, Clone, Copy)]
pub struct UserBookFavouritesApi<'a> {
    client: &'a ApiClient,
}

impl<'a> UserBookFavouritesApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub fn build_get_favorite_type(&self, book: &BookRef) -> Result<HttpRequest, ApiError> {
        self.client.request(HttpMethod::Post, PREFIX).with_json(book)
    }

    pub fn build_list_books_by_favorites(&self, body: &ListBookByFavorites) -> Result<HttpRequest, ApiError> {
        self.client
            .request(HttpMethod::Post, &format!("{PREFIX}/book"))
            .with_json(body)
    }

    pub fn build_store_favorite(&self, body: &StoreUserBookFavorites) -> Result<HttpRequest, ApiError> {
        self.client.request(HttpMethod::Post, PREFIX).with_json(body)
    }

    pub fn build_delete_favorite(&self, book: &BookRef) -> Result<HttpRequest, ApiError> {
        self.client.request(HttpMethod::Delete, PREFIX).with_json(book)
    }

    /// Shelf the book is on; the server answers with the bare type string.
    pub fn get_favorite_type(&self, book: &BookRef) -> Result<FavoriteType, ApiError> {
        self.client.send(self.build_get_favorite_type(book)?)
    }

    pub fn list_books_by_favorites(
        &self,
        body: &ListBookByFavorites,
    ) -> Result<ListBookByFavoritesResponse, ApiError> {
        self.client.send(self.build_list_books_by_favorites(body)?)
    }

    pub fn store_favorite(&self, body: &StoreUserBookFavorites) -> Result<Value, ApiError> {
        self.client.send(self.build_store_favorite(body)?)
    }

    pub fn delete_favorite(&self, book: &BookRef) -> Result<Value, ApiError> {
        self.client.send(self.build_delete_favorite(book)?)
    }
}
