//! Stored images for books, users and authors.
//!
//! Fetching an image is a POST carrying its id.

use serde_json::Value;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest};
use crate::types::{Image, ImageRef, StoreImageAuthor, StoreImageBook};

pub const PREFIX: &str = "/api/v1/image";

/// Base64 image blobs for book covers, avatars and author portraits.
#[derive(Debug, Clone, Copy)]
pub struct ImageApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ImageApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub fn build_get_image(&self, image: &ImageRef) -> Result<HttpRequest, ApiError> {
        self.client.request(HttpMethod::Post, PREFIX).with_json(image)
    }

    pub fn build_delete_image(&self, image: &ImageRef) -> Result<HttpRequest, ApiError> {
        self.client.request(HttpMethod::Delete, PREFIX).with_json(image)
    }

    pub fn build_store_book_image(&self, body: &StoreImageBook) -> Result<HttpRequest, ApiError> {
        self.client
            .request(HttpMethod::Post, &format!("{PREFIX}/book"))
            .with_json(body)
    }

    /// The avatar always belongs to the logged-in user.
    pub fn build_store_user_image(&self, body: &Image) -> Result<HttpRequest, ApiError> {
        self.client
            .request(HttpMethod::Post, &format!("{PREFIX}/user"))
            .with_json(body)
    }

    pub fn build_store_author_image(&self, body: &StoreImageAuthor) -> Result<HttpRequest, ApiError> {
        self.client
            .request(HttpMethod::Post, &format!("{PREFIX}/author"))
            .with_json(body)
    }

    pub fn get_image(&self, image: &ImageRef) -> Result<Image, ApiError> {
        self.client.send(self.build_get_image(image)?)
    }

    pub fn delete_image(&self, image: &ImageRef) -> Result<Value, ApiError> {
        self.client.send(self.build_delete_image(image)?)
    }

    pub fn store_book_image(&self, body: &StoreImageBook) -> Result<Value, ApiError> {
        self.client.send(self.build_store_book_image(body)?)
    }

    pub fn store_user_image(&self, body: &Image) -> Result<Value, ApiError> {
        self.client.send(self.build_store_user_image(body)?)
    }

    pub fn store_author_image(&self, body: &StoreImageAuthor) -> Result<Value, ApiError> {
        self.client.send(self.build_store_author_image(body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{client_with, response};

    #[test]
    fn store_paths_follow_owner() {
        let (client, _, _) = client_with(Vec::new());
        let images = client.images();
        let book = images
            .build_store_book_image(&StoreImageBook {
                book_id: "b1".to_string(),
                image_data: "AAAA".to_string(),
            })
            .unwrap();
        let user = images
            .build_store_user_image(&Image {
                image_data: "AAAA".to_string(),
            })
            .unwrap();
        let author = images
            .build_store_author_image(&StoreImageAuthor {
                author_id: "a1".to_string(),
                image_data: "AAAA".to_string(),
            })
            .unwrap();
        assert_eq!(book.path, "http://localhost:3000/api/v1/image/book");
        assert_eq!(user.path, "http://localhost:3000/api/v1/image/user");
        assert_eq!(author.path, "http://localhost:3000/api/v1/image/author");
        assert_eq!(user.body.as_deref(), Some(r#"{"imageData":"AAAA"}"#));
    }

    #[test]
    fn get_image_posts_reference() {
        let (client, transport, _) = client_with(vec![response(200, r#"{"imageData":"iVBORw0"}"#)]);
        let image = client
            .images()
            .get_image(&ImageRef {
                image_id: "img-1".to_string(),
            })
            .unwrap();
        assert_eq!(image.image_data, "iVBORw0");
        let sent = &transport.requests()[0];
        assert_eq!(sent.method, HttpMethod::Post);
        assert_eq!(sent.body.as_deref(), Some(r#"{"imageId":"img-1"}"#));
    }
}
