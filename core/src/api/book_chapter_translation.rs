//! Per-translator chapter texts.
//!
//! Every call here is a POST, including the reads, since the server expects
//! the lookup keys as a JSON body.

use serde_json::Value;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest};
use crate::types::{
    BookChapterTranslation, GetBookChapterTranslation, ListTranslators, ListTranslatorsResponse,
    StoreBookChapterTranslation,
};

pub const PREFIX: &str = "/api/v1/book-chapter-translation";

#[derive(Debug, Clone, Copy)]
pub struct BookChapterTranslationApi<'a> {
    client: &'a ApiClient,
}

impl<'a> BookChapterTranslationApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub fn build_get_translation(&self, body: &GetBookChapterTranslation) -> Result<HttpRequest, ApiError> {
        self.client.request(HttpMethod::Post, PREFIX).with_json(body)
    }

    pub fn build_store_translation(
        &self,
        body: &StoreBookChapterTranslation,
    ) -> Result<HttpRequest, ApiError> {
        self.client.request(HttpMethod::Post, PREFIX).with_json(body)
    }

    pub fn build_list_translators(&self, body: &ListTranslators) -> Result<HttpRequest, ApiError> {
        self.client
            .request(HttpMethod::Post, &format!("{PREFIX}/translator"))
            .with_json(body)
    }

    pub fn get_translation(&self, body: &GetBookChapterTranslation) -> Result<BookChapterTranslation, ApiError> {
        self.client.send(self.build_get_translation(body)?)
    }

    pub fn store_translation(&self, body: &StoreBookChapterTranslation) -> Result<Value, ApiError> {
        self.client.send(self.build_store_translation(body)?)
    }

    pub fn list_translators(&self, body: &ListTranslators) -> Result<ListTranslatorsResponse, ApiError> {
        self.client.send(self.build_list_translators(body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{client_with, response};

    #[test]
    fn list_translators_posts_to_sub_path() {
        let (client, _, _) = client_with(Vec::new());
        let req = client
            .book_chapter_translations()
            .build_list_translators(&ListTranslators {
                book_chapter_id: "c1".to_string(),
            })
            .unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(
            req.path,
            "http://localhost:3000/api/v1/book-chapter-translation/translator"
        );
        assert_eq!(req.body.as_deref(), Some(r#"{"bookChapterId":"c1"}"#));
    }

    #[test]
    fn get_translation_returns_text() {
        let (client, transport, _) = client_with(vec![response(200, r#"{"text":"Once upon a time"}"#)]);
        let translation = client
            .book_chapter_translations()
            .get_translation(&GetBookChapterTranslation {
                book_chapter_id: "c1".to_string(),
                translator_id: "u2".to_string(),
            })
            .unwrap();
        assert_eq!(translation.text, "Once upon a time");
        assert_eq!(
            transport.requests()[0].body.as_deref(),
            Some(r#"{"bookChapterId":"c1","translatorId":"u2"}"#)
        );
    }

    #[test]
    fn list_translators_parses_ids() {
        let (client, _, _) = client_with(vec![response(200, r#"{"translatorsId":["u1","u2"]}"#)]);
        let list = client
            .book_chapter_translations()
            .list_translators(&ListTranslators {
                book_chapter_id: "c1".to_string(),
            })
            .unwrap();
        assert_eq!(list.translators_id, vec!["u1", "u2"]);
    }
}
