//! Chapters of a book. The list takes the book id as a `bookId` query parameter.

use serde_json::Value;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::{encode_query, HttpMethod, HttpRequest};
use crate::types::{CreateBookChapter, DeleteBookChapter, EditBookChapter, ListBookChapterResponse};

pub const PREFIX: &str = "/api/v1/book-chapter";

#[derive(Debug, Clone, Copy)]
pub struct BookChapterApi<'a> {
    client: &'a ApiClient,
}

impl<'a> BookChapterApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Chapters of `book_id`. The book goes in the query, never in a GET body.
    pub fn build_list_book_chapters(&self, book_id: &str) -> HttpRequest {
        self.client
            .request(HttpMethod::Get, PREFIX)
            .with_query(&encode_query(&[("bookId", book_id)]))
    }

    pub fn build_create_book_chapter(&self, body: &CreateBookChapter) -> Result<HttpRequest, ApiError> {
        self.client.request(HttpMethod::Post, PREFIX).with_json(body)
    }

    pub fn build_edit_book_chapter(&self, body: &EditBookChapter) -> Result<HttpRequest, ApiError> {
        self.client.request(HttpMethod::Patch, PREFIX).with_json(body)
    }

    pub fn build_delete_book_chapter(&self, body: &DeleteBookChapter) -> Result<HttpRequest, ApiError> {
        self.client.request(HttpMethod::Delete, PREFIX).with_json(body)
    }

    pub fn list_book_chapters(&self, book_id: &str) -> Result<ListBookChapterResponse, ApiError> {
        self.client.send(self.build_list_book_chapters(book_id))
    }

    pub fn create_book_chapter(&self, body: &CreateBookChapter) -> Result<Value, ApiError> {
        self.client.send(self.build_create_book_chapter(body)?)
    }

    pub fn edit_book_chapter(&self, body: &EditBookChapter) -> Result<Value, ApiError> {
        self.client.send(self.build_edit_book_chapter(body)?)
    }

    pub fn delete_book_chapter(&self, body: &DeleteBookChapter) -> Result<Value, ApiError> {
        self.client.send(self.build_delete_book_chapter(body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{client_with, response};

    #[test]
    fn list_uses_query_instead_of_body() {
        let (client, _, _) = client_with(Vec::new());
        let req = client.book_chapters().build_list_book_chapters("b 1");
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/api/v1/book-chapter?bookId=b+1");
        assert!(req.body.is_none());
    }

    #[test]
    fn list_parses_chapters() {
        let (client, _, _) = client_with(vec![response(
            200,
            r#"{"bookChapters":[{"bookChapterId":"c1","index":1,"title":"Prologue"},{"bookChapterId":"c2","index":2,"title":"Arrakis"}]}"#,
        )]);
        let list = client.book_chapters().list_book_chapters("b1").unwrap();
        let titles: Vec<&str> = list.book_chapters.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Prologue", "Arrakis"]);
    }

    #[test]
    fn edit_chapter_body_is_camel_case() {
        let (client, _, _) = client_with(Vec::new());
        let req = client
            .book_chapters()
            .build_edit_book_chapter(&EditBookChapter {
                book_chapter_id: "c1".to_string(),
                title: "Prologue".to_string(),
            })
            .unwrap();
        assert_eq!(req.method, HttpMethod::Patch);
        assert_eq!(req.body.as_deref(), Some(r#"{"bookChapterId":"c1","title":"Prologue"}"#));
    }
}
