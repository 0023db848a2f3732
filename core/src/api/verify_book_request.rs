//! Requests to publish a book, and their review by admins.

use serde_json::Value;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest};
use crate::types::{AcceptVerifyBookRequest, BookRef, ListVerifyBookRequestResponse, VerifyBookRequestRef};

pub const PREFIX: &str = "/api/v1/verify-book-request";

/// Translator requests awaiting admin review.
#[derive(Debug, Clone, Copy)]
pub struct VerifyBookRequestApi<'a> {
    client: &'a ApiClient,
}

impl<'a> VerifyBookRequestApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub fn build_list_requests(&self) -> HttpRequest {
        self.client.request(HttpMethod::Get, PREFIX)
    }

    pub fn build_create_request(&self, book: &BookRef) -> Result<HttpRequest, ApiError> {
        self.client.request(HttpMethod::Post, PREFIX).with_json(book)
    }

    pub fn build_delete_request(&self, request: &VerifyBookRequestRef) -> Result<HttpRequest, ApiError> {
        self.client.request(HttpMethod::Delete, PREFIX).with_json(request)
    }

    pub fn build_accept_request(&self, body: &AcceptVerifyBookRequest) -> Result<HttpRequest, ApiError> {
        self.client
            .request(HttpMethod::Post, &format!("{PREFIX}/accept"))
            .with_json(body)
    }

    pub fn list_requests(&self) -> Result<ListVerifyBookRequestResponse, ApiError> {
        self.client.send(self.build_list_requests())
    }

    pub fn create_request(&self, book: &BookRef) -> Result<Value, ApiError> {
        self.client.send(self.build_create_request(book)?)
    }

    pub fn delete_request(&self, request: &VerifyBookRequestRef) -> Result<Value, ApiError> {
        self.client.send(self.build_delete_request(request)?)
    }

    pub fn accept_request(&self, body: &AcceptVerifyBookRequest) -> Result<Value, ApiError> {
        self.client.send(self.build_accept_request(body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{client_with, response};

    #[test]
    fn accept_posts_decision() {
        let (client, _, _) = client_with(Vec::new());
        let req = client
            .verify_book_requests()
            .build_accept_request(&AcceptVerifyBookRequest {
                verify_book_request_id: "v1".to_string(),
                accept: false,
            })
            .unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/api/v1/verify-book-request/accept");
        assert_eq!(req.body.as_deref(), Some(r#"{"verifyBookRequestId":"v1","accept":false}"#));
    }

    #[test]
    fn list_requests_parses_entries() {
        let (client, _, _) = client_with(vec![response(
            200,
            r#"{"verifyBookRequests":[{"verifyBookRequestId":"v1","translatorId":"u2","bookId":"b1","isVerified":false,"sendDateMilli":1700000000000}]}"#,
        )]);
        let list = client.verify_book_requests().list_requests().unwrap();
        assert_eq!(list.verify_book_requests.len(), 1);
        assert_eq!(list.verify_book_requests[0].send_date_milli, 1_700_000_000_000);
        assert!(!list.verify_book_requests[0].is_verified);
    }

    #[test]
    fn list_requests_for_non_admin_reports_forbidden() {
        let (client, _, _) = client_with(vec![response(403, "")]);
        let err = client.verify_book_requests().list_requests().unwrap_err();
        assert_eq!(err.message(), "Forbidden");
    }
}
