//! Session lifecycle: login, refresh, logout, and the logged-in user.
//!
//! Login, refresh and logout report failures directly, without a refresh
//! attempt; the refresh call in particular must never recurse into recovery.

use serde_json::Value;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, CONTENT_TYPE_HEADER, JSON_CONTENT_TYPE};
use crate::types::{AuthForm, User};

pub const PREFIX: &str = "/api/v1/auth";

#[derive(Debug, Clone, Copy)]
pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub fn build_login(&self, form: &AuthForm) -> Result<HttpRequest, ApiError> {
        self.client.request(HttpMethod::Post, PREFIX).with_json(form)
    }

    pub fn build_refresh_token(&self) -> HttpRequest {
        self.client
            .request(HttpMethod::Patch, PREFIX)
            .with_header(CONTENT_TYPE_HEADER, JSON_CONTENT_TYPE)
    }

    pub fn build_logout(&self) -> HttpRequest {
        self.client
            .request(HttpMethod::Delete, PREFIX)
            .with_header(CONTENT_TYPE_HEADER, JSON_CONTENT_TYPE)
    }

    pub fn build_current_user(&self) -> HttpRequest {
        self.client.request(HttpMethod::Get, PREFIX)
    }

    /// Log in; the server answers by setting the session cookies.
    pub fn login(&self, form: &AuthForm) -> Result<Value, ApiError> {
        self.client.send_without_retry(self.build_login(form)?)
    }

    /// Ask the server for a fresh access cookie using the refresh cookie.
    pub fn refresh_token(&self) -> Result<Value, ApiError> {
        self.client.send_without_retry(self.build_refresh_token())
    }

    pub fn logout(&self) -> Result<Value, ApiError> {
        self.client.send_without_retry(self.build_logout())
    }

    pub fn current_user(&self) -> Result<User, ApiError> {
        self.client.send(self.build_current_user())
    }
}
