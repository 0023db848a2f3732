//! User accounts.

use serde_json::Value;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::{encode_segment, HttpMethod, HttpRequest};
use crate::types::{CreateUser, DeleteUser, EditUser, User};

pub const PREFIX: &str = "/api/v1/user";

#[derive(Debug, Clone, Copy)]
pub struct UserApi<'a> {
    client: &'a ApiClient,
}

impl<'a> UserApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub fn build_get_user(&self, id: &str) -> HttpRequest {
        self.client
            .request(HttpMethod::Get, &format!("{PREFIX}/{}", encode_segment(id)))
    }

    pub fn build_list_users(&self) -> HttpRequest {
        self.client.request(HttpMethod::Get, PREFIX)
    }

    pub fn build_create_user(&self, body: &CreateUser) -> Result<HttpRequest, ApiError> {
        self.client.request(HttpMethod::Post, PREFIX).with_json(body)
    }

    pub fn build_edit_user(&self, body: &EditUser) -> Result<HttpRequest, ApiError> {
        self.client.request(HttpMethod::Patch, PREFIX).with_json(body)
    }

    pub fn build_delete_user(&self, body: &DeleteUser) -> Result<HttpRequest, ApiError> {
        self.client.request(HttpMethod::Delete, PREFIX).with_json(body)
    }

    pub fn get_user(&self, id: &str) -> Result<User, ApiError> {
        self.client.send(self.build_get_user(id))
    }

    /// The server answers with a bare array.
    pub fn list_users(&self) -> Result<Vec<User>, ApiError> {
        self.client.send(self.build_list_users())
    }

    pub fn create_user(&self, body: &CreateUser) -> Result<Value, ApiError> {
        self.client.send(self.build_create_user(body)?)
    }

    pub fn edit_user(&self, body: &EditUser) -> Result<Value, ApiError> {
        self.client.send(self.build_edit_user(body)?)
    }

    pub fn delete_user(&self, body: &DeleteUser) -> Result<Value, ApiError> {
        self.client.send(self.build_delete_user(body)?)
    }
}
