//! This module stores the expected format of the arguments for the requests.
//! Types holding secrets are not serializable, the client builds the body
//! itself so the secret is only exposed at that point

use crate::id::DbId;
use secrecy::{ExposeSecret, SecretString};
use std::fmt::Debug;

pub mod user;

#[derive(Clone)]
pub struct LoginReqArgs {
    pub username: String,
    pub password: SecretString,
    pub branch_id: DbId,
}

impl LoginReqArgs {
    pub fn new<S: Into<String>>(username: S, password: SecretString, branch_id: DbId) -> Self {
        Self {
            username: username.into(),
            password,
            branch_id,
        }
    }
}

impl Debug for LoginReqArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginReqArgs")
            .field("username", &self.username)
            .field("has_password", &!self.password.expose_secret().is_empty())
            .field("branch_id", &self.branch_id)
            .finish()
    }
}
