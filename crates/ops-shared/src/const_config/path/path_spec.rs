use reqwest::Method;

use crate::id::DbId;

#[derive(Debug, Clone)]
pub struct PathSpec {
    pub path: &'static str,
    pub method: Method,
}

impl PathSpec {
    const ID_PLACEHOLDER: &'static str = "{id}";

    pub const fn get(path: &'static str) -> Self {
        Self {
            path,
            method: Method::GET,
        }
    }

    pub const fn post(path: &'static str) -> Self {
        Self {
            path,
            method: Method::POST,
        }
    }

    pub const fn patch(path: &'static str) -> Self {
        Self {
            path,
            method: Method::PATCH,
        }
    }

    /// Returns the path with the `{id}` placeholder replaced
    pub fn with_id(&self, id: DbId) -> String {
        self.path
            .replace(Self::ID_PLACEHOLDER, &u64::from(id).to_string())
    }
}
