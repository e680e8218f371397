use crate::errors::HttpError;

use super::PermissionCode;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error(transparent)]
    Http(#[from] HttpError),
    #[error("Login was accepted but the session could not be loaded: {0}")]
    SessionNotEstablished(HttpError),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PermissionsError {
    #[error("the following permission is required for this action: {0}")]
    MissingPermission(PermissionCode),
}
