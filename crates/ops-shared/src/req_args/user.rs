use secrecy::{ExposeSecret, SecretString};
use std::fmt::Debug;

use crate::{
    const_config::validation::VALIDATION_MIN_PASSWORD_LENGTH,
    errors::{ConversionError, ValidationError},
    id::DbId,
    uac::{Email, UserStatus, Username},
};

/// Arguments for creating a user. Only constructible through
/// [`NewUserReqArgs::try_new`] so every instance has passed local validation
#[derive(Clone)]
pub struct NewUserReqArgs {
    username: Username,
    email: Email,
    password: SecretString,
    role_id: DbId,
    branch_id: Option<DbId>,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
pub struct UpdateStatusReqArgs {
    pub status: UserStatus,
}

impl NewUserReqArgs {
    pub fn try_new(
        username: String,
        email: String,
        password: SecretString,
        role_id: DbId,
        branch_id: Option<DbId>,
    ) -> Result<Self, ValidationError> {
        let username: Username = username
            .try_into()
            .map_err(|e: ConversionError| ValidationError::new("username", e.to_string()))?;
        username
            .check_new()
            .map_err(|e| ValidationError::new("username", e.to_string()))?;
        let email = email
            .try_into()
            .map_err(|e: ConversionError| ValidationError::new("email", e.to_string()))?;
        if password.expose_secret().chars().count() < VALIDATION_MIN_PASSWORD_LENGTH {
            return Err(ValidationError::new(
                "password",
                format!("Password must be at least {VALIDATION_MIN_PASSWORD_LENGTH} characters"),
            ));
        }
        Ok(Self {
            username,
            email,
            password,
            role_id,
            branch_id,
        })
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password(&self) -> &SecretString {
        &self.password
    }

    pub fn role_id(&self) -> DbId {
        self.role_id
    }

    pub fn branch_id(&self) -> Option<DbId> {
        self.branch_id
    }
}

impl Debug for NewUserReqArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUserReqArgs")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("role_id", &self.role_id)
            .field("branch_id", &self.branch_id)
            .finish_non_exhaustive()
    }
}
