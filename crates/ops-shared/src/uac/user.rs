use std::fmt::Display;

use chrono::{DateTime, Utc};

use crate::{errors::ConversionError, id::DbId};

#[derive(
    Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(try_from = "String", into = "String")]
/// Represents a username and is constrained to not be an empty string
///
/// Length limits are a form rule, see [`Username::MAX_LENGTH`]. Names sent by
/// the server are taken as they are
pub struct Username(String);

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Username {
    /// Longest name accepted when creating a user. Logins accept email
    /// addresses as usernames
    pub const MAX_LENGTH: usize = Email::MAX_LENGTH;

    /// Applies the length limit used by the create user form
    pub fn check_new(&self) -> Result<(), ConversionError> {
        if self.0.len() > Self::MAX_LENGTH {
            return Err(ConversionError::MaxExceeded {
                max: Self::MAX_LENGTH,
                actual: self.0.len(),
            });
        }
        Ok(())
    }
}

impl Email {
    pub const MAX_LENGTH: usize = 254;
}

impl TryFrom<String> for Username {
    type Error = ConversionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Err(ConversionError::Empty);
        }
        Ok(Self(value))
    }
}

impl TryFrom<String> for Email {
    type Error = ConversionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Err(ConversionError::Empty);
        }
        if value.len() > Self::MAX_LENGTH {
            return Err(ConversionError::MaxExceeded {
                max: Self::MAX_LENGTH,
                actual: value.len(),
            });
        }
        if !is_email_shaped(&value) {
            return Err(ConversionError::InvalidFormat("an email address"));
        }
        Ok(Self(value))
    }
}

/// `local@domain.tld` with no whitespace
fn is_email_shaped(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty() && !host.ends_with('.'),
        None => false,
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for Username {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(
    Debug,
    serde::Serialize,
    serde::Deserialize,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum UserStatus {
    Active,
    Inactive,
    Pending,
    Suspended,
    Locked,
    /// Any status this client does not know about
    #[serde(other)]
    Unknown,
}

impl UserStatus {
    /// Status an admin's "toggle active" action moves to
    pub fn toggled(self) -> Self {
        match self {
            UserStatus::Active => UserStatus::Inactive,
            _ => UserStatus::Active,
        }
    }
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
pub struct RoleRef {
    pub id: DbId,
    pub name: String,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
pub struct BranchRef {
    pub id: DbId,
    pub name: String,
}

/// A user as listed on the management screen
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
pub struct UserSummary {
    pub id: DbId,
    pub username: Username,
    pub email: String,
    pub role: RoleRef,
    #[serde(default)]
    pub branch: Option<BranchRef>,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
}

impl UserSummary {
    /// Case insensitive search over the columns shown in the users table
    ///
    /// Expects `needle` to already be lower case
    fn matches_lowercase(&self, needle: &str) -> bool {
        self.username.as_ref().to_lowercase().contains(needle)
            || self.email.to_lowercase().contains(needle)
            || self.id.to_string().contains(needle)
            || self.role.name.to_lowercase().contains(needle)
            || self
                .branch
                .as_ref()
                .is_some_and(|b| b.name.to_lowercase().contains(needle))
    }

    pub fn matches(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        needle.is_empty() || self.matches_lowercase(&needle)
    }
}

/// Returns the users matching `query`. A blank query matches everyone
pub fn filter_users<'a>(users: &'a [UserSummary], query: &str) -> Vec<&'a UserSummary> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return users.iter().collect();
    }
    users
        .iter()
        .filter(|u| u.matches_lowercase(&needle))
        .collect()
}
