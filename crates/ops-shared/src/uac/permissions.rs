use std::{borrow::Cow, collections::BTreeSet, fmt::Display};

/// Opaque token naming one grantable capability. Matching is exact, there is
/// no hierarchy or wildcard
#[derive(
    Debug, serde::Serialize, serde::Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Clone,
)]
#[serde(transparent)]
pub struct PermissionCode(Cow<'static, str>);

impl PermissionCode {
    pub const QUOTATION_CREATE: Self = Self::from_static("QUOTATION_CREATE");
    pub const QUOTATION_READ: Self = Self::from_static("QUOTATION_READ");
    pub const ROLE_READ: Self = Self::from_static("ROLE_READ");
    pub const SYSTEM_LOG_READ: Self = Self::from_static("SYSTEM_LOG_READ");
    pub const USER_CREATE: Self = Self::from_static("USER_CREATE");
    pub const USER_READ: Self = Self::from_static("USER_READ");

    pub const fn from_static(code: &'static str) -> Self {
        Self(Cow::Borrowed(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for PermissionCode {
    fn from(value: String) -> Self {
        Self(Cow::Owned(value))
    }
}

impl From<&str> for PermissionCode {
    fn from(value: &str) -> Self {
        value.to_string().into()
    }
}

impl AsRef<str> for PermissionCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for PermissionCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The set of permissions held by a user. Built from a list so duplicates
/// collapse
#[derive(
    Debug, serde::Serialize, serde::Deserialize, Clone, Default, PartialEq, Eq, PartialOrd, Ord,
)]
#[serde(transparent)]
pub struct Permissions(pub BTreeSet<PermissionCode>);

impl Permissions {
    pub fn contains(&self, permission: &PermissionCode) -> bool {
        self.0.contains(permission)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PermissionCode> {
        self.0.iter()
    }
}

impl<'a> FromIterator<&'a str> for Permissions {
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> Self {
        Self(iter.into_iter().map(PermissionCode::from).collect())
    }
}
