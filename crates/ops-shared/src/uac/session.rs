use crate::id::DbId;

use super::{PermissionCode, Permissions, Username};

/// The authenticated identity as reported by the identity endpoint
///
/// Only ever replaced as a whole, never patched field by field
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: DbId,
    pub username: Username,
    /// Display only, never used for authorization
    pub role: String,
    pub permissions: Permissions,
    #[serde(default)]
    pub branch_id: Option<DbId>,
}

impl Session {
    pub fn can(&self, permission: &PermissionCode) -> bool {
        self.permissions.contains(permission)
    }
}

/// Authorization gate. Always false without a session
pub fn can(session: Option<&Session>, permission: &PermissionCode) -> bool {
    session.is_some_and(|s| s.can(permission))
}
