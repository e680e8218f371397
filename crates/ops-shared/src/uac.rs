//! Shared items related to user account control

mod errors;
mod permissions;
mod role;
mod session;
mod user;

pub use errors::{AuthError, PermissionsError};
pub use permissions::{PermissionCode, Permissions};
pub use role::{PermissionDescription, PermissionDraft, RoleDraft, RoleName};
pub use session::{can, Session};
pub use user::{filter_users, BranchRef, Email, RoleRef, UserStatus, UserSummary, Username};
