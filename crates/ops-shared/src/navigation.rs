//! Permission gated navigation and page access
//!
//! Everything here is a pure function of the session snapshot passed in so it
//! can be used by any front end

use crate::uac::{can, PermissionCode, Session};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub path: &'static str,
    pub label: &'static str,
    /// `None` means the entry is shown to every signed in user
    pub permission: Option<PermissionCode>,
}

pub static NAV_ITEMS: [NavItem; 5] = [
    NavItem {
        path: "/dashboard",
        label: "Dashboard",
        permission: None,
    },
    NavItem {
        path: "/quotations",
        label: "Quotations",
        permission: Some(PermissionCode::QUOTATION_READ),
    },
    NavItem {
        path: "/users",
        label: "Users",
        permission: Some(PermissionCode::USER_READ),
    },
    NavItem {
        path: "/reports",
        label: "Reports",
        permission: Some(PermissionCode::SYSTEM_LOG_READ),
    },
    NavItem {
        path: "/admin/roles",
        label: "Roles & Permissions",
        permission: Some(PermissionCode::ROLE_READ),
    },
];

impl NavItem {
    pub fn is_visible(&self, session: Option<&Session>) -> bool {
        self.permission
            .as_ref()
            .map_or(true, |permission| can(session, permission))
    }
}

/// The navigation entries the session is allowed to see, in display order
pub fn visible_nav_items(session: Option<&Session>) -> Vec<&'static NavItem> {
    NAV_ITEMS
        .iter()
        .filter(|item| item.is_visible(session))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageAccess {
    Granted,
    /// Render the "no access" placeholder naming the missing permission
    Denied { required: PermissionCode },
}

impl PageAccess {
    #[must_use]
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }
}

pub fn page_access(session: Option<&Session>, required: &PermissionCode) -> PageAccess {
    if can(session, required) {
        PageAccess::Granted
    } else {
        PageAccess::Denied {
            required: required.clone(),
        }
    }
}

/// Route guard for the paths in [`NAV_ITEMS`]. Returns `None` for unknown
/// paths
pub fn route_access(session: Option<&Session>, path: &str) -> Option<PageAccess> {
    let item = NAV_ITEMS.iter().find(|item| item.path == path)?;
    Some(match &item.permission {
        Some(required) => page_access(session, required),
        None => PageAccess::Granted,
    })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn session_with(permissions: &[&str]) -> Session {
        serde_json::from_value(serde_json::json!({
            "id": 1,
            "username": "alice",
            "role": "Admin",
            "permissions": permissions,
            "branch_id": 3
        }))
        .unwrap()
    }

    fn labels(items: Vec<&NavItem>) -> Vec<&'static str> {
        items.into_iter().map(|x| x.label).collect()
    }

    #[test]
    fn role_entry_hidden_without_role_read() {
        // Arrange
        let session = session_with(&["USER_READ", "USER_CREATE"]);

        // Act
        let actual = labels(visible_nav_items(Some(&session)));

        // Assert
        assert_eq!(actual, vec!["Dashboard", "Users"]);
        assert!(!actual.contains(&"Roles & Permissions"));
    }

    #[test]
    fn everything_visible_with_all_permissions() {
        let session = session_with(&[
            "QUOTATION_READ",
            "USER_READ",
            "SYSTEM_LOG_READ",
            "ROLE_READ",
        ]);
        let actual = visible_nav_items(Some(&session));
        assert_eq!(actual.len(), NAV_ITEMS.len());
    }

    #[test]
    fn only_unrestricted_entries_without_session() {
        let actual = labels(visible_nav_items(None));
        assert_eq!(actual, vec!["Dashboard"]);
    }

    #[test]
    fn denied_page_names_required_permission() {
        // Arrange
        let session = session_with(&["USER_READ"]);

        // Act
        let actual = page_access(Some(&session), &PermissionCode::ROLE_READ);

        // Assert
        assert_eq!(
            actual,
            PageAccess::Denied {
                required: PermissionCode::ROLE_READ
            }
        );
    }

    #[rstest]
    #[case::open("/dashboard", Some(true))]
    #[case::allowed("/users", Some(true))]
    #[case::denied("/admin/roles", Some(false))]
    #[case::unknown("/nowhere", None)]
    fn route_guard(#[case] path: &str, #[case] expected: Option<bool>) {
        let session = session_with(&["USER_READ"]);
        let actual = route_access(Some(&session), path).map(|x| x.is_granted());
        assert_eq!(actual, expected);
    }
}
