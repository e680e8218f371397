//! Drives the client against a mock server to check the session lifecycle
//! and the authorization gate end to end

use httpmock::{prelude::*, Method::PATCH};
use ops_client_core::{ApiError, Client, SessionStatus};
use ops_shared::{
    navigation::visible_nav_items,
    req_args::{user::NewUserReqArgs, LoginReqArgs},
    uac::{AuthError, PermissionCode, PermissionDraft, PermissionsError, RoleDraft, UserStatus},
};
use serde_json::json;
use std::time::Duration;

fn no_cb() {}

fn client_for(server: &MockServer) -> Client {
    Client::new(server.base_url(), None).unwrap()
}

fn alice_identity() -> serde_json::Value {
    json!({
        "id": 1,
        "username": "alice",
        "role": "Admin",
        "permissions": ["USER_READ", "USER_CREATE"],
        "branch_id": 3
    })
}

async fn mock_identity(server: &MockServer) -> httpmock::Mock<'_> {
    server
        .mock_async(|when, then| {
            when.method(GET).path("/auth/me");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(alice_identity());
        })
        .await
}

fn login_args() -> LoginReqArgs {
    LoginReqArgs::new("alice", "secret1".to_string().into(), 3.into())
}

#[tokio::test]
async fn refresh_loads_session_and_gates_navigation() {
    // Arrange
    let server = MockServer::start_async().await;
    let mock = mock_identity(&server).await;
    let client = client_for(&server);

    // Act
    let status = client.refresh_from_server(no_cb).await.unwrap();

    // Assert
    mock.assert_async().await;
    assert_eq!(status, SessionStatus::Authenticated);
    let session = client.session().unwrap();
    assert_eq!(session.username.as_ref(), "alice");
    assert!(client.can(&PermissionCode::USER_READ));
    assert!(!client.can(&PermissionCode::ROLE_READ));
    let paths: Vec<_> = visible_nav_items(Some(&session))
        .into_iter()
        .map(|item| item.path)
        .collect();
    assert_eq!(paths, vec!["/dashboard", "/users"]);
}

#[tokio::test]
async fn unauthorized_refresh_clears_existing_session() {
    // Arrange
    let server = MockServer::start_async().await;
    let mut ok_mock = mock_identity(&server).await;
    let client = client_for(&server);
    client.refresh_from_server(no_cb).await.unwrap();
    assert!(client.is_authenticated());
    ok_mock.delete_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/auth/me");
            then.status(401).json_body(json!({"message": "Not authenticated"}));
        })
        .await;

    // Act
    let status = client.refresh_from_server(no_cb).await.unwrap();

    // Assert
    assert_eq!(status, SessionStatus::Unauthenticated);
    assert!(client.session().is_none());
    assert!(!client.can(&PermissionCode::USER_READ));
}

#[tokio::test]
async fn login_then_identity_uses_session_cookie() {
    // Arrange
    let server = MockServer::start_async().await;
    let login_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/auth/login")
                .header("content-type", "application/json")
                .json_body(json!({"username": "alice", "password": "secret1", "branch_id": 3}));
            then.status(200)
                .header("set-cookie", "sid=abc123; Path=/")
                .json_body(json!({"message": "ignored"}));
        })
        .await;
    let me_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/auth/me")
                .header("cookie", "sid=abc123");
            then.status(200).json_body(alice_identity());
        })
        .await;
    let client = client_for(&server);

    // Act
    let actual = client.login(login_args(), no_cb).await.unwrap();

    // Assert
    assert_eq!(actual, Ok(()));
    login_mock.assert_async().await;
    me_mock.assert_async().await;
    assert_eq!(client.status(), SessionStatus::Authenticated);
    assert!(client.can(&PermissionCode::USER_CREATE));
}

#[tokio::test]
async fn rejected_login_reports_server_message() {
    // Arrange
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/auth/login");
            then.status(401)
                .json_body(json!({"message": "Invalid credentials"}));
        })
        .await;
    let client = client_for(&server);

    // Act
    let actual = client.login(login_args(), no_cb).await.unwrap();

    // Assert
    let Err(AuthError::Http(e)) = actual else {
        panic!("expected http error but got {actual:?}");
    };
    assert_eq!(e.status_code(), Some(401));
    assert_eq!(e.message, "Invalid credentials");
    assert_eq!(client.status(), SessionStatus::Unauthenticated);
    assert!(client.session().is_none());
}

#[tokio::test]
async fn login_without_identity_is_not_a_session() {
    // Arrange
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/auth/login");
            then.status(200);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/auth/me");
            then.status(500).json_body(json!({"error": "db down"}));
        })
        .await;
    let client = client_for(&server);

    // Act
    let actual = client.login(login_args(), no_cb).await.unwrap();

    // Assert
    let Err(AuthError::SessionNotEstablished(e)) = actual else {
        panic!("expected session not established but got {actual:?}");
    };
    assert_eq!(e.message, "db down");
    assert_eq!(client.status(), SessionStatus::Unauthenticated);
}

#[tokio::test]
async fn logout_clears_session_even_on_server_error() {
    // Arrange
    let server = MockServer::start_async().await;
    mock_identity(&server).await;
    let logout_mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/auth/logout");
            then.status(500).json_body(json!({"message": "boom"}));
        })
        .await;
    let client = client_for(&server);
    client.refresh_from_server(no_cb).await.unwrap();
    assert!(client.is_authenticated());

    // Act
    let actual = client.logout(no_cb).await.unwrap();

    // Assert
    logout_mock.assert_async().await;
    let Err(AuthError::Http(e)) = actual else {
        panic!("expected http error but got {actual:?}");
    };
    assert_eq!(e.status_code(), Some(500));
    assert!(client.session().is_none());
    assert_eq!(client.status(), SessionStatus::Unauthenticated);
}

#[tokio::test]
async fn logout_clears_session_and_every_permission() {
    // Arrange
    let server = MockServer::start_async().await;
    mock_identity(&server).await;
    let logout_mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/auth/logout");
            then.status(204);
        })
        .await;
    let client = client_for(&server);
    client.refresh_from_server(no_cb).await.unwrap();
    let held = [PermissionCode::USER_READ, PermissionCode::USER_CREATE];
    assert!(held.iter().all(|p| client.can(p)));

    // Act
    let actual = client.logout(no_cb).await.unwrap();

    // Assert
    logout_mock.assert_async().await;
    assert_eq!(actual, Ok(()));
    assert!(client.session().is_none());
    assert!(!client.is_authenticated());
    assert_eq!(client.status(), SessionStatus::Unauthenticated);
    for permission in &held {
        assert!(!client.can(permission), "{permission} still allowed");
    }
}

#[tokio::test]
async fn login_resolves_from_unauthenticated() {
    // Arrange
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/auth/login");
            then.status(200).delay(Duration::from_millis(200));
        })
        .await;
    let client = client_for(&server);
    // No identity mock yet so this refresh fails
    client.refresh_from_server(no_cb).await.unwrap();
    assert_eq!(client.status(), SessionStatus::Unauthenticated);
    mock_identity(&server).await;

    // Act
    let rx = client.login(login_args(), no_cb);
    let in_flight = client.status();
    let actual = rx.await.unwrap();

    // Assert
    assert_eq!(in_flight, SessionStatus::Resolving);
    assert_eq!(actual, Ok(()));
    assert_eq!(client.status(), SessionStatus::Authenticated);
}

#[tokio::test]
async fn rejected_relogin_keeps_existing_session() {
    // Arrange
    let server = MockServer::start_async().await;
    mock_identity(&server).await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/auth/login");
            then.status(401)
                .json_body(json!({"message": "Invalid credentials"}));
        })
        .await;
    let client = client_for(&server);
    client.refresh_from_server(no_cb).await.unwrap();
    let before = client.session().unwrap();

    // Act
    let actual = client.login(login_args(), no_cb).await.unwrap();

    // Assert
    assert!(matches!(actual, Err(AuthError::Http(_))), "{actual:?}");
    assert_eq!(client.status(), SessionStatus::Authenticated);
    assert_eq!(client.session().as_deref(), Some(before.as_ref()));
    assert!(client.can(&PermissionCode::USER_READ));
}

#[tokio::test]
async fn identity_with_long_role_name_is_accepted() {
    // Arrange
    let server = MockServer::start_async().await;
    let role = "Regional Operations Manager for the Northern Branches";
    server
        .mock_async(|when, then| {
            when.method(GET).path("/auth/me");
            then.status(200).json_body(json!({
                "id": 8,
                "username": "dave",
                "role": role,
                "permissions": ["QUOTATION_READ"]
            }));
        })
        .await;
    let client = client_for(&server);

    // Act
    let status = client.refresh_from_server(no_cb).await.unwrap();

    // Assert
    assert_eq!(status, SessionStatus::Authenticated);
    assert_eq!(client.session().unwrap().role, role);
    assert!(client.can(&PermissionCode::QUOTATION_READ));
}

#[tokio::test]
async fn gated_call_without_permission_is_not_sent() {
    // Arrange
    let server = MockServer::start_async().await;
    let client = client_for(&server);

    // Act
    let actual = client.list_users(no_cb).await.unwrap();

    // Assert
    assert_eq!(
        actual,
        Err(ApiError::Permissions(PermissionsError::MissingPermission(
            PermissionCode::USER_READ
        )))
    );
}

#[tokio::test]
async fn role_forms_need_roles_page_access() {
    // Arrange
    let server = MockServer::start_async().await;
    mock_identity(&server).await;
    let client = client_for(&server);
    client.refresh_from_server(no_cb).await.unwrap();
    let role = RoleDraft::try_new("Auditor".to_string()).unwrap();
    let permission =
        PermissionDraft::try_new("REPORT_EXPORT".to_string(), "Export reports".to_string())
            .unwrap();
    let expected = Err(ApiError::Permissions(PermissionsError::MissingPermission(
        PermissionCode::ROLE_READ,
    )));

    // Act
    let actual_role = client.create_role(&role, no_cb).await.unwrap();
    let actual_permission = client.create_permission(&permission, no_cb).await.unwrap();

    // Assert
    assert_eq!(actual_role, expected);
    assert_eq!(actual_permission, expected);
}

#[tokio::test]
async fn status_toggle_allowed_with_users_page_access() {
    // Arrange
    let server = MockServer::start_async().await;
    mock_identity(&server).await;
    let toggle_mock = server
        .mock_async(|when, then| {
            when.method(PATCH)
                .path("/users/2/status")
                .json_body(json!({"status": "INACTIVE"}));
            then.status(204);
        })
        .await;
    let client = client_for(&server);
    client.refresh_from_server(no_cb).await.unwrap();

    // Act
    let actual = client
        .update_user_status(2.into(), UserStatus::Inactive, no_cb)
        .await
        .unwrap();

    // Assert
    toggle_mock.assert_async().await;
    assert_eq!(actual, Ok(()));
}

#[tokio::test]
async fn permitted_create_user_sends_body() {
    // Arrange
    let server = MockServer::start_async().await;
    mock_identity(&server).await;
    let create_mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/users").json_body(json!({
                "username": "bob",
                "email": "bob@example.com",
                "password": "hunter22",
                "role_id": 2,
                "branch_id": null
            }));
            then.status(201).json_body(json!({"id": 7}));
        })
        .await;
    let client = client_for(&server);
    client.refresh_from_server(no_cb).await.unwrap();
    let args = NewUserReqArgs::try_new(
        "bob".to_string(),
        "bob@example.com".to_string(),
        "hunter22".to_string().into(),
        2.into(),
        None,
    )
    .unwrap();

    // Act
    let actual = client.create_user(args, no_cb).await.unwrap();

    // Assert
    create_mock.assert_async().await;
    assert_eq!(actual, Ok(()));
}

#[tokio::test]
async fn list_users_parses_summaries() {
    // Arrange
    let server = MockServer::start_async().await;
    mock_identity(&server).await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/users");
            then.status(200).json_body(json!([{
                "id": 2,
                "username": "bob",
                "email": "bob@example.com",
                "role": {"id": 2, "name": "Sales"},
                "branch": null,
                "status": "ACTIVE",
                "created_at": "2024-01-02T03:04:05Z"
            }]));
        })
        .await;
    let client = client_for(&server);
    client.refresh_from_server(no_cb).await.unwrap();

    // Act
    let actual = client.list_users(no_cb).await.unwrap().unwrap();

    // Assert
    assert_eq!(actual.len(), 1);
    assert_eq!(actual[0].username.as_ref(), "bob");
    assert_eq!(actual[0].status, UserStatus::Active);
}
