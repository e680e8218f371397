//! Runs a parsed command against the server and renders the result as text

use anyhow::{bail, Context as _};
use ops_client_core::{ApiError, Client, SessionStatus};
use ops_shared::{
    id::DbId,
    navigation::{route_access, visible_nav_items, PageAccess},
    quotation::{Quotation, QuotationDraft},
    req_args::{user::NewUserReqArgs, LoginReqArgs},
    uac::{filter_users, PermissionDraft, RoleDraft, Session, UserSummary},
};
use std::fmt::Write as _;
use std::sync::Arc;
use tracing::{info, warn};

use crate::cli::{Cli, Command, PermissionsCommand, QuotationsCommand, RolesCommand, UsersCommand};

/// There is no screen to repaint
fn no_cb() {}

/// Establishes the session, runs the command and signs out again if the
/// session was started here
///
/// Each run starts with an empty cookie jar so the initial refresh only
/// succeeds when the server identifies the caller without a session cookie
/// (for example behind an authenticating proxy). Otherwise the credentials
/// passed on the command line are used to log in
#[tracing::instrument(skip(client, cli))]
pub async fn run(client: &Client, cli: Cli) -> anyhow::Result<String> {
    let signed_in_here = establish_session(client, &cli).await?;
    let result = execute(client, cli.command).await;
    if signed_in_here {
        let outcome = client
            .logout(no_cb)
            .await
            .context("logout response channel closed")?;
        if let Err(e) = outcome {
            warn!(?e, "logout failed, local session cleared anyway");
        }
    }
    result
}

/// Returns `true` if a new login was performed
async fn establish_session(client: &Client, cli: &Cli) -> anyhow::Result<bool> {
    let status = client
        .refresh_from_server(no_cb)
        .await
        .context("refresh response channel closed")?;
    if status == SessionStatus::Authenticated {
        info!("server identified caller without logging in");
        return Ok(false);
    }
    let (Some(username), Some(password)) = (&cli.username, &cli.password) else {
        return Ok(false);
    };
    let args = LoginReqArgs::new(
        username.clone(),
        secrecy::SecretString::from(password.clone()),
        DbId::from(cli.branch),
    );
    client
        .login(args, no_cb)
        .await
        .context("login response channel closed")?
        .context("login failed")?;
    Ok(true)
}

#[tracing::instrument(skip(client))]
pub async fn execute(client: &Client, command: Command) -> anyhow::Result<String> {
    match command {
        Command::Whoami => Ok(render_whoami(client.session().as_deref())),
        Command::Nav => {
            let session = require_session(client)?;
            Ok(render_nav(&session))
        }
        Command::Page { path } => {
            let session = require_session(client)?;
            match route_access(Some(&session), &path) {
                Some(access) => Ok(render_page_access(&path, &access)),
                None => bail!("unknown page: {path}"),
            }
        }
        Command::Users(cmd) => users(client, cmd).await,
        Command::Quotations(cmd) => quotations(client, cmd).await,
        Command::Roles(RolesCommand::Create { name }) => {
            let draft = RoleDraft::try_new(name)?;
            api_result(client.create_role(&draft, no_cb).await)?;
            Ok(format!("Role {} created", draft.name))
        }
        Command::Permissions(PermissionsCommand::Create { name, description }) => {
            let draft = PermissionDraft::try_new(name, description)?;
            api_result(client.create_permission(&draft, no_cb).await)?;
            Ok(format!("Permission {} created", draft.name))
        }
    }
}

async fn users(client: &Client, cmd: UsersCommand) -> anyhow::Result<String> {
    match cmd {
        UsersCommand::List { search } => {
            let users = api_result(client.list_users(no_cb).await)?;
            Ok(render_users(&filter_users(&users, &search)))
        }
        UsersCommand::Create {
            username,
            email,
            password,
            role_id,
            branch_id,
        } => {
            let args = NewUserReqArgs::try_new(
                username,
                email,
                password.into(),
                role_id.into(),
                branch_id.map(DbId::from),
            )?;
            let username = args.username().clone();
            api_result(client.create_user(args, no_cb).await)?;
            Ok(format!("User {username} created"))
        }
        UsersCommand::ToggleStatus { id } => {
            let id = DbId::from(id);
            let users = api_result(client.list_users(no_cb).await)?;
            let Some(user) = users.iter().find(|x| x.id == id) else {
                bail!("no user with id {id}");
            };
            let status = user.status.toggled();
            api_result(client.update_user_status(id, status, no_cb).await)?;
            Ok(format!("User {} is now {status}", user.username))
        }
    }
}

async fn quotations(client: &Client, cmd: QuotationsCommand) -> anyhow::Result<String> {
    match cmd {
        QuotationsCommand::List => {
            let quotations = api_result(client.list_quotations(no_cb).await)?;
            Ok(render_quotations(&quotations))
        }
        QuotationsCommand::Create {
            client_name,
            amount,
        } => {
            let draft = QuotationDraft::try_from_input(client_name, &amount)?;
            api_result(client.create_quotation(&draft, no_cb).await)?;
            Ok(format!("Quotation for {} created", draft.client_name()))
        }
    }
}

fn require_session(client: &Client) -> anyhow::Result<Arc<Session>> {
    client
        .session()
        .context("not signed in, provide --username and --password")
}

/// Flattens the result of a receiver for an admin call
fn api_result<T, E>(received: Result<Result<T, ApiError>, E>) -> anyhow::Result<T>
where
    E: std::error::Error + Send + Sync + 'static,
{
    Ok(received.context("response channel closed")??)
}

pub fn render_whoami(session: Option<&Session>) -> String {
    let Some(session) = session else {
        return "Not signed in".to_string();
    };
    let mut result = format!("{} ({})", session.username, session.role);
    if let Some(branch_id) = session.branch_id {
        let _ = write!(result, " at branch {branch_id}");
    }
    for permission in session.permissions.iter() {
        let _ = write!(result, "\n  {permission}");
    }
    result
}

pub fn render_nav(session: &Session) -> String {
    visible_nav_items(Some(session))
        .into_iter()
        .map(|item| format!("{:<24}{}", item.label, item.path))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_page_access(path: &str, access: &PageAccess) -> String {
    match access {
        PageAccess::Granted => format!("{path}: access granted"),
        PageAccess::Denied { required } => {
            format!("{path}: Access Denied. You need the {required} permission to view this page")
        }
    }
}

pub fn render_users(users: &[&UserSummary]) -> String {
    if users.is_empty() {
        return "No users found".to_string();
    }
    users
        .iter()
        .map(|user| {
            format!(
                "{}\t{}\t{}\t{}\t{}\t{}\t{}",
                user.id,
                user.username,
                user.email,
                user.role.name,
                user.branch.as_ref().map_or("-", |b| b.name.as_str()),
                user.status,
                user.created_at.format("%Y-%m-%d"),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_quotations(quotations: &[Quotation]) -> String {
    if quotations.is_empty() {
        return "No quotations found".to_string();
    }
    quotations
        .iter()
        .map(|q| format!("{}\t{}\t{:.2}", q.id, q.client_name, q.amount))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use ops_shared::uac::PermissionCode;

    fn alice() -> Session {
        serde_json::from_value(serde_json::json!({
            "id": 1,
            "username": "alice",
            "role": "Admin",
            "permissions": ["USER_READ", "USER_CREATE"],
            "branch_id": 3
        }))
        .unwrap()
    }

    #[test]
    fn whoami_lists_permissions() {
        let actual = render_whoami(Some(&alice()));
        assert_eq!(actual, "alice (Admin) at branch 3\n  USER_CREATE\n  USER_READ");
    }

    #[test]
    fn whoami_without_session() {
        assert_eq!(render_whoami(None), "Not signed in");
    }

    #[test]
    fn nav_hides_roles_without_role_read() {
        // Act
        let actual = render_nav(&alice());

        // Assert
        assert!(actual.contains("/users"));
        assert!(!actual.contains("/admin/roles"));
    }

    #[rstest]
    #[case(PageAccess::Granted, "/users: access granted")]
    #[case(
        PageAccess::Denied { required: PermissionCode::ROLE_READ },
        "/users: Access Denied. You need the ROLE_READ permission to view this page"
    )]
    fn page_access_text(#[case] access: PageAccess, #[case] expected: &str) {
        assert_eq!(render_page_access("/users", &access), expected);
    }

    #[test]
    fn empty_lists() {
        assert_eq!(render_users(&[]), "No users found");
        assert_eq!(render_quotations(&[]), "No quotations found");
    }
}
