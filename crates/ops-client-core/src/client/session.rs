//! Session store: login, logout and identity refresh
//!
//! The session held by the client is only ever replaced as a whole from the
//! identity endpoint, the login response body is never trusted for it

use futures::channel::oneshot;
use ops_shared::{
    const_config::path::{PATH_AUTH_LOGIN, PATH_AUTH_LOGOUT, PATH_AUTH_ME},
    errors::HttpError,
    log_err_as_warn,
    req_args::LoginReqArgs,
    uac::{self, AuthError, PermissionCode, Session},
};
use secrecy::ExposeSecret as _;
use std::sync::Arc;
use tracing::{info, warn};

use super::{process_empty, process_json_body, SessionStatus, UiCallBack, NO_BODY};
use crate::Client;

impl Client {
    /// Sends the credentials and, once accepted, loads the session from the
    /// identity endpoint before reporting the outcome
    #[tracing::instrument(skip(ui_notify))]
    pub fn login<F: UiCallBack>(
        &self,
        args: LoginReqArgs,
        ui_notify: F,
    ) -> oneshot::Receiver<Result<(), AuthError>> {
        let (tx, rx) = oneshot::channel();
        let body = serde_json::json!({
            "username": args.username,
            "password": args.password.expose_secret(),
            "branch_id": args.branch_id,
        });
        self.set_status(SessionStatus::Resolving);
        let client = self.clone();
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async move {
            let msg = process_login(resp, client).await;
            log_err_as_warn!(tx.send(msg));
            ui_notify();
        };

        self.initiate_request(PATH_AUTH_LOGIN.method, PATH_AUTH_LOGIN.path, Some(&body), on_done);
        rx
    }

    /// Calls the logout endpoint and then clears the local session whatever
    /// the outcome of the call. Any failure is still returned
    #[tracing::instrument(skip(ui_notify))]
    pub fn logout<F: UiCallBack>(&self, ui_notify: F) -> oneshot::Receiver<Result<(), AuthError>> {
        let (tx, rx) = oneshot::channel();
        let client = self.clone();
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async move {
            let msg = process_empty(resp).await.map_err(AuthError::from);
            client.clear_session();
            log_err_as_warn!(tx.send(msg));
            ui_notify();
        };
        self.initiate_request(PATH_AUTH_LOGOUT.method, PATH_AUTH_LOGOUT.path, NO_BODY, on_done);
        rx
    }

    /// Best effort resume of an existing server session. Any failure leaves
    /// the client unauthenticated
    #[tracing::instrument(skip(ui_notify))]
    pub fn refresh_from_server<F: UiCallBack>(
        &self,
        ui_notify: F,
    ) -> oneshot::Receiver<SessionStatus> {
        let (tx, rx) = oneshot::channel();
        if !self.is_authenticated() {
            // An existing session stays visible until the response replaces it
            self.set_status(SessionStatus::Resolving);
        }
        let client = self.clone();
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async move {
            let _ = client.apply_identity_response(resp).await;
            log_err_as_warn!(tx.send(client.status()));
            ui_notify();
        };
        self.initiate_request(PATH_AUTH_ME.method, PATH_AUTH_ME.path, NO_BODY, on_done);
        rx
    }

    /// Snapshot of the current session
    pub fn session(&self) -> Option<Arc<Session>> {
        self.inner.lock().expect("mutex poisoned").session.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner
            .lock()
            .expect("mutex poisoned")
            .session
            .is_some()
    }

    pub fn status(&self) -> SessionStatus {
        self.inner.lock().expect("mutex poisoned").status
    }

    /// Authorization gate over the current session. Never touches the network
    pub fn can(&self, permission: &PermissionCode) -> bool {
        uac::can(self.session().as_deref(), permission)
    }

    /// Requests the identity endpoint from within an already running request
    async fn resolve_session(&self) -> Result<Arc<Session>, HttpError> {
        let response = self
            .build_request(PATH_AUTH_ME.method, PATH_AUTH_ME.path, NO_BODY)
            .send()
            .await;
        self.apply_identity_response(response).await
    }

    /// Replaces the session from an identity response or clears it on any
    /// failure
    #[tracing::instrument(skip(self))]
    async fn apply_identity_response(
        &self,
        response: reqwest::Result<reqwest::Response>,
    ) -> Result<Arc<Session>, HttpError> {
        let result = process_json_body::<Session>(response).await.map(Arc::new);
        let mut guard = self.inner.lock().expect("mutex poisoned");
        match &result {
            Ok(session) => {
                info!(username = %session.username, "session established");
                guard.session = Some(Arc::clone(session));
                guard.status = SessionStatus::Authenticated;
            }
            Err(e) => {
                if guard.session.is_some() {
                    warn!(?e, "identity refresh failed, dropping session");
                }
                guard.session = None;
                guard.status = SessionStatus::Unauthenticated;
            }
        }
        result
    }

    fn set_status(&self, status: SessionStatus) {
        self.inner.lock().expect("mutex poisoned").status = status;
    }

    /// Puts the status back to match the session held after a login that did
    /// not go through
    fn restore_status(&self) {
        let mut guard = self.inner.lock().expect("mutex poisoned");
        guard.status = if guard.session.is_some() {
            SessionStatus::Authenticated
        } else {
            SessionStatus::Unauthenticated
        };
    }

    fn clear_session(&self) {
        let mut guard = self.inner.lock().expect("mutex poisoned");
        guard.session = None;
        guard.status = SessionStatus::Unauthenticated;
    }
}

#[tracing::instrument(ret, err(Debug))]
async fn process_login(
    response: reqwest::Result<reqwest::Response>,
    client: Client,
) -> Result<(), AuthError> {
    if let Err(e) = process_empty(response).await {
        client.restore_status();
        return Err(e.into());
    }
    client
        .resolve_session()
        .await
        .map(|_| ())
        .map_err(AuthError::SessionNotEstablished)
}
