use futures::channel::oneshot;
use ops_shared::{
    errors::HttpError,
    log_err_as_warn,
    uac::{PermissionCode, PermissionsError},
};
use reqwest::Method;
use std::fmt::Debug;

use crate::{client::UiCallBack, Client};

pub mod admin;

/// Failure of an admin call
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The session does not hold the permission so nothing was sent
    #[error(transparent)]
    Permissions(#[from] PermissionsError),
    #[error(transparent)]
    Http(#[from] HttpError),
}

impl Client {
    /// Checks the authorization gate and if it fails returns a receiver that
    /// already holds the error
    fn deny_unless_permitted<U, F>(
        &self,
        required: &PermissionCode,
        ui_notify: F,
    ) -> Result<F, oneshot::Receiver<Result<U, ApiError>>>
    where
        U: Debug,
        F: UiCallBack,
    {
        if self.can(required) {
            return Ok(ui_notify);
        }
        tracing::info!(%required, "blocked by missing permission");
        let (tx, rx) = oneshot::channel();
        log_err_as_warn!(tx.send(Err(
            PermissionsError::MissingPermission(required.clone()).into()
        )));
        ui_notify();
        Err(rx)
    }

    fn send_gated_request_expect_json<F, T, U>(
        &self,
        required: &PermissionCode,
        method: Method,
        path: &str,
        args: Option<&T>,
        ui_notify: F,
    ) -> oneshot::Receiver<Result<U, ApiError>>
    where
        T: serde::Serialize + ?Sized,
        F: UiCallBack,
        U: Send + Debug + serde::de::DeserializeOwned + 'static,
    {
        let ui_notify = match self.deny_unless_permitted(required, ui_notify) {
            Ok(ui_notify) => ui_notify,
            Err(rx) => return rx,
        };
        let (tx, rx) = oneshot::channel();
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async move {
            let msg = super::process_json_body(resp).await.map_err(ApiError::from);
            log_err_as_warn!(tx.send(msg));
            ui_notify();
        };
        self.initiate_request(method, path, args, on_done);
        rx
    }

    fn send_gated_request_expect_empty<F, T>(
        &self,
        required: &PermissionCode,
        method: Method,
        path: &str,
        args: Option<&T>,
        ui_notify: F,
    ) -> oneshot::Receiver<Result<(), ApiError>>
    where
        T: serde::Serialize + ?Sized,
        F: UiCallBack,
    {
        let ui_notify = match self.deny_unless_permitted(required, ui_notify) {
            Ok(ui_notify) => ui_notify,
            Err(rx) => return rx,
        };
        let (tx, rx) = oneshot::channel();
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async move {
            let msg = super::process_empty(resp).await.map_err(ApiError::from);
            log_err_as_warn!(tx.send(msg));
            ui_notify();
        };
        self.initiate_request(method, path, args, on_done);
        rx
    }
}
