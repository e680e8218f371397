use futures::channel::oneshot;
use ops_shared::{
    const_config::path::{PATH_USERS_CREATE, PATH_USERS_LIST, PATH_USERS_STATUS},
    id::DbId,
    req_args::user::{NewUserReqArgs, UpdateStatusReqArgs},
    uac::{PermissionCode, UserStatus, UserSummary},
};
use secrecy::ExposeSecret;

use crate::{
    client::{api::ApiError, UiCallBack, NO_BODY},
    Client,
};

impl Client {
    #[tracing::instrument(skip(ui_notify))]
    pub fn list_users<F: UiCallBack>(
        &self,
        ui_notify: F,
    ) -> oneshot::Receiver<Result<Vec<UserSummary>, ApiError>> {
        self.send_gated_request_expect_json(
            &PermissionCode::USER_READ,
            PATH_USERS_LIST.method,
            PATH_USERS_LIST.path,
            NO_BODY,
            ui_notify,
        )
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn create_user<F: UiCallBack>(
        &self,
        user: NewUserReqArgs,
        ui_notify: F,
    ) -> oneshot::Receiver<Result<(), ApiError>> {
        let args = serde_json::json!({
            "username": user.username(),
            "email": user.email(),
            "password": user.password().expose_secret(),
            "role_id": user.role_id(),
            "branch_id": user.branch_id(),
        });
        self.send_gated_request_expect_empty(
            &PermissionCode::USER_CREATE,
            PATH_USERS_CREATE.method,
            PATH_USERS_CREATE.path,
            Some(&args),
            ui_notify,
        )
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn update_user_status<F: UiCallBack>(
        &self,
        user_id: DbId,
        status: UserStatus,
        ui_notify: F,
    ) -> oneshot::Receiver<Result<(), ApiError>> {
        let args = UpdateStatusReqArgs { status };
        self.send_gated_request_expect_empty(
            &PermissionCode::USER_READ,
            PATH_USERS_STATUS.method,
            &PATH_USERS_STATUS.with_id(user_id),
            Some(&args),
            ui_notify,
        )
    }
}
