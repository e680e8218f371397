use futures::channel::oneshot;
use ops_shared::{
    const_config::path::PATH_ROLES_CREATE,
    uac::{PermissionCode, RoleDraft},
};

use crate::{
    client::{api::ApiError, UiCallBack},
    Client,
};

impl Client {
    #[tracing::instrument(skip(ui_notify))]
    pub fn create_role<F: UiCallBack>(
        &self,
        args: &RoleDraft,
        ui_notify: F,
    ) -> oneshot::Receiver<Result<(), ApiError>> {
        self.send_gated_request_expect_empty(
            &PermissionCode::ROLE_READ,
            PATH_ROLES_CREATE.method,
            PATH_ROLES_CREATE.path,
            Some(args),
            ui_notify,
        )
    }
}
