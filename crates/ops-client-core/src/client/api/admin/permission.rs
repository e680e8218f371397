use futures::channel::oneshot;
use ops_shared::{
    const_config::path::PATH_PERMISSIONS_CREATE,
    uac::{PermissionCode, PermissionDraft},
};

use crate::{
    client::{api::ApiError, UiCallBack},
    Client,
};

impl Client {
    #[tracing::instrument(skip(ui_notify))]
    pub fn create_permission<F: UiCallBack>(
        &self,
        args: &PermissionDraft,
        ui_notify: F,
    ) -> oneshot::Receiver<Result<(), ApiError>> {
        self.send_gated_request_expect_empty(
            &PermissionCode::ROLE_READ,
            PATH_PERMISSIONS_CREATE.method,
            PATH_PERMISSIONS_CREATE.path,
            Some(args),
            ui_notify,
        )
    }
}
