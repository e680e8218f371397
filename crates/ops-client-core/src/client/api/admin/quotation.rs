use futures::channel::oneshot;
use ops_shared::{
    const_config::path::{PATH_QUOTATIONS_CREATE, PATH_QUOTATIONS_LIST},
    quotation::{Quotation, QuotationDraft},
    uac::PermissionCode,
};

use crate::{
    client::{api::ApiError, UiCallBack, NO_BODY},
    Client,
};

impl Client {
    #[tracing::instrument(skip(ui_notify))]
    pub fn list_quotations<F: UiCallBack>(
        &self,
        ui_notify: F,
    ) -> oneshot::Receiver<Result<Vec<Quotation>, ApiError>> {
        self.send_gated_request_expect_json(
            &PermissionCode::QUOTATION_READ,
            PATH_QUOTATIONS_LIST.method,
            PATH_QUOTATIONS_LIST.path,
            NO_BODY,
            ui_notify,
        )
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn create_quotation<F: UiCallBack>(
        &self,
        args: &QuotationDraft,
        ui_notify: F,
    ) -> oneshot::Receiver<Result<(), ApiError>> {
        self.send_gated_request_expect_empty(
            &PermissionCode::QUOTATION_CREATE,
            PATH_QUOTATIONS_CREATE.method,
            PATH_QUOTATIONS_CREATE.path,
            Some(args),
            ui_notify,
        )
    }
}
