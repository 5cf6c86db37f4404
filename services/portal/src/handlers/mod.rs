pub mod catalog;
pub mod chat;
pub mod profile;

use axum::extract::FromRequest;

use megalabs_identity::bearer::BearerToken;
use megalabs_identity::claims::IdentityClaims;

use crate::error::PortalError;
use crate::state::AppState;

/// `Json` body whose rejections render as [`PortalError::InvalidBody`].
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(PortalError))]
pub struct JsonBody<T>(pub T);

/// Turn the request's bearer token into caller identity using the configured
/// verification mode.
pub async fn authenticate(
    state: &AppState,
    token: &BearerToken,
) -> Result<IdentityClaims, PortalError> {
    state
        .verifier
        .verify(token.as_str())
        .await
        .map_err(|err| {
            if err.is_client_error() {
                tracing::debug!(error = %err, "bearer token rejected");
            }
            PortalError::from(err)
        })
}
