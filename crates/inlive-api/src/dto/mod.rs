//! Request and response payloads for the HTTP surface.

pub mod request;
pub mod response;

use inlive_core::{AppError, AppResult};
use validator::Validate;

/// Run declarative validation on a request body.
pub(crate) fn validate_payload<T: Validate>(payload: &T) -> AppResult<()> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))
}
