//! HTTP adapter mapping for domain errors.
//!
//! Only the pre-dispatch authentication gate surfaces errors through this
//! path; operation failures travel inside the `{ok, error}` envelope with
//! status 200. The mapping still covers every code so a domain error escaping
//! a handler produces a sensible status.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};

use crate::domain::{Error, ErrorCode};

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        Error::internal("Internal server error")
    } else {
        error.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(redact_if_internal(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Error::unauthorized("Authentication required"), StatusCode::UNAUTHORIZED)]
    #[case(Error::forbidden("Forbidden"), StatusCode::FORBIDDEN)]
    #[case(Error::not_found("gone"), StatusCode::NOT_FOUND)]
    #[case(Error::conflict("dupe"), StatusCode::CONFLICT)]
    #[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
    fn codes_map_to_statuses(#[case] error: Error, #[case] status: StatusCode) {
        assert_eq!(error.status_code(), status);
    }

    #[rstest]
    fn internal_errors_are_redacted() {
        let redacted = redact_if_internal(&Error::internal("pool exhausted: secret-host"));
        assert_eq!(redacted.message(), "Internal server error");
    }

    #[rstest]
    fn non_internal_errors_keep_their_message() {
        let kept = redact_if_internal(&Error::not_found("Dish not found"));
        assert_eq!(kept.message(), "Dish not found");
    }
}
