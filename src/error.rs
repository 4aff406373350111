// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::custody::CustodyError;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Map a custody failure to a response.
    ///
    /// Internal failures are logged with their detail and answered with
    /// `safe_message` only.
    pub fn from_custody(err: CustodyError, safe_message: &'static str) -> Self {
        match err {
            CustodyError::Validation(msg) => Self::bad_request(msg),
            CustodyError::Forbidden => Self::forbidden("Access denied"),
            CustodyError::NotFound(_) => Self::not_found("Wallet not found"),
            CustodyError::Conflict(_) => Self::conflict("Wallet already exists for this employee"),
            internal => {
                tracing::error!(error = %internal, "{safe_message}");
                Self::internal(safe_message)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[test]
    fn constructors_set_status_and_message() {
        let nf = ApiError::not_found("missing");
        assert_eq!(nf.status, StatusCode::NOT_FOUND);
        assert_eq!(nf.message, "missing");

        assert_eq!(ApiError::bad_request("bad").status, StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::forbidden("no").status, StatusCode::FORBIDDEN);
        assert_eq!(ApiError::conflict("dup").status, StatusCode::CONFLICT);
    }

    #[test]
    fn custody_errors_map_to_statuses() {
        let cases = [
            (CustodyError::Validation("bad email".into()), StatusCode::BAD_REQUEST),
            (CustodyError::Forbidden, StatusCode::FORBIDDEN),
            (CustodyError::NotFound("a@x.com".into()), StatusCode::NOT_FOUND),
            (CustodyError::Conflict("a@x.com".into()), StatusCode::CONFLICT),
            (
                CustodyError::Integrity("tag mismatch".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from_custody(err, "Failed").status, status);
        }
    }

    #[test]
    fn internal_detail_is_not_exposed() {
        let err = ApiError::from_custody(
            CustodyError::Integrity("key does not control stored address".into()),
            "Failed to export private key",
        );
        assert_eq!(err.message, "Failed to export private key");
    }

    #[tokio::test]
    async fn into_response_returns_json_body() {
        let response = ApiError::bad_request("bad data").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(body_bytes.to_vec()).unwrap();
        assert_eq!(body, r#"{"error":"bad data"}"#);
    }
}
