use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::Serialize;
use ymparse_scraper::{ExtractionError, ProductRecord, ScrapeRequest};

use crate::middleware::RequestId;

use super::AppState;

const BAD_BODY_MESSAGE: &str = "Некорректный запрос: ожидается JSON с полем url";

#[derive(Debug, Serialize)]
struct ParseSuccess {
    success: bool,
    product: ProductRecord,
}

#[derive(Debug, Serialize)]
struct FailureBody {
    success: bool,
    error: String,
}

/// `{ "success": false, "error": ... }` paired with its HTTP status.
#[derive(Debug)]
pub struct ParseFailure {
    status: StatusCode,
    body: FailureBody,
}

impl ParseFailure {
    #[must_use]
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            status,
            body: FailureBody {
                success: false,
                error: error.into(),
            },
        }
    }

    fn from_error(error: &ExtractionError) -> Self {
        Self::new(status_for(error), error.user_message())
    }
}

impl IntoResponse for ParseFailure {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// 400 for input the caller can fix, 500 for provider or deployment faults.
fn status_for(error: &ExtractionError) -> StatusCode {
    if error.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

pub(super) async fn parse_product(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<ScrapeRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::warn!(
                request_id = %req_id.0,
                error = %rejection,
                "parse: rejected request body"
            );
            return ParseFailure::new(StatusCode::BAD_REQUEST, BAD_BODY_MESSAGE).into_response();
        }
    };

    match state.extractor.extract(&request.url).await {
        Ok(product) => (
            StatusCode::OK,
            Json(ParseSuccess {
                success: true,
                product,
            }),
        )
            .into_response(),
        Err(error) => {
            log_failure(&req_id, &request.url, &error);
            ParseFailure::from_error(&error).into_response()
        }
    }
}

fn log_failure(req_id: &RequestId, url: &str, error: &ExtractionError) {
    match error {
        ExtractionError::Provider { status, detail, .. } => tracing::error!(
            request_id = %req_id.0,
            stage = error.stage(),
            url,
            upstream_status = ?status,
            upstream_detail = detail.as_deref().unwrap_or(""),
            error = %error,
            "parse: provider call failed"
        ),
        ExtractionError::Configuration(_) => tracing::error!(
            request_id = %req_id.0,
            stage = error.stage(),
            error = %error,
            "parse: service misconfigured"
        ),
        ExtractionError::Validation(_) | ExtractionError::NotFound(_) => tracing::warn!(
            request_id = %req_id.0,
            stage = error.stage(),
            url,
            error = %error,
            "parse: request could not be served"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_separates_client_and_server_faults() {
        assert_eq!(
            status_for(&ExtractionError::Validation("x".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&ExtractionError::NotFound("x".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&ExtractionError::Configuration("x".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_for(&ExtractionError::Provider {
                status: Some(503),
                message: "x".into(),
                detail: None,
            }),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn failure_envelope_shape() {
        let failure = ParseFailure::new(StatusCode::BAD_REQUEST, "ошибка");
        let json = serde_json::to_value(&failure.body).expect("serialize");
        assert_eq!(json, serde_json::json!({ "success": false, "error": "ошибка" }));
    }
}
