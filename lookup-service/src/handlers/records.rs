//! `GET /get/:id`: the single record lookup endpoint.

use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::Uri,
    Extension, Json,
};
use service_core::error::{request_description, ErrorResponse};
use service_core::middleware::RequestId;

use crate::classifier::{ErrorKind, Failure};
use crate::store::Record;
use crate::AppState;

/// Returns the record as JSON, or the error envelope with the status chosen
/// by the classifier. A path segment that is not an integer is reported as an
/// internal failure rather than axum's plain-text rejection.
pub async fn get_record(
    State(state): State<AppState>,
    uri: Uri,
    request_id: Option<Extension<RequestId>>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<Record>, ErrorResponse> {
    let result = id
        .map_err(|rejection| Failure::MalformedId(rejection.body_text()))
        .and_then(|Path(id)| state.lookup.find_by_id(id).into_result());

    match result {
        Ok(record) => {
            tracing::info!(record_id = record.id, "Record served");
            Ok(Json(record))
        }
        Err(failure) => {
            let response = state
                .classifier
                .respond(&failure, request_description(&uri))
                .with_request_id(request_id.map(|Extension(id)| id));

            match failure.kind() {
                ErrorKind::NotFound => tracing::info!(
                    status = response.status().as_u16(),
                    "{}",
                    failure
                ),
                ErrorKind::Internal => tracing::error!(
                    status = response.status().as_u16(),
                    error = ?failure,
                    path = %uri.path(),
                    "Record lookup failed"
                ),
            }

            Err(response)
        }
    }
}
