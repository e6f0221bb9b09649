//! `/api/files/upload`
//!
//! Uploads go through the same client pipeline as every other call, so the
//! bearer token and 401 handling come from [`ApiClient`] rather than being
//! re-attached here.

use crate::error::FoodwebResult;
use crate::http::{ApiClient, ApiRequest, RequestSpec};
use crate::types::{FileUpload, FileUploadResponse};

/// Multipart field name the backend reads the file from
pub const UPLOAD_FIELD: &str = "file";

pub fn upload_request(file: FileUpload) -> ApiRequest<FileUploadResponse> {
    RequestSpec::post("/api/files/upload")
        .with_file(UPLOAD_FIELD, file)
        .into()
}

/// Upload a file; failures read `upload failed: <reason>`
pub async fn upload_file(
    client: &ApiClient,
    file: FileUpload,
) -> FoodwebResult<FileUploadResponse> {
    client
        .send(upload_request(file))
        .await
        .map_err(|e| e.with_prefix("upload failed"))
}
