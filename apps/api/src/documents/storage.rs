use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;

pub const RESUME_FILE: &str = "resume.md";
pub const COVER_LETTER_FILE: &str = "cover_letter.md";

/// Object key for one generated file: `documents/{user}/{document}/{file}`.
pub fn document_key(user_id: Uuid, document_id: Uuid, file_name: &str) -> String {
    format!("documents/{user_id}/{document_id}/{file_name}")
}

/// Path-style URL, which works for both MinIO and S3.
pub fn object_url(endpoint: &str, bucket: &str, key: &str) -> String {
    format!("{}/{}/{}", endpoint.trim_end_matches('/'), bucket, key)
}

pub async fn upload_markdown(
    s3: &aws_sdk_s3::Client,
    bucket: &str,
    key: &str,
    content: String,
) -> Result<(), AppError> {
    s3.put_object()
        .bucket(bucket)
        .key(key)
        .content_type("text/markdown; charset=utf-8")
        .body(ByteStream::from(Bytes::from(content)))
        .send()
        .await
        .map_err(|e| AppError::Storage(format!("Failed to upload {key}: {e}")))?;

    info!("Uploaded s3://{}/{}", bucket, key);
    Ok(())
}
