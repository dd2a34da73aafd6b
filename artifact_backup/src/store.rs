use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use lambda_runtime::tracing;

use crate::error::{describe_sdk_error, BackupError};

pub(crate) async fn upload(
    s3_client: &S3Client,
    bucket: &str,
    key: &str,
    body: Vec<u8>,
) -> Result<(), BackupError> {
    let size = body.len();
    s3_client
        .put_object()
        .bucket(bucket)
        .key(key)
        .body(ByteStream::from(body))
        .send()
        .await
        .map_err(|e| BackupError::Upload {
            bucket: bucket.to_string(),
            key: key.to_string(),
            reason: describe_sdk_error(&e),
        })?;
    tracing::info!("Stored {} bytes at {}/{}", size, bucket, key);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_s3::operation::put_object::PutObjectOutput;
    use aws_smithy_mocks::{mock, mock_client};
    use aws_smithy_runtime_api::client::orchestrator::HttpResponse;
    use aws_smithy_runtime_api::http::StatusCode;
    use aws_smithy_types::body::SdkBody;

    #[tokio::test]
    async fn puts_object_under_key() {
        let rule = mock!(aws_sdk_s3::Client::put_object)
            .match_requests(|req| {
                req.bucket() == Some("backup-bucket") && req.key() == Some("domain/maven/r/f.jar")
            })
            .then_output(|| PutObjectOutput::builder().build());
        let s3 = mock_client!(aws_sdk_s3, [&rule]);

        upload(&s3, "backup-bucket", "domain/maven/r/f.jar", b"jar".to_vec())
            .await
            .unwrap();
        assert_eq!(rule.num_calls(), 1);
    }

    #[tokio::test]
    async fn rejected_put_is_upload_error() {
        let rule = mock!(aws_sdk_s3::Client::put_object).then_http_response(|| {
            HttpResponse::new(StatusCode::try_from(403).unwrap(), SdkBody::from(""))
        });
        let s3 = mock_client!(aws_sdk_s3, [&rule]);

        let err = upload(&s3, "backup-bucket", "domain/maven/r/f.jar", Vec::new())
            .await
            .unwrap_err();
        assert_eq!(rule.num_calls(), 1);
        match err {
            BackupError::Upload { bucket, key, reason } => {
                assert_eq!(bucket, "backup-bucket");
                assert_eq!(key, "domain/maven/r/f.jar");
                assert!(reason.contains("403"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
