use aws_sdk_s3::error::{DisplayErrorContext, SdkError};
use thiserror::Error;

use crate::config::ConfigError;

/// Every way a backup invocation can fail. All variants abort the invocation.
#[derive(Error, Debug)]
pub(crate) enum BackupError {
    /// The notification is not one this function handles.
    #[error("{message}; event: {event}")]
    Validation { message: String, event: String },

    #[error("failed to obtain authorization token for domain {domain}: {reason}")]
    Auth { domain: String, reason: String },

    #[error("failed to list assets for {package} {version}: {reason}")]
    Registry {
        package: String,
        version: String,
        reason: String,
    },

    #[error("no assets found for {package} {version}")]
    NotFound { package: String, version: String },

    #[error("failed to download {url}: {}", source_chain(.source))]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("download of {url} failed with {status} status code: {body}")]
    DownloadStatus { url: String, status: u16, body: String },

    #[error("failed to upload s3://{bucket}/{key}: {reason}")]
    Upload {
        bucket: String,
        key: String,
        reason: String,
    },

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Joins an error with its causes, e.g. a body decode failure and the
/// timeout underneath it.
fn source_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut rendered = err.to_string();
    let mut cause = err.source();
    while let Some(inner) = cause {
        rendered.push_str(": ");
        rendered.push_str(&inner.to_string());
        cause = inner.source();
    }
    rendered
}

/// Renders an SDK failure with the response status when the service answered.
pub(crate) fn describe_sdk_error<E>(err: &SdkError<E>) -> String
where
    E: std::error::Error + 'static,
{
    let context = DisplayErrorContext(err);
    match err.raw_response() {
        Some(raw) => format!("{} status code: {context}", raw.status().as_u16()),
        None => context.to_string(),
    }
}
