use std::time::Duration;

use secrecy::ExposeSecret;

use crate::error::BackupError;
use crate::registry::RegistryCredential;

/// Fetches asset bytes from a repository endpoint.
pub(crate) trait ArtifactFetcher {
    async fn fetch(&self, url: &str, credential: &RegistryCredential)
        -> Result<Vec<u8>, BackupError>;
}

/// `reqwest` fetcher; one client per process. The timeout bounds connecting
/// and each read, so a large artifact that keeps arriving is not cut off.
#[derive(Debug, Clone)]
pub(crate) struct HttpFetcher {
    http: reqwest::Client,
}

impl HttpFetcher {
    pub(crate) fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .connect_timeout(timeout)
            .read_timeout(timeout)
            .build()?;
        Ok(Self { http })
    }
}

impl ArtifactFetcher for HttpFetcher {
    async fn fetch(
        &self,
        url: &str,
        credential: &RegistryCredential,
    ) -> Result<Vec<u8>, BackupError> {
        let download_error = |source| BackupError::Download {
            url: url.to_string(),
            source,
        };

        let resp = self
            .http
            .get(url)
            .basic_auth(credential.username(), Some(credential.token().expose_secret()))
            .send()
            .await
            .map_err(download_error)?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(BackupError::DownloadStatus {
                url: url.to_string(),
                status,
                body,
            });
        }

        let bytes = resp.bytes().await.map_err(download_error)?;
        Ok(bytes.to_vec())
    }
}
