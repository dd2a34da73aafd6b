use aws_sdk_codeartifact::types::PackageFormat;
use aws_sdk_codeartifact::Client as CodeArtifactClient;
use lambda_runtime::tracing;
use secrecy::SecretString;

use crate::error::{describe_sdk_error, BackupError};
use crate::event::ChangeNotification;
use crate::location::AssetLocation;

/// Basic-auth username CodeArtifact expects alongside an authorization token.
const TOKEN_USERNAME: &str = "aws";

/// Basic-auth credential for repository endpoints. Valid for one invocation.
#[derive(Debug)]
pub(crate) struct RegistryCredential {
    token: SecretString,
}

impl RegistryCredential {
    pub(crate) fn new(token: String) -> Self {
        Self {
            token: SecretString::from(token),
        }
    }

    pub(crate) fn username(&self) -> &'static str {
        TOKEN_USERNAME
    }

    pub(crate) fn token(&self) -> &SecretString {
        &self.token
    }
}

pub(crate) async fn authenticate(
    client: &CodeArtifactClient,
    domain: &str,
) -> Result<RegistryCredential, BackupError> {
    let output = client
        .get_authorization_token()
        .domain(domain)
        .send()
        .await
        .map_err(|e| BackupError::Auth {
            domain: domain.to_string(),
            reason: describe_sdk_error(&e),
        })?;

    let token = output
        .authorization_token()
        .filter(|token| !token.is_empty())
        .ok_or_else(|| BackupError::Auth {
            domain: domain.to_string(),
            reason: "response did not include an authorization token".to_string(),
        })?;
    Ok(RegistryCredential::new(token.to_string()))
}

/// Lists every asset of the notified package version, in listing order.
/// An empty listing is an error.
pub(crate) async fn list_asset_locations(
    client: &CodeArtifactClient,
    notification: &ChangeNotification,
) -> Result<Vec<AssetLocation>, BackupError> {
    let mut locations = Vec::new();
    let mut next_token: Option<String> = None;

    loop {
        let page = client
            .list_package_version_assets()
            .domain(&notification.domain_name)
            .repository(&notification.repository_name)
            .format(PackageFormat::from(notification.package_format.as_str()))
            .package(&notification.package_name)
            .package_version(&notification.package_version)
            .namespace(&notification.package_namespace)
            .set_next_token(next_token.take())
            .send()
            .await
            .map_err(|e| BackupError::Registry {
                package: notification.package_name.clone(),
                version: notification.package_version.clone(),
                reason: describe_sdk_error(&e),
            })?;

        tracing::debug!(
            "Listed {} assets for {} {}",
            page.assets().len(),
            notification.package_name,
            notification.package_version
        );
        locations.extend(
            page.assets()
                .iter()
                .map(|asset| AssetLocation::new(notification, asset.name())),
        );

        match page.next_token().filter(|token| !token.is_empty()) {
            Some(token) => next_token = Some(token.to_string()),
            None => break,
        }
    }

    if locations.is_empty() {
        return Err(BackupError::NotFound {
            package: notification.package_name.clone(),
            version: notification.package_version.clone(),
        });
    }
    Ok(locations)
}
