use serde::Deserialize;
use serde_json::Value;

use crate::error::BackupError;

/// EventBridge `detail-type` of the only notification this function accepts.
pub(crate) const PACKAGE_VERSION_STATE_CHANGE: &str = "CodeArtifact Package Version State Change";
pub(crate) const MAVEN_FORMAT: &str = "maven";

/// The EventBridge envelope around a CodeArtifact notification.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct InboundEvent {
    #[serde(rename = "detail-type")]
    pub detail_type: String,
    pub region: String,
    pub account: String,
    pub detail: ChangeNotification,
}

/// Which package version changed.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ChangeNotification {
    pub domain_name: String,
    pub domain_owner: String,
    pub repository_name: String,
    pub package_format: String,
    pub package_name: String,
    /// Dot-delimited, e.g. `com.example.app`.
    pub package_namespace: String,
    pub package_version: String,
    #[serde(default)]
    pub package_version_state: String,
}

impl InboundEvent {
    /// Parses the raw payload and rejects anything but a maven package
    /// version state change.
    pub(crate) fn parse(raw: &Value) -> Result<Self, BackupError> {
        let detail_type = raw.get("detail-type").and_then(Value::as_str);
        if detail_type != Some(PACKAGE_VERSION_STATE_CHANGE) {
            return Err(validation_error(
                format!(
                    "This function only supports the {PACKAGE_VERSION_STATE_CHANGE} event. Event used: {}",
                    detail_type.unwrap_or("<missing>")
                ),
                raw,
            ));
        }

        let event = Self::deserialize(raw).map_err(|e| {
            validation_error(
                format!("malformed {PACKAGE_VERSION_STATE_CHANGE} event: {e}"),
                raw,
            )
        })?;

        if event.detail.package_format != MAVEN_FORMAT {
            return Err(validation_error(
                format!(
                    "This function only supports maven package format. Package format used: {}",
                    event.detail.package_format
                ),
                raw,
            ));
        }

        Ok(event)
    }
}

fn validation_error(message: String, raw: &Value) -> BackupError {
    BackupError::Validation {
        message,
        event: raw.to_string(),
    }
}
