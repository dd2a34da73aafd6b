use crate::event::{ChangeNotification, MAVEN_FORMAT};

/// Path of one asset inside a CodeArtifact maven repository. Used both to
/// fetch the asset and, prefixed with the domain, as its S3 key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AssetLocation(String);

impl AssetLocation {
    pub(crate) fn new(notification: &ChangeNotification, asset_name: &str) -> Self {
        let namespace = notification.package_namespace.replace('.', "/");
        Self(
            [
                MAVEN_FORMAT,
                notification.repository_name.as_str(),
                namespace.as_str(),
                notification.package_name.as_str(),
                notification.package_version.as_str(),
                asset_name,
            ]
            .join("/"),
        )
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }

    /// Key under which the asset is stored; re-delivery overwrites it.
    pub(crate) fn destination_key(&self, domain_name: &str) -> String {
        format!("{domain_name}/{}", self.0)
    }
}

/// Host parts of the repository endpoint,
/// `https://{domain}-{owner}.d.{host_label}.{region}.{dns_suffix}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RegistryEndpoint {
    pub(crate) host_label: String,
    pub(crate) dns_suffix: String,
}

impl Default for RegistryEndpoint {
    fn default() -> Self {
        Self::new("codeartifact".to_string(), "amazonaws.com".to_string())
    }
}

impl RegistryEndpoint {
    pub(crate) fn new(host_label: String, dns_suffix: String) -> Self {
        Self {
            host_label,
            dns_suffix,
        }
    }

    pub(crate) fn asset_url(
        &self,
        notification: &ChangeNotification,
        region: &str,
        location: &AssetLocation,
    ) -> String {
        format!(
            "https://{}-{}.d.{}.{region}.{}/{}",
            notification.domain_name,
            notification.domain_owner,
            self.host_label,
            self.dns_suffix,
            location.as_str()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notification(
        repository: &str,
        namespace: &str,
        package: &str,
        version: &str,
    ) -> ChangeNotification {
        ChangeNotification {
            domain_name: "D".to_string(),
            domain_owner: "O".to_string(),
            repository_name: repository.to_string(),
            package_format: "maven".to_string(),
            package_name: package.to_string(),
            package_namespace: namespace.to_string(),
            package_version: version.to_string(),
            package_version_state: "Published".to_string(),
        }
    }

    #[test]
    fn location_joins_segments_and_expands_namespace() {
        let location = AssetLocation::new(&notification("R", "com.a.b", "P", "V"), "f.jar");
        assert_eq!(location.as_str(), "maven/R/com/a/b/P/V/f.jar");
    }

    #[test]
    fn single_segment_namespace() {
        let location = AssetLocation::new(&notification("R", "org", "P", "2.1.0"), "P-2.1.0.pom");
        assert_eq!(location.as_str(), "maven/R/org/P/2.1.0/P-2.1.0.pom");
    }

    #[test]
    fn destination_key_is_prefixed_with_domain() {
        let location = AssetLocation::new(&notification("R", "com.a.b", "P", "V"), "f.jar");
        assert_eq!(location.destination_key("D"), "D/maven/R/com/a/b/P/V/f.jar");
    }

    #[test]
    fn asset_url_uses_domain_owner_and_region() {
        let n = notification("R", "com.a.b", "P", "V");
        let location = AssetLocation::new(&n, "f.jar");
        assert_eq!(
            RegistryEndpoint::default().asset_url(&n, "us-east-1", &location),
            "https://D-O.d.codeartifact.us-east-1.amazonaws.com/maven/R/com/a/b/P/V/f.jar"
        );
    }

    #[test]
    fn asset_url_honours_configured_endpoint() {
        let n = notification("R", "com.a.b", "P", "V");
        let location = AssetLocation::new(&n, "f.jar");
        let endpoint = RegistryEndpoint::new("codeartifact".into(), "amazonaws.com.cn".into());
        assert_eq!(
            endpoint.asset_url(&n, "cn-north-1", &location),
            "https://D-O.d.codeartifact.cn-north-1.amazonaws.com.cn/maven/R/com/a/b/P/V/f.jar"
        );
    }
}
