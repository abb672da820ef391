use std::fmt;

/// The API object an invocation operates on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
    pub namespace: String,
    pub resource_kind: String,
    pub resource_name: String,
}

impl Endpoint {
    pub fn url(&self) -> String {
        build_url(
            &self.host,
            self.port,
            &self.namespace,
            &self.resource_kind,
            &self.resource_name,
        )
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url())
    }
}

/// Build the URL of a namespaced object in the core (`v1`) API group.
///
/// The kind is pluralized by appending `s`; irregular plurals are not handled.
/// Segments are not escaped.
pub fn build_url(host: &str, port: u16, namespace: &str, kind: &str, name: &str) -> String {
    let host = host.strip_prefix("https://").unwrap_or(host);
    format!(
        "https://{}:{}/api/v1/namespaces/{}/{}s/{}",
        host,
        port,
        namespace,
        kind.to_lowercase(),
        name
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_strips_scheme() {
        assert_eq!(
            build_url("https://host", 443, "ns", "ConfigMap", "cm1"),
            "https://host:443/api/v1/namespaces/ns/configmaps/cm1"
        );
    }

    #[test]
    fn test_build_url_plain_host() {
        assert_eq!(
            build_url("myocp.companyname.local", 8443, "demo", "resourcequota", "rq"),
            "https://myocp.companyname.local:8443/api/v1/namespaces/demo/resourcequotas/rq"
        );
    }

    #[test]
    fn test_build_url_only_strips_literal_prefix() {
        // Hosts that merely start with the letters of the scheme are kept.
        assert_eq!(
            build_url("htt.example", 443, "ns", "Secret", "s"),
            "https://htt.example:443/api/v1/namespaces/ns/secrets/s"
        );
        assert_eq!(
            build_url("http://host", 443, "ns", "Secret", "s"),
            "https://http://host:443/api/v1/namespaces/ns/secrets/s"
        );
    }

    #[test]
    fn test_no_irregular_plurals() {
        let e = Endpoint {
            host: "h".to_string(),
            port: 443,
            namespace: "ns".to_string(),
            resource_kind: "Policy".to_string(),
            resource_name: "p".to_string(),
        };
        assert_eq!(e.url(), "https://h:443/api/v1/namespaces/ns/policys/p");
        assert_eq!(e.to_string(), e.url());
    }
}
