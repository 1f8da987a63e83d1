//! Declarative CAS client configuration.
//!
//! A flat set of options, conventionally keyed `cas_*`, from which the
//! manager derives every configuration call it makes. Missing keys default;
//! unknown keys are a deserialization error.

use serde::{Deserialize, Serialize};

use crate::session::CookieParams;

/// Role the client library is initialized in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientRole {
    Client,
    Proxy,
}

/// Server certificate validation strategy, as written in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CertValidation {
    /// Validate against a CA certificate bundle.
    #[serde(rename = "ca")]
    Ca,

    /// Validate against a self-signed certificate.
    #[serde(rename = "self")]
    SelfSigned,
}

/// Resolved server validation mode.
///
/// Both certificate-backed variants route to the same collaborator call;
/// keeping them distinct makes that symmetry explicit at the call site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationMode {
    /// Skip server certificate validation.
    NoValidation,

    /// Validate against a CA certificate bundle.
    CaCert { cert_path: String, validate_cn: bool },

    /// Validate against a self-signed certificate.
    SelfSigned { cert_path: String, validate_cn: bool },
}

/// CAS client configuration.
///
/// Field aliases accept the conventional `cas_*` key names, so an existing
/// flat mapping deserializes unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CasConfig {
    /// Surface verbose errors from the client library.
    #[serde(default, alias = "cas_verbose_errors")]
    pub verbose_errors: bool,

    /// Initialize as a proxy instead of a plain client.
    #[serde(default, alias = "cas_proxy")]
    pub proxy: bool,

    /// CAS protocol version ("1.0", "2.0", "3.0").
    #[serde(default = "default_version", alias = "cas_version")]
    pub version: String,

    /// Validate tickets through the server's SAML endpoint.
    #[serde(default, alias = "cas_enable_saml")]
    pub enable_saml: bool,

    /// CAS server hostname.
    #[serde(default, alias = "cas_hostname")]
    pub hostname: String,

    /// CAS server port.
    #[serde(default = "default_port", alias = "cas_port")]
    pub port: u16,

    /// CAS server base URI.
    #[serde(default = "default_uri", alias = "cas_uri")]
    pub uri: String,

    /// Service URL this application is registered under.
    #[serde(default, alias = "cas_client_service")]
    pub client_service: String,

    /// Let the client library control the session lifecycle.
    #[serde(default, alias = "cas_control_session")]
    pub control_session: bool,

    /// Comma-separated hosts allowed to originate single-logout requests.
    #[serde(default, alias = "cas_real_hosts")]
    pub real_hosts: String,

    /// Server certificate validation strategy. Absent means no validation.
    #[serde(default, alias = "cas_validation")]
    pub validation: Option<CertValidation>,

    /// Certificate path used when validation is enabled.
    #[serde(default, alias = "cas_cert")]
    pub cert: String,

    /// Validate the certificate common name.
    #[serde(default, alias = "cas_validate_cn")]
    pub validate_cn: bool,

    /// Override for the server login URL.
    #[serde(default, alias = "cas_login_url")]
    pub login_url: Option<String>,

    /// Override for the server logout URL.
    #[serde(default, alias = "cas_logout_url")]
    pub logout_url: Option<String>,

    /// Fixed service URL the server redirects back to after login.
    #[serde(default, alias = "cas_redirect_path")]
    pub redirect_path: Option<String>,

    /// Report authentication checks as passed without touching the server.
    #[serde(default, alias = "cas_masquerade")]
    pub masquerade: bool,

    /// Session name installed at bootstrap.
    #[serde(default = "default_session_name", alias = "cas_session_name")]
    pub session_name: String,

    /// Session cookie lifetime in seconds.
    #[serde(default = "default_session_lifetime", alias = "cas_session_lifetime")]
    pub session_lifetime_secs: u64,

    /// Session cookie path.
    #[serde(default = "default_session_path", alias = "cas_session_path")]
    pub session_path: String,

    /// Session cookie domain (defaults to the request host).
    #[serde(default, alias = "cas_session_domain")]
    pub session_domain: Option<String>,

    /// Require HTTPS for the session cookie (Secure flag).
    #[serde(default = "default_true", alias = "cas_session_secure")]
    pub session_secure: bool,

    /// Set HttpOnly on the session cookie.
    #[serde(default = "default_true", alias = "cas_session_httponly")]
    pub session_httponly: bool,
}

fn default_version() -> String {
    "2.0".to_string()
}

fn default_port() -> u16 {
    443
}

fn default_uri() -> String {
    "/cas".to_string()
}

fn default_session_name() -> String {
    "CASAuth".to_string()
}

fn default_session_lifetime() -> u64 {
    7200 // 2 hours
}

fn default_session_path() -> String {
    "/".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for CasConfig {
    fn default() -> Self {
        Self {
            verbose_errors: false,
            proxy: false,
            version: default_version(),
            enable_saml: false,
            hostname: String::new(),
            port: default_port(),
            uri: default_uri(),
            client_service: String::new(),
            control_session: false,
            real_hosts: String::new(),
            validation: None,
            cert: String::new(),
            validate_cn: false,
            login_url: None,
            logout_url: None,
            redirect_path: None,
            masquerade: false,
            session_name: default_session_name(),
            session_lifetime_secs: default_session_lifetime(),
            session_path: default_session_path(),
            session_domain: None,
            session_secure: true,
            session_httponly: true,
        }
    }
}

impl CasConfig {
    /// Validate the configuration.
    ///
    /// Only rejects combinations the client library would fatally reject
    /// anyway; missing optional keys default instead of failing.
    pub fn validate(&self) -> Result<(), String> {
        if self.validation.is_some() && self.cert.trim().is_empty() {
            return Err("cas_cert is required when cas_validation is set".to_string());
        }

        if self.port == 0 {
            return Err("cas_port must be non-zero".to_string());
        }

        Ok(())
    }

    /// Role the client library is initialized in.
    pub fn role(&self) -> ClientRole {
        if self.proxy {
            ClientRole::Proxy
        } else {
            ClientRole::Client
        }
    }

    /// Resolve the server validation mode.
    pub fn validation_mode(&self) -> ValidationMode {
        match self.validation {
            None => ValidationMode::NoValidation,
            Some(CertValidation::Ca) => ValidationMode::CaCert {
                cert_path: self.cert.clone(),
                validate_cn: self.validate_cn,
            },
            Some(CertValidation::SelfSigned) => ValidationMode::SelfSigned {
                cert_path: self.cert.clone(),
                validate_cn: self.validate_cn,
            },
        }
    }

    /// Parse the comma-separated real-host list.
    ///
    /// Tokens are trimmed, empty tokens dropped, order preserved and
    /// duplicates kept.
    pub fn real_host_list(&self) -> Vec<String> {
        self.real_hosts
            .split(',')
            .map(str::trim)
            .filter(|host| !host.is_empty())
            .map(String::from)
            .collect()
    }

    /// Server login URL override, if configured.
    pub fn login_url_override(&self) -> Option<&str> {
        non_empty(self.login_url.as_deref())
    }

    /// Server logout URL override, if configured.
    pub fn logout_url_override(&self) -> Option<&str> {
        non_empty(self.logout_url.as_deref())
    }

    /// Fixed service URL, if configured.
    pub fn fixed_service_url(&self) -> Option<&str> {
        non_empty(self.redirect_path.as_deref())
    }

    /// Cookie parameters for the session bootstrap.
    pub fn cookie_params(&self) -> CookieParams {
        CookieParams {
            lifetime_secs: self.session_lifetime_secs,
            path: self.session_path.clone(),
            domain: self.session_domain.clone(),
            secure: self.session_secure,
            http_only: self.session_httponly,
        }
    }
}

/// An empty or whitespace-only optional value counts as absent.
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_config() {
        let config = CasConfig::default();
        assert!(!config.verbose_errors);
        assert!(!config.proxy);
        assert_eq!(config.version, "2.0");
        assert_eq!(config.port, 443);
        assert_eq!(config.uri, "/cas");
        assert_eq!(config.validation, None);
        assert!(!config.masquerade);
        assert_eq!(config.session_name, "CASAuth");
        assert_eq!(config.session_lifetime_secs, 7200);
        assert!(config.session_secure);
        assert!(config.session_httponly);
    }

    #[test]
    fn test_deserializes_cas_prefixed_keys() {
        let config: CasConfig = serde_json::from_value(json!({
            "cas_hostname": "cas.example.com",
            "cas_port": 8443,
            "cas_proxy": true,
            "cas_enable_saml": true,
            "cas_validation": "ca",
            "cas_cert": "/etc/ssl/cas.pem",
            "cas_masquerade": true,
        }))
        .unwrap();

        assert_eq!(config.hostname, "cas.example.com");
        assert_eq!(config.port, 8443);
        assert!(config.proxy);
        assert!(config.enable_saml);
        assert_eq!(config.validation, Some(CertValidation::Ca));
        assert_eq!(config.cert, "/etc/ssl/cas.pem");
        assert!(config.masquerade);
        // Unset keys keep their defaults.
        assert_eq!(config.version, "2.0");
        assert_eq!(config.uri, "/cas");
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let result: Result<CasConfig, _> = serde_json::from_value(json!({
            "cas_hostnme": "cas.example.com",
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_strategy_parsing() {
        let config: CasConfig =
            serde_json::from_value(json!({ "cas_validation": "self" })).unwrap();
        assert_eq!(config.validation, Some(CertValidation::SelfSigned));

        let result: Result<CasConfig, _> =
            serde_json::from_value(json!({ "cas_validation": "strict" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_validate() {
        let mut config = CasConfig::default();
        assert!(config.validate().is_ok());

        config.validation = Some(CertValidation::Ca);
        assert!(config.validate().is_err()); // missing cert path

        config.cert = "/etc/ssl/cas.pem".to_string();
        assert!(config.validate().is_ok());

        config.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_role() {
        let mut config = CasConfig::default();
        assert_eq!(config.role(), ClientRole::Client);

        config.proxy = true;
        assert_eq!(config.role(), ClientRole::Proxy);
    }

    #[test]
    fn test_validation_mode() {
        let mut config = CasConfig {
            cert: "/etc/ssl/cas.pem".to_string(),
            validate_cn: true,
            ..CasConfig::default()
        };
        assert_eq!(config.validation_mode(), ValidationMode::NoValidation);

        config.validation = Some(CertValidation::Ca);
        assert_eq!(
            config.validation_mode(),
            ValidationMode::CaCert {
                cert_path: "/etc/ssl/cas.pem".to_string(),
                validate_cn: true,
            }
        );

        config.validation = Some(CertValidation::SelfSigned);
        assert_eq!(
            config.validation_mode(),
            ValidationMode::SelfSigned {
                cert_path: "/etc/ssl/cas.pem".to_string(),
                validate_cn: true,
            }
        );
    }

    #[test]
    fn test_real_host_list() {
        let mut config = CasConfig::default();
        assert!(config.real_host_list().is_empty());

        config.real_hosts = "a.example.com,b.example.com".to_string();
        assert_eq!(
            config.real_host_list(),
            vec!["a.example.com".to_string(), "b.example.com".to_string()]
        );

        // Whitespace trimmed, empty tokens dropped, duplicates kept.
        config.real_hosts = " a.example.com , ,b.example.com,,a.example.com ".to_string();
        assert_eq!(
            config.real_host_list(),
            vec![
                "a.example.com".to_string(),
                "b.example.com".to_string(),
                "a.example.com".to_string(),
            ]
        );
    }

    #[test]
    fn test_url_overrides_treat_empty_as_absent() {
        let mut config = CasConfig::default();
        assert_eq!(config.login_url_override(), None);
        assert_eq!(config.logout_url_override(), None);
        assert_eq!(config.fixed_service_url(), None);

        config.login_url = Some(String::new());
        config.logout_url = Some("   ".to_string());
        config.redirect_path = Some(String::new());
        assert_eq!(config.login_url_override(), None);
        assert_eq!(config.logout_url_override(), None);
        assert_eq!(config.fixed_service_url(), None);

        config.login_url = Some("https://cas.example.com/login".to_string());
        config.logout_url = Some("https://cas.example.com/logout".to_string());
        config.redirect_path = Some("https://app.example.com/auth".to_string());
        assert_eq!(
            config.login_url_override(),
            Some("https://cas.example.com/login")
        );
        assert_eq!(
            config.logout_url_override(),
            Some("https://cas.example.com/logout")
        );
        assert_eq!(
            config.fixed_service_url(),
            Some("https://app.example.com/auth")
        );
    }

    #[test]
    fn test_cookie_params() {
        let config = CasConfig {
            session_lifetime_secs: 3600,
            session_path: "/app".to_string(),
            session_domain: Some("example.com".to_string()),
            session_secure: false,
            ..CasConfig::default()
        };

        let params = config.cookie_params();
        assert_eq!(params.lifetime_secs, 3600);
        assert_eq!(params.path, "/app");
        assert_eq!(params.domain, Some("example.com".to_string()));
        assert!(!params.secure);
        assert!(params.http_only);
    }
}
