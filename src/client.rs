//! CAS client capability surface.
//!
//! The manager drives an external CAS client library through the
//! [`CasClient`] trait. Implementations own the actual protocol exchange
//! (ticket validation over the wire, SAML assertion processing, redirects);
//! the manager only sequences configuration and authentication calls
//! against them.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;

/// Opaque server-type token.
///
/// Produced by [`CasClient::server_type_cas`] or
/// [`CasClient::server_type_saml`] and handed back verbatim when the client
/// or proxy role is initialized. The manager never inspects its contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerType(String);

impl ServerType {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl std::fmt::Display for ServerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Log sink forwarded to the CAS client library when one is supplied.
///
/// The manager never logs through the sink itself; it is attached once at
/// construction and the client library owns it from then on.
pub trait LogSink: Send + Sync {
    fn log(&self, message: &str);
}

/// Calls consumed from the CAS client library.
///
/// Configuration calls either succeed or fail fatally; the manager
/// propagates errors unmodified and never retries.
pub trait CasClient {
    /// Attach a log sink. Only invoked when the caller supplied one.
    fn set_logger(&mut self, logger: Arc<dyn LogSink>) -> Result<()>;

    /// Toggle verbose error reporting.
    fn set_verbose(&mut self, verbose: bool) -> Result<()>;

    /// Resolve the server type for plain CAS with the given protocol version.
    fn server_type_cas(&mut self, version: &str) -> Result<ServerType>;

    /// Resolve the server type for ticket validation via the SAML endpoint.
    fn server_type_saml(&mut self) -> Result<ServerType>;

    /// Initialize the library as a CAS client.
    fn client(
        &mut self,
        server_type: ServerType,
        hostname: &str,
        port: u16,
        uri: &str,
        service_url: &str,
        control_session: bool,
    ) -> Result<()>;

    /// Initialize the library as a CAS proxy. Same argument set as
    /// [`CasClient::client`]; exactly one of the two is ever invoked.
    fn proxy(
        &mut self,
        server_type: ServerType,
        hostname: &str,
        port: u16,
        uri: &str,
        service_url: &str,
        control_session: bool,
    ) -> Result<()>;

    /// Enable single-logout handling for requests from the given real hosts.
    fn handle_logout_requests(&mut self, enabled: bool, real_hosts: &[String]) -> Result<()>;

    /// Skip CAS server certificate validation.
    fn set_no_cas_server_validation(&mut self) -> Result<()>;

    /// Validate the CAS server against the certificate at `cert_path`.
    fn set_cas_server_ca_cert(&mut self, cert_path: &str, validate_cn: bool) -> Result<()>;

    /// Override the server login URL.
    fn set_server_login_url(&mut self, url: &str) -> Result<()>;

    /// Override the server logout URL.
    fn set_server_logout_url(&mut self, url: &str) -> Result<()>;

    /// Pin the service URL the server redirects back to.
    fn set_fixed_service_url(&mut self, url: &str) -> Result<()>;

    /// Force a full authentication round, redirecting to the server if the
    /// session is not authenticated.
    fn force_authentication(&mut self) -> Result<bool>;

    /// Check for an authenticated session without forcing a redirect.
    fn check_authentication(&mut self) -> Result<bool>;

    /// Whether the local session is already authenticated.
    fn is_authenticated(&mut self) -> Result<bool>;

    /// Login name of the authenticated user.
    fn user(&mut self) -> Result<String>;

    /// Attributes released by the server for the authenticated user.
    fn attributes(&mut self) -> Result<HashMap<String, serde_json::Value>>;

    /// End the server-side session, optionally redirecting afterwards.
    fn logout(&mut self, redirect_url: Option<&str>) -> Result<()>;
}
