//! HTTP session bootstrap.
//!
//! Names and cookie-scopes the session before the CAS handshake can emit
//! headers (redirects, cookies). Once output has started, or a session is
//! already active, the session is left untouched.

use anyhow::Result;
use tracing::debug;

/// Session cookie parameters applied at bootstrap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieParams {
    /// Cookie lifetime in seconds.
    pub lifetime_secs: u64,

    /// Cookie path.
    pub path: String,

    /// Cookie domain (defaults to the request host).
    pub domain: Option<String>,

    /// Require HTTPS (Secure flag).
    pub secure: bool,

    /// Set the HttpOnly flag.
    pub http_only: bool,
}

/// Calls consumed from the surrounding HTTP session layer.
pub trait SessionControl {
    /// Whether HTTP headers have already been sent.
    fn headers_sent(&self) -> Result<bool>;

    /// Current session id; empty when no session is active.
    fn session_id(&self) -> Result<String>;

    /// Name the session.
    fn set_session_name(&mut self, name: &str) -> Result<()>;

    /// Apply cookie parameters for the session cookie.
    fn set_cookie_params(&mut self, params: &CookieParams) -> Result<()>;
}

/// Which arm the bootstrap decision took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// Headers already sent; the session was not even queried.
    HeadersSent,

    /// A session is already active; its name and cookie scope stay as-is.
    SessionActive,

    /// Session name and cookie parameters were installed.
    Configured,
}

/// Ensures the session is named and scoped before any output starts.
pub struct SessionBootstrapper<'a> {
    session_name: &'a str,
    cookie_params: CookieParams,
}

impl<'a> SessionBootstrapper<'a> {
    pub fn new(session_name: &'a str, cookie_params: CookieParams) -> Self {
        Self {
            session_name,
            cookie_params,
        }
    }

    /// Run the bootstrap decision against the session layer.
    ///
    /// With headers already out, session configuration would be a no-op at
    /// best, so the session id is not queried at all. An active session
    /// must not be renamed or re-scoped mid-flight.
    pub fn bootstrap<S: SessionControl + ?Sized>(&self, session: &mut S) -> Result<BootstrapOutcome> {
        if session.headers_sent()? {
            debug!("headers already sent, skipping session bootstrap");
            return Ok(BootstrapOutcome::HeadersSent);
        }

        if !session.session_id()?.is_empty() {
            debug!("session already active, keeping its name and cookie scope");
            return Ok(BootstrapOutcome::SessionActive);
        }

        session.set_session_name(self.session_name)?;
        session.set_cookie_params(&self.cookie_params)?;

        debug!(session_name = self.session_name, "session bootstrapped");
        Ok(BootstrapOutcome::Configured)
    }
}
