//! CAS single-sign-on client configuration manager.
//!
//! Drives an external CAS client library into a configured state from a
//! declarative set of options, bootstrapping the HTTP session before the
//! library can emit headers. The protocol exchange itself (ticket
//! validation, SAML assertion processing, session persistence) stays with
//! the two injected collaborators behind the [`CasClient`] and
//! [`SessionControl`] traits.

pub mod client;
pub mod config;
pub mod manager;
pub mod session;

pub use client::{CasClient, LogSink, ServerType};
pub use config::{CasConfig, CertValidation, ClientRole, ValidationMode};
pub use manager::CasManager;
pub use session::{BootstrapOutcome, CookieParams, SessionBootstrapper, SessionControl};
