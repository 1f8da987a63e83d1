//! CAS manager.
//!
//! Translates a [`CasConfig`] into the ordered configuration sequence the
//! CAS client library expects, bootstrapping the HTTP session first, then
//! fronts the library's authentication calls.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use serde_json::Value;
use tracing::debug;

use crate::client::{CasClient, LogSink};
use crate::config::{CasConfig, ClientRole, ValidationMode};
use crate::session::{SessionBootstrapper, SessionControl};

/// Front for an external CAS client library.
///
/// Construction runs the whole configuration sequence once; the library is
/// fully configured or construction fails with the collaborator's error.
#[derive(Debug)]
pub struct CasManager<C> {
    config: CasConfig,
    client: C,
    masquerade: bool,
}

impl<C: CasClient> CasManager<C> {
    /// Configure the client library and bootstrap the session.
    ///
    /// Call order is fixed: logger, verbosity, session bootstrap, server
    /// type, role initialization, SAML logout handling, server validation,
    /// URL overrides, fixed service URL. Each call either succeeds or its
    /// error aborts construction; there is no partial rollback.
    pub fn new<S: SessionControl + ?Sized>(
        config: CasConfig,
        logger: Option<Arc<dyn LogSink>>,
        mut client: C,
        session: &mut S,
    ) -> Result<Self> {
        config
            .validate()
            .map_err(|e| anyhow!("CAS config validation failed: {}", e))?;

        if let Some(logger) = logger {
            client.set_logger(logger)?;
        }

        client.set_verbose(config.verbose_errors)?;

        SessionBootstrapper::new(&config.session_name, config.cookie_params())
            .bootstrap(session)?;

        let server_type = if config.enable_saml {
            client.server_type_saml()?
        } else {
            client.server_type_cas(&config.version)?
        };

        match config.role() {
            ClientRole::Client => client.client(
                server_type,
                &config.hostname,
                config.port,
                &config.uri,
                &config.client_service,
                config.control_session,
            )?,
            ClientRole::Proxy => client.proxy(
                server_type,
                &config.hostname,
                config.port,
                &config.uri,
                &config.client_service,
                config.control_session,
            )?,
        }

        if config.enable_saml {
            client.handle_logout_requests(true, &config.real_host_list())?;
        }

        match config.validation_mode() {
            ValidationMode::NoValidation => client.set_no_cas_server_validation()?,
            ValidationMode::CaCert {
                cert_path,
                validate_cn,
            }
            | ValidationMode::SelfSigned {
                cert_path,
                validate_cn,
            } => client.set_cas_server_ca_cert(&cert_path, validate_cn)?,
        }

        if let Some(url) = config.login_url_override() {
            client.set_server_login_url(url)?;
        }

        if let Some(url) = config.logout_url_override() {
            client.set_server_logout_url(url)?;
        }

        if let Some(url) = config.fixed_service_url() {
            client.set_fixed_service_url(url)?;
        }

        let masquerade = config.masquerade;

        debug!(
            role = ?config.role(),
            saml = config.enable_saml,
            masquerade,
            "CAS client configured"
        );

        Ok(Self {
            config,
            client,
            masquerade,
        })
    }

    /// Whether authentication checks are being masqueraded.
    pub fn is_masquerading(&self) -> bool {
        self.masquerade
    }

    /// The configuration this manager was built from.
    pub fn config(&self) -> &CasConfig {
        &self.config
    }

    /// Force a full authentication round, redirecting to the server if the
    /// session is not authenticated.
    pub fn authenticate(&mut self) -> Result<bool> {
        if self.masquerade {
            return Ok(true);
        }
        self.client.force_authentication()
    }

    /// Check for an authenticated session without forcing a redirect.
    pub fn check_authentication(&mut self) -> Result<bool> {
        if self.masquerade {
            return Ok(true);
        }
        self.client.check_authentication()
    }

    /// Whether the local session is already authenticated.
    pub fn is_authenticated(&mut self) -> Result<bool> {
        if self.masquerade {
            return Ok(true);
        }
        self.client.is_authenticated()
    }

    /// Login name of the authenticated user.
    pub fn user(&mut self) -> Result<String> {
        self.client.user()
    }

    /// All attributes released for the authenticated user.
    pub fn attributes(&mut self) -> Result<HashMap<String, Value>> {
        self.client.attributes()
    }

    /// A single released attribute, if present.
    pub fn attribute(&mut self, name: &str) -> Result<Option<Value>> {
        Ok(self.client.attributes()?.remove(name))
    }

    /// Whether an attribute was released for the authenticated user.
    pub fn has_attribute(&mut self, name: &str) -> Result<bool> {
        Ok(self.client.attributes()?.contains_key(name))
    }

    /// End the server-side session.
    pub fn logout(&mut self) -> Result<()> {
        self.client.logout(None)
    }

    /// End the server-side session, then redirect to the given URL.
    pub fn logout_with_redirect(&mut self, url: &str) -> Result<()> {
        self.client.logout(Some(url))
    }
}
