//! Wiring of the Bootstrap form helper into an application.

use std::sync::Arc;

use tracing::debug;

use crate::bootstrap::BootstrapFormBuilder;
use crate::builder::FormBuilder;
use crate::config::FormBuilderConfig;
use crate::error::Result;
use crate::session::FormSession;

/// Provides the application's `"form"` helper.
///
/// The configuration is loaded once and shared; every request gets its own
/// [`BootstrapFormBuilder`] bound to that request's session.
#[derive(Debug, Clone, Default)]
pub struct FormServiceProvider {
    config: Arc<FormBuilderConfig>,
}

impl FormServiceProvider {
    /// Name the helper is registered under.
    pub const SERVICE_NAME: &'static str = "form";

    /// Creates a provider with the given configuration.
    pub fn new(config: FormBuilderConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Creates a provider from JSON overrides merged onto the defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::new(FormBuilderConfig::from_json(json)?))
    }

    /// Returns the shared configuration.
    pub fn config(&self) -> &Arc<FormBuilderConfig> {
        &self.config
    }

    /// Builds the form helper for one request.
    ///
    /// The base builder reads old input and the CSRF token from `session`;
    /// the decorator reads validation errors from the same session.
    pub fn form(
        &self,
        session: Arc<FormSession>,
        current_url: impl Into<String>,
    ) -> BootstrapFormBuilder<FormBuilder> {
        let current_url = current_url.into();
        debug!(url = %current_url, "building form helper");

        let base = FormBuilder::new()
            .with_session(Arc::clone(&session))
            .with_url(current_url);
        BootstrapFormBuilder::new(base, Arc::clone(&self.config)).with_errors(session)
    }

    /// Returns the default configuration as JSON, ready to be copied into
    /// an application and edited.
    pub fn publish_config() -> Result<String> {
        FormBuilderConfig::default().to_json()
    }
}
