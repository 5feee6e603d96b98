//! The search connector: entry points exposed to a UI state container.
//!
//! A connector is a pure adapter. It holds immutable connection settings and
//! a provider, and every call is a function of its arguments plus the
//! provider's response; nothing is cached between calls.

pub mod autocomplete;
pub mod normalize;
pub mod query;

use crate::config::{ConfigError, ConnectorSettings};
use crate::model::ResultEntry;
use crate::provider::rest::RestProvider;
use crate::provider::types::Document;
use crate::provider::{ProviderError, SearchProvider};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("provider call failed: {0}")]
    Provider(#[from] ProviderError),
}

/// How a provider failure surfaces from an operation.
///
/// The search path runs under [`Propagate`](Self::Propagate); each
/// autocomplete branch runs under [`DegradeToEmpty`](Self::DegradeToEmpty),
/// a deliberate degrade-gracefully policy for a secondary UX feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// The failure is handed back to the caller unchanged.
    Propagate,
    /// The failure is logged and replaced with an empty result.
    DegradeToEmpty,
}

impl FailurePolicy {
    pub(crate) fn apply<T: Default>(
        self,
        operation: &'static str,
        outcome: Result<T, ProviderError>,
    ) -> Result<T, ProviderError> {
        match (self, outcome) {
            (_, Ok(value)) => Ok(value),
            (Self::Propagate, Err(error)) => Err(error),
            (Self::DegradeToEmpty, Err(error)) => {
                warn!(operation, error = %error, "degrading failed operation to an empty result");
                Ok(T::default())
            }
        }
    }
}

pub struct SearchConnector<P> {
    settings: ConnectorSettings,
    provider: P,
}

impl SearchConnector<RestProvider> {
    /// Build a connector backed by the REST provider.
    ///
    /// Fails when a required setting is missing or empty; no partial
    /// connector is produced.
    pub fn from_settings(settings: ConnectorSettings) -> Result<Self, ConfigError> {
        settings.validate()?;
        let provider = RestProvider::new(&settings)?;
        Ok(Self { settings, provider })
    }
}

impl<P: SearchProvider> SearchConnector<P> {
    /// Build a connector over any provider implementation.
    pub fn with_provider(settings: ConnectorSettings, provider: P) -> Result<Self, ConfigError> {
        settings.validate()?;
        Ok(Self { settings, provider })
    }

    pub fn settings(&self) -> &ConnectorSettings {
        &self.settings
    }

    /// Fetch a single document by identifier.
    ///
    /// An empty identifier means there is nothing to fetch; the provider is
    /// not consulted. The document comes back as the provider stored it,
    /// unnormalized.
    pub async fn get_result(&self, document_id: &str) -> Result<Option<Document>, ConnectorError> {
        if document_id.is_empty() {
            debug!("get_result called without a document id");
            return Ok(None);
        }
        let document = self.provider.get_document(document_id).await?;
        Ok(Some(document))
    }

    /// Telemetry hook for result clicks. Not implemented.
    pub fn on_result_click(&self, _result: &ResultEntry) {
        warn!("on_result_click not implemented");
    }

    /// Telemetry hook for autocomplete result clicks. Not implemented.
    pub fn on_autocomplete_result_click(&self, _result: &ResultEntry) {
        warn!("on_autocomplete_result_click not implemented");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn propagate_hands_the_error_back() {
        let outcome: Result<Vec<u8>, ProviderError> =
            Err(ProviderError::Other("down".into()));
        assert!(FailurePolicy::Propagate.apply("op", outcome).is_err());
    }

    #[test]
    fn degrade_to_empty_swallows_the_error() {
        let outcome: Result<Vec<u8>, ProviderError> =
            Err(ProviderError::Other("down".into()));
        let recovered = FailurePolicy::DegradeToEmpty.apply("op", outcome);
        assert_eq!(recovered.expect("degraded"), Vec::<u8>::new());
    }
}
