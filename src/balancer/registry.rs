//! Backend registry.
//!
//! # Responsibilities
//! - Hold the fixed, ordered list of backends built from configuration
//! - Expose the sequence to the selector and the health monitor
//!
//! # Design Decisions
//! - The sequence never changes after startup; insertion order defines
//!   round-robin order
//! - A malformed backend address is fatal at construction, the process
//!   must not start serving with an unparseable backend

use std::sync::Arc;

use thiserror::Error;
use url::Url;

use crate::balancer::backend::Backend;

/// Error building a registry from configuration.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("no backends configured")]
    Empty,

    #[error("invalid backend address {address:?}: {source}")]
    InvalidAddress {
        address: String,
        source: url::ParseError,
    },

    #[error("backend address {address:?} has unsupported scheme {scheme:?}; only http is supported")]
    UnsupportedScheme { address: String, scheme: String },
}

/// Fixed, ordered collection of backends.
#[derive(Debug)]
pub struct Registry {
    backends: Vec<Arc<Backend>>,
}

impl Registry {
    /// Build a registry from configured backend addresses.
    pub fn from_addresses(addresses: &[String]) -> Result<Self, RegistryError> {
        if addresses.is_empty() {
            return Err(RegistryError::Empty);
        }

        let mut backends = Vec::with_capacity(addresses.len());
        for address in addresses {
            let url = Url::parse(address).map_err(|source| RegistryError::InvalidAddress {
                address: address.clone(),
                source,
            })?;
            // The forwarding and probe clients speak plain HTTP only.
            if url.scheme() != "http" {
                return Err(RegistryError::UnsupportedScheme {
                    address: address.clone(),
                    scheme: url.scheme().to_string(),
                });
            }
            backends.push(Arc::new(Backend::new(url)));
        }

        Ok(Self { backends })
    }

    /// Number of backends. Always at least 1.
    pub fn len(&self) -> usize {
        self.backends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }

    /// Backend at the given position (modulo arithmetic is the caller's job).
    pub fn get(&self, index: usize) -> &Arc<Backend> {
        &self.backends[index]
    }

    /// Iterate over all backends in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Backend>> {
        self.backends.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_insertion_order() {
        let registry = Registry::from_addresses(&[
            "http://127.0.0.1:8081".into(),
            "http://127.0.0.1:8082".into(),
        ])
        .unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(0).url().as_str(), "http://127.0.0.1:8081/");
        assert_eq!(registry.get(1).url().as_str(), "http://127.0.0.1:8082/");
    }

    #[test]
    fn rejects_empty_list() {
        let err = Registry::from_addresses(&[]).unwrap_err();
        assert!(matches!(err, RegistryError::Empty));
    }

    #[test]
    fn rejects_malformed_address() {
        let err = Registry::from_addresses(&["not a url".into()]).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidAddress { .. }));
    }

    #[test]
    fn rejects_https_address() {
        let err = Registry::from_addresses(&["https://127.0.0.1:8443".into()]).unwrap_err();
        assert!(matches!(err, RegistryError::UnsupportedScheme { .. }));
    }
}
