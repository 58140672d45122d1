//! Registry of transportation backends.
//!
//! Holds every registered backend and picks one by id or by preference.

use std::collections::BTreeMap;
use std::sync::Arc;

use tpt_core::{TransportError, TransportResult};

use crate::backends::{TransportBackend, TransportSimplexBackend};

/// Preference order used when no backend is requested explicitly.
pub const PREFERRED_BACKENDS: &[&str] = &["transport-simplex", "highs", "clarabel"];

/// Holds all registered backends.
///
/// Create with `BackendRegistry::new()` for empty or
/// `BackendRegistry::with_defaults()` for built-in backends.
#[derive(Default, Clone)]
pub struct BackendRegistry {
    backends: BTreeMap<String, Arc<dyn TransportBackend>>,
}

impl BackendRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in backends of this build.
    ///
    /// Registers transport-simplex, plus clarabel and highs when their
    /// features are enabled.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(TransportSimplexBackend));
        #[cfg(feature = "solver-clarabel")]
        registry.register(Arc::new(crate::backends::ClarabelBackend));
        #[cfg(feature = "solver-highs")]
        registry.register(Arc::new(crate::backends::HighsBackend));
        registry
    }

    /// Register a backend, replacing any with the same id.
    pub fn register(&mut self, backend: Arc<dyn TransportBackend>) {
        self.backends.insert(backend.id().to_string(), backend);
    }

    /// Get a backend by id.
    pub fn get(&self, id: &str) -> Option<Arc<dyn TransportBackend>> {
        self.backends.get(id).cloned()
    }

    /// List backend ids in sorted order.
    pub fn list(&self) -> Vec<&str> {
        self.backends.keys().map(String::as_str).collect()
    }

    /// Select a backend.
    ///
    /// An explicit id must name a registered, available backend. Without one
    /// the first available backend in [`PREFERRED_BACKENDS`] wins, then any
    /// available backend in id order.
    pub fn select(&self, preferred: Option<&str>) -> TransportResult<Arc<dyn TransportBackend>> {
        if let Some(id) = preferred {
            return self
                .get(id)
                .filter(|b| b.is_available())
                .ok_or_else(|| TransportError::UnknownBackend(id.to_string()));
        }

        PREFERRED_BACKENDS
            .iter()
            .filter_map(|id| self.backends.get(*id))
            .chain(self.backends.values())
            .find(|b| b.is_available())
            .cloned()
            .ok_or_else(|| TransportError::UnknownBackend("<none registered>".to_string()))
    }
}

impl std::fmt::Debug for BackendRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendRegistry")
            .field("backends", &self.list())
            .finish()
    }
}
