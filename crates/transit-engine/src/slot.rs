//! The process-wide engine slot.

use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use transit_types::DeliveryEstimate;

use crate::{Engine, EngineConfig, EstimateRequest, LoadError};

/// Global slot instance.
static SLOT: OnceLock<EngineSlot> = OnceLock::new();

/// Holds the current engine.
///
/// Readers clone an [`Arc`] and never observe a partially loaded engine.
/// A failed install leaves the slot empty, and an empty slot answers every
/// request with [`DeliveryEstimate::NONE`].
#[derive(Debug, Default)]
pub struct EngineSlot {
    current: RwLock<Option<Arc<Engine>>>,
}

impl EngineSlot {
    /// Creates an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the process-wide slot.
    pub fn global() -> &'static Self {
        SLOT.get_or_init(Self::new)
    }

    /// Loads an engine from `config` and installs it.
    ///
    /// # Errors
    ///
    /// Returns the load error after tearing the current engine down.
    pub fn install(&self, config: &EngineConfig) -> Result<Arc<Engine>, LoadError> {
        match Engine::load(config) {
            Ok(engine) => {
                let engine = Arc::new(engine);
                self.replace(Arc::clone(&engine));
                tracing::info!("Installed engine");
                Ok(engine)
            }
            Err(err) => {
                tracing::error!(error = %err, "Engine load failed, tearing down");
                self.teardown();
                Err(err)
            }
        }
    }

    /// Swaps in `engine`, returning the previous one.
    pub fn replace(&self, engine: Arc<Engine>) -> Option<Arc<Engine>> {
        self.current
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(engine)
    }

    /// Returns the current engine.
    #[must_use]
    pub fn current(&self) -> Option<Arc<Engine>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Empties the slot. In-flight readers keep their engine.
    pub fn teardown(&self) -> Option<Arc<Engine>> {
        self.current
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    /// Returns true if an engine is installed.
    #[must_use]
    pub fn is_installed(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Estimates with the current engine.
    #[must_use]
    pub fn estimate(&self, request: &EstimateRequest) -> DeliveryEstimate {
        self.current()
            .map_or(DeliveryEstimate::NONE, |engine| engine.estimate(request))
    }
}
