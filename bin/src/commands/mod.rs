//! CLI command implementations.

pub(crate) mod batch;
pub(crate) mod calendar;
pub(crate) mod check;
pub(crate) mod estimate;
pub(crate) mod postal;

use anyhow::{Context, Result};
use std::path::Path;
use transit_lib::prelude::*;

/// Reads the configuration and loads an engine from it.
pub(crate) fn load_engine(config: &Path) -> Result<Engine> {
    let config = EngineConfig::from_file(config)?;
    Engine::load(&config).context("Failed to load engine")
}
