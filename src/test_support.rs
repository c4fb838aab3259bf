//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Mutex;

use crate::core::config::{AiConfig, ConfigError, ConfigStore};

/// An in-memory config store for tests that don't touch the filesystem.
pub struct MemoryConfigStore {
    config: Mutex<AiConfig>,
}

impl MemoryConfigStore {
    pub fn new(config: AiConfig) -> Self {
        Self {
            config: Mutex::new(config),
        }
    }
}

impl ConfigStore for MemoryConfigStore {
    fn load(&self) -> AiConfig {
        self.config.lock().unwrap().clone()
    }

    fn save(&self, config: &AiConfig) -> Result<(), ConfigError> {
        *self.config.lock().unwrap() = config.clone();
        Ok(())
    }
}
