//! Relance configuration store with a local cache and a shared copy.
//!
//! Start-up reads the cache file first, then the `settings` row. A successful
//! shared load or save overwrites the cache.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use crate::domain::relance::RelanceConfig;
use crate::repository::{SettingReader, SettingWriter};
use crate::services::{ServiceError, ServiceResult};

/// Key of the shared copy in the `settings` table.
pub const RELANCE_SETTING_KEY: &str = "relance_config";

#[derive(Debug)]
pub struct RelanceStore {
    current: RwLock<RelanceConfig>,
    cache_path: Option<PathBuf>,
}

fn read_cache(path: &Path) -> Option<RelanceConfig> {
    let raw = fs::read_to_string(path).ok()?;
    match serde_json::from_str::<RelanceConfig>(&raw) {
        Ok(config) if config.validate().is_ok() => Some(config),
        Ok(_) | Err(_) => {
            log::warn!("Ignoring invalid relance cache {}", path.display());
            None
        }
    }
}

impl RelanceStore {
    /// Builds a store seeded from the cache file, or defaults when absent.
    pub fn new(cache_path: impl Into<PathBuf>) -> Self {
        let cache_path = cache_path.into();
        let initial = read_cache(&cache_path).unwrap_or_default();
        Self {
            current: RwLock::new(initial),
            cache_path: Some(cache_path),
        }
    }

    /// A store without a cache file.
    pub fn in_memory(config: RelanceConfig) -> Self {
        Self {
            current: RwLock::new(config),
            cache_path: None,
        }
    }

    pub fn current(&self) -> RelanceConfig {
        *self.current.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn replace(&self, config: RelanceConfig) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = config;
        self.write_cache(&config);
    }

    fn write_cache(&self, config: &RelanceConfig) {
        let Some(path) = &self.cache_path else {
            return;
        };
        let result = serde_json::to_string_pretty(config)
            .map_err(|err| err.to_string())
            .and_then(|json| fs::write(path, json).map_err(|err| err.to_string()));
        if let Err(err) = result {
            log::warn!("Failed to write relance cache {}: {err}", path.display());
        }
    }

    /// Loads the shared copy, keeping the current value when it is missing
    /// or unreadable.
    pub fn load_shared<R>(&self, repo: &R) -> RelanceConfig
    where
        R: SettingReader + ?Sized,
    {
        match repo.get_setting(RELANCE_SETTING_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<RelanceConfig>(&raw) {
                Ok(config) if config.validate().is_ok() => {
                    self.replace(config);
                    config
                }
                Ok(_) | Err(_) => {
                    log::warn!("Ignoring invalid shared relance configuration");
                    self.current()
                }
            },
            Ok(None) => self.current(),
            Err(err) => {
                log::warn!("Failed to load shared relance configuration: {err}");
                self.current()
            }
        }
    }

    /// Writes the shared copy, then the in-memory value and the cache.
    pub fn save<R>(&self, repo: &R, config: RelanceConfig) -> ServiceResult<()>
    where
        R: SettingWriter + ?Sized,
    {
        config.validate()?;
        let json = serde_json::to_string(&config)
            .map_err(|err| ServiceError::Internal(err.to_string()))?;

        repo.put_setting(RELANCE_SETTING_KEY, &json).map_err(|err| {
            log::error!("Failed to save relance configuration: {err}");
            err
        })?;

        self.replace(config);
        Ok(())
    }
}
