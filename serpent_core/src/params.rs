//! Simple runtime parameter system
//!
//! A shared key/value store for game and scheduler settings, seeded with
//! defaults and optionally loaded from a YAML file.

use crate::error::{SerpentError, SerpentResult};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Project-local parameter file picked up by [`RuntimeParams::init`]
pub const DEFAULT_PARAMS_PATH: &str = ".serpent/config/params.yaml";

/// Simple runtime parameter store
pub struct RuntimeParams {
    /// Parameter storage - BTreeMap maintains sorted order
    params: Arc<RwLock<BTreeMap<String, Value>>>,
    /// Optional persistence path
    persist_path: Option<PathBuf>,
}

impl RuntimeParams {
    /// Create a parameter store with defaults, overlaid by the project-local
    /// YAML file when one exists
    pub fn init() -> SerpentResult<Self> {
        let params = Self::with_defaults();
        let params_file = PathBuf::from(DEFAULT_PARAMS_PATH);
        if params_file.exists() {
            params.merge_from_disk(&params_file)?;
        }

        Ok(Self {
            persist_path: Some(params_file),
            ..params
        })
    }

    /// Store seeded with the default game and scheduler settings
    pub fn with_defaults() -> Self {
        let params = Self::empty();
        {
            let mut map = params.params.write();
            for (key, value) in default_entries() {
                map.insert(key.to_string(), value);
            }
        }
        params
    }

    /// Store with no entries at all; every typed getter falls back to its default
    pub fn empty() -> Self {
        Self {
            params: Arc::new(RwLock::new(BTreeMap::new())),
            persist_path: None,
        }
    }

    /// Defaults overlaid by the YAML mapping at `path`
    pub fn from_file(path: &Path) -> SerpentResult<Self> {
        let params = Self::with_defaults();
        params.merge_from_disk(path)?;
        Ok(Self {
            persist_path: Some(path.to_path_buf()),
            ..params
        })
    }

    /// Get a parameter value
    pub fn get<T: for<'de> Deserialize<'de>>(&self, key: &str) -> Option<T> {
        let params = self.params.read();
        let value = params.get(key)?;
        serde_json::from_value(value.clone()).ok()
    }

    /// Get parameter with default
    pub fn get_or<T: for<'de> Deserialize<'de>>(&self, key: &str, default: T) -> T {
        self.get(key).unwrap_or(default)
    }

    pub fn get_f64(&self, key: &str, default: f64) -> f64 {
        self.get_or(key, default)
    }

    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.get_or(key, default)
    }

    pub fn get_string(&self, key: &str, default: &str) -> String {
        self.get_or(key, default.to_string())
    }

    /// Set a parameter value
    pub fn set<T: Serialize>(&self, key: &str, value: T) -> SerpentResult<()> {
        let json_value = serde_json::to_value(value)?;
        self.params.write().insert(key.to_string(), json_value);
        Ok(())
    }

    pub fn list_keys(&self) -> Vec<String> {
        self.params.read().keys().cloned().collect()
    }

    pub fn has(&self, key: &str) -> bool {
        self.params.read().contains_key(key)
    }

    pub fn remove(&self, key: &str) -> Option<Value> {
        self.params.write().remove(key)
    }

    /// Clear all parameters and reset to defaults
    pub fn reset(&self) {
        let mut params = self.params.write();
        params.clear();
        for (key, value) in default_entries() {
            params.insert(key.to_string(), value);
        }
    }

    /// Save parameters to YAML
    pub fn save_to_disk(&self) -> SerpentResult<()> {
        let path = self
            .persist_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PARAMS_PATH));

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&*self.params.read())?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Overlay entries from a YAML mapping; keys absent from the file keep
    /// their current values
    pub fn merge_from_disk(&self, path: &Path) -> SerpentResult<()> {
        let yaml_str = std::fs::read_to_string(path)?;
        let loaded: BTreeMap<String, Value> = serde_yaml::from_str(&yaml_str).map_err(|e| {
            SerpentError::config(format!("invalid parameter file {}: {}", path.display(), e))
        })?;

        self.params.write().extend(loaded);
        Ok(())
    }
}

fn default_entries() -> Vec<(&'static str, Value)> {
    vec![
        // Scheduler
        ("tick_rate", Value::from(60.0)),
        // Snake motion
        ("speed", Value::from(4.0)),
        ("turn_rate", Value::from(0.1)),
        // Geometry
        ("segment_radius", Value::from(10.0)),
        ("food_radius", Value::from(5.0)),
        ("food_margin", Value::from(0.1)),
    ]
}

impl Clone for RuntimeParams {
    fn clone(&self) -> Self {
        Self {
            params: self.params.clone(),
            persist_path: self.persist_path.clone(),
        }
    }
}

impl Default for RuntimeParams {
    fn default() -> Self {
        Self::init().unwrap_or_else(|e| {
            tracing::warn!("Failed to initialize RuntimeParams: {}. Using defaults.", e);
            Self::with_defaults()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_basic_operations() {
        let params = RuntimeParams::with_defaults();

        assert_eq!(params.get_f64("speed", 0.0), 4.0);
        assert_eq!(params.get_f64("segment_radius", 0.0), 10.0);

        params.set("speed", 6.5).unwrap();
        assert_eq!(params.get::<f64>("speed"), Some(6.5));

        assert!(params.has("food_margin"));
        assert!(params.remove("food_margin").is_some());
        assert!(!params.has("food_margin"));
    }

    #[test]
    fn test_empty_store_falls_back() {
        let params = RuntimeParams::empty();
        assert!(params.list_keys().is_empty());
        assert_eq!(params.get_f64("speed", 4.0), 4.0);
        assert_eq!(params.get_string("follow_mode", "spring"), "spring");
    }

    #[test]
    fn test_type_mismatch_falls_back() {
        let params = RuntimeParams::empty();
        params.set("speed", "fast").unwrap();
        assert_eq!(params.get_f64("speed", 4.0), 4.0);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let params = RuntimeParams::with_defaults();
        params.set("speed", 9.0).unwrap();
        params.set("custom", true).unwrap();

        params.reset();
        assert_eq!(params.get_f64("speed", 0.0), 4.0);
        assert!(!params.has("custom"));
    }

    #[test]
    fn test_clones_share_storage() {
        let params = RuntimeParams::empty();
        let shared = params.clone();
        shared.set("turn_rate", 0.2).unwrap();
        assert_eq!(params.get_f64("turn_rate", 0.0), 0.2);
    }

    #[test]
    fn test_load_yaml_overlays_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "speed: 3.0\nrandomize_start_food: true").unwrap();

        let params = RuntimeParams::from_file(file.path()).unwrap();
        assert_eq!(params.get_f64("speed", 0.0), 3.0);
        assert!(params.get_bool("randomize_start_food", false));
        // untouched default
        assert_eq!(params.get_f64("food_radius", 0.0), 5.0);
    }

    #[test]
    fn test_malformed_yaml_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "- just\n- a list").unwrap();

        let result = RuntimeParams::from_file(file.path());
        assert!(matches!(result, Err(SerpentError::Config(_))));
    }

    #[test]
    fn test_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("params.yaml");

        let params = RuntimeParams {
            persist_path: Some(path.clone()),
            ..RuntimeParams::with_defaults()
        };
        params.set("speed", 5.0).unwrap();
        params.save_to_disk().unwrap();

        let reloaded = RuntimeParams::from_file(&path).unwrap();
        assert_eq!(reloaded.get_f64("speed", 0.0), 5.0);
    }
}
