//! # Radiowave Configuration Module
//!
//! This module provides configuration management for Radiowave, including:
//! - Loading configuration from YAML files
//! - Merging with embedded default configuration
//! - Environment variable overrides
//! - Type-safe getters and setters for configuration values
//! - Thread-safe singleton access pattern
//!
//! ## Usage
//!
//! ```no_run
//! use radioconfig::get_config;
//!
//! // Get the global configuration
//! let config = get_config();
//!
//! // Access configuration values
//! let stream_url = config.get_stream_url()?;
//! let poll = config.get_info_poll_secs();
//!
//! // Update configuration values
//! config.set_station_name("Hope FM".to_string())?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::{anyhow, Result};
use dirs::home_dir;
use lazy_static::lazy_static;
use serde_yaml::{Mapping, Number, Value};
use std::{
    env, fs,
    path::Path,
    sync::{Arc, Mutex},
};
use tracing::{info, warn};

// Embedded default configuration
const DEFAULT_CONFIG: &str = include_str!("radiowave.yaml");

lazy_static! {
    static ref CONFIG: Arc<Config> =
        Arc::new(Config::load_config("").expect("Failed to load Radiowave configuration"));
}

const ENV_CONFIG_DIR: &str = "RADIOWAVE_CONFIG";
const ENV_PREFIX: &str = "RADIOWAVE_CONFIG__";

// Default values for configuration
const DEFAULT_STATION_NAME: &str = "Radiowave";
const DEFAULT_INFO_POLL_SECS: u64 = 5;
const DEFAULT_LOG_MIN_LEVEL: &str = "INFO";
const DEFAULT_LOG_ENABLE_CONSOLE: bool = true;

/// Macro to generate getter/setter for u64 values with default
macro_rules! impl_u64_config {
    ($getter:ident, $setter:ident, $path:expr, $default:expr) => {
        pub fn $getter(&self) -> u64 {
            match self.get_value($path) {
                Ok(Value::Number(n)) if n.is_u64() => n.as_u64().unwrap(),
                _ => $default,
            }
        }

        pub fn $setter(&self, value: u64) -> Result<()> {
            let n = Number::from(value);
            self.set_value($path, Value::Number(n))
        }
    };
}

/// Macro to generate getter/setter for bool values with default
macro_rules! impl_bool_config {
    ($getter:ident, $setter:ident, $path:expr, $default:expr) => {
        pub fn $getter(&self) -> bool {
            match self.get_value($path) {
                Ok(Value::Bool(b)) => b,
                _ => $default,
            }
        }

        pub fn $setter(&self, value: bool) -> Result<()> {
            self.set_value($path, Value::Bool(value))
        }
    };
}

/// Configuration manager for Radiowave
///
/// This structure manages the application configuration, including:
/// - Loading configuration from YAML files
/// - Merging with default configuration
/// - Handling environment variable overrides
/// - Providing typed getters/setters for configuration values
///
/// # Examples
///
/// ```no_run
/// use radioconfig::get_config;
///
/// let config = get_config();
/// println!("Station: {}", config.get_station_name());
/// ```
#[derive(Debug)]
pub struct Config {
    config_dir: String,
    path: String,
    data: Mutex<Value>,
}

impl Clone for Config {
    fn clone(&self) -> Self {
        let data = self.data.lock().unwrap().clone();
        Self {
            config_dir: self.config_dir.clone(),
            path: self.path.clone(),
            data: Mutex::new(data),
        }
    }
}

impl Config {
    /// Finds a config directory by trying different locations in order
    fn find_config_dir(directory: &str) -> String {
        // 1. Try provided directory
        if !directory.is_empty() {
            return directory.to_string();
        }

        // 2. Try environment variable
        if let Ok(env_path) = env::var(ENV_CONFIG_DIR) {
            info!(env_var = ENV_CONFIG_DIR, path = %env_path, "Trying to load config from env");
            return env_path;
        }

        // 3. Try current directory
        if Path::new(".radiowave").exists() {
            return ".radiowave".to_string();
        }

        // 4. Try home directory
        if let Some(home) = home_dir() {
            let home_config = home.join(".radiowave");
            if home_config.exists() {
                return home_config.to_string_lossy().to_string();
            }
        }

        // Default fallback
        ".radiowave".to_string()
    }

    /// Validates and prepares a config directory
    fn validate_config_dir(path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path)?;
        }

        if !path.is_dir() {
            return Err(anyhow!("Config path is not a directory"));
        }

        // Test write permission
        let test_file = path.join(".write_test");
        fs::write(&test_file, b"test")?;
        fs::remove_file(&test_file)?;

        Ok(())
    }

    /// Determines and validates the configuration directory
    ///
    /// The directory is searched in the following order:
    /// 1. The provided `directory` parameter if not empty
    /// 2. The `RADIOWAVE_CONFIG` environment variable
    /// 3. `.radiowave` in the current directory
    /// 4. `.radiowave` in the user's home directory
    ///
    /// The directory is created if it doesn't exist, and validated for
    /// read/write permissions.
    pub fn config_dir(directory: &str) -> String {
        let dir_path = Self::find_config_dir(directory);
        let path = Path::new(&dir_path);

        Self::validate_config_dir(path).expect("Cannot validate the configuration directory");

        dir_path
    }

    /// Loads the configuration from the specified directory
    ///
    /// This method:
    /// 1. Determines the configuration directory
    /// 2. Loads the default embedded configuration
    /// 3. Merges it with the external config.yaml file if present
    /// 4. Applies environment variable overrides
    /// 5. Saves the merged configuration
    ///
    /// # Arguments
    ///
    /// * `directory` - The directory containing the config.yaml file, or
    ///   empty to use the default search order
    pub fn load_config(directory: &str) -> Result<Self> {
        let config_dir = Self::config_dir(directory);
        info!(config_dir = %config_dir, "Using config directory");

        let config_file_path = Path::new(&config_dir).join("config.yaml");
        let path = config_file_path.to_string_lossy().to_string();

        let mut default_value: Value = serde_yaml::from_str(DEFAULT_CONFIG)?;

        let yaml_data = if let Ok(data) = fs::read(&path) {
            info!(config_file = %path, "Loaded config file");
            data
        } else {
            info!(config_file = %path, "Config file not found, using default embedded config");
            DEFAULT_CONFIG.as_bytes().to_vec()
        };

        let external_value: Value = serde_yaml::from_slice(&yaml_data)?;
        merge_yaml(&mut default_value, &external_value);
        let mut config_value = Self::lower_keys_value(default_value);

        Self::apply_env_overrides(&mut config_value);

        let config = Config {
            config_dir,
            path,
            data: Mutex::new(config_value),
        };

        config.save()?;
        Ok(config)
    }

    /// Saves the current configuration to the config.yaml file
    pub fn save(&self) -> Result<()> {
        let data = self.data.lock().unwrap();
        let yaml = serde_yaml::to_string(&*data)?;
        fs::write(&self.path, yaml)?;
        Ok(())
    }

    /// Sets a configuration value at the specified path and saves it
    ///
    /// # Arguments
    ///
    /// * `path` - Array of keys representing the path (e.g., `&["station", "name"]`)
    /// * `value` - The YAML value to set
    pub fn set_value(&self, path: &[&str], value: Value) -> Result<()> {
        let mut data = self.data.lock().unwrap();
        Self::set_value_internal(&mut data, path, value)?;
        drop(data);
        self.save()?;
        Ok(())
    }

    fn set_value_internal(data: &mut Value, path: &[&str], value: Value) -> Result<()> {
        if path.is_empty() {
            *data = value;
            return Ok(());
        }
        if let Value::Mapping(map) = data {
            let key = path[0].to_lowercase();
            let key_value = Value::String(key);
            if path.len() == 1 {
                map.insert(key_value, value);
            } else {
                let entry = map
                    .entry(key_value)
                    .or_insert(Value::Mapping(Mapping::new()));
                Self::set_value_internal(entry, &path[1..], value)?;
            }
            Ok(())
        } else {
            Err(anyhow!("Current node is not a map"))
        }
    }

    /// Gets a configuration value at the specified path
    ///
    /// # Arguments
    ///
    /// * `path` - Array of keys representing the path (e.g., `&["station", "stream_url"]`)
    pub fn get_value(&self, path: &[&str]) -> Result<Value> {
        let data = self.data.lock().unwrap();
        Self::get_value_internal(&data, path)
    }

    fn get_value_internal(data: &Value, path: &[&str]) -> Result<Value> {
        let mut current = data;
        for (i, key) in path.iter().enumerate() {
            if let Value::Mapping(map) = current {
                let key = key.to_lowercase();

                if let Some(next) = map.get(&Value::String(key)) {
                    current = next;
                } else {
                    return Err(anyhow!("Path {} does not exist", path[..=i].join(".")));
                }
            } else {
                return Err(anyhow!("Path {} is not a mapping", path[..i].join(".")));
            }
        }
        Ok(current.clone())
    }

    fn apply_env_overrides(config: &mut Value) {
        for (key, value) in env::vars() {
            if key.starts_with(ENV_PREFIX) {
                let key_path = key
                    .trim_start_matches(ENV_PREFIX)
                    .split("__")
                    .collect::<Vec<_>>();
                let yaml_value = Self::convert_env_value(&value);
                let _ = Self::set_value_internal(config, &key_path, yaml_value);
            }
        }
    }

    fn convert_env_value(value: &str) -> Value {
        if let Ok(parsed) = serde_yaml::from_str::<Value>(value) {
            return parsed;
        }
        Value::String(value.to_string())
    }

    fn lower_keys_value(value: Value) -> Value {
        match value {
            Value::Mapping(map) => {
                let mut new_map = Mapping::new();
                for (k, v) in map {
                    if let Value::String(s) = k {
                        new_map.insert(Value::String(s.to_lowercase()), Self::lower_keys_value(v));
                    } else {
                        new_map.insert(k, Self::lower_keys_value(v));
                    }
                }
                Value::Mapping(new_map)
            }
            Value::Sequence(seq) => {
                Value::Sequence(seq.into_iter().map(Self::lower_keys_value).collect())
            }
            _ => value,
        }
    }

    // ========================================================================
    // Station settings
    // ========================================================================

    /// Display name of the active station
    pub fn get_station_name(&self) -> String {
        match self.get_value(&["station", "name"]) {
            Ok(Value::String(s)) if !s.is_empty() => s,
            _ => DEFAULT_STATION_NAME.to_string(),
        }
    }

    /// Sets the display name of the active station
    pub fn set_station_name(&self, name: String) -> Result<()> {
        self.set_value(&["station", "name"], Value::String(name))
    }

    /// HLS stream URL of the active station
    pub fn get_stream_url(&self) -> Result<String> {
        match self.get_value(&["station", "stream_url"])? {
            Value::String(s) if !s.is_empty() => Ok(s),
            _ => Err(anyhow!("No stream URL configured")),
        }
    }

    /// Sets the HLS stream URL of the active station
    pub fn set_stream_url(&self, url: String) -> Result<()> {
        self.set_value(&["station", "stream_url"], Value::String(url))
    }

    /// Now-playing text endpoint of the active station
    pub fn get_info_url(&self) -> Result<String> {
        match self.get_value(&["station", "info_url"])? {
            Value::String(s) if !s.is_empty() => Ok(s),
            _ => Err(anyhow!("No now-playing URL configured")),
        }
    }

    /// Sets the now-playing text endpoint of the active station
    pub fn set_info_url(&self, url: String) -> Result<()> {
        self.set_value(&["station", "info_url"], Value::String(url))
    }

    impl_u64_config!(
        get_info_poll_secs,
        set_info_poll_secs,
        &["station", "info_poll_secs"],
        DEFAULT_INFO_POLL_SECS
    );

    /// Copies a station preset into the active `station` block
    ///
    /// Presets live under the `stations` mapping of the configuration file;
    /// the embedded defaults ship one preset per historical app brand.
    pub fn select_station(&self, slug: &str) -> Result<()> {
        let preset = self.get_value(&["stations", slug])?;
        let Value::Mapping(map) = preset else {
            return Err(anyhow!("Station preset {} is not a mapping", slug));
        };

        for (key, value) in map {
            if let Value::String(key) = key {
                self.set_value(&["station", &key], value)?;
            }
        }
        info!(station = slug, "Station preset selected");
        Ok(())
    }

    /// Slugs of the configured station presets
    pub fn station_presets(&self) -> Vec<String> {
        match self.get_value(&["stations"]) {
            Ok(Value::Mapping(map)) => map
                .keys()
                .filter_map(|k| match k {
                    Value::String(s) => Some(s.clone()),
                    _ => None,
                })
                .collect(),
            _ => {
                warn!("No station presets configured");
                Vec::new()
            }
        }
    }

    // ========================================================================
    // Logger settings
    // ========================================================================

    impl_bool_config!(
        get_log_enable_console,
        set_log_enable_console,
        &["host", "logger", "enable_console"],
        DEFAULT_LOG_ENABLE_CONSOLE
    );

    /// Minimum log level from the configuration
    pub fn get_log_min_level(&self) -> String {
        match self.get_value(&["host", "logger", "min_level"]) {
            Ok(Value::String(s)) => s,
            _ => DEFAULT_LOG_MIN_LEVEL.to_string(),
        }
    }

    /// Sets the minimum log level in the configuration
    pub fn set_log_min_level(&self, level: String) -> Result<()> {
        self.set_value(&["host", "logger", "min_level"], Value::String(level))
    }
}

/// Returns the global configuration instance
///
/// This function provides access to the singleton configuration instance,
/// which is lazily loaded on first access.
///
/// # Examples
///
/// ```no_run
/// use radioconfig::get_config;
///
/// let config = get_config();
/// println!("{}", config.get_station_name());
/// ```
pub fn get_config() -> Arc<Config> {
    CONFIG.clone()
}

/// Merges external YAML configuration into default configuration
///
/// Mappings are merged key by key; scalars and sequences from the external
/// file replace the defaults.
fn merge_yaml(default: &mut Value, external: &Value) {
    match (default, external) {
        (Value::Mapping(dmap), Value::Mapping(emap)) => {
            for (k, v) in emap {
                match dmap.get_mut(k) {
                    Some(dv) => merge_yaml(dv, v),
                    None => {
                        dmap.insert(k.clone(), v.clone());
                    }
                }
            }
        }
        (d, e) => *d = e.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_config() -> (TempDir, Config) {
        let dir = TempDir::new().unwrap();
        let config = Config::load_config(dir.path().to_str().unwrap()).unwrap();
        (dir, config)
    }

    #[test]
    fn defaults_load_without_a_config_file() {
        let (_dir, config) = temp_config();

        assert_eq!(config.get_station_name(), "Hope FM");
        assert_eq!(config.get_info_poll_secs(), 5);
        assert!(config.get_stream_url().unwrap().ends_with(".m3u8"));
        assert_eq!(config.get_log_min_level(), "INFO");
        assert!(config.get_log_enable_console());
    }

    #[test]
    fn set_and_get_round_trip() {
        let (_dir, config) = temp_config();

        config.set_station_name("Test FM".to_string()).unwrap();
        config
            .set_info_url("https://example.com/np.txt".to_string())
            .unwrap();
        config.set_info_poll_secs(30).unwrap();

        assert_eq!(config.get_station_name(), "Test FM");
        assert_eq!(config.get_info_url().unwrap(), "https://example.com/np.txt");
        assert_eq!(config.get_info_poll_secs(), 30);
    }

    #[test]
    fn external_file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("config.yaml"),
            "station:\n  name: File FM\n",
        )
        .unwrap();

        let config = Config::load_config(dir.path().to_str().unwrap()).unwrap();

        assert_eq!(config.get_station_name(), "File FM");
        // Keys the file omits keep their embedded defaults
        assert_eq!(config.get_info_poll_secs(), 5);
    }

    #[test]
    fn env_override_wins() {
        // A key no other test asserts on, so parallel `load_config` calls
        // picking up the variable stay unaffected
        let var = "RADIOWAVE_CONFIG__STATION__TAGLINE";
        env::set_var(var, "From the environment");

        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("config.yaml"),
            "station:\n  tagline: From the file\n",
        )
        .unwrap();

        let config = Config::load_config(dir.path().to_str().unwrap()).unwrap();
        env::remove_var(var);

        // The environment beats both the embedded defaults and the file
        assert_eq!(
            config.get_value(&["station", "tagline"]).unwrap(),
            Value::String("From the environment".to_string())
        );
    }

    #[test]
    fn env_override_parses_scalars() {
        let var = "RADIOWAVE_CONFIG__STATION__TAGLINE_PRIORITY";
        env::set_var(var, "42");

        let dir = TempDir::new().unwrap();
        let config = Config::load_config(dir.path().to_str().unwrap()).unwrap();
        env::remove_var(var);

        // YAML-parseable values keep their type instead of becoming strings
        assert_eq!(
            config
                .get_value(&["station", "tagline_priority"])
                .unwrap(),
            Value::Number(Number::from(42u64))
        );
    }

    #[test]
    fn select_station_preset() {
        let (_dir, config) = temp_config();

        let presets = config.station_presets();
        assert!(presets.contains(&"golos-nadii".to_string()));

        config.select_station("golos-nadii").unwrap();
        assert_eq!(config.get_station_name(), "Golos Nadii");
        assert!(config.get_stream_url().unwrap().contains("golosnadii"));

        assert!(config.select_station("no-such-station").is_err());
    }

    #[test]
    fn saved_file_reloads_identically() {
        let dir = TempDir::new().unwrap();
        {
            let config = Config::load_config(dir.path().to_str().unwrap()).unwrap();
            config.set_station_name("Persisted FM".to_string()).unwrap();
        }

        let reloaded = Config::load_config(dir.path().to_str().unwrap()).unwrap();
        assert_eq!(reloaded.get_station_name(), "Persisted FM");
    }
}
