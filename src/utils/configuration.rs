use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::globals::statics::{DEFAULT_UUID, SERVER_PORT};

/// the persisted renderer configuration, a TOML file in ~/mockdmr-rs
#[derive(Clone, Debug, Serialize, Deserialize, Eq, PartialEq)]
pub struct Configuration {
    pub friendly_name: String,
    pub bind_address: String,
    pub server_port: Option<u16>,
    pub device_uuid: String,
    pub log_level: LevelFilter,
}

impl Configuration {
    #[must_use]
    pub fn new() -> Configuration {
        Configuration {
            friendly_name: "Mock Renderer".to_string(),
            bind_address: "0.0.0.0".to_string(),
            server_port: Some(SERVER_PORT),
            device_uuid: DEFAULT_UUID.to_string(),
            log_level: LevelFilter::Info,
        }
    }

    fn config_dir() -> PathBuf {
        let hd = dirs::home_dir().unwrap_or_default();
        let config_dir = Path::new(&hd).join("mockdmr-rs");
        if !config_dir.exists() {
            let _ = fs::create_dir_all(&config_dir);
        }
        config_dir
    }

    fn config_file() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// `log_dir` - the directory the logfile goes to, same place as the config
    #[must_use]
    pub fn log_dir(&self) -> PathBuf {
        Self::config_dir()
    }

    /// `read_config` - load the configuration, creating a default one on first run
    ///
    /// an unreadable or unparseable file falls back to the defaults instead of failing
    #[must_use]
    pub fn read_config() -> Configuration {
        let configfile = Self::config_file();
        if !configfile.exists() {
            eprintln!("Creating a new default config {}", configfile.display());
            let config = Configuration::new();
            if let Err(e) = config.update_config() {
                eprintln!("Unable to write config {}: {e}", configfile.display());
            }
            return config;
        }
        match fs::read_to_string(&configfile) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
                eprintln!("Invalid config {}: {e}", configfile.display());
                Configuration::new()
            }),
            Err(e) => {
                eprintln!("Unable to read config {}: {e}", configfile.display());
                Configuration::new()
            }
        }
    }

    /// `update_config` - write the current configuration back to disk
    pub fn update_config(&self) -> io::Result<()> {
        let configfile = Self::config_file();
        let contents = toml::to_string(self).map_err(io::Error::other)?;
        fs::write(configfile, contents)
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new()
    }
}
