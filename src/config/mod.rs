//! Application configuration

pub mod advisor;
pub mod personas;

use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub use advisor::{clamp_panel_percent, AdvisorConfig, ResponderSettings};
pub use personas::PersonaProfile;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    pub advisor: AdvisorConfig,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let advisor = match env::var("ADVISOR_CONFIG") {
            Ok(path) => AdvisorConfig::from_file(&PathBuf::from(path))?,
            Err(_) => AdvisorConfig::default(),
        };

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            data_dir: env::var("ADVISOR_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./data")),
            advisor,
        })
    }
}
