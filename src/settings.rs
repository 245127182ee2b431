use crate::Result;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Resolved credentials for the Orbit API. Fields default to empty so
/// request validation can report every missing credential at once.
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    /// Orbit API key, usually supplied through ORBIT_API_KEY
    #[serde(default)]
    pub api_key: String,
    /// Orbit workspace ID, usually supplied through ORBIT_WORKSPACE_ID
    #[serde(default)]
    pub workspace_id: String,
}

impl Settings {
    /// Settings are loaded from the optional file at the given path, with
    /// ORBIT-prefixed environment variables taking precedence.
    pub fn new(path: &Path) -> Result<Self> {
        Ok(Config::builder()
            .add_source(File::with_name(path.to_str().expect("file name")).required(false))
            .add_source(Environment::with_prefix("ORBIT"))
            .build()
            .and_then(|config| config.try_deserialize())?)
    }
}
