//! Configuration constants and profile loading for queuesim
//!
//! Connection settings live in an INI file with one section per profile:
//!
//! ```ini
//! [default]
//! server = http://localhost:8000
//! endpoint = /simulate/
//! ```

use anyhow::{Context, Result};
use ini::Ini;
use std::path::Path;

/// Default profile file path for queuesim
pub const DEFAULT_PROFILE_PATH: &str = "~/.queuesim/profile";

/// Environment variable name for overriding the profile path
pub const PROFILE_PATH_ENV_VAR: &str = "QUEUESIM_PROFILE_PATH";

/// Simulation service used when no profile names one
pub const DEFAULT_SERVER: &str = "http://localhost:8000";

/// Path of the simulation endpoint on the server
pub const DEFAULT_ENDPOINT: &str = "/simulate/";

/// Get the profile file path, checking environment variable first, then falling back to default
pub fn get_profile_path() -> String {
    std::env::var_os(PROFILE_PATH_ENV_VAR)
        .and_then(|val| val.into_string().ok())
        .unwrap_or_else(|| DEFAULT_PROFILE_PATH.to_string())
}

/// Where the simulation service lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationProfile {
    server: String,
    endpoint: String,
}

impl SimulationProfile {
    pub fn new(server: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            server: server.into(),
            endpoint: endpoint.into(),
        }
    }

    pub fn server(&self) -> &str {
        &self.server
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn set_server(&mut self, server: impl Into<String>) {
        self.server = server.into();
    }

    /// Full URL of the simulation endpoint
    pub fn simulate_url(&self) -> String {
        format!(
            "{}/{}",
            self.server.trim_end_matches('/'),
            self.endpoint.trim_start_matches('/')
        )
    }
}

/// Profile used when the file or the section is missing
pub fn get_blank_profile() -> SimulationProfile {
    SimulationProfile::new(DEFAULT_SERVER, DEFAULT_ENDPOINT)
}

/// Reads named profiles from an INI file
pub struct IniProfileStore {
    path: String,
}

impl IniProfileStore {
    pub fn new(path: &str) -> Self {
        Self {
            path: shellexpand::tilde(path).into_owned(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Look up a profile; `Ok(None)` when the file or section does not exist
    pub fn get_profile(&self, name: &str) -> Result<Option<SimulationProfile>> {
        if !Path::new(&self.path).exists() {
            tracing::debug!("Profile file '{}' does not exist", self.path);
            return Ok(None);
        }

        let ini = Ini::load_from_file(&self.path)
            .with_context(|| format!("Failed to read profile file '{}'", self.path))?;

        Ok(ini.section(Some(name)).map(|section| {
            SimulationProfile::new(
                section.get("server").unwrap_or(DEFAULT_SERVER),
                section.get("endpoint").unwrap_or(DEFAULT_ENDPOINT),
            )
        }))
    }
}

/// Load a profile by name, falling back to the blank profile
pub fn load_profile(profile_name: &str, profile_path: &str) -> Result<SimulationProfile> {
    tracing::debug!("Loading profile '{}' from '{}'", profile_name, profile_path);

    let store = IniProfileStore::new(profile_path);
    let profile = match store.get_profile(profile_name)? {
        Some(p) => {
            tracing::debug!("Profile loaded successfully, server: {}", p.server());
            p
        }
        None => {
            tracing::debug!("Profile '{}' not found, using blank profile", profile_name);
            get_blank_profile()
        }
    };

    Ok(profile)
}
