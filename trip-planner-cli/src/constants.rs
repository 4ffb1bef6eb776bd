//! Application-wide constants

/// Configuration storage
pub mod paths {
    /// Directory under the platform config dir holding `config.json`
    pub const APP_DIR: &str = "trip-planner";
    /// Configuration file name
    pub const CONFIG_FILE: &str = "config.json";
}

/// Environment variable overrides
pub mod env {
    /// Overrides the backend base URL from the config file
    pub const BASE_URL: &str = "TRIP_PLANNER_BASE_URL";
}
