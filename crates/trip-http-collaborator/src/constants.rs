//! Transport constants
//!
//! Single source of truth for endpoint paths and connection defaults.

/// Backend endpoint paths
pub mod endpoints {
    /// Destination search
    pub const SEARCH: &str = "/search_options";
    /// Daily plan for a chosen destination
    pub const DAILY_PLAN: &str = "/chosen_destination_daily_plan";
    /// Images illustrating a daily plan
    pub const IMAGES: &str = "/dalle_image";
}

/// Default connection settings
pub mod defaults {
    /// Where the reference backend listens
    pub const BASE_URL: &str = "http://127.0.0.1:8000";
    /// Per-request timeout; plan and image generation are slow
    pub const TIMEOUT_SECS: u64 = 120;
    /// User agent sent with every request
    pub const USER_AGENT: &str = concat!("trip-planner/", env!("CARGO_PKG_VERSION"));
}

/// Longest error body kept in a status error
pub const MAX_ERROR_BODY_CHARS: usize = 512;
