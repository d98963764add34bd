//! Constants used throughout the rampart codebase

/// Stable error codes carried by [`crate::Error`]
pub mod codes {
    // Generic category codes
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const NETWORK_ERROR: &str = "NETWORK_ERROR";
    pub const FILESYSTEM_ERROR: &str = "FILESYSTEM_ERROR";
    pub const CONFIGURATION_ERROR: &str = "CONFIGURATION_ERROR";
    pub const CACHE_ERROR: &str = "CACHE_ERROR";
    pub const TIMEOUT_ERROR: &str = "TIMEOUT_ERROR";
    pub const PERMISSION_DENIED: &str = "PERMISSION_DENIED";
    pub const UNKNOWN_ERROR: &str = "UNKNOWN_ERROR";

    // Circuit breaker
    pub const CIRCUIT_OPEN: &str = "CIRCUIT_OPEN";

    // Cache engine
    pub const CACHE_CREATION_FAILED: &str = "CACHE_CREATION_FAILED";
    pub const CACHE_LOAD_FAILED: &str = "CACHE_LOAD_FAILED";
    pub const CACHE_WRITE_FAILED: &str = "CACHE_WRITE_FAILED";
    pub const CACHE_MISS: &str = "CACHE_MISS";
    pub const INVALID_TTL: &str = "INVALID_TTL";

    // Configuration and encoding
    pub const INVALID_CONFIGURATION: &str = "INVALID_CONFIGURATION";
    pub const SERIALIZATION_FAILED: &str = "SERIALIZATION_FAILED";
}

// Environment variable names read by `ResilienceConfig::from_env`
pub const RAMPART_MAX_SIZE_VAR: &str = "RAMPART_MAX_SIZE";
pub const RAMPART_TTL_MS_VAR: &str = "RAMPART_TTL_MS";
pub const RAMPART_FAILURE_THRESHOLD_VAR: &str = "RAMPART_FAILURE_THRESHOLD";
pub const RAMPART_MONITORING_PERIOD_MS_VAR: &str = "RAMPART_MONITORING_PERIOD_MS";
pub const RAMPART_RESET_TIMEOUT_MS_VAR: &str = "RAMPART_RESET_TIMEOUT_MS";
pub const RAMPART_HALF_OPEN_TRIALS_VAR: &str = "RAMPART_HALF_OPEN_TRIALS";
pub const RAMPART_REQUEST_TIMEOUT_MS_VAR: &str = "RAMPART_REQUEST_TIMEOUT_MS";
