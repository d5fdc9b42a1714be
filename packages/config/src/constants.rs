// ABOUTME: Environment variable name constants
// ABOUTME: Centralized definitions of all environment variable names used across the workspace

// Storage Configuration
pub const EMSPAY_DATABASE_URL: &str = "EMSPAY_DATABASE_URL";

// Logging Configuration
pub const EMSPAY_LOG: &str = "EMSPAY_LOG";
pub const RUST_LOG: &str = "RUST_LOG"; // Fallback

// Defaults
pub const DEFAULT_DATA_DIR: &str = ".emspay";
pub const DEFAULT_DATABASE_FILE: &str = "settings.db";
pub const DEFAULT_LOG_FILTER: &str = "warn";

