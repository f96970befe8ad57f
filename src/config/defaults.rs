/// Configuration default values
// Database defaults
pub const DEFAULT_DB_PATH: &str = "meals.db";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

// Web server defaults
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_ALLOWED_ORIGINS: &str = "*";

// Config sources
pub const DEFAULT_CONFIG_FILE: &str = "meals.toml";
pub const ENV_PREFIX: &str = "MEALS";
