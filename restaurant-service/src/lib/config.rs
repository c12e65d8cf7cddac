use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

use crate::domain::user::errors::RoleError;
use crate::domain::user::models::RoleSet;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub roles: RolesConfig,
    pub admin: Option<AdminConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

/// Without a `url` the service keeps everything in memory.
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: default_max_connections(),
        }
    }
}

fn default_max_connections() -> u32 {
    5
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_hours: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RolesConfig {
    /// Role names accepted in user write bodies.
    pub assignable: Vec<String>,
}

impl Default for RolesConfig {
    fn default() -> Self {
        Self {
            assignable: vec!["admin".into(), "chef".into(), "waiter".into()],
        }
    }
}

impl RolesConfig {
    /// # Errors
    /// * `Invalid` - A configured name is not a known role
    pub fn role_set(&self) -> Result<RoleSet, RoleError> {
        RoleSet::from_names(&self.assignable)
    }
}

/// Account created at startup when no user with this email exists.
#[derive(Debug, Deserialize, Clone)]
pub struct AdminConfig {
    pub email: String,
    pub password: String,
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, DATABASE__URL, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: DATABASE__URL=postgres://... overrides database.url
            .add_source(
                Environment::default()
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("roles.assignable")
                    .try_parsing(true),
            )
            .build()?;

        configuration.try_deserialize()
    }
}
