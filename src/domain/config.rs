use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::domain::inventory::{default_eligible_statuses, StatusSet};

/// NetBox API token. Zeroed on drop and never printed.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(transparent)]
pub struct ApiToken(String);

impl ApiToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("ApiToken(<empty>)")
        } else {
            f.write_str("ApiToken(<redacted>)")
        }
    }
}

/// NetBox connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetBoxConfig {
    /// Base URL of the NetBox instance, without the `/api` suffix.
    pub url: String,
    /// API token sent as `Authorization: Token <token>`.
    pub token: ApiToken,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// `limit` used for paginated list endpoints.
    pub page_size: u32,
}

impl Default for NetBoxConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8000".to_string(),
            token: ApiToken::default(),
            timeout_secs: 30,
            page_size: 250,
        }
    }
}

/// Settings shared by all checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChecksConfig {
    /// Devices with one of these statuses are checked; all others are skipped.
    pub eligible_statuses: StatusSet,
    /// Re-read every interface by id before testing its connection flag.
    pub refetch_interfaces: bool,
}

impl Default for ChecksConfig {
    fn default() -> Self {
        Self {
            eligible_statuses: default_eligible_statuses(),
            refetch_interfaces: false,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error".
    pub level: String,
    /// Enable JSON file logging with daily rotation.
    pub file_logging: bool,
    /// Maximum number of log files to keep.
    pub max_files: u32,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_logging: false,
            max_files: 7,
        }
    }
}

/// Report output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{}'", other)),
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub netbox: NetBoxConfig,
    pub checks: ChecksConfig,
    pub logging: LoggingConfig,
    pub output: OutputConfig,
}

impl AppConfig {
    /// Create a new AppConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `NETBOX_URL` and `NETBOX_TOKEN` from the environment.
    pub fn apply_env(&mut self) {
        self.apply_overrides(
            std::env::var("NETBOX_URL").ok(),
            std::env::var("NETBOX_TOKEN").ok(),
        );
    }

    fn apply_overrides(&mut self, url: Option<String>, token: Option<String>) {
        if let Some(url) = url.filter(|u| !u.is_empty()) {
            self.netbox.url = url;
        }
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            self.netbox.token = ApiToken::new(token);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::inventory::DeviceStatus;

    #[test]
    fn test_defaults() {
        let config = AppConfig::new();
        assert_eq!(config.netbox.page_size, 250);
        assert!(config.checks.eligible_statuses.contains(&DeviceStatus::Active));
        assert!(config.checks.eligible_statuses.contains(&DeviceStatus::Planned));
        assert!(!config.checks.refetch_interfaces);
        assert_eq!(config.output.format, OutputFormat::Text);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [netbox]
            url = "https://netbox.example.net"

            [checks]
            eligible_statuses = ["active", "staged"]
            "#,
        )
        .unwrap();

        assert_eq!(config.netbox.url, "https://netbox.example.net");
        assert_eq!(config.netbox.timeout_secs, 30);
        assert!(config.checks.eligible_statuses.contains(&DeviceStatus::Staged));
        assert!(!config.checks.eligible_statuses.contains(&DeviceStatus::Planned));
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_token_is_redacted() {
        let token = ApiToken::new("0123456789abcdef");
        assert_eq!(format!("{:?}", token), "ApiToken(<redacted>)");
        assert_eq!(token.expose(), "0123456789abcdef");
    }

    #[test]
    fn test_overrides() {
        let mut config = AppConfig::new();
        config.apply_overrides(Some("https://nb.local".to_string()), Some(String::new()));
        assert_eq!(config.netbox.url, "https://nb.local");
        assert!(config.netbox.token.is_empty());
    }
}
