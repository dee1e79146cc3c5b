//! Configuration module for the relay and the upload workflow

use serde::Deserialize;
use config::{Config, ConfigError, Environment, File};
use std::path::PathBuf;

/// Main application settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub upstream: UpstreamSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub image: ImageSettings,
    #[serde(default)]
    pub client: ClientSettings,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
    /// Maximum JSON request body, in megabytes (base64 images are large)
    pub payload_limit_mb: usize,
}

/// External printing API the relay forwards to
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct UpstreamSettings {
    pub base_url: String,
    pub api_token: String,
    pub timeout_secs: u64,
    pub rate_limit_per_minute: u32,
}

/// Catalog resolution constants
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// Exact blueprint title the resolver looks for
    pub blueprint_title: String,
    /// The single provider exposed for the blueprint
    pub primary_provider: String,
    /// Providers exposed by the global provider listing
    pub listed_providers: Vec<String>,
    /// Provider ids kept by the product listing flow
    pub listed_provider_ids: Vec<u64>,
    /// Allow-listed size labels and their price in cents
    pub desired_sizes: Vec<SizePrice>,
}

/// One row of the desired size table
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SizePrice {
    pub size: String,
    pub cents: u32,
}

/// Image preparation thresholds
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ImageSettings {
    pub min_dimension: u32,
    pub target_dimension: u32,
    pub jpeg_quality: u8,
}

/// Settings used by the command-line workflow when talking to the relay
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    pub relay_url: String,
    pub page_size: u32,
    pub default_background: String,
}

impl Settings {
    /// Load configuration from files and environment variables
    ///
    /// Configuration priority (highest to lowest):
    /// 1. Environment variables (prefixed with CANVAS_)
    /// 2. config/local.toml (gitignored)
    /// 3. config/default.toml
    pub fn load() -> Result<Self, ConfigError> {
        let config_dir = std::env::var("CONFIG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config"));

        let builder = Config::builder()
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            .add_source(File::from(config_dir.join("local.toml")).required(false))
            // CANVAS_UPSTREAM__API_TOKEN, CANVAS_SERVER__PORT, etc.
            .add_source(
                Environment::with_prefix("CANVAS")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
            );

        builder.build()?.try_deserialize()
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 3001,
            workers: None,
            payload_limit_mb: 50,
        }
    }
}

impl Default for UpstreamSettings {
    fn default() -> Self {
        UpstreamSettings {
            base_url: "https://api.printify.com".to_string(),
            api_token: String::new(),
            timeout_secs: 60,
            rate_limit_per_minute: 600,
        }
    }
}

// The token never shows up in logs or panics.
impl std::fmt::Debug for UpstreamSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamSettings")
            .field("base_url", &self.base_url)
            .field("api_token", &if self.api_token.is_empty() { "<unset>" } else { "<redacted>" })
            .field("timeout_secs", &self.timeout_secs)
            .field("rate_limit_per_minute", &self.rate_limit_per_minute)
            .finish()
    }
}

impl Default for CatalogSettings {
    fn default() -> Self {
        let desired_sizes = [
            ("6\" x 6\"", 2000),
            ("10\" x 10\"", 2500),
            ("12\" x 12\"", 3000),
            ("14\" x 14\"", 3500),
            ("16\" x 16\"", 4000),
            ("20\" x 20\"", 5000),
        ]
        .into_iter()
        .map(|(size, cents)| SizePrice { size: size.to_string(), cents })
        .collect();

        CatalogSettings {
            blueprint_title: crate::domain::CANVAS_BLUEPRINT_TITLE.to_string(),
            primary_provider: "Jondo".to_string(),
            listed_providers: vec!["Jondo".to_string(), "Sensaria".to_string()],
            listed_provider_ids: vec![105, 2],
            desired_sizes,
        }
    }
}

impl Default for ImageSettings {
    fn default() -> Self {
        ImageSettings {
            min_dimension: 1000,
            target_dimension: 6000,
            jpeg_quality: 95,
        }
    }
}

impl Default for ClientSettings {
    fn default() -> Self {
        ClientSettings {
            relay_url: "http://localhost:3001/api/".to_string(),
            page_size: 50,
            default_background: "#ffffff".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_table() {
        let catalog = CatalogSettings::default();
        assert_eq!(catalog.desired_sizes.len(), 6);
        assert_eq!(catalog.desired_sizes[0], SizePrice { size: "6\" x 6\"".to_string(), cents: 2000 });
        assert_eq!(catalog.primary_provider, "Jondo");
    }

    #[test]
    fn test_load_reads_prefixed_env_vars() {
        std::env::set_var("CANVAS_UPSTREAM__API_TOKEN", "token-from-env");
        std::env::set_var("CANVAS_SERVER__PORT", "3999");

        let settings = Settings::load().unwrap();

        std::env::remove_var("CANVAS_UPSTREAM__API_TOKEN");
        std::env::remove_var("CANVAS_SERVER__PORT");

        assert_eq!(settings.upstream.api_token, "token-from-env");
        assert_eq!(settings.server.port, 3999);
        assert_eq!(settings.catalog.primary_provider, "Jondo");
    }

    #[test]
    fn test_upstream_debug_redacts_token() {
        let upstream = UpstreamSettings {
            api_token: "super-secret".to_string(),
            ..Default::default()
        };
        let printed = format!("{:?}", upstream);
        assert!(!printed.contains("super-secret"));
        assert!(printed.contains("<redacted>"));
    }
}
