use serde::Deserialize;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub storage: StorageSettings,
    pub media: MediaConfig,
    pub paper: PaperConfig,
    pub auth: AuthConfig,
    pub bootstrap: BootstrapConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Persistence backend selection
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// `memory` or `postgres`
    pub backend: String,
    pub database_url: String,
    pub max_connections: u32,
}

/// Where generated artifacts and uploads live
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    pub root: String,
    /// URL path the media root is served under
    pub url_prefix: String,
    /// Scratch directory for uploaded workbooks and LaTeX sources
    pub scratch_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PaperConfig {
    pub institution: String,
    /// `docx`, `tex` or `pdf`
    pub format: String,
    pub wrap_threshold: usize,
    pub wrap_search_from: usize,
    pub seed: Option<u64>,
    pub pdflatex: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub expiration_hours: u64,
}

/// Account `serve` creates when the user store is empty
///
/// With the in-memory backend this is the only way to get an HOD account:
/// `create-user` writes to a store that disappears with the command.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    pub enabled: bool,
    pub username: String,
    pub name: String,
    pub department: String,
    /// Any role, including hod and administrator
    pub role: String,
    /// Generated and logged when unset
    pub password: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: "memory".to_string(),
            database_url: "postgres://localhost/vijnana".to_string(),
            max_connections: 10,
        }
    }
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            root: "media".to_string(),
            url_prefix: "/uploads".to_string(),
            scratch_dir: "/tmp".to_string(),
        }
    }
}

impl Default for PaperConfig {
    fn default() -> Self {
        Self {
            institution: "Department of Computer Science".to_string(),
            format: "docx".to_string(),
            wrap_threshold: 75,
            wrap_search_from: 70,
            seed: None,
            pdflatex: "pdflatex".to_string(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "change-me-in-production".to_string(),
            expiration_hours: 24,
        }
    }
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            username: "hod".to_string(),
            name: "Head of Department".to_string(),
            department: "CSE".to_string(),
            role: "hod".to_string(),
            password: None,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.storage.backend, "memory");
        assert_eq!(config.media.url_prefix, "/uploads");
        assert_eq!(config.paper.wrap_threshold, 75);
        assert_eq!(config.paper.wrap_search_from, 70);
        assert_eq!(config.paper.seed, None);
        assert!(config.bootstrap.enabled);
        assert_eq!(config.bootstrap.role, "hod");
        assert_eq!(config.bootstrap.password, None);
    }

    #[test]
    fn test_partial_source_keeps_defaults() {
        let config: AppConfig = config::Config::builder()
            .add_source(config::File::from_str(
                "[paper]\nformat = \"tex\"\nseed = 42\n\n[logging]\nformat = \"json\"\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.paper.format, "tex");
        assert_eq!(config.paper.seed, Some(42));
        assert_eq!(config.paper.institution, "Department of Computer Science");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.server.port, 8080);
    }
}
