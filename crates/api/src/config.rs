use std::fmt;
use std::path::PathBuf;
use std::sync::OnceLock;

use axum::http::HeaderValue;
use tracing::level_filters::LevelFilter;

use jernkorset_modernizer::{anthropic, ollama};

/// Service configuration loaded from environment variables.
///
/// Every field has a default suitable for local development. Resolve it once
/// through [`get_settings`]; tests build their own with [`Settings::from_lookup`].
#[derive(Debug, Clone)]
pub struct Settings {
    pub app_name: String,
    pub app_version: String,
    /// Expose internal error detail to clients.
    pub debug: bool,
    /// Absolute directory holding the CSV files.
    pub data_dir: PathBuf,
    pub letters_file: String,
    pub places_file: String,
    pub cors_origins: CorsOrigins,
    pub log_level: LevelFilter,
    pub log_format: LogFormat,
    pub host: String,
    pub port: u16,
    pub modernizer: ModernizerSettings,
}

/// Which origins may call the API from a browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    Any,
    /// Validated header values.
    List(Vec<String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModernizerBackend {
    Ollama,
    Anthropic,
}

#[derive(Clone)]
pub struct ModernizerSettings {
    pub backend: ModernizerBackend,
    pub ollama_url: String,
    pub ollama_model: String,
    pub anthropic_api_key: Option<String>,
    pub anthropic_model: String,
}

impl fmt::Debug for ModernizerSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModernizerSettings")
            .field("backend", &self.backend)
            .field("ollama_url", &self.ollama_url)
            .field("ollama_model", &self.ollama_model)
            .field(
                "anthropic_api_key",
                &self.anthropic_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("anthropic_model", &self.anthropic_model)
            .finish()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("{var} has invalid value {value:?}: expected {expected}")]
    Invalid {
        var: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("cannot resolve data directory {}: {source}", path.display())]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

static SETTINGS: OnceLock<Settings> = OnceLock::new();

/// Process-wide settings, parsed from the environment on first use.
///
/// Later calls return the same instance without re-reading the environment.
/// A parse failure is not cached.
pub fn get_settings() -> Result<&'static Settings, SettingsError> {
    if let Some(settings) = SETTINGS.get() {
        return Ok(settings);
    }
    let settings = Settings::from_env()?;
    Ok(SETTINGS.get_or_init(|| settings))
}

impl Settings {
    /// Load settings from the process environment.
    ///
    /// | Env Var             | Default                    |
    /// |---------------------|----------------------------|
    /// | `APP_NAME`          | `Jernkorset API`           |
    /// | `APP_VERSION`       | `1.0.0`                    |
    /// | `DEBUG`             | `false`                    |
    /// | `DATA_DIR`          | `data`                     |
    /// | `LETTERS_FILE`      | `placed_letters.csv`       |
    /// | `PLACES_FILE`       | `places_cleanup.csv`       |
    /// | `CORS_ORIGINS`      | `*`                        |
    /// | `LOG_LEVEL`         | `INFO`                     |
    /// | `LOG_FORMAT`        | `text`                     |
    /// | `HOST`              | `0.0.0.0`                  |
    /// | `PORT`              | `8000`                     |
    /// | `MODERNIZER`        | `ollama`                   |
    /// | `OLLAMA_URL`        | `http://localhost:11434`   |
    /// | `OLLAMA_MODEL`      | `llama3.1`                 |
    /// | `ANTHROPIC_API_KEY` | unset                      |
    /// | `ANTHROPIC_MODEL`   | `claude-3-5-haiku-latest`  |
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let debug = match get("DEBUG") {
            None => false,
            Some(value) => parse_bool(&value).ok_or(SettingsError::Invalid {
                var: "DEBUG",
                value,
                expected: "true or false",
            })?,
        };

        let data_dir = PathBuf::from(or("DATA_DIR", "data"));
        let data_dir = std::path::absolute(&data_dir).map_err(|source| SettingsError::DataDir {
            path: data_dir,
            source,
        })?;

        let cors_origins = parse_cors_origins(&or("CORS_ORIGINS", "*"))?;

        let log_level = {
            let value = or("LOG_LEVEL", "INFO");
            parse_level(&value).ok_or(SettingsError::Invalid {
                var: "LOG_LEVEL",
                value,
                expected: "TRACE, DEBUG, INFO, WARNING or ERROR",
            })?
        };

        let log_format = match or("LOG_FORMAT", "text").to_ascii_lowercase().as_str() {
            "text" => LogFormat::Text,
            "json" => LogFormat::Json,
            other => {
                return Err(SettingsError::Invalid {
                    var: "LOG_FORMAT",
                    value: other.to_string(),
                    expected: "text or json",
                })
            }
        };

        let port = {
            let value = or("PORT", "8000");
            value.parse().map_err(|_| SettingsError::Invalid {
                var: "PORT",
                value,
                expected: "a port number",
            })?
        };

        let backend = match or("MODERNIZER", "ollama").to_ascii_lowercase().as_str() {
            "ollama" => ModernizerBackend::Ollama,
            "anthropic" => ModernizerBackend::Anthropic,
            other => {
                return Err(SettingsError::Invalid {
                    var: "MODERNIZER",
                    value: other.to_string(),
                    expected: "ollama or anthropic",
                })
            }
        };

        Ok(Self {
            app_name: or("APP_NAME", "Jernkorset API"),
            app_version: or("APP_VERSION", "1.0.0"),
            debug,
            data_dir,
            letters_file: or("LETTERS_FILE", "placed_letters.csv"),
            places_file: or("PLACES_FILE", "places_cleanup.csv"),
            cors_origins,
            log_level,
            log_format,
            host: or("HOST", "0.0.0.0"),
            port,
            modernizer: ModernizerSettings {
                backend,
                ollama_url: or("OLLAMA_URL", ollama::DEFAULT_URL),
                ollama_model: or("OLLAMA_MODEL", ollama::DEFAULT_MODEL),
                anthropic_api_key: get(anthropic::API_KEY_VAR),
                anthropic_model: or("ANTHROPIC_MODEL", anthropic::DEFAULT_MODEL),
            },
        })
    }

    /// Full path to the letters CSV file.
    pub fn letters_path(&self) -> PathBuf {
        self.data_dir.join(&self.letters_file)
    }

    /// Full path to the places CSV file.
    pub fn places_path(&self) -> PathBuf {
        self.data_dir.join(&self.places_file)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_level(value: &str) -> Option<LevelFilter> {
    match value.to_ascii_lowercase().as_str() {
        "trace" => Some(LevelFilter::TRACE),
        "debug" => Some(LevelFilter::DEBUG),
        "info" => Some(LevelFilter::INFO),
        "warn" | "warning" => Some(LevelFilter::WARN),
        "error" | "critical" => Some(LevelFilter::ERROR),
        "off" => Some(LevelFilter::OFF),
        _ => None,
    }
}

/// Comma-separated origins; a `*` entry anywhere allows every origin.
fn parse_cors_origins(value: &str) -> Result<CorsOrigins, SettingsError> {
    let origins: Vec<String> = value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return Ok(CorsOrigins::Any);
    }

    if let Some(bad) = origins.iter().find(|o| HeaderValue::from_str(o).is_err()) {
        return Err(SettingsError::Invalid {
            var: "CORS_ORIGINS",
            value: bad.clone(),
            expected: "comma-separated origins such as http://localhost:5173",
        });
    }
    Ok(CorsOrigins::List(origins))
}
