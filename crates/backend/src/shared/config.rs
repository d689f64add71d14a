use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub upload: UploadConfig,
    pub enrichment: EnrichmentConfig,
    pub logging: LoggingConfig,
    /// Where the config was loaded from (None = embedded default)
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 3000 }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct UploadConfig {
    /// Upper bound for a multipart request body, in bytes
    pub max_bytes: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_bytes: 10 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct EnrichmentConfig {
    pub api_base: String,
    pub anthropic_version: String,
    pub model: String,
    pub max_tokens: u32,
    /// Unset means no timeout beyond the HTTP client default
    pub request_timeout_secs: Option<u64>,
    pub batch_limit: usize,
    pub cost_per_record: f64,
    pub retail_value_per_record: f64,
    /// Filled from ANTHROPIC_API_KEY, never read from the file
    #[serde(skip)]
    pub api_key: Option<ApiKey>,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.anthropic.com".to_string(),
            anthropic_version: "2023-06-01".to_string(),
            model: "claude-3-5-sonnet-20241022".to_string(),
            max_tokens: 1024,
            request_timeout_secs: None,
            batch_limit: 50,
            cost_per_record: 0.15,
            retail_value_per_record: 10.0,
            api_key: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub dir: String,
    pub file_name: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: "target/logs".to_string(),
            file_name: "backend.log".to_string(),
        }
    }
}

/// Service credential. Debug output is masked so the key never reaches logs.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(****)")
    }
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
port = 3000

[upload]
max_bytes = 10485760

[enrichment]
api_base = "https://api.anthropic.com"
anthropic_version = "2023-06-01"
model = "claude-3-5-sonnet-20241022"
max_tokens = 1024
batch_limit = 50
cost_per_record = 0.15
retail_value_per_record = 10.0

[logging]
dir = "target/logs"
file_name = "backend.log"
"#;

/// Load configuration and apply environment overrides.
///
/// Search order:
/// 1. `config.toml` in the working directory
/// 2. `config.toml` next to the executable
/// 3. Embedded default config
///
/// Called before tracing is initialized, so the chosen source is recorded
/// in `Config::source` instead of being logged here.
pub fn load_config() -> anyhow::Result<Config> {
    let mut config = match find_config_file() {
        Some(path) => {
            let contents = std::fs::read_to_string(&path)?;
            let mut config = parse_config(&contents)
                .map_err(|e| anyhow::anyhow!("invalid {}: {}", path.display(), e))?;
            config.source = Some(path);
            config
        }
        None => parse_config(DEFAULT_CONFIG)?,
    };

    apply_env_overrides(&mut config, |name| std::env::var(name).ok())?;
    Ok(config)
}

pub fn parse_config(contents: &str) -> Result<Config, toml::de::Error> {
    toml::from_str(contents)
}

fn find_config_file() -> Option<PathBuf> {
    let local = Path::new("config.toml");
    if local.exists() {
        return Some(local.to_path_buf());
    }

    let exe_path = std::env::current_exe().ok()?;
    let candidate = exe_path.parent()?.join("config.toml");
    candidate.exists().then_some(candidate)
}

/// Apply ANTHROPIC_API_KEY and PORT on top of the file config.
/// `lookup` abstracts `std::env::var` for tests.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> anyhow::Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(key) = lookup("ANTHROPIC_API_KEY").filter(|k| !k.trim().is_empty()) {
        config.enrichment.api_key = Some(ApiKey::new(key.trim()));
    }

    if let Some(port) = lookup("PORT") {
        config.server.port = port
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid PORT value {:?}: {}", port, e))?;
    }

    Ok(())
}
