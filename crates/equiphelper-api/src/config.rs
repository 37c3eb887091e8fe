use config::{Config as ConfigLoader, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_REFERENCE_SOURCE: &str = "https://eca-2.vercel.app/docs/newdata.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub llm: LlmConfig,
    pub reference: ReferenceConfig,
    pub store: StoreConfig,
    pub logging: LoggingConfig,
    
    // Secrets (from ENV only)
    #[serde(skip_serializing)]
    pub openai_api_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound for a whole request, including upstream calls
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            request_timeout_secs: 120,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub enabled: bool,
    pub origins: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub model: String,
    pub temperature: f32,
    /// OpenAI-compatible endpoint, defaults to the public API
    pub base_url: Option<String>,
    /// Completion length cap; unset leaves the provider default
    pub max_tokens: Option<u32>,
    pub timeout_ms: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o".to_string(),
            temperature: 0.1,
            base_url: None,
            max_tokens: None,
            timeout_ms: 60_000,
        }
    }
}

impl LlmConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceConfig {
    /// JSON documents fetched on every request
    pub sources: Vec<String>,
    /// Context is cut to this many characters before prompting
    pub max_context_chars: usize,
    pub timeout_ms: u64,
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            sources: vec![DEFAULT_REFERENCE_SOURCE.to_string()],
            max_context_chars: 10_000,
            timeout_ms: 10_000,
        }
    }
}

impl ReferenceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Idle lifetime of a session transcript; 0 keeps transcripts for the process lifetime
    pub ttl_secs: u64,
}

impl StoreConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from TOML files and environment variables
    /// 
    /// Hierarchy (weakest to strongest):
    /// 1. built-in defaults
    /// 2. config/default.toml
    /// 3. config/{ENV}.toml (if ENV is set)
    /// 4. Environment variables, e.g. `EQUIPHELPER_LLM__MODEL=gpt-4o-mini`
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("ENV").unwrap_or_else(|_| "dev".to_string());
        
        let builder = ConfigLoader::builder()
            // 1. Load default config
            .add_source(File::with_name("config/default").required(false))
            // 2. Load environment-specific config
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            // 3. Environment variables override everything
            .add_source(
                Environment::with_prefix("EQUIPHELPER")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("reference.sources")
                    .with_list_parse_key("cors.origins")
                    .try_parsing(true)
            );
        
        let config = builder.build()?;
        
        let mut cfg: Config = config.try_deserialize()?;
        
        // Load secrets from ENV (not in TOML)
        cfg.openai_api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| ConfigError::Message("OPENAI_API_KEY environment variable is required".to_string()))?;
        
        cfg.validate()?;
        Ok(cfg)
    }
    
    /// Load config from a specific path (useful for testing)
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let builder = ConfigLoader::builder()
            .add_source(File::from(path.as_ref()));
        
        let config = builder.build()?;
        let cfg: Config = config.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }
    
    fn validate(&self) -> Result<(), ConfigError> {
        if self.reference.sources.is_empty() {
            return Err(ConfigError::Message("reference.sources must list at least one URL".to_string()));
        }
        if self.llm.timeout_ms == 0 || self.reference.timeout_ms == 0 {
            return Err(ConfigError::Message("llm.timeout_ms and reference.timeout_ms must be positive".to_string()));
        }
        // The outer layer must not cut off a request still inside its stage budgets
        let stage_budget_ms = self.reference.timeout_ms.saturating_add(self.llm.timeout_ms);
        if self.server.request_timeout_secs.saturating_mul(1000) <= stage_budget_ms {
            return Err(ConfigError::Message(format!(
                "server.request_timeout_secs must exceed reference.timeout_ms + llm.timeout_ms ({} ms)",
                stage_budget_ms
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    
    #[test]
    fn test_config_structure() {
        let toml = r#"
            [server]
            host = "127.0.0.1"
            port = 8080
            request_timeout_secs = 30
            
            [cors]
            enabled = true
            origins = ["http://localhost:3000"]
            
            [llm]
            model = "gpt-4o-mini"
            temperature = 0.2
            timeout_ms = 5000
            
            [reference]
            sources = ["http://localhost:9000/a.json", "http://localhost:9000/b.json"]
            max_context_chars = 2000
            timeout_ms = 1000
            
            [store]
            ttl_secs = 3600
            
            [logging]
            level = "debug"
            format = "json"
        "#;
        
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.reference.sources.len(), 2);
        assert_eq!(config.store.ttl(), Duration::from_secs(3600));
        assert!(config.validate().is_ok());
    }
    
    #[test]
    fn test_defaults_match_service_contract() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.llm.model, "gpt-4o");
        assert!((config.llm.temperature - 0.1).abs() < f32::EPSILON);
        assert_eq!(config.reference.max_context_chars, 10_000);
        assert_eq!(config.reference.sources, vec![DEFAULT_REFERENCE_SOURCE.to_string()]);
        assert_eq!(config.store.ttl_secs, 0);
    }
    
    #[test]
    fn test_empty_sources_rejected() {
        let config: Config = toml::from_str("[reference]\nsources = []").unwrap();
        assert!(config.validate().is_err());
    }
    
    #[test]
    fn test_request_timeout_must_cover_stage_budgets() {
        assert!(Config::default().validate().is_ok());
        
        let toml = r#"
            [server]
            request_timeout_secs = 30
            
            [llm]
            timeout_ms = 60000
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("request_timeout_secs"));
        
        let toml = r#"
            [server]
            request_timeout_secs = 6
            
            [llm]
            timeout_ms = 5000
            
            [reference]
            timeout_ms = 1000
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert!(config.validate().is_err());
        
        let config: Config = toml::from_str("[server]\nrequest_timeout_secs = 0").unwrap();
        assert!(config.validate().is_err());
    }
}
