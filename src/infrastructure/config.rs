use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub server: ServerSettings,
    pub cors: CorsSettings,
    pub storage: StorageSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind: String,
    pub environment: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CorsSettings {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
    #[serde(default)]
    pub allowed_suffixes: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageSettings {
    pub version_cap: usize,
    pub max_upload_bytes: usize,
}

impl ServerSettings {
    /// Internal error detail is only exposed outside production.
    pub fn is_development(&self) -> bool {
        self.environment != "production"
    }
}

impl CorsSettings {
    /// An origin is allowed when it matches an exact entry or ends with one
    /// of the configured suffix patterns.
    pub fn origin_allowed(&self, origin: &str) -> bool {
        self.allowed_origins.iter().any(|o| o == origin)
            || self
                .allowed_suffixes
                .iter()
                .any(|suffix| origin.ends_with(suffix.as_str()))
    }
}

pub fn load_server_config() -> anyhow::Result<ServerConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/server"))
        .build()?;

    Ok(settings.try_deserialize()?)
}
