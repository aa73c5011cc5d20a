use thiserror::Error;

#[derive(Error, Debug)]
pub enum LookoutConfigError {
    #[error("missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("failed to parse toml config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to parse json config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl LookoutConfigError {
    pub fn missing_env(var_name: impl Into<String>) -> Self {
        Self::MissingEnvVar(var_name.into())
    }
}

pub type Result<T, E = LookoutConfigError> = std::result::Result<T, E>;
