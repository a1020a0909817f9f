use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid page config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid page config value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}
