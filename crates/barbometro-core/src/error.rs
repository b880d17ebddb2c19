use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read guides file {path}: {source}")]
    GuidesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse guides file: {0}")]
    GuidesFileParse(#[from] serde_yaml::Error),

    #[error("guides validation failed: {0}")]
    Validation(String),
}
