use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShadowError {
    #[error("shadow algorithm `{algorithm}` failed: {reason}")]
    AlgorithmError { algorithm: String, reason: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse shadow config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("unknown shadow algorithm type: {0}")]
    UnknownAlgorithmType(String),

    #[error("shadow algorithm `{algorithm}` has invalid property `{property}`: {reason}")]
    InvalidProperty {
        algorithm: String,
        property: String,
        reason: String,
    },

    #[error("{kind} `{name}` referenced by `{owner}` is not configured")]
    UnknownReference {
        kind: &'static str,
        name: String,
        owner: String,
    },

    #[error("data sources `{first}` and `{second}` both map production data source `{production}`")]
    DuplicateProduction {
        production: String,
        first: String,
        second: String,
    },

    #[error("unknown shadow operation type: {0}")]
    UnknownOperation(String),
}
