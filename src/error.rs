use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised at the harness boundary. The kernel itself never fails.
#[derive(Debug, Error)]
pub enum Error {
    /// A variant name that maps to no kernel.
    #[error("invalid option: unknown variant `{0}` (try --list)")]
    UnknownVariant(String),

    /// A run configuration value out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_variant_message_names_the_token() {
        let e = Error::UnknownVariant("sse3".to_string());
        let msg = e.to_string();
        assert!(msg.contains("invalid option"));
        assert!(msg.contains("sse3"));
    }
}
