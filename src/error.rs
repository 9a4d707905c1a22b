use thiserror::Error;

#[derive(Debug, Error)]
pub enum KisanAiError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("runtime error: {0}")]
    Runtime(String),
}

pub type Result<T> = std::result::Result<T, KisanAiError>;

impl From<serde_json::Error> for KisanAiError {
    fn from(err: serde_json::Error) -> Self {
        KisanAiError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_category() {
        let err = KisanAiError::Storage("disk full".to_string());
        assert_eq!(format!("{err}"), "storage error: disk full");

        let err: KisanAiError = serde_json::from_str::<serde_json::Value>("{bad")
            .unwrap_err()
            .into();
        assert!(matches!(err, KisanAiError::Serialization(_)));
    }
}
