use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FinancingError {
    #[error("No cases provided to {0}")]
    EmptyCaseSet(&'static str),

    #[error("Failed to read case catalog {path}: {source}")]
    CatalogIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid case catalog: {0}")]
    CatalogParse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FinancingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FinancingError::EmptyCaseSet("train");
        assert_eq!(err.to_string(), "No cases provided to train");

        let parse = serde_json::from_str::<u32>("x").unwrap_err();
        let err = FinancingError::from(parse);
        assert!(err.to_string().starts_with("Invalid case catalog: "));
    }
}
