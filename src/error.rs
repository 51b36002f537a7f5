use thiserror::Error;

/// Failures of the recommendation pipeline.
///
/// Invalid requests (a user without preferences, too many latent values) are not errors,
/// they produce no recommendation. The variants here signal inconsistent state or
/// numerical trouble.
#[derive(Debug, Error)]
pub enum RecommendError {
    #[error("dimension mismatch for {what}: expected {expected}, got {actual}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("cannot decompose a degenerate {rows}x{cols} matrix")]
    DegenerateMatrix { rows: usize, cols: usize },

    #[error("singular value decomposition failed: {0}")]
    DecompositionFailed(String),

    #[error("non-finite score {value} for ingredient column {column}")]
    NonFiniteScore { column: usize, value: f64 },

    #[error("invalid recommender configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("could not read recommender configuration: {0}")]
    Io(#[from] std::io::Error),
}

/// Fails with [`RecommendError::DimensionMismatch`] unless `actual == expected`.
pub(crate) fn ensure_dimension(
    what: &'static str,
    expected: usize,
    actual: usize,
) -> Result<(), RecommendError> {
    if expected != actual {
        return Err(RecommendError::DimensionMismatch { what, expected, actual });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_dimension() {
        assert!(ensure_dimension("columns", 3, 3).is_ok());

        let err = ensure_dimension("columns", 3, 2).unwrap_err();
        assert!(matches!(
            err,
            RecommendError::DimensionMismatch { what: "columns", expected: 3, actual: 2 }
        ));
        assert_eq!(err.to_string(), "dimension mismatch for columns: expected 3, got 2");
    }
}
