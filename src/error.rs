use thiserror::Error;

pub type Result<T> = std::result::Result<T, MannWhitneyError>;

#[derive(Debug, Error)]
pub enum MannWhitneyError {
    /// Every pooled value is identical, so the tie correction is zero.
    #[error("all numbers are identical")]
    DegenerateInput,

    #[error("no distribution table for sample sizes '{key}'")]
    MissingTableEntry { key: String },

    /// `line` is 1-based within the table source, 0 when the columns did not
    /// come from text.
    #[error("malformed table record at line {line}: {reason}")]
    Format { line: usize, reason: String },

    #[error("sample values must be finite")]
    NonFiniteSample,

    #[error("unknown alternative '{0}' (expected 'less', 'greater' or 'two-sided')")]
    InvalidAlternative(String),

    #[error("invalid generator config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl MannWhitneyError {
    pub(crate) fn format(line: usize, reason: impl Into<String>) -> Self {
        MannWhitneyError::Format {
            line,
            reason: reason.into(),
        }
    }
}
