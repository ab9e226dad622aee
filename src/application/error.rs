use thiserror::Error;

use crate::domain::{FetchError, ValidationError};
use crate::report::ExportError;

/// Everything a session operation can fail with. None of these end the session.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

impl AppError {
    /// Status line shown to the user, mirroring the wording of each failure class.
    pub fn status_text(&self) -> String {
        match self {
            AppError::Validation(ValidationError::MissingBudget) => {
                "Please enter your budget.".to_string()
            }
            AppError::Validation(e) => format!("Please enter a valid category and amount ({e})."),
            AppError::Fetch(e) => format!("Failed to retrieve market data: {e}"),
            AppError::Export(e) => format!("Failed to export report: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_text() {
        assert_eq!(
            AppError::from(ValidationError::MissingBudget).status_text(),
            "Please enter your budget."
        );
        assert_eq!(
            AppError::from(ValidationError::InvalidAmount).status_text(),
            "Please enter a valid category and amount (invalid amount)."
        );
        assert_eq!(
            AppError::from(FetchError::malformed("missing 'Time Series (Daily)'")).status_text(),
            "Failed to retrieve market data: malformed response: missing 'Time Series (Daily)'"
        );
    }
}
