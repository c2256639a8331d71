use thiserror::Error;

use crate::validate::FieldErrors;

pub(crate) type Result<T> = std::result::Result<T, BudgetError>;

/// Terminal failures of a quote request. None of them are retried.
#[derive(Error, Debug)]
pub(crate) enum BudgetError {
    #[error("{0}")]
    Validation(FieldErrors),

    #[error("{0}")]
    NotFound(String),

    #[error("Storage failure: {0}")]
    Store(String),
}

impl BudgetError {
    /// HTTP-equivalent status: 422 for rejected input, 404 otherwise.
    pub(crate) fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 422,
            Self::NotFound(_) | Self::Store(_) => 404,
        }
    }

    /// User-facing lines, one per message.
    pub(crate) fn messages(&self) -> Vec<String> {
        match self {
            Self::Validation(errors) => errors.messages().map(str::to_string).collect(),
            Self::NotFound(msg) => vec![msg.clone()],
            Self::Store(_) => vec![self.to_string()],
        }
    }
}

impl From<FieldErrors> for BudgetError {
    fn from(errors: FieldErrors) -> Self {
        Self::Validation(errors)
    }
}

impl From<anyhow::Error> for BudgetError {
    fn from(err: anyhow::Error) -> Self {
        Self::Store(format!("{err:#}"))
    }
}
