use thiserror::Error;

use crate::config::ConfigError;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("cart index {index} is out of range for {len} item(s)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("catalog index {index} is out of range for {len} entry(ies)")]
    CatalogSelection { index: usize, len: usize },
    #[error("cart is empty")]
    EmptyCart,
    #[error("domain invariant violation: {0}")]
    InvariantViolation(String),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("configuration failure: {0}")]
    Configuration(String),
}

impl From<ConfigError> for ApplicationError {
    fn from(value: ConfigError) -> Self {
        Self::Configuration(value.to_string())
    }
}

impl ApplicationError {
    /// Stable, machine-readable class used by command payloads.
    pub fn error_class(&self) -> &'static str {
        match self {
            Self::Domain(DomainError::IndexOutOfRange { .. })
            | Self::Domain(DomainError::CatalogSelection { .. }) => "selection",
            Self::Domain(DomainError::EmptyCart)
            | Self::Domain(DomainError::InvariantViolation(_)) => "domain_validation",
            Self::Configuration(_) => "config_validation",
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Domain(DomainError::IndexOutOfRange { .. })
            | Self::Domain(DomainError::CatalogSelection { .. }) => {
                "The selected item does not exist. Check the index and try again."
            }
            Self::Domain(DomainError::EmptyCart) => {
                "The cart is empty. Add items before checkout."
            }
            Self::Domain(DomainError::InvariantViolation(_)) => {
                "The request could not be processed. Check inputs and try again."
            }
            Self::Configuration(_) => "The pricing configuration is invalid.",
        }
    }
}
