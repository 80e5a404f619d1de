//! Validation error types

use std::fmt;

/// Validation error for a submitted registration
///
/// `Display` is the client-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    MissingName,
    MissingDate,
    InvalidEmail,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingName => write!(f, "Missing name"),
            Self::MissingDate => write!(f, "Missing date"),
            Self::InvalidEmail => write!(f, "Invalid email"),
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(ValidationError::MissingName.to_string(), "Missing name");
        assert_eq!(ValidationError::MissingDate.to_string(), "Missing date");
        assert_eq!(ValidationError::InvalidEmail.to_string(), "Invalid email");
    }
}
