//! Error types for hex terrain generation

use std::fmt;

/// Errors that can occur while configuring or editing a hex grid
///
/// Broken cell-graph invariants are not represented here: they indicate a
/// programming error and panic instead.
#[derive(Debug, Clone, PartialEq)]
pub enum HexError {
    /// Configuration validation failed
    InvalidConfig(String),
    /// Requested cell index does not exist
    CellNotFound(usize),
}

impl fmt::Display for HexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HexError::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
            HexError::CellNotFound(index) => write!(f, "cell not found: {}", index),
        }
    }
}

impl std::error::Error for HexError {}

/// Result type alias for hex terrain operations
pub type Result<T> = std::result::Result<T, HexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            HexError::InvalidConfig("width must be >= 1".into()).to_string(),
            "invalid configuration: width must be >= 1"
        );
        assert_eq!(HexError::CellNotFound(12).to_string(), "cell not found: 12");
    }
}
