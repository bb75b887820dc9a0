//! Request handlers module

use std::borrow::Cow;

use serde::Serialize;
use validator::ValidationError;

pub mod department;
pub mod staff;

const NAME_MAX_CHARS: usize = 100;

/// Plain `{ "message": ... }` body
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

fn rule_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

/// Non-blank, at most 100 characters
pub(crate) fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(rule_error("blank", "Name must not be blank"));
    }
    if name.chars().count() > NAME_MAX_CHARS {
        return Err(rule_error("length", "Name must be at most 100 characters"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Ann").is_ok());
        assert_eq!(validate_name("   ").unwrap_err().code, "blank");
        assert_eq!(validate_name(&"x".repeat(101)).unwrap_err().code, "length");
        assert!(validate_name(&"é".repeat(100)).is_ok());
    }
}
