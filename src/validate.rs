//! Field checks shared by the request models

use crate::error::ValidationError;

/// Minimum password length accepted at sign-up and reset
pub const MIN_PASSWORD_LEN: usize = 8;

pub fn required(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "is required"));
    }
    Ok(())
}

pub fn email(field: &'static str, value: &str) -> Result<(), ValidationError> {
    let invalid = || ValidationError::new(field, "must be a valid email address");

    let (local, domain) = value.split_once('@').ok_or_else(invalid)?;
    if local.is_empty()
        || domain.contains('@')
        || value.chars().any(char::is_whitespace)
        || !domain.contains('.')
        || domain.starts_with('.')
        || domain.ends_with('.')
    {
        return Err(invalid());
    }
    Ok(())
}

pub fn password(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::new(
            field,
            format!("must be at least {} characters", MIN_PASSWORD_LEN),
        ));
    }
    Ok(())
}

/// `+` followed by 8 to 15 digits, first digit non-zero
pub fn e164(field: &'static str, value: &str) -> Result<(), ValidationError> {
    let digits = value.strip_prefix('+').unwrap_or("");
    let valid = (8..=15).contains(&digits.len())
        && digits.chars().all(|c| c.is_ascii_digit())
        && !digits.starts_with('0');

    if !valid {
        return Err(ValidationError::new(
            field,
            "must be in E.164 format, e.g. +14155550123",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required() {
        assert!(required("name", "Ava").is_ok());
        assert!(required("name", "").is_err());
        assert!(required("name", "   ").is_err());
    }

    #[test]
    fn test_email() {
        assert!(email("email", "ops@example.com").is_ok());
        assert!(email("email", "a.b+tag@mail.example.io").is_ok());

        for bad in ["", "ops", "@example.com", "ops@", "ops@example", "a@@b.com", "a b@c.io", "ops@.com"] {
            assert!(email("email", bad).is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_password_length() {
        assert!(password("password", "12345678").is_ok());
        assert!(password("password", "1234567").is_err());
    }

    #[test]
    fn test_e164() {
        assert!(e164("phone", "+14155550123").is_ok());
        assert!(e164("phone", "+442071838750").is_ok());

        for bad in ["14155550123", "+1415", "+0123456789", "+1415555012x", "+1234567890123456"] {
            assert!(e164("phone", bad).is_err(), "accepted {:?}", bad);
        }
    }
}
