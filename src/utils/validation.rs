use crate::error::{Error, Result};

/// Trims `value` and rejects it when nothing is left.
pub fn require_non_empty(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::BadRequest(format!("{} cannot be empty", field)));
    }
    Ok(trimmed.to_string())
}

pub fn normalize_email(email: &str) -> Result<String> {
    let email = require_non_empty("Email", email)?.to_lowercase();
    if !email.contains('@') {
        return Err(Error::BadRequest(format!("Invalid email address: {}", email)));
    }
    Ok(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_values() {
        assert!(matches!(
            require_non_empty("Password", "   "),
            Err(Error::BadRequest(_))
        ));
        assert_eq!(require_non_empty("Name", " Ann ").unwrap(), "Ann");
    }

    #[test]
    fn emails_are_lower_cased() {
        assert_eq!(normalize_email(" Ann@Example.COM ").unwrap(), "ann@example.com");
        assert!(normalize_email("nope").is_err());
    }
}
