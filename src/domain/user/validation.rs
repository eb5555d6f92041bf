//! Validation rules shared by create, update, and password change

use crate::domain::DomainError;

/// Reject passwords that contain the username as a substring,
/// case-insensitively. The error names the offending field so the API layer
/// can surface it as a parameter error.
pub fn validate_password(username: &str, password: &str) -> Result<(), DomainError> {
    // An empty username is a substring of every password, so it is
    // always rejected here
    if password
        .to_lowercase()
        .contains(&username.to_lowercase())
    {
        return Err(DomainError::invalid_argument(
            "Password",
            "Password contains Username",
        ));
    }

    Ok(())
}
