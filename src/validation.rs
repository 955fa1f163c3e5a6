//! Input validation for posts and users.

use crate::error::{BlogError, Result};

/// Maximum allowed length for a username added through the CLI.
pub const MAX_USERNAME_LENGTH: usize = 256;

/// Validates a post title. Any non-empty title is accepted.
pub fn validate_title(title: &str) -> Result<()> {
    if title.is_empty() {
        return Err(BlogError::Validation("Title cannot be empty".to_string()));
    }
    Ok(())
}

/// Validates a username for a new user.
///
/// Only applies to user creation; `createPost` looks usernames up as given.
pub fn validate_username(username: &str) -> Result<()> {
    if username.trim().is_empty() {
        return Err(BlogError::Validation(
            "Username cannot be empty".to_string(),
        ));
    }
    if username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(BlogError::Validation(format!(
            "Username exceeds maximum length of {} characters",
            MAX_USERNAME_LENGTH
        )));
    }
    Ok(())
}
