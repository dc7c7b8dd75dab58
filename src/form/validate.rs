// src/form/validate.rs
use crate::errors::ValidationError;

/// Checks a raw repository URL the way the form does before submitting and
/// returns the trimmed value to send.
///
/// Only two things are checked: something was entered, and it mentions
/// `github.com`. Whether the repository exists is the backend's business.
pub fn validate_repo_url(input: &str) -> Result<&str, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyUrl);
    }
    if !trimmed.contains("github.com") {
        return Err(ValidationError::NotGithub);
    }
    Ok(trimmed)
}
