use thiserror::Error;

/// Errors raised while reading process environment variables.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvError {
    /// The variable is not set (or is not valid unicode).
    #[error("Missing environment variable: {0}")]
    Missing(String),

    /// The variable is set but holds only whitespace.
    #[error("Environment variable {0} is empty")]
    Empty(String),
}

/// Reads a required environment variable.
///
/// Surrounding whitespace is trimmed, so a key pasted with a trailing newline
/// still works. A variable that is set but blank is reported as
/// [`EnvError::Empty`] rather than handed back as an empty secret.
///
/// # Arguments
/// * `name` - The name of the environment variable to read.
pub fn get_env_var(name: &str) -> Result<String, EnvError> {
    let raw = std::env::var(name).map_err(|_| EnvError::Missing(name.to_string()))?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EnvError::Empty(name.to_string()));
    }
    Ok(trimmed.to_string())
}
